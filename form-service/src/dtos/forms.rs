use crate::models::{coerce, Field, Form};
use serde::{Deserialize, Serialize};

pub const FORM_SUBMITTED: &str = "Form Submitted Successfully";
pub const FORM_DELETED: &str = "Form Deleted Successfully";
pub const SUBMIT_FAILED: &str = "Failed To Submit Form";
pub const FETCH_FAILED: &str = "Failed To Fetch Forms";
pub const DELETE_FAILED: &str = "Failed To Delete Form";

/// Body of `POST /api/forms`. Unknown keys are dropped; see
/// [`coerce`] for how loosely typed values are normalised.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::list")]
    pub fields: Vec<Field>,
}

impl From<FormSubmission> for Form {
    fn from(submission: FormSubmission) -> Self {
        Form::new(submission.title, submission.fields)
    }
}

/// A form as returned to clients; the id is rendered as a hex string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub fields: Vec<Field>,
}

impl From<Form> for FormResponse {
    fn from(form: Form) -> Self {
        Self {
            id: form.id.to_hex(),
            title: form.title,
            fields: form.fields,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitFormResponse {
    pub message: String,
    pub data: FormResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FailureResponse {
    pub message: String,
    pub error: String,
}
