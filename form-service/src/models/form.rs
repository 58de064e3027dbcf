use super::coerce;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// One input element of a form and the answer submitted for it.
///
/// Embedded in [`Form`]; it has no identity of its own. `id` is whatever
/// the client sent and is not checked for uniqueness, and
/// `selected_options` is not checked against `options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default, deserialize_with = "coerce::text")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "coerce::text")]
    pub kind: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub label: String,
    #[serde(default, deserialize_with = "coerce::text_list")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "coerce::index_list")]
    pub selected_options: Vec<i64>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub value: String,
}

/// A stored submission, as it lives in the `forms` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Form {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::list")]
    pub fields: Vec<Field>,
}

impl Form {
    /// Builds a new form with a freshly generated id.
    pub fn new(title: Option<String>, fields: Vec<Field>) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            fields,
        }
    }
}

/// Parses a form id taken from a URL.
pub fn parse_form_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "Cast to ObjectId failed for value \"{}\": {}",
            raw,
            e
        ))
    })
}
