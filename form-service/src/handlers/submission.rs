use crate::dtos::forms::FormSubmission;
use crate::handlers::error::FormApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};

/// Request body of `POST /api/forms`.
///
/// Only `application/json` bodies are parsed. A request with another (or
/// no) content type, or with an empty body, is an empty submission.
#[derive(Debug)]
pub struct SubmissionBody(pub FormSubmission);

#[async_trait]
impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = FormApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self(FormSubmission::default()));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(FormSubmission::default()));
        }

        let Json(submission) = Json::<FormSubmission>::from_bytes(&bytes)?;
        Ok(Self(submission))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
