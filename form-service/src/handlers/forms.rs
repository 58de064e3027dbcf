use crate::dtos::forms::{
    FormResponse, MessageResponse, SubmitFormResponse, FORM_DELETED, FORM_SUBMITTED,
};
use crate::handlers::error::FormApiError;
use crate::handlers::submission::SubmissionBody;
use crate::models::{parse_form_id, Form};
use crate::services::metrics::{record_delete, record_fetch, record_submission};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

pub async fn submit_form(
    State(state): State<AppState>,
    payload: Result<SubmissionBody, FormApiError>,
) -> Result<Json<SubmitFormResponse>, FormApiError> {
    let submission = match payload {
        Ok(SubmissionBody(submission)) => submission,
        Err(e) => {
            tracing::error!(error = %e, "Error saving form");
            record_submission(false);
            return Err(e);
        }
    };

    tracing::debug!(
        title = ?submission.title,
        field_count = submission.fields.len(),
        "Received form submission"
    );

    let form = state
        .forms
        .insert(Form::from(submission))
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Error saving form");
            record_submission(false);
            FormApiError::Submit(e)
        })?;

    tracing::info!(form_id = %form.id, "Form saved successfully");
    record_submission(true);

    Ok(Json(SubmitFormResponse {
        message: FORM_SUBMITTED.to_string(),
        data: FormResponse::from(form),
    }))
}

pub async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<Vec<FormResponse>>, FormApiError> {
    let forms = state.forms.find_all().await.map_err(|e| {
        tracing::error!(error = ?e, "Error fetching forms");
        record_fetch(false);
        FormApiError::Fetch(e)
    })?;

    tracing::info!(count = forms.len(), "Retrieved forms from database");
    record_fetch(true);

    Ok(Json(forms.into_iter().map(FormResponse::from).collect()))
}

/// Deleting an id that matches nothing still succeeds; the miss is only
/// visible in logs and metrics.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
) -> Result<Json<MessageResponse>, FormApiError> {
    let fail = |e: AppError| {
        tracing::error!(form_id = %form_id, error = ?e, "Error deleting form");
        record_delete(false, false);
        FormApiError::Delete(e)
    };

    let id = parse_form_id(&form_id).map_err(fail)?;
    let outcome = state.forms.delete_by_id(id).await.map_err(fail)?;

    tracing::info!(
        form_id = %form_id,
        deleted_count = outcome.deleted_count,
        "Deleted form"
    );
    record_delete(true, outcome.matched());

    Ok(Json(MessageResponse {
        message: FORM_DELETED.to_string(),
    }))
}
