pub mod error;
pub mod forms;
pub mod health;
pub mod submission;

pub use error::FormApiError;
pub use forms::{delete_form, list_forms, submit_form};
pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
