pub mod forms;

pub use forms::{FailureResponse, FormResponse, FormSubmission, MessageResponse, SubmitFormResponse};
