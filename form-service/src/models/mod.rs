pub mod coerce;
pub mod form;

pub use form::{parse_form_id, Field, Form};
