use crate::models::Form;
use crate::services::repository::{DeleteOutcome, FormStore};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Mutex;

/// Process-local [`FormStore`] keeping forms in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFormStore {
    forms: Mutex<Vec<Form>>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_forms<T>(&self, f: impl FnOnce(&mut Vec<Form>) -> T) -> Result<T, AppError> {
        let mut forms = self
            .forms
            .lock()
            .map_err(|_| AppError::InternalError(anyhow::anyhow!("form store lock poisoned")))?;
        Ok(f(&mut forms))
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn insert(&self, form: Form) -> Result<Form, AppError> {
        self.with_forms(|forms| {
            forms.push(form.clone());
            form
        })
    }

    async fn find_all(&self) -> Result<Vec<Form>, AppError> {
        self.with_forms(|forms| forms.clone())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteOutcome, AppError> {
        self.with_forms(|forms| {
            let before = forms.len();
            forms.retain(|form| form.id != id);
            DeleteOutcome {
                deleted_count: (before - forms.len()) as u64,
            }
        })
    }
}
