use crate::models::Form;
use crate::services::connection::{DatastoreConnection, Readiness};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use service_core::error::AppError;

/// Result of a delete; a miss is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn matched(&self) -> bool {
        self.deleted_count > 0
    }
}

/// Persistence for submitted forms.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Persists `form` as given, including its id, and returns what was stored.
    async fn insert(&self, form: Form) -> Result<Form, AppError>;

    /// Every stored form, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Form>, AppError>;

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteOutcome, AppError>;

    fn readiness(&self) -> Readiness {
        Readiness::Ready
    }
}

#[derive(Clone)]
pub struct MongoFormRepository {
    connection: DatastoreConnection,
}

impl MongoFormRepository {
    pub fn new(connection: DatastoreConnection) -> Self {
        Self { connection }
    }

    fn forms(&self) -> Result<Collection<Form>, AppError> {
        Ok(self.connection.database()?.forms())
    }
}

#[async_trait]
impl FormStore for MongoFormRepository {
    async fn insert(&self, form: Form) -> Result<Form, AppError> {
        self.forms()?.insert_one(&form, None).await?;
        Ok(form)
    }

    async fn find_all(&self) -> Result<Vec<Form>, AppError> {
        let cursor = self.forms()?.find(None, None).await?;
        let forms: Vec<Form> = cursor.try_collect().await?;
        Ok(forms)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteOutcome, AppError> {
        let result = self.forms()?.delete_one(doc! { "_id": id }, None).await?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    fn readiness(&self) -> Readiness {
        self.connection.readiness()
    }
}
