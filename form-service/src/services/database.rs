use crate::config::{MongoConfig, SERVICE_NAME};
use crate::models::Form;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;

/// Used when neither `MONGO_DATABASE` nor the connection string names one.
pub const DEFAULT_DATABASE: &str = "test";
pub const FORMS_COLLECTION: &str = "forms";

#[derive(Clone, Debug)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Parses the connection string and pings the server. Succeeds only once
    /// the deployment has answered.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.redacted_url(), "Connecting to MongoDB");

        let mut options = ClientOptions::parse(config.url.expose_secret()).await?;
        options.app_name = Some(SERVICE_NAME.to_string());

        let database = config
            .database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = MongoClient::with_options(options)?;
        let db = client.database(&database);
        let mongo = Self { client, db };

        mongo.health_check().await?;
        tracing::info!(database = %database, "Successfully connected to MongoDB database");

        Ok(mongo)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn forms(&self) -> Collection<Form> {
        self.db.collection(FORMS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
