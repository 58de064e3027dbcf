//! Background datastore connection with an observable readiness state.
//!
//! The state moves `Connecting -> Ready` or `Connecting -> Failed` exactly
//! once; a failed connection is not retried.

use crate::config::MongoConfig;
use crate::services::MongoDb;
use service_core::error::AppError;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub enum DatastoreState {
    Connecting,
    Ready(MongoDb),
    Failed(String),
}

/// [`DatastoreState`] without the live handle, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Connecting,
    Ready,
    Failed(String),
}

impl Readiness {
    pub fn name(&self) -> &'static str {
        match self {
            Readiness::Connecting => "connecting",
            Readiness::Ready => "ready",
            Readiness::Failed(_) => "failed",
        }
    }
}

impl DatastoreState {
    pub fn readiness(&self) -> Readiness {
        match self {
            DatastoreState::Connecting => Readiness::Connecting,
            DatastoreState::Ready(_) => Readiness::Ready,
            DatastoreState::Failed(reason) => Readiness::Failed(reason.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatastoreConnection {
    state: watch::Receiver<DatastoreState>,
}

impl DatastoreConnection {
    /// Starts connecting in a background task and returns immediately in the
    /// `Connecting` state. Must be called from within a tokio runtime.
    pub fn spawn(config: MongoConfig) -> Self {
        let (tx, rx) = watch::channel(DatastoreState::Connecting);

        tokio::spawn(async move {
            let state = match MongoDb::connect(&config).await {
                Ok(db) => {
                    tracing::info!("MongoDB connected successfully");
                    DatastoreState::Ready(db)
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        uri = %config.redacted_url(),
                        "MongoDB connection error"
                    );
                    DatastoreState::Failed(e.detail())
                }
            };
            tx.send_replace(state);
        });

        Self { state: rx }
    }

    /// A connection pinned to `state`, never changing.
    pub fn fixed(state: DatastoreState) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self { state: rx }
    }

    pub fn readiness(&self) -> Readiness {
        self.state.borrow().readiness()
    }

    /// Waits until the connection attempt has either succeeded or failed.
    pub async fn resolved(&self) -> Readiness {
        let mut rx = self.state.clone();
        let result = rx
            .wait_for(|state| !matches!(state, DatastoreState::Connecting))
            .await
            .map(|state| state.readiness());

        result.unwrap_or_else(|_| {
            Readiness::Failed("datastore connection task ended before resolving".to_string())
        })
    }

    /// The live handle, or the reason there isn't one.
    pub fn database(&self) -> Result<MongoDb, AppError> {
        match &*self.state.borrow() {
            DatastoreState::Ready(db) => Ok(db.clone()),
            DatastoreState::Connecting => Err(AppError::ServiceUnavailable(
                "MongoDB connection is still being established".to_string(),
            )),
            DatastoreState::Failed(reason) => Err(AppError::DatabaseError(anyhow::anyhow!(
                "MongoDB connection failed: {}",
                reason
            ))),
        }
    }
}
