pub mod connection;
pub mod database;
pub mod memory;
pub mod metrics;
pub mod repository;

pub use connection::{DatastoreConnection, DatastoreState, Readiness};
pub use database::MongoDb;
pub use memory::InMemoryFormStore;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{DeleteOutcome, FormStore, MongoFormRepository};
