use std::sync::Arc;
use std::time::Duration;

use playlife_core::submission::{ObjectStorage, SubmissionAdapter};
use playlife_db::record_store::PgRecordStore;

use crate::config::ServerConfig;
use crate::wizards::WizardRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: playlife_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Submits wizard drafts to object storage and the mission table.
    pub submissions: Arc<SubmissionAdapter>,
    /// Open mission wizards, keyed by id.
    pub wizards: Arc<WizardRegistry>,
}

impl AppState {
    /// Wire the submission adapter to `storage` and the Postgres record store.
    pub fn new(
        pool: playlife_db::DbPool,
        config: ServerConfig,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        let records = Arc::new(PgRecordStore::new(pool.clone()));
        let wizards = WizardRegistry::new(Duration::from_secs(config.wizard_idle_secs));
        Self {
            pool,
            config: Arc::new(config),
            submissions: Arc::new(SubmissionAdapter::new(storage, records)),
            wizards: Arc::new(wizards),
        }
    }
}
