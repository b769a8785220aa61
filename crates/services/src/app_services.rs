use std::sync::Arc;

use storage::repository::Storage;
use train_core::model::TrainingSettings;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::training_service::TrainingService;

/// Wires storage, clock and settings together for the host app.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    clock: Clock,
    settings: TrainingSettings,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        settings: TrainingSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self {
            storage,
            clock,
            settings,
        })
    }

    /// Services that keep progress in memory only.
    #[must_use]
    pub fn in_memory(clock: Clock, settings: TrainingSettings) -> Self {
        Self {
            storage: Storage::in_memory(),
            clock,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &TrainingSettings {
        &self.settings
    }

    #[must_use]
    pub fn progress_store(&self) -> ProgressStore {
        ProgressStore::new(self.clock, Arc::clone(&self.storage.progress))
    }

    /// Load progress and open a training session.
    pub async fn training(&self) -> TrainingService {
        TrainingService::open(self.progress_store(), self.settings.clone()).await
    }
}
