//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use train_core::ContentError;
use train_core::games::GameError;
use train_core::model::ActivityId;

/// Errors emitted by `TrainingService`.
///
/// Storage failures never show up here; the progress store absorbs them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainingError {
    #[error(transparent)]
    MissingContent(#[from] ContentError),
    #[error("activity {0} is not the active activity")]
    NotActive(ActivityId),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
