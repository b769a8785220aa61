#![forbid(unsafe_code)]

pub mod activity;
pub mod app_services;
pub mod error;
pub mod notifications;
pub mod progress_store;
pub mod rewards;
pub mod timers;
pub mod training_service;

pub use train_core::Clock;

pub use activity::{Answer, Prompt};
pub use app_services::AppServices;
pub use error::{AppServicesError, TrainingError};
pub use notifications::{ActivityStats, Notification, StatDetail};
pub use progress_store::ProgressStore;
pub use rewards::{ProgressSnapshot, RewardAccumulator};
pub use timers::{Fired, TimerEvent, TimerSet};
pub use training_service::TrainingService;
