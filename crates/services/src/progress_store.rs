use std::sync::Arc;

use storage::repository::{ProgressDocument, ProgressRepository, StorageError};
use tracing::{info, warn};
use train_core::Clock;
use train_core::model::ProgressRecord;

/// Loads and saves the single progress record.
///
/// Persistence is best-effort: a failed read falls back to defaults and a
/// failed write keeps the in-memory record authoritative. Both mark the store
/// as degraded until a write goes through again.
///
/// When the read failed because the medium was unreachable, the stored
/// document is never overwritten blind. Each save first retries the read and
/// folds the session into what was stored, and no write happens until that
/// read succeeds.
pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
    degraded: bool,
    unread: bool,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self {
            repo,
            clock,
            degraded: false,
            unread: false,
        }
    }

    /// Read the stored record, rolling daily progress over on a new day.
    ///
    /// Never fails: a missing document starts from zero and an unreadable one
    /// starts from zero with the store marked degraded.
    pub async fn load(&mut self) -> ProgressRecord {
        let today = self.clock.today();
        let mut record = match self.repo.load_progress().await {
            Ok(Some(document)) => document.into_record(),
            Ok(None) => return ProgressRecord::new(today),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "stored progress is corrupt and will be replaced");
                self.degraded = true;
                return ProgressRecord::new(today);
            }
            Err(err) => {
                warn!(error = %err, "progress unreadable, starting from defaults");
                self.degraded = true;
                self.unread = true;
                return ProgressRecord::new(today);
            }
        };

        if record.last_saved() != Some(today) {
            self.save(&mut record).await;
        }
        record
    }

    /// Move the record onto today and write it out.
    pub async fn save(&mut self, record: &mut ProgressRecord) {
        let today = self.clock.today();
        if self.unread && !self.reconcile(record).await {
            return;
        }
        if record.roll_over(today) {
            info!(%today, stars = record.stars(), "new day, daily progress reset");
        }

        let document = ProgressDocument::from_record(record);
        match self.repo.save_progress(&document).await {
            Ok(()) if self.degraded => {
                info!("progress storage available again");
                self.degraded = false;
            }
            Ok(()) => {}
            Err(err) => {
                if !self.degraded {
                    warn!(error = %err, "progress not saved, keeping it in memory");
                }
                self.degraded = true;
            }
        }
    }

    /// Retry the read that failed at load time.
    ///
    /// Returns `false` while the stored document is still out of reach.
    async fn reconcile(&mut self, record: &mut ProgressRecord) -> bool {
        let stored = match self.repo.load_progress().await {
            Ok(stored) => stored,
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "stored progress is corrupt and will be replaced");
                None
            }
            Err(_) => return false,
        };

        if let Some(document) = stored {
            let mut merged = document.into_record();
            merged.roll_over(self.clock.today());
            merged.absorb(record);
            info!(stars = merged.stars(), "stored progress recovered and merged");
            *record = merged;
        }
        self.unread = false;
        true
    }

    /// True while the last read or write failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[cfg(test)]
    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use storage::repository::{InMemoryRepository, PROGRESS_KEY};
    use train_core::time::fixed_clock;

    fn store(repo: &InMemoryRepository) -> ProgressStore {
        ProgressStore::new(fixed_clock(), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn empty_storage_loads_defaults() {
        let repo = InMemoryRepository::new();
        let record = store(&repo).load().await;
        assert_eq!(record.stars(), 0);
        assert_eq!(record.daily_progress().percent(), 0);
        assert!(record.achievements().is_empty());
        assert_eq!(record.last_saved(), Some(fixed_clock().today()));
    }

    #[tokio::test]
    async fn save_then_load_is_identity_on_the_same_day() {
        let repo = InMemoryRepository::new();
        let mut store = store(&repo);
        let mut record = store.load().await;
        record.add_stars(9);
        record.advance_daily(30);
        record.record_completion("sharing", Some("Completed \"Sharing\"".into()));
        store.save(&mut record).await;

        assert_eq!(store.load().await, record);
    }

    #[tokio::test]
    async fn new_day_zeroes_daily_and_persists_the_reset() {
        let repo = InMemoryRepository::new();
        let yesterday = fixed_clock().today() - Duration::days(1);
        let old = ProgressRecord::from_persisted(
            14,
            80,
            vec!["first".into()],
            vec!["waterCup".into()],
            Some(yesterday),
        );
        repo.put_raw(
            PROGRESS_KEY,
            ProgressDocument::from_record(&old).to_json().unwrap(),
        )
        .unwrap();

        let record = store(&repo).load().await;
        assert_eq!(record.daily_progress().percent(), 0);
        assert_eq!(record.stars(), 14);
        assert_eq!(record.achievements(), ["first".to_string()]);
        assert!(record.has_completed("waterCup"));

        let stored = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(stored.daily_progress, 0);
        assert_eq!(stored.last_saved(), Some(fixed_clock().today()));
    }

    #[tokio::test]
    async fn unreadable_date_counts_as_a_new_day() {
        let repo = InMemoryRepository::new();
        repo.put_raw(
            PROGRESS_KEY,
            r#"{"stars": 3, "dailyProgress": 50, "lastDate": "yesterday-ish"}"#,
        )
        .unwrap();

        let record = store(&repo).load().await;
        assert_eq!(record.stars(), 3);
        assert_eq!(record.daily_progress().percent(), 0);
    }

    #[tokio::test]
    async fn corrupt_document_degrades_to_defaults() {
        let repo = InMemoryRepository::new();
        repo.put_raw(PROGRESS_KEY, "{{{").unwrap();

        let mut store = store(&repo);
        let record = store.load().await;
        assert_eq!(record.stars(), 0);
        assert!(store.is_degraded());
    }

    #[tokio::test]
    async fn failed_write_is_absorbed_and_recovers() {
        let repo = InMemoryRepository::new();
        let mut store = store(&repo);
        let mut record = store.load().await;

        repo.set_available(false);
        record.add_stars(2);
        store.save(&mut record).await;
        assert!(store.is_degraded());
        assert_eq!(record.stars(), 2);

        repo.set_available(true);
        store.save(&mut record).await;
        assert!(!store.is_degraded());
        assert_eq!(repo.load_progress().await.unwrap().unwrap().stars, 2);
    }

    #[tokio::test]
    async fn saving_after_midnight_starts_the_new_day_at_zero() {
        let repo = InMemoryRepository::new();
        let mut store = store(&repo);
        let mut record = store.load().await;
        record.advance_daily(100);
        store.save(&mut record).await;

        store.clock_mut().advance(Duration::days(1));
        record.add_stars(1);
        store.save(&mut record).await;
        assert_eq!(record.daily_progress().percent(), 0);

        let mut next_day = fixed_clock();
        next_day.advance(Duration::days(1));
        let reloaded = ProgressStore::new(next_day, Arc::new(repo.clone())).load().await;
        assert_eq!(reloaded.daily_progress().percent(), 0);
        assert_eq!(reloaded.stars(), 1);
        assert_eq!(reloaded.last_saved(), Some(next_day.today()));
    }

    #[tokio::test]
    async fn null_fields_load_as_defaults_without_losing_the_rest() {
        let repo = InMemoryRepository::new();
        repo.put_raw(
            PROGRESS_KEY,
            r#"{"stars": 42, "dailyProgress": null, "achievements": ["a"], "completedScenarios": null}"#,
        )
        .unwrap();

        let mut store = store(&repo);
        let mut record = store.load().await;
        assert!(!store.is_degraded());
        assert_eq!(record.stars(), 42);
        assert_eq!(record.achievements(), ["a".to_string()]);

        record.add_stars(2);
        store.save(&mut record).await;
        let stored = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(stored.stars, 44);
        assert_eq!(stored.achievements, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn unreachable_storage_is_not_overwritten_with_defaults() {
        let repo = InMemoryRepository::new();
        let saved = ProgressRecord::from_persisted(
            42,
            20,
            vec!["a".into()],
            vec!["leftOut".into()],
            Some(fixed_clock().today()),
        );
        repo.put_raw(
            PROGRESS_KEY,
            ProgressDocument::from_record(&saved).to_json().unwrap(),
        )
        .unwrap();
        let before = repo.get_raw(PROGRESS_KEY).unwrap();

        repo.set_available(false);
        let mut store = store(&repo);
        let mut record = store.load().await;
        assert_eq!(record.stars(), 0);
        assert!(store.is_degraded());

        record.add_stars(2);
        store.save(&mut record).await;
        assert_eq!(repo.get_raw(PROGRESS_KEY).unwrap(), before);

        repo.set_available(true);
        record.advance_daily(10);
        store.save(&mut record).await;
        assert!(!store.is_degraded());
        assert_eq!(record.stars(), 44);
        assert_eq!(record.daily_progress().percent(), 30);
        assert!(record.has_completed("leftOut"));

        let stored = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(stored.stars, 44);
        assert_eq!(stored.achievements, vec!["a".to_string()]);
    }

    #[test]
    fn legacy_dates_still_match_today() {
        let doc = ProgressDocument {
            last_date: Some("Tue Nov 14 2023".into()),
            ..ProgressDocument::default()
        };
        assert_eq!(
            doc.last_saved(),
            Some(NaiveDate::from_ymd_opt(2023, 11, 14).unwrap())
        );
        assert_eq!(doc.last_saved(), Some(fixed_clock().today()));
    }
}
