use serde::Serialize;
use tracing::info;
use train_core::catalog::activity_info;
use train_core::model::{ActivityId, ProgressRecord, RoundOutcome};

use crate::notifications::Notification;
use crate::progress_store::ProgressStore;

/// Read-only view of the child's totals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub stars: u32,
    pub daily_percent: u8,
    pub achievements: Vec<String>,
    pub completed_count: usize,
    pub storage_degraded: bool,
}

impl ProgressSnapshot {
    /// Text offered when the child shares their progress.
    #[must_use]
    pub fn share_message(&self) -> String {
        format!(
            "I've earned {} stars in the training app! Today I completed {}% of my training goal. \
             Keep going and become an even better me!",
            self.stars, self.daily_percent
        )
    }
}

/// Owns the progress record and applies every reward to it.
///
/// Each mutation is saved straight away and leaves notifications in an outbox
/// that the caller drains with [`RewardAccumulator::take_notifications`].
pub struct RewardAccumulator {
    record: ProgressRecord,
    store: ProgressStore,
    daily_bonus: u32,
    outbox: Vec<Notification>,
}

impl RewardAccumulator {
    /// Load the stored record and start accumulating on top of it.
    pub async fn load(mut store: ProgressStore, daily_bonus: u32) -> Self {
        let record = store.load().await;
        Self {
            record,
            store,
            daily_bonus,
            outbox: Vec::new(),
        }
    }

    pub async fn add_stars(&mut self, amount: u32) {
        self.roll_over();
        let total = self.record.add_stars(amount);
        self.outbox.push(Notification::StarsChanged {
            total,
            added: amount,
        });
        self.store.save(&mut self.record).await;
    }

    /// Advance today's progress, clamped at the goal.
    ///
    /// The bonus is granted only on the call that reaches the goal.
    pub async fn advance_daily_progress(&mut self, delta: u32) {
        self.roll_over();
        let step = self.record.advance_daily(delta);
        self.outbox.push(Notification::DailyProgressChanged {
            percent: step.after.percent(),
        });
        self.store.save(&mut self.record).await;

        if step.reached_goal() {
            info!(bonus = self.daily_bonus, "daily goal complete");
            self.add_stars(self.daily_bonus).await;
            self.outbox.push(Notification::DailyGoalComplete {
                bonus_stars: self.daily_bonus,
            });
        }
    }

    /// Mark an activity as done; successful runs also earn an achievement.
    pub async fn record_completion(&mut self, activity: ActivityId, success: bool) {
        self.roll_over();
        let note = success.then(|| format!("Completed \"{}\"", activity_info(activity).title));
        self.record
            .record_completion(activity.as_str(), note.clone());
        if let Some(note) = note {
            self.outbox.push(Notification::AchievementUnlocked { note });
        }
        self.store.save(&mut self.record).await;
    }

    /// Stars, then daily progress, then completion.
    pub async fn apply(&mut self, outcome: &RoundOutcome) {
        self.add_stars(outcome.awarded_stars).await;
        self.advance_daily_progress(outcome.progress_delta).await;
        self.record_completion(outcome.activity_id, outcome.success)
            .await;
    }

    /// Start a fresh daily count when the session has crossed midnight.
    fn roll_over(&mut self) {
        let today = self.store.clock().today();
        if self.record.roll_over(today) {
            info!(%today, "new day, daily progress reset");
            self.outbox
                .push(Notification::DailyProgressChanged { percent: 0 });
        }
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stars: self.record.stars(),
            daily_percent: self.record.daily_progress().percent(),
            achievements: self.record.achievements().to_vec(),
            completed_count: self.record.completed().len(),
            storage_degraded: self.store.is_degraded(),
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use storage::repository::{
        InMemoryRepository, PROGRESS_KEY, ProgressDocument, ProgressRepository, StorageError,
    };
    use train_core::model::{Reward, StoryId, Tier};
    use train_core::time::fixed_clock;

    async fn accumulator(repo: &InMemoryRepository) -> RewardAccumulator {
        let store = ProgressStore::new(fixed_clock(), Arc::new(repo.clone()));
        RewardAccumulator::load(store, 5).await
    }

    async fn stored(repo: &InMemoryRepository) -> ProgressDocument {
        repo.load_progress().await.unwrap().expect("saved")
    }

    fn seed_daily(repo: &InMemoryRepository, percent: u32) {
        let doc = ProgressDocument {
            daily_progress: percent,
            last_date: Some(fixed_clock().today().format("%Y-%m-%d").to_string()),
            ..ProgressDocument::default()
        };
        repo.put_raw(PROGRESS_KEY, doc.to_json().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn add_stars_is_exact_and_persisted_immediately() {
        let repo = InMemoryRepository::new();
        let mut rewards = accumulator(&repo).await;
        for n in [0, 1, 7, 250] {
            let before = rewards.record().stars();
            rewards.add_stars(n).await;
            assert_eq!(rewards.record().stars(), before + n);
            assert_eq!(stored(&repo).await.stars, before + n);
        }
    }

    #[tokio::test]
    async fn daily_progress_clamps_at_one_hundred() {
        let repo = InMemoryRepository::new();
        seed_daily(&repo, 95);
        let mut rewards = accumulator(&repo).await;

        rewards.advance_daily_progress(20).await;
        assert_eq!(rewards.record().daily_progress().percent(), 100);
        assert_eq!(stored(&repo).await.daily_progress, 100);
    }

    #[tokio::test]
    async fn daily_bonus_fires_once() {
        let repo = InMemoryRepository::new();
        seed_daily(&repo, 90);
        let mut rewards = accumulator(&repo).await;

        rewards.advance_daily_progress(10).await;
        rewards.advance_daily_progress(0).await;
        rewards.advance_daily_progress(25).await;

        assert_eq!(rewards.record().stars(), 5);
        let bonuses = rewards
            .take_notifications()
            .into_iter()
            .filter(|n| matches!(n, Notification::DailyGoalComplete { bonus_stars: 5 }))
            .count();
        assert_eq!(bonuses, 1);
    }

    #[tokio::test]
    async fn completion_notes_only_successes() {
        let repo = InMemoryRepository::new();
        let mut rewards = accumulator(&repo).await;
        let story = ActivityId::Story(StoryId::WaterCup);

        rewards.record_completion(story, false).await;
        assert!(rewards.record().has_completed("waterCup"));
        assert!(rewards.record().achievements().is_empty());

        rewards.record_completion(story, true).await;
        assert_eq!(
            rewards.record().achievements(),
            ["Completed \"The spilled water cup\"".to_string()]
        );
        assert_eq!(stored(&repo).await.completed, vec!["waterCup".to_string()]);
    }

    #[tokio::test]
    async fn apply_runs_the_full_sequence() {
        let repo = InMemoryRepository::new();
        let mut rewards = accumulator(&repo).await;
        let outcome = RoundOutcome::new(
            ActivityId::SpotDifference,
            Tier::Best,
            Reward::new(3, 8),
            "found it",
            chrono::Duration::zero(),
        );

        rewards.apply(&outcome).await;

        let notes = rewards.take_notifications();
        assert_eq!(
            notes,
            vec![
                Notification::StarsChanged { total: 3, added: 3 },
                Notification::DailyProgressChanged { percent: 8 },
                Notification::AchievementUnlocked {
                    note: "Completed \"Spot the difference\"".into()
                },
            ]
        );
        assert!(rewards.take_notifications().is_empty());
        let snapshot = rewards.snapshot();
        assert_eq!(snapshot.stars, 3);
        assert_eq!(snapshot.daily_percent, 8);
        assert_eq!(snapshot.completed_count, 1);
    }

    #[tokio::test]
    async fn broken_storage_keeps_counting_in_memory() {
        let repo = InMemoryRepository::new();
        let mut rewards = accumulator(&repo).await;
        repo.set_available(false);

        rewards.add_stars(4).await;
        assert_eq!(rewards.record().stars(), 4);
        assert!(rewards.snapshot().storage_degraded);
    }

    #[tokio::test]
    async fn bonus_fires_again_after_midnight() {
        let repo = InMemoryRepository::new();
        let mut rewards = accumulator(&repo).await;
        rewards.advance_daily_progress(100).await;
        assert_eq!(rewards.record().stars(), 5);
        rewards.take_notifications();

        rewards.store.clock_mut().advance(chrono::Duration::days(1));
        rewards.advance_daily_progress(60).await;
        assert_eq!(rewards.record().daily_progress().percent(), 60);
        assert_eq!(
            rewards.take_notifications(),
            vec![
                Notification::DailyProgressChanged { percent: 0 },
                Notification::DailyProgressChanged { percent: 60 },
            ]
        );

        rewards.advance_daily_progress(40).await;
        assert_eq!(rewards.record().stars(), 10);
        let stored = stored(&repo).await;
        assert_eq!(stored.daily_progress, 100);
        assert_eq!(stored.stars, 10);
    }

    /// Counts writes so tests can check every mutation is saved.
    #[derive(Default)]
    struct CountingRepository {
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ProgressRepository for CountingRepository {
        async fn load_progress(&self) -> Result<Option<ProgressDocument>, StorageError> {
            Ok(None)
        }

        async fn save_progress(&self, _document: &ProgressDocument) -> Result<(), StorageError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn every_mutation_is_saved() {
        let repo = Arc::new(CountingRepository::default());
        let store = ProgressStore::new(fixed_clock(), repo.clone());
        let mut rewards = RewardAccumulator::load(store, 5).await;
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);

        rewards.add_stars(1).await;
        rewards.advance_daily_progress(10).await;
        rewards.record_completion(ActivityId::Breathing, true).await;
        assert_eq!(repo.saves.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn snapshot_serializes_for_the_host() {
        let snapshot = ProgressSnapshot {
            stars: 4,
            daily_percent: 20,
            achievements: vec!["Completed \"Sharing\"".into()],
            completed_count: 1,
            storage_degraded: false,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["dailyPercent"], 20);
        assert_eq!(value["storageDegraded"], false);
    }

    #[test]
    fn share_message_mentions_totals() {
        let snapshot = ProgressSnapshot {
            stars: 42,
            daily_percent: 60,
            achievements: Vec::new(),
            completed_count: 0,
            storage_degraded: false,
        };
        let text = snapshot.share_message();
        assert!(text.contains("42 stars"));
        assert!(text.contains("60%"));
    }
}
