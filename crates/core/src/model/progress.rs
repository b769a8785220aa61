use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Daily progress is a percentage; reaching it completes the day.
pub const DAILY_GOAL_PERCENT: u8 = 100;

//
// ─── DAILY PROGRESS ───────────────────────────────────────────────────────────
//

/// Percentage of today's training goal, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DailyProgress(u8);

impl DailyProgress {
    pub const ZERO: DailyProgress = DailyProgress(0);
    pub const COMPLETE: DailyProgress = DailyProgress(DAILY_GOAL_PERCENT);

    /// Builds a value, clamping anything above the goal.
    #[must_use]
    pub fn clamped(percent: u32) -> Self {
        let capped = percent.min(u32::from(DAILY_GOAL_PERCENT));
        Self(u8::try_from(capped).unwrap_or(DAILY_GOAL_PERCENT))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= DAILY_GOAL_PERCENT
    }

    #[must_use]
    pub fn advanced_by(self, delta: u32) -> Self {
        Self::clamped(u32::from(self.0).saturating_add(delta))
    }
}

/// What happened to daily progress after an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAdvance {
    pub before: DailyProgress,
    pub after: DailyProgress,
}

impl DailyAdvance {
    /// True only on the call that moves progress from below the goal to the goal.
    #[must_use]
    pub fn reached_goal(&self) -> bool {
        !self.before.is_complete() && self.after.is_complete()
    }
}

//
// ─── PROGRESS RECORD ──────────────────────────────────────────────────────────
//

/// Cumulative reward state for the child using the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    stars: u32,
    daily: DailyProgress,
    achievements: Vec<String>,
    completed: BTreeSet<String>,
    last_saved: Option<NaiveDate>,
}

impl ProgressRecord {
    /// Zero-valued record for a first launch.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            stars: 0,
            daily: DailyProgress::ZERO,
            achievements: Vec::new(),
            completed: BTreeSet::new(),
            last_saved: Some(today),
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// Daily progress is clamped; duplicate completion keys collapse.
    #[must_use]
    pub fn from_persisted(
        stars: u32,
        daily_percent: u32,
        achievements: Vec<String>,
        completed: impl IntoIterator<Item = String>,
        last_saved: Option<NaiveDate>,
    ) -> Self {
        Self {
            stars,
            daily: DailyProgress::clamped(daily_percent),
            achievements,
            completed: completed.into_iter().collect(),
            last_saved,
        }
    }

    #[must_use]
    pub fn stars(&self) -> u32 {
        self.stars
    }

    #[must_use]
    pub fn daily_progress(&self) -> DailyProgress {
        self.daily
    }

    #[must_use]
    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    #[must_use]
    pub fn has_completed(&self, key: &str) -> bool {
        self.completed.contains(key)
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<NaiveDate> {
        self.last_saved
    }

    /// Moves the record onto `today`, zeroing daily progress if it belonged to
    /// another day.
    ///
    /// Returns `true` if the day changed. Stars, achievements and completions
    /// are kept.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_saved == Some(today) {
            return false;
        }
        self.daily = DailyProgress::ZERO;
        self.last_saved = Some(today);
        true
    }

    /// Folds the gains of `session` into this record.
    ///
    /// Used when a session started from defaults because the stored record
    /// could not be read: its stars, daily progress, notes and completions
    /// are all increments on top of what was stored.
    pub fn absorb(&mut self, session: &ProgressRecord) {
        self.add_stars(session.stars);
        self.advance_daily(u32::from(session.daily.percent()));
        self.achievements.extend(session.achievements.iter().cloned());
        self.completed.extend(session.completed.iter().cloned());
    }

    /// Adds stars and returns the new total.
    pub fn add_stars(&mut self, amount: u32) -> u32 {
        self.stars = self.stars.saturating_add(amount);
        self.stars
    }

    pub fn advance_daily(&mut self, delta: u32) -> DailyAdvance {
        let before = self.daily;
        self.daily = before.advanced_by(delta);
        DailyAdvance {
            before,
            after: self.daily,
        }
    }

    /// Marks `key` as completed and optionally appends an achievement note.
    ///
    /// Returns `true` the first time `key` is recorded.
    pub fn record_completion(&mut self, key: &str, achievement: Option<String>) -> bool {
        let first = self.completed.insert(key.to_owned());
        if let Some(note) = achievement {
            self.achievements.push(note);
        }
        first
    }
}
