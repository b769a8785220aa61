//! Messages from the training core to the presentation layer.

use train_core::games::{AttentionReport, BreathingStep};
use train_core::model::{ActivityId, RoundOutcome};

use crate::activity::Prompt;

/// Something the presentation layer should show or play.
///
/// Every `TrainingService` call returns the notifications it produced, in the
/// order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    StarsChanged {
        total: u32,
        added: u32,
    },
    DailyProgressChanged {
        percent: u8,
    },
    DailyGoalComplete {
        bonus_stars: u32,
    },
    AchievementUnlocked {
        note: String,
    },
    ActivityStarted {
        activity: ActivityId,
        title: &'static str,
    },
    RoundStarted {
        activity: ActivityId,
        /// 1-based round number within the session.
        round: u32,
        level: Option<u32>,
        prompt: Option<Prompt>,
    },
    /// The stimulus is hidden and the child may answer.
    InputOpened {
        activity: ActivityId,
    },
    /// Play or highlight element `index` of a paced stimulus.
    Cue {
        activity: ActivityId,
        index: usize,
        value: usize,
    },
    /// The traffic light went back to neutral.
    SignalCleared {
        activity: ActivityId,
    },
    TargetFound {
        found: u32,
        total: u32,
    },
    WrongCell {
        distractor: bool,
    },
    TimeRemaining {
        activity: ActivityId,
        secs: u32,
    },
    BreathingStep(BreathingStep),
    SearchFinished(AttentionReport),
    Outcome(RoundOutcome),
    Stats(ActivityStats),
    Finished {
        activity: ActivityId,
    },
}

/// Session statistics for the active activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStats {
    pub activity: ActivityId,
    pub level: Option<u32>,
    pub streak: u32,
    pub rounds: u32,
    pub successes: u32,
    /// Stars earned in this session only.
    pub session_stars: u32,
    pub success_rate: u32,
    pub detail: StatDetail,
}

impl ActivityStats {
    #[must_use]
    pub fn empty(activity: ActivityId) -> Self {
        Self {
            activity,
            level: None,
            streak: 0,
            rounds: 0,
            successes: 0,
            session_stars: 0,
            success_rate: 0,
            detail: StatDetail::None,
        }
    }
}

/// Game-specific numbers shown next to the common stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatDetail {
    None,
    Friendship(u32),
    Reactions {
        greens: u32,
        reds: u32,
        average_ms: Option<u64>,
    },
    Focus {
        minutes: i64,
    },
    Search {
        found: u32,
        total: u32,
        wrong_clicks: u32,
        remaining_secs: u32,
    },
    Breathing {
        round: u32,
        rounds: u32,
    },
}
