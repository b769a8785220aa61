use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::ids::ActivityId;

//
// ─── TIERS & REWARDS ──────────────────────────────────────────────────────────
//

/// Correctness grade of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The answer the catalog marks as best.
    Best,
    /// A reasonable answer that is not the best one. Still rewarded.
    Acceptable,
    /// Wrong, malformed or out-of-range input.
    Incorrect,
}

impl Tier {
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Tier::Incorrect)
    }
}

/// Stars and daily-progress points granted for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    pub stars: u32,
    pub progress: u32,
}

impl Reward {
    pub const NONE: Reward = Reward::new(0, 0);

    #[must_use]
    pub const fn new(stars: u32, progress: u32) -> Self {
        Self { stars, progress }
    }
}

/// Fixed per-game lookup from tier to reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub best: Reward,
    pub acceptable: Reward,
    pub incorrect: Reward,
}

impl ScoreTable {
    #[must_use]
    pub const fn new(best: Reward, acceptable: Reward, incorrect: Reward) -> Self {
        Self {
            best,
            acceptable,
            incorrect,
        }
    }

    /// Table for games that are simply right or wrong.
    #[must_use]
    pub const fn pass_fail(best: Reward) -> Self {
        Self::new(best, best, Reward::NONE)
    }

    #[must_use]
    pub fn reward(&self, tier: Tier) -> Reward {
        match tier {
            Tier::Best => self.best,
            Tier::Acceptable => self.acceptable,
            Tier::Incorrect => self.incorrect,
        }
    }
}

//
// ─── ROUND OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of one evaluated round, consumed by the reward accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub activity_id: ActivityId,
    pub tier: Tier,
    pub awarded_stars: u32,
    pub progress_delta: u32,
    pub success: bool,
    pub feedback: String,
    /// Time between the stimulus appearing and the decisive answer.
    pub response_time: Duration,
}

impl RoundOutcome {
    #[must_use]
    pub fn new(
        activity_id: ActivityId,
        tier: Tier,
        reward: Reward,
        feedback: impl Into<String>,
        response_time: Duration,
    ) -> Self {
        Self {
            activity_id,
            tier,
            awarded_stars: reward.stars,
            progress_delta: reward.progress,
            success: tier.is_success(),
            feedback: feedback.into(),
            response_time,
        }
    }

    #[must_use]
    pub fn reward(&self) -> Reward {
        Reward::new(self.awarded_stars, self.progress_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_fail_table_has_no_partial_credit() {
        let table = ScoreTable::pass_fail(Reward::new(2, 5));
        assert_eq!(table.reward(Tier::Best), Reward::new(2, 5));
        assert_eq!(table.reward(Tier::Incorrect), Reward::NONE);
    }

    #[test]
    fn outcome_success_follows_tier() {
        let ok = RoundOutcome::new(
            ActivityId::Sharing,
            Tier::Acceptable,
            Reward::new(1, 3),
            "fine",
            Duration::zero(),
        );
        assert!(ok.success);
        assert_eq!(ok.reward(), Reward::new(1, 3));

        let wrong = RoundOutcome::new(
            ActivityId::Sharing,
            Tier::Incorrect,
            Reward::NONE,
            "no",
            Duration::zero(),
        );
        assert!(!wrong.success);
    }
}
