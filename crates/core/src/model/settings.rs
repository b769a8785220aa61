use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("memorize delay must be between 1 and 30 seconds")]
    InvalidMemorizeSecs,

    #[error("sustained attention time limit must be between 10 and 600 seconds")]
    InvalidSustainedTimeLimit,

    #[error("breathing phase must be between 1 and 30 seconds")]
    InvalidBreathingPhase,

    #[error("breathing rounds must be between 1 and 20")]
    InvalidBreathingRounds,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for the training session.
///
/// Defaults keep every activity short enough for a young child:
/// - 5 bonus stars for completing the daily goal
/// - 3 seconds to memorize a number
/// - 60 seconds of sustained-attention search
/// - 5 breathing rounds with 4-second phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSettings {
    daily_bonus_stars: u32,
    memorize_secs: u32,
    sustained_time_limit_secs: u32,
    breathing_phase_secs: u32,
    breathing_rounds: u32,
    auto_advance: bool,
}

impl TrainingSettings {
    #[must_use]
    pub fn default_for_children() -> Self {
        Self {
            daily_bonus_stars: 5,
            memorize_secs: 3,
            sustained_time_limit_secs: 60,
            breathing_phase_secs: 4,
            breathing_rounds: 5,
            auto_advance: true,
        }
    }

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a duration or count is outside its range.
    pub fn new(
        daily_bonus_stars: u32,
        memorize_secs: u32,
        sustained_time_limit_secs: u32,
        breathing_phase_secs: u32,
        breathing_rounds: u32,
        auto_advance: bool,
    ) -> Result<Self, SettingsError> {
        if !(1..=30).contains(&memorize_secs) {
            return Err(SettingsError::InvalidMemorizeSecs);
        }
        if !(10..=600).contains(&sustained_time_limit_secs) {
            return Err(SettingsError::InvalidSustainedTimeLimit);
        }
        if !(1..=30).contains(&breathing_phase_secs) {
            return Err(SettingsError::InvalidBreathingPhase);
        }
        if !(1..=20).contains(&breathing_rounds) {
            return Err(SettingsError::InvalidBreathingRounds);
        }

        Ok(Self {
            daily_bonus_stars,
            memorize_secs,
            sustained_time_limit_secs,
            breathing_phase_secs,
            breathing_rounds,
            auto_advance,
        })
    }

    #[must_use]
    pub fn daily_bonus_stars(&self) -> u32 {
        self.daily_bonus_stars
    }

    #[must_use]
    pub fn memorize_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.memorize_secs))
    }

    #[must_use]
    pub fn sustained_time_limit_secs(&self) -> u32 {
        self.sustained_time_limit_secs
    }

    #[must_use]
    pub fn breathing_phase_secs(&self) -> u32 {
        self.breathing_phase_secs
    }

    #[must_use]
    pub fn breathing_rounds(&self) -> u32 {
        self.breathing_rounds
    }

    #[must_use]
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self::default_for_children()
    }
}
