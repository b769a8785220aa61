mod ids;
mod outcome;
mod progress;
mod settings;

pub use ids::{ActivityId, ParseActivityError, StoryId};
pub use outcome::{Reward, RoundOutcome, ScoreTable, Tier};
pub use progress::{DAILY_GOAL_PERCENT, DailyAdvance, DailyProgress, ProgressRecord};
pub use settings::{SettingsError, TrainingSettings};
