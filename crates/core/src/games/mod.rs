//! Mini-game rules.
//!
//! Round-based games implement [`RoundRules`] and are driven by [`RoundGame`].
//! The sustained-attention search and the breathing guide are time-boxed and
//! advance on one-second ticks instead.

mod auditory;
mod breathing;
mod classroom;
mod digit_memory;
mod emotion;
mod engine;
mod impulse;
mod social;
mod spot_difference;
mod story;
mod sustained;
mod working_memory;

pub use auditory::AuditorySequence;
pub use breathing::{BreathPhase, BreathingExercise, BreathingStep, BreathingTick};
pub use classroom::Classroom;
pub use digit_memory::{Difficulty, DigitMemory};
pub use emotion::{EmotionRecognition, EmotionRegulation};
pub use engine::{
    GameError, Judgement, LevelPolicy, Pacing, RoundGame, RoundPhase, RoundRules, Submission,
    Verdict,
};
pub use impulse::{ImpulseControl, Light, Reaction, ReactionTimes, Signal};
pub use social::{PeerRelationships, Sharing, TurnTaking};
pub use spot_difference::{GRID_CELLS as PATTERN_CELLS, PatternPair, SpotDifference};
pub use story::StoryScenario;
pub use sustained::{
    AttentionReport, Cell, Click, GRID_CELLS as SEARCH_CELLS, SustainedAttention, SustainedEvent,
    accuracy_percent,
};
pub use working_memory::WorkingMemory;
