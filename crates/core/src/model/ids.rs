use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier for one of the situational stories in the scenario catalog.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum StoryId {
    WaterCup,
    LeftOut,
    BoredInClass,
    BallGame,
}

impl StoryId {
    pub const ALL: [StoryId; 4] = [
        StoryId::WaterCup,
        StoryId::LeftOut,
        StoryId::BoredInClass,
        StoryId::BallGame,
    ];

    /// Stable key used in persisted completion sets.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoryId::WaterCup => "waterCup",
            StoryId::LeftOut => "leftOut",
            StoryId::BoredInClass => "boredInClass",
            StoryId::BallGame => "ballGame",
        }
    }
}

/// Identifier for every activity the training app offers.
///
/// The set is closed; each variant maps to a stable string key that is used
/// by the presentation layer and stored in the completed-activity set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ActivityId {
    DigitMemory,
    SpotDifference,
    AuditorySequence,
    WorkingMemory,
    SustainedAttention,
    EmotionRecognition,
    Sharing,
    TurnTaking,
    ImpulseControl,
    Classroom,
    EmotionRegulation,
    PeerRelationships,
    Breathing,
    Story(StoryId),
}

impl ActivityId {
    pub const ALL: [ActivityId; 17] = [
        ActivityId::DigitMemory,
        ActivityId::SpotDifference,
        ActivityId::AuditorySequence,
        ActivityId::WorkingMemory,
        ActivityId::SustainedAttention,
        ActivityId::EmotionRecognition,
        ActivityId::Sharing,
        ActivityId::TurnTaking,
        ActivityId::ImpulseControl,
        ActivityId::Classroom,
        ActivityId::EmotionRegulation,
        ActivityId::PeerRelationships,
        ActivityId::Breathing,
        ActivityId::Story(StoryId::WaterCup),
        ActivityId::Story(StoryId::LeftOut),
        ActivityId::Story(StoryId::BoredInClass),
        ActivityId::Story(StoryId::BallGame),
    ];

    /// Stable string key for this activity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityId::DigitMemory => "digit-memory",
            ActivityId::SpotDifference => "spot-difference",
            ActivityId::AuditorySequence => "auditory-sequence",
            ActivityId::WorkingMemory => "working-memory",
            ActivityId::SustainedAttention => "sustained-attention",
            ActivityId::EmotionRecognition => "emotion-recognition",
            ActivityId::Sharing => "sharing",
            ActivityId::TurnTaking => "turn-taking",
            ActivityId::ImpulseControl => "impulse-control",
            ActivityId::Classroom => "classroom",
            ActivityId::EmotionRegulation => "emotion-regulation",
            ActivityId::PeerRelationships => "peer-relationships",
            ActivityId::Breathing => "breathing",
            ActivityId::Story(story) => story.as_str(),
        }
    }

    /// True for activities driven by `tick()` rather than by rounds.
    #[must_use]
    pub fn is_time_boxed(self) -> bool {
        matches!(
            self,
            ActivityId::SustainedAttention | ActivityId::Breathing
        )
    }
}

impl fmt::Debug for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoryId({})", self.as_str())
    }
}

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", self.as_str())
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an activity key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity key: {raw}")]
pub struct ParseActivityError {
    raw: String,
}

impl ParseActivityError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for StoryId {
    type Err = ParseActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryId::ALL
            .into_iter()
            .find(|story| story.as_str() == s)
            .ok_or_else(|| ParseActivityError { raw: s.to_owned() })
    }
}

impl FromStr for ActivityId {
    type Err = ParseActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityId::ALL
            .into_iter()
            .find(|activity| activity.as_str() == s)
            .ok_or_else(|| ParseActivityError { raw: s.to_owned() })
    }
}

// ─── Serde Conversions ─────────────────────────────────────────────────────────

impl From<StoryId> for &'static str {
    fn from(story: StoryId) -> Self {
        story.as_str()
    }
}

impl From<ActivityId> for &'static str {
    fn from(activity: ActivityId) -> Self {
        activity.as_str()
    }
}

impl TryFrom<String> for StoryId {
    type Error = ParseActivityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ActivityId {
    type Error = ParseActivityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
