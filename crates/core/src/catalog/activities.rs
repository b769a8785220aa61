use std::time::Duration;

use crate::error::ContentError;
use crate::model::ActivityId;

/// Menu group an activity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingModule {
    Attention,
    Emotion,
    Social,
}

/// When to start the next round on its own after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvance {
    pub after_success: Option<Duration>,
    pub after_failure: Option<Duration>,
}

impl AutoAdvance {
    pub const NEVER: AutoAdvance = AutoAdvance {
        after_success: None,
        after_failure: None,
    };

    const fn both(millis: u64) -> Self {
        Self {
            after_success: Some(Duration::from_millis(millis)),
            after_failure: Some(Duration::from_millis(millis)),
        }
    }

    #[must_use]
    pub fn delay(&self, success: bool) -> Option<Duration> {
        if success {
            self.after_success
        } else {
            self.after_failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityInfo {
    pub id: ActivityId,
    pub title: &'static str,
    pub module: TrainingModule,
    pub advance: AutoAdvance,
}

/// Catalog entry for an activity.
#[must_use]
pub fn activity_info(id: ActivityId) -> ActivityInfo {
    let (title, module, advance) = match id {
        ActivityId::DigitMemory => (
            "Remember the number",
            TrainingModule::Attention,
            AutoAdvance {
                after_success: Some(Duration::from_secs(2)),
                after_failure: Some(Duration::from_secs(3)),
            },
        ),
        ActivityId::SpotDifference => (
            "Spot the difference",
            TrainingModule::Attention,
            AutoAdvance::both(2_000),
        ),
        ActivityId::AuditorySequence => (
            "Listen and repeat",
            TrainingModule::Attention,
            AutoAdvance::both(2_000),
        ),
        ActivityId::WorkingMemory => (
            "Remember the order",
            TrainingModule::Attention,
            AutoAdvance::both(2_000),
        ),
        ActivityId::SustainedAttention => (
            "Find all the targets",
            TrainingModule::Attention,
            AutoAdvance::NEVER,
        ),
        ActivityId::EmotionRecognition => (
            "How do they feel?",
            TrainingModule::Emotion,
            AutoAdvance {
                after_success: Some(Duration::from_secs(2)),
                after_failure: None,
            },
        ),
        ActivityId::EmotionRegulation => (
            "Calming strategies",
            TrainingModule::Emotion,
            AutoAdvance::both(3_000),
        ),
        ActivityId::Breathing => ("Deep breathing", TrainingModule::Emotion, AutoAdvance::NEVER),
        ActivityId::Sharing => ("Sharing", TrainingModule::Social, AutoAdvance::both(3_000)),
        ActivityId::TurnTaking => ("Taking turns to talk", TrainingModule::Social, AutoAdvance::NEVER),
        ActivityId::ImpulseControl => (
            "Red light, green light",
            TrainingModule::Social,
            AutoAdvance::NEVER,
        ),
        ActivityId::Classroom => (
            "In the classroom",
            TrainingModule::Social,
            AutoAdvance::both(3_000),
        ),
        ActivityId::PeerRelationships => (
            "Making friends",
            TrainingModule::Social,
            AutoAdvance::both(3_000),
        ),
        ActivityId::Story(story_id) => (
            super::story(story_id).title,
            TrainingModule::Emotion,
            AutoAdvance::NEVER,
        ),
    };

    ActivityInfo {
        id,
        title,
        module,
        advance,
    }
}

/// Resolve a presentation-layer key to an activity.
///
/// # Errors
///
/// Returns `ContentError::MissingContent` for keys outside the catalog.
pub fn find_activity(key: &str) -> Result<ActivityId, ContentError> {
    key.parse::<ActivityId>()
        .map_err(|_| ContentError::missing("activity", key))
}
