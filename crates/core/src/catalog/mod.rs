//! Static, read-only content consulted by the mini-games.
//!
//! Everything here is data: scene text, the answer each scene expects, and the
//! feedback shown afterwards. Games look entries up; nothing is mutated.

mod activities;
mod classroom;
mod emotions;
mod memory;
mod social;
mod stories;

pub use activities::{ActivityInfo, AutoAdvance, TrainingModule, activity_info, find_activity};
pub use classroom::{Behavior, CLASSROOM_SCENES, ClassroomScene};
pub use emotions::{
    EMOTION_SCENES, Emotion, EmotionScene, REGULATION_SCENES, RegulationScene, Strategy,
};
pub use memory::{DISTRACTOR_SYMBOLS, MEMORY_ITEMS, TONE_FREQUENCIES_HZ};
pub use social::{
    CONVERSATION_PROMPTS, ConversationPrompt, PEER_SCENES, PeerAction, PeerScene, SHARING_SCENES,
    ShareChoice, SharingScene, TurnAction,
};
pub use stories::{Story, StoryChoice, find_story, story};

use thiserror::Error;

/// Error returned when a choice key does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown choice: {raw}")]
pub struct UnknownChoice {
    raw: String,
}

impl UnknownChoice {
    pub(crate) fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
        }
    }
}

