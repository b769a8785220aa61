use std::str::FromStr;

use crate::catalog::UnknownChoice;

//
// ─── EMOTIONS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Scared,
    Bored,
    Excited,
    Calm,
}

impl Emotion {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Scared => "scared",
            Emotion::Bored => "bored",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
        }
    }

    /// Child-facing name used in feedback.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Scared => "scared",
            Emotion::Bored => "bored",
            Emotion::Excited => "excited",
            Emotion::Calm => "calm",
        }
    }

    /// Face shown next to a situation with this feeling.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Angry => "😠",
            Emotion::Scared => "😰",
            Emotion::Bored => "😴",
            Emotion::Excited => "🤩",
            Emotion::Calm => "😌",
        }
    }
}

impl FromStr for Emotion {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Emotion::Happy),
            "sad" => Ok(Emotion::Sad),
            "angry" => Ok(Emotion::Angry),
            "scared" => Ok(Emotion::Scared),
            "bored" => Ok(Emotion::Bored),
            "excited" => Ok(Emotion::Excited),
            "calm" => Ok(Emotion::Calm),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

/// A short situation whose feeling the child should name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionScene {
    pub emotion: Emotion,
    pub text: &'static str,
    /// How strong the feeling is, out of 10.
    pub intensity: u8,
}

pub const EMOTION_SCENES: [EmotionScene; 8] = [
    EmotionScene {
        emotion: Emotion::Happy,
        text: "Ming finally gets the birthday present he was hoping for",
        intensity: 8,
    },
    EmotionScene {
        emotion: Emotion::Sad,
        text: "Hong's puppy has gone missing",
        intensity: 9,
    },
    EmotionScene {
        emotion: Emotion::Angry,
        text: "Someone accidentally spills water on Hua's homework",
        intensity: 7,
    },
    EmotionScene {
        emotion: Emotion::Scared,
        text: "Li hears strange noises at night",
        intensity: 6,
    },
    EmotionScene {
        emotion: Emotion::Happy,
        text: "Getting full marks on a test",
        intensity: 9,
    },
    EmotionScene {
        emotion: Emotion::Sad,
        text: "Your best friend is moving away",
        intensity: 8,
    },
    EmotionScene {
        emotion: Emotion::Angry,
        text: "Being blamed for something you didn't do",
        intensity: 9,
    },
    EmotionScene {
        emotion: Emotion::Scared,
        text: "Giving a talk in front of the whole class",
        intensity: 7,
    },
];

//
// ─── REGULATION ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Breathing,
    Counting,
    Thinking,
    Seeking,
    Distraction,
}

impl Strategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Breathing => "Deep breathing",
            Strategy::Counting => "Counting to ten",
            Strategy::Thinking => "Positive thinking",
            Strategy::Seeking => "Asking for help",
            Strategy::Distraction => "Doing something else",
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breathing" => Ok(Strategy::Breathing),
            "counting" => Ok(Strategy::Counting),
            "thinking" => Ok(Strategy::Thinking),
            "seeking" => Ok(Strategy::Seeking),
            "distraction" => Ok(Strategy::Distraction),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

/// A negative-feeling situation and the calming strategy that suits it best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulationScene {
    pub emotion: Emotion,
    pub text: &'static str,
    pub intensity: u8,
    pub best: Strategy,
}

pub const REGULATION_SCENES: [RegulationScene; 6] = [
    RegulationScene {
        emotion: Emotion::Sad,
        text: "Hong's puppy has gone missing",
        intensity: 9,
        best: Strategy::Seeking,
    },
    RegulationScene {
        emotion: Emotion::Angry,
        text: "Someone accidentally spills water on Hua's homework",
        intensity: 7,
        best: Strategy::Breathing,
    },
    RegulationScene {
        emotion: Emotion::Scared,
        text: "Li hears strange noises at night",
        intensity: 6,
        best: Strategy::Seeking,
    },
    RegulationScene {
        emotion: Emotion::Sad,
        text: "Your best friend is moving away",
        intensity: 8,
        best: Strategy::Thinking,
    },
    RegulationScene {
        emotion: Emotion::Angry,
        text: "Being blamed for something you didn't do",
        intensity: 9,
        best: Strategy::Counting,
    },
    RegulationScene {
        emotion: Emotion::Scared,
        text: "Giving a talk in front of the whole class",
        intensity: 7,
        best: Strategy::Breathing,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_keys_round_trip() {
        for e in [
            Emotion::Happy,
            Emotion::Sad,
            Emotion::Angry,
            Emotion::Scared,
            Emotion::Bored,
            Emotion::Excited,
            Emotion::Calm,
        ] {
            assert_eq!(e.key().parse::<Emotion>().unwrap(), e);
        }
        let err = "grumpy".parse::<Emotion>().unwrap_err();
        assert_eq!(err.to_string(), "unknown choice: grumpy");
    }

    #[test]
    fn regulation_scenes_are_all_negative() {
        assert!(REGULATION_SCENES
            .iter()
            .all(|s| matches!(s.emotion, Emotion::Sad | Emotion::Angry | Emotion::Scared)));
    }
}
