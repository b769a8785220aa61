use crate::catalog::Emotion;
use crate::error::ContentError;
use crate::model::StoryId;

/// One answer option inside a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryChoice {
    pub text: &'static str,
    pub feedback: &'static str,
    pub stars: u32,
    pub correct: bool,
}

/// A situational story: a short scene and the ways a child could respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Story {
    pub id: StoryId,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub emotion: Emotion,
    pub choices: &'static [StoryChoice],
}

impl Story {
    /// Highest star count among the correct choices.
    #[must_use]
    pub fn best_stars(&self) -> u32 {
        self.choices
            .iter()
            .filter(|c| c.correct)
            .map(|c| c.stars)
            .max()
            .unwrap_or(0)
    }

    /// Emotion pre-selected on the feeling picker; boredom starts from calm.
    #[must_use]
    pub fn suggested_emotion(&self) -> Emotion {
        if self.emotion == Emotion::Bored {
            Emotion::Calm
        } else {
            self.emotion
        }
    }
}

const WATER_CUP: Story = Story {
    id: StoryId::WaterCup,
    title: "The spilled water cup",
    icon: "💧",
    description: "During break a classmate knocks your water cup off the desk and it breaks. \
        At first they say it wasn't them, and you feel really angry...",
    emotion: Emotion::Angry,
    choices: &[
        StoryChoice {
            text: "Grab the classmate by the neck to make them stop",
            feedback: "That could hurt your classmate and get you into bigger trouble. \
                Fighting doesn't solve the problem.",
            stars: 0,
            correct: false,
        },
        StoryChoice {
            text: "Go and tell the teacher what happened",
            feedback: "Good! Asking the teacher for help is a great choice. \
                The teacher can sort it out fairly and keep everyone safe.",
            stars: 3,
            correct: true,
        },
        StoryChoice {
            text: "Calmly say: I know you might not have meant it, but my cup broke and we need to sort it out.",
            feedback: "Amazing! You kept your feelings under control and said what you think clearly. \
                That's very grown-up!",
            stars: 5,
            correct: true,
        },
    ],
};

const LEFT_OUT: Story = Story {
    id: StoryId::LeftOut,
    title: "My friends didn't ask me",
    icon: "😔",
    description: "You hear classmates ask someone else to walk to the bathroom with them, \
        but nobody asks you. You feel angry and left out...",
    emotion: Emotion::Angry,
    choices: &[
        StoryChoice {
            text: "Pull on their clothes so they can't leave",
            feedback: "That makes classmates want to play with you less, and someone could get hurt.",
            stars: 0,
            correct: false,
        },
        StoryChoice {
            text: "Take a deep breath, then ask: can I come with you?",
            feedback: "Good! You stopped the impulse and asked politely.",
            stars: 3,
            correct: true,
        },
        StoryChoice {
            text: "Calm down first, then chat with the teacher or find something else to do",
            feedback: "Amazing! You calmed yourself down and found another way to handle the feeling.",
            stars: 4,
            correct: true,
        },
    ],
};

const BORED_IN_CLASS: Story = Story {
    id: StoryId::BoredInClass,
    title: "Class feels boring",
    icon: "😴",
    description: "The teacher is talking, but you feel bored, can't concentrate \
        and want to do something else...",
    emotion: Emotion::Bored,
    choices: &[
        StoryChoice {
            text: "Do something I like and stop listening",
            feedback: "That gets in the way of learning and the teacher will worry. \
                Let's think of a better idea.",
            stars: 1,
            correct: false,
        },
        StoryChoice {
            text: "Look for the fun part of the lesson and answer a question",
            feedback: "Good! Joining in makes learning more fun.",
            stars: 4,
            correct: true,
        },
        StoryChoice {
            text: "Set a small goal, like learning one new thing this lesson",
            feedback: "Amazing! You turned boredom into motivation. That's real growing up!",
            stars: 5,
            correct: true,
        },
    ],
};

const BALL_GAME: Story = Story {
    id: StoryId::BallGame,
    title: "Joining the football game",
    icon: "⚽",
    description: "In PE you see classmates playing football and you want to join in...",
    emotion: Emotion::Excited,
    choices: &[
        StoryChoice {
            text: "Walk over and kick their ball away",
            feedback: "That interrupts their game and makes the others unhappy.",
            stars: 0,
            correct: false,
        },
        StoryChoice {
            text: "Chase classmates with the ball because you're bored",
            feedback: "That could hurt someone and get you into trouble. Let's find a better way.",
            stars: 0,
            correct: false,
        },
        StoryChoice {
            text: "Ask kindly: can I play with you?",
            feedback: "Amazing! You asked politely, and they'll be glad to have you.",
            stars: 5,
            correct: true,
        },
        StoryChoice {
            text: "Watch for a while, then ask at a good moment: do you need another player?",
            feedback: "Good! Watching and waiting for the right moment is a great social skill!",
            stars: 4,
            correct: true,
        },
    ],
};

/// Catalog entry for a story.
#[must_use]
pub fn story(id: StoryId) -> &'static Story {
    match id {
        StoryId::WaterCup => &WATER_CUP,
        StoryId::LeftOut => &LEFT_OUT,
        StoryId::BoredInClass => &BORED_IN_CLASS,
        StoryId::BallGame => &BALL_GAME,
    }
}

/// Look up a story by its persisted key.
///
/// # Errors
///
/// Returns `ContentError::MissingContent` for unknown keys.
pub fn find_story(key: &str) -> Result<&'static Story, ContentError> {
    key.parse::<StoryId>()
        .map(story)
        .map_err(|_| ContentError::missing("story", key))
}
