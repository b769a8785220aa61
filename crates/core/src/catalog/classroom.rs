use std::str::FromStr;

use crate::catalog::UnknownChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Listen,
    Participate,
    Ask,
    Disturb,
    Talk,
}

impl FromStr for Behavior {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listen" => Ok(Behavior::Listen),
            "participate" => Ok(Behavior::Participate),
            "ask" => Ok(Behavior::Ask),
            "disturb" => Ok(Behavior::Disturb),
            "talk" => Ok(Behavior::Talk),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

/// Something the teacher says, and which reactions help or hurt the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassroomScene {
    pub teacher_says: &'static str,
    pub context: &'static str,
    pub good: &'static [Behavior],
    pub bad: &'static [Behavior],
}

pub const CLASSROOM_SCENES: [ClassroomScene; 4] = [
    ClassroomScene {
        teacher_says: "Everyone, please open your books to page 20",
        context: "Start of the lesson",
        good: &[Behavior::Listen, Behavior::Participate],
        bad: &[Behavior::Disturb, Behavior::Talk],
    },
    ClassroomScene {
        teacher_says: "Who can tell me the answer to this question?",
        context: "Question time",
        good: &[Behavior::Participate, Behavior::Ask],
        bad: &[Behavior::Talk, Behavior::Disturb],
    },
    ClassroomScene {
        teacher_says: "Please study quietly and raise your hand if you have a question",
        context: "Quiet study",
        good: &[Behavior::Listen, Behavior::Ask],
        bad: &[Behavior::Talk, Behavior::Disturb],
    },
    ClassroomScene {
        teacher_says: "Let's do some exercises. Ask me if anything is unclear",
        context: "Practice time",
        good: &[Behavior::Participate, Behavior::Ask],
        bad: &[Behavior::Talk, Behavior::Disturb],
    },
];
