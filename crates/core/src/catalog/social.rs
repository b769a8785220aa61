use std::str::FromStr;

use crate::catalog::UnknownChoice;

//
// ─── TURN TAKING ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    AskQuestion,
    ListenCarefully,
    TakeTurn,
}

impl TurnAction {
    /// What the child's speech bubble says after a good choice.
    #[must_use]
    pub fn reply(self) -> &'static str {
        match self {
            TurnAction::AskQuestion => "Really? Can you tell me more?",
            TurnAction::ListenCarefully => "I'm listening carefully...",
            TurnAction::TakeTurn => "Thanks for telling me! I want to say...",
        }
    }

    /// Gentle hint when this action was not the right one.
    #[must_use]
    pub fn miss_feedback(self) -> &'static str {
        match self {
            TurnAction::AskQuestion => {
                "Questions are good, but here it may be better to listen first."
            }
            TurnAction::ListenCarefully => {
                "You can do even better! Try asking a question or sharing your idea."
            }
            TurnAction::TakeTurn => "It's not the best moment to talk yet. Listen to your friend first.",
        }
    }
}

impl FromStr for TurnAction {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "askQuestion" => Ok(TurnAction::AskQuestion),
            "listenCarefully" => Ok(TurnAction::ListenCarefully),
            "takeTurn" => Ok(TurnAction::TakeTurn),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationPrompt {
    pub friend_says: &'static str,
    pub expected: TurnAction,
    pub feedback: &'static str,
}

pub const CONVERSATION_PROMPTS: [ConversationPrompt; 4] = [
    ConversationPrompt {
        friend_says: "It's my birthday today!",
        expected: TurnAction::AskQuestion,
        feedback: "Good choice! Asking about it shows you care about your friend.",
    },
    ConversationPrompt {
        friend_says: "I watched a really funny film yesterday",
        expected: TurnAction::AskQuestion,
        feedback: "Great! Showing interest in your friend's story is a great social skill.",
    },
    ConversationPrompt {
        friend_says: "I knocked my cup over by accident",
        expected: TurnAction::ListenCarefully,
        feedback: "Good! Listening carefully when a friend has a problem really matters.",
    },
    ConversationPrompt {
        friend_says: "Where do you want to go this weekend?",
        expected: TurnAction::TakeTurn,
        feedback: "Right! Now it's your turn to talk.",
    },
];

//
// ─── SHARING ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChoice {
    Share,
    TakeTurns,
    Explain,
}

impl FromStr for ShareChoice {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "share" => Ok(ShareChoice::Share),
            "time" | "takeTurns" => Ok(ShareChoice::TakeTurns),
            "explain" => Ok(ShareChoice::Explain),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharingScene {
    pub item: &'static str,
    pub text: &'static str,
    pub best: ShareChoice,
}

pub const SHARING_SCENES: [SharingScene; 5] = [
    SharingScene {
        item: "🎮",
        text: "A friend wants to play with your new game console",
        best: ShareChoice::TakeTurns,
    },
    SharingScene {
        item: "⚽",
        text: "Your friend wants to play football with you",
        best: ShareChoice::Share,
    },
    SharingScene {
        item: "🎨",
        text: "Your little sister wants to use your coloured pens",
        best: ShareChoice::Explain,
    },
    SharingScene {
        item: "🚗",
        text: "Your little brother wants to play with your favourite toy car",
        best: ShareChoice::Share,
    },
    SharingScene {
        item: "📚",
        text: "A classmate wants to borrow your story book",
        best: ShareChoice::Share,
    },
];

//
// ─── PEER RELATIONSHIPS ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerAction {
    Join,
    Invite,
    Share,
    Force,
    Ignore,
    Observe,
}

impl PeerAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PeerAction::Join => "Joining in",
            PeerAction::Invite => "Inviting others to play",
            PeerAction::Share => "Sharing",
            PeerAction::Force => "Pushing your way in",
            PeerAction::Ignore => "Ignoring others",
            PeerAction::Observe => "Watching first",
        }
    }
}

impl FromStr for PeerAction {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(PeerAction::Join),
            "invite" => Ok(PeerAction::Invite),
            "share" => Ok(PeerAction::Share),
            "force" => Ok(PeerAction::Force),
            "ignore" => Ok(PeerAction::Ignore),
            "observe" => Ok(PeerAction::Observe),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerScene {
    pub situation: &'static str,
    pub context: &'static str,
    pub positive: &'static [PeerAction],
    pub negative: &'static [PeerAction],
}

pub const PEER_SCENES: [PeerScene; 4] = [
    PeerScene {
        situation: "Some classmates are playing a fun game of football",
        context: "Sports",
        positive: &[PeerAction::Invite, PeerAction::Share],
        negative: &[PeerAction::Force, PeerAction::Ignore],
    },
    PeerScene {
        situation: "You want to join a group of classmates who are talking about a project",
        context: "Study group",
        positive: &[PeerAction::Observe, PeerAction::Join],
        negative: &[PeerAction::Force, PeerAction::Ignore],
    },
    PeerScene {
        situation: "A classmate wants to borrow your new toy car",
        context: "Sharing toys",
        positive: &[PeerAction::Share, PeerAction::Invite],
        negative: &[PeerAction::Force, PeerAction::Ignore],
    },
    PeerScene {
        situation: "Someone invites you to a birthday party",
        context: "Social event",
        positive: &[PeerAction::Invite, PeerAction::Share],
        negative: &[PeerAction::Force, PeerAction::Ignore],
    },
];
