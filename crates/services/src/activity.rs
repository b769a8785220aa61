//! The activity currently on screen and the glue between presentation input
//! and the typed game rules.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use train_core::catalog::{
    ClassroomScene, ConversationPrompt, EmotionScene, PeerScene, RegulationScene, SharingScene,
    Story, story,
};
use train_core::games::{
    AuditorySequence, BreathingExercise, Cell, Classroom, Difficulty, DigitMemory,
    EmotionRecognition, EmotionRegulation, GameError, ImpulseControl, Light, Pacing, PatternPair,
    PeerRelationships, ReactionTimes, RoundGame, RoundPhase, RoundRules, Sharing, Signal,
    SpotDifference, StoryScenario, Submission, SustainedAttention, TurnTaking, WorkingMemory,
};
use train_core::model::{ActivityId, RoundOutcome, TrainingSettings};

use crate::notifications::{ActivityStats, StatDetail};

//
// ─── INPUT & PROMPTS ──────────────────────────────────────────────────────────
//

/// Raw answer from the presentation layer.
///
/// An answer of the wrong shape for the active game, or a choice key the game
/// does not know, closes the round as incorrect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Digits(String),
    Tone(u8),
    /// Grid cell, memory item or story choice.
    Index(usize),
    /// Choice key such as `"happy"`, `"share"` or `"tap"`.
    Choice(String),
}

impl Answer {
    fn digits(self) -> Option<String> {
        match self {
            Answer::Digits(digits) => Some(digits),
            _ => None,
        }
    }

    fn tone(self) -> Option<u8> {
        match self {
            Answer::Tone(tone) => Some(tone),
            _ => None,
        }
    }

    fn index(self) -> Option<usize> {
        match self {
            Answer::Index(index) => Some(index),
            _ => None,
        }
    }

    fn choice<T: FromStr>(self) -> Option<T> {
        match self {
            Answer::Choice(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }
}

/// What the presentation layer shows when a round starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Digits(String),
    Patterns(PatternPair),
    Tones(Vec<u8>),
    Items(Vec<usize>),
    Emotion(EmotionScene),
    Regulation(RegulationScene),
    Sharing(SharingScene),
    Conversation(ConversationPrompt),
    Signal(Signal),
    Classroom(ClassroomScene),
    Peer(PeerScene),
    Story(&'static Story),
    Grid(Vec<Cell>),
}

impl Prompt {
    /// Value played by cue `index` of a paced prompt.
    #[must_use]
    pub fn cue(&self, index: usize) -> Option<usize> {
        match self {
            Prompt::Tones(tones) => tones.get(index).map(|&tone| usize::from(tone)),
            Prompt::Items(items) => items.get(index).copied(),
            _ => None,
        }
    }
}

/// Rules the service knows how to present and feed.
trait Playable: RoundRules {
    fn prompt(stimulus: &Self::Stimulus) -> Prompt;
    fn read(answer: Answer) -> Option<Self::Input>;
}

impl Playable for DigitMemory {
    fn prompt(digits: &String) -> Prompt {
        Prompt::Digits(digits.clone())
    }

    fn read(answer: Answer) -> Option<String> {
        answer.digits()
    }
}

impl Playable for SpotDifference {
    fn prompt(pair: &PatternPair) -> Prompt {
        Prompt::Patterns(pair.clone())
    }

    fn read(answer: Answer) -> Option<usize> {
        answer.index()
    }
}

impl Playable for AuditorySequence {
    fn prompt(tones: &Vec<u8>) -> Prompt {
        Prompt::Tones(tones.clone())
    }

    fn read(answer: Answer) -> Option<u8> {
        answer.tone()
    }
}

impl Playable for WorkingMemory {
    fn prompt(items: &Vec<usize>) -> Prompt {
        Prompt::Items(items.clone())
    }

    fn read(answer: Answer) -> Option<usize> {
        answer.index()
    }
}

impl Playable for EmotionRecognition {
    fn prompt(scene: &EmotionScene) -> Prompt {
        Prompt::Emotion(*scene)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for EmotionRegulation {
    fn prompt(scene: &RegulationScene) -> Prompt {
        Prompt::Regulation(*scene)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for Sharing {
    fn prompt(scene: &SharingScene) -> Prompt {
        Prompt::Sharing(*scene)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for TurnTaking {
    fn prompt(prompt: &ConversationPrompt) -> Prompt {
        Prompt::Conversation(*prompt)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for ImpulseControl {
    fn prompt(signal: &Signal) -> Prompt {
        Prompt::Signal(*signal)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for Classroom {
    fn prompt(scene: &ClassroomScene) -> Prompt {
        Prompt::Classroom(*scene)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for PeerRelationships {
    fn prompt(scene: &PeerScene) -> Prompt {
        Prompt::Peer(*scene)
    }

    fn read(answer: Answer) -> Option<Self::Input> {
        answer.choice()
    }
}

impl Playable for StoryScenario {
    fn prompt(story: &&'static Story) -> Prompt {
        Prompt::Story(*story)
    }

    fn read(answer: Answer) -> Option<usize> {
        answer.index()
    }
}

//
// ─── ROUND SESSIONS ───────────────────────────────────────────────────────────
//

/// Object-safe view of a `RoundGame` so every round-based game can sit
/// behind the same pointer.
pub(crate) trait RoundSession: Send {
    fn start(&mut self, rng: &mut StdRng, now: DateTime<Utc>) -> Result<Pacing, GameError>;
    fn reveal(&mut self, now: DateTime<Utc>) -> bool;
    fn submit(&mut self, answer: Answer, now: DateTime<Utc>) -> Submission;
    /// Drop the current round without scoring it.
    fn skip(&mut self);
    fn set_level(&mut self, level: u32);
    fn phase(&self) -> RoundPhase;
    fn prompt(&self) -> Option<Prompt>;
    fn stats(&self) -> ActivityStats;
}

impl<R> RoundSession for RoundGame<R>
where
    R: Playable + Send,
    R::Stimulus: Send,
    R::Response: Send,
{
    fn start(&mut self, rng: &mut StdRng, now: DateTime<Utc>) -> Result<Pacing, GameError> {
        RoundGame::start(self, rng, now)
    }

    fn reveal(&mut self, now: DateTime<Utc>) -> bool {
        RoundGame::reveal(self, now)
    }

    fn submit(&mut self, answer: Answer, now: DateTime<Utc>) -> Submission {
        match R::read(answer) {
            Some(input) => RoundGame::submit(self, input, now),
            None => self.forfeit(now),
        }
    }

    fn skip(&mut self) {
        self.stop();
    }

    fn set_level(&mut self, level: u32) {
        RoundGame::set_level(self, level);
    }

    fn phase(&self) -> RoundPhase {
        RoundGame::phase(self)
    }

    fn prompt(&self) -> Option<Prompt> {
        self.stimulus().map(R::prompt)
    }

    fn stats(&self) -> ActivityStats {
        ActivityStats {
            activity: self.rules().activity(),
            level: self.rules().leveling().map(|_| self.level()),
            streak: self.streak(),
            rounds: self.rounds(),
            successes: self.successes(),
            session_stars: self.score(),
            success_rate: self.success_rate(),
            detail: StatDetail::None,
        }
    }
}

//
// ─── ACTIVE ACTIVITY ──────────────────────────────────────────────────────────
//

pub(crate) enum Engine {
    Rounds(Box<dyn RoundSession>),
    Sustained(SustainedAttention),
    Breathing(BreathingExercise),
}

/// State kept for the activity on screen, beyond what the game itself holds.
pub(crate) struct ActiveActivity {
    pub id: ActivityId,
    pub engine: Engine,
    started_at: DateTime<Utc>,
    friendship: u32,
    reactions: ReactionTimes,
    greens: u32,
    reds: u32,
}

impl ActiveActivity {
    pub fn new(
        id: ActivityId,
        settings: &TrainingSettings,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Self {
        let engine = match id {
            ActivityId::DigitMemory => {
                let mut game = RoundGame::new(DigitMemory::new(settings.memorize_delay()));
                game.set_level(difficulty.level());
                Engine::Rounds(Box::new(game))
            }
            ActivityId::SpotDifference => rounds(SpotDifference),
            ActivityId::AuditorySequence => rounds(AuditorySequence),
            ActivityId::WorkingMemory => rounds(WorkingMemory),
            ActivityId::EmotionRecognition => rounds(EmotionRecognition),
            ActivityId::EmotionRegulation => rounds(EmotionRegulation),
            ActivityId::Sharing => rounds(Sharing),
            ActivityId::TurnTaking => rounds(TurnTaking),
            ActivityId::ImpulseControl => rounds(ImpulseControl),
            ActivityId::Classroom => rounds(Classroom),
            ActivityId::PeerRelationships => rounds(PeerRelationships),
            ActivityId::Story(story_id) => rounds(StoryScenario::new(story(story_id))),
            // The grid is dealt when the first round starts.
            ActivityId::SustainedAttention => Engine::Sustained(SustainedAttention::with_grid(
                Vec::new(),
                settings.sustained_time_limit_secs(),
            )),
            ActivityId::Breathing => Engine::Breathing(BreathingExercise::new(
                settings.breathing_phase_secs(),
                settings.breathing_rounds(),
            )),
        };

        Self {
            id,
            engine,
            started_at: now,
            friendship: 0,
            reactions: ReactionTimes::default(),
            greens: 0,
            reds: 0,
        }
    }

    pub fn prompt(&self) -> Option<Prompt> {
        match &self.engine {
            Engine::Rounds(game) => game.prompt(),
            Engine::Sustained(game) => Some(Prompt::Grid(game.cells().to_vec())),
            Engine::Breathing(_) => None,
        }
    }

    /// Count a traffic light as it is shown.
    pub fn note_light(&mut self, light: Light) {
        match light {
            Light::Green => self.greens += 1,
            Light::Red => self.reds += 1,
        }
    }

    /// Track per-game side effects of an evaluated round.
    pub fn note_outcome(&mut self, outcome: &RoundOutcome) {
        match self.id {
            ActivityId::PeerRelationships => {
                self.friendship = PeerRelationships::next_friendship(self.friendship, outcome.tier);
            }
            ActivityId::ImpulseControl if outcome.success => {
                if let Some(Prompt::Signal(signal)) = self.prompt() {
                    if signal.light == Light::Green {
                        self.reactions
                            .record(outcome.response_time.to_std().unwrap_or_default());
                    }
                }
            }
            _ => {}
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> ActivityStats {
        let mut stats = match &self.engine {
            Engine::Rounds(game) => game.stats(),
            Engine::Sustained(_) | Engine::Breathing(_) => ActivityStats::empty(self.id),
        };
        stats.detail = match (&self.engine, self.id) {
            (Engine::Sustained(game), _) => StatDetail::Search {
                found: game.found(),
                total: game.total(),
                wrong_clicks: game.wrong_clicks(),
                remaining_secs: game.remaining_secs(),
            },
            (Engine::Breathing(exercise), _) => StatDetail::Breathing {
                round: exercise.current().round,
                rounds: exercise.rounds(),
            },
            (_, ActivityId::PeerRelationships) => StatDetail::Friendship(self.friendship),
            (_, ActivityId::ImpulseControl) => StatDetail::Reactions {
                greens: self.greens,
                reds: self.reds,
                average_ms: self.reactions.average_ms(),
            },
            (_, ActivityId::Classroom) => StatDetail::Focus {
                minutes: (now - self.started_at).num_minutes(),
            },
            _ => StatDetail::None,
        };
        stats
    }

    /// Stop whatever is running without scoring it.
    pub fn halt(&mut self) {
        match &mut self.engine {
            Engine::Rounds(game) => game.skip(),
            Engine::Sustained(game) => game.stop(),
            Engine::Breathing(exercise) => exercise.stop(),
        }
    }
}

fn rounds<R>(rules: R) -> Engine
where
    R: Playable + Send + 'static,
    R::Stimulus: Send,
    R::Response: Send,
{
    Engine::Rounds(Box::new(RoundGame::new(rules)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use train_core::catalog::EMOTION_SCENES;
    use train_core::model::Tier;
    use train_core::time::fixed_now;

    fn active(id: ActivityId) -> ActiveActivity {
        ActiveActivity::new(
            id,
            &TrainingSettings::default_for_children(),
            Difficulty::Easy,
            fixed_now(),
        )
    }

    fn session(activity: &mut ActiveActivity) -> &mut Box<dyn RoundSession> {
        match &mut activity.engine {
            Engine::Rounds(game) => game,
            _ => panic!("expected a round-based game"),
        }
    }

    #[test]
    fn choice_keys_reach_the_rules() {
        let mut activity = active(ActivityId::EmotionRecognition);
        let mut rng = StdRng::seed_from_u64(4);
        let game = session(&mut activity);
        assert_eq!(game.start(&mut rng, fixed_now()), Ok(Pacing::Immediate));

        let Some(Prompt::Emotion(scene)) = game.prompt() else {
            panic!("emotion scene expected");
        };
        assert!(EMOTION_SCENES.contains(&scene));

        let Submission::Evaluated(outcome) =
            game.submit(Answer::Choice(scene.emotion.key().into()), fixed_now())
        else {
            panic!("choice should be judged");
        };
        assert_eq!(outcome.tier, Tier::Best);
    }

    #[test]
    fn wrong_answer_shape_is_incorrect() {
        let mut activity = active(ActivityId::SpotDifference);
        let mut rng = StdRng::seed_from_u64(9);
        let game = session(&mut activity);
        game.start(&mut rng, fixed_now()).unwrap();

        let Submission::Evaluated(outcome) =
            game.submit(Answer::Choice("left".into()), fixed_now())
        else {
            panic!("malformed input still closes the round");
        };
        assert!(!outcome.success);
        assert_eq!(outcome.awarded_stars, 0);
    }

    #[test]
    fn unknown_choice_key_is_incorrect() {
        let mut activity = active(ActivityId::EmotionRecognition);
        let mut rng = StdRng::seed_from_u64(1);
        let game = session(&mut activity);
        game.start(&mut rng, fixed_now()).unwrap();
        let submission = game.submit(Answer::Choice("grumpy".into()), fixed_now());
        assert!(matches!(submission, Submission::Evaluated(o) if !o.success));
    }

    #[test]
    fn digit_memory_starts_at_the_difficulty_level() {
        let activity = ActiveActivity::new(
            ActivityId::DigitMemory,
            &TrainingSettings::default_for_children(),
            Difficulty::Hard,
            fixed_now(),
        );
        assert_eq!(activity.stats(fixed_now()).level, Some(5));
    }

    #[test]
    fn friendship_follows_peer_outcomes() {
        let mut activity = active(ActivityId::PeerRelationships);
        let outcome = |tier| {
            RoundOutcome::new(
                ActivityId::PeerRelationships,
                tier,
                Default::default(),
                "",
                chrono::Duration::zero(),
            )
        };
        activity.note_outcome(&outcome(Tier::Best));
        activity.note_outcome(&outcome(Tier::Acceptable));
        activity.note_outcome(&outcome(Tier::Incorrect));
        assert_eq!(
            activity.stats(fixed_now()).detail,
            StatDetail::Friendship(2)
        );
    }

    #[test]
    fn classroom_reports_focus_minutes() {
        let activity = active(ActivityId::Classroom);
        let later = fixed_now() + chrono::Duration::seconds(150);
        assert_eq!(
            activity.stats(later).detail,
            StatDetail::Focus { minutes: 2 }
        );
    }

    #[test]
    fn paced_prompts_expose_cue_values() {
        assert_eq!(Prompt::Tones(vec![3, 1]).cue(1), Some(1));
        assert_eq!(Prompt::Items(vec![7, 2, 5]).cue(0), Some(7));
        assert_eq!(Prompt::Digits("12".into()).cue(0), None);
    }
}
