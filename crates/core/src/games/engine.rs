use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use crate::model::{ActivityId, Reward, RoundOutcome, ScoreTable, Tier};

//
// ─── PACING ───────────────────────────────────────────────────────────────────
//

/// How a stimulus is shown before the child may answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Choices are on screen right away.
    Immediate,
    /// Show the stimulus, then hide it and open input after the delay.
    Memorize(Duration),
    /// Play `count` cues one at a time, then open input.
    ///
    /// Cue `i` fires at `lead_in + i * gap`; input opens one `gap` after the
    /// last cue plus `tail`.
    Paced {
        lead_in: Duration,
        gap: Duration,
        count: usize,
        tail: Duration,
    },
}

impl Pacing {
    /// Offsets from the start of the round at which each cue fires.
    #[must_use]
    pub fn cue_offsets(&self) -> Vec<Duration> {
        match *self {
            Pacing::Paced {
                lead_in, gap, count, ..
            } => (0..count)
                .map(|i| lead_in + gap * u32::try_from(i).unwrap_or(u32::MAX))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Delay before input opens, or `None` when it is open immediately.
    #[must_use]
    pub fn reveal_after(&self) -> Option<Duration> {
        match *self {
            Pacing::Immediate => None,
            Pacing::Memorize(delay) => Some(delay),
            Pacing::Paced {
                lead_in,
                gap,
                count,
                tail,
            } => Some(lead_in + gap * u32::try_from(count).unwrap_or(u32::MAX) + tail),
        }
    }
}

//
// ─── LEVELING ─────────────────────────────────────────────────────────────────
//

/// Inclusive difficulty range for games that adapt to the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPolicy {
    pub min: u32,
    pub max: u32,
}

impl LevelPolicy {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(&self, level: u32) -> u32 {
        level.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn raise(&self, level: u32) -> u32 {
        self.clamp(level.saturating_add(1))
    }

    #[must_use]
    pub fn lower(&self, level: u32) -> u32 {
        self.clamp(level.saturating_sub(1))
    }
}

//
// ─── JUDGEMENT ────────────────────────────────────────────────────────────────
//

/// Grade, reward and catalog feedback for a decided answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub tier: Tier,
    pub reward: Reward,
    pub feedback: String,
}

impl Verdict {
    #[must_use]
    pub fn new(tier: Tier, reward: Reward, feedback: impl Into<String>) -> Self {
        Self {
            tier,
            reward,
            feedback: feedback.into(),
        }
    }

    #[must_use]
    pub fn from_table(table: &ScoreTable, tier: Tier, feedback: impl Into<String>) -> Self {
        Self::new(tier, table.reward(tier), feedback)
    }
}

/// What the rules make of the response so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgement {
    /// Not enough input yet; keep waiting.
    Pending,
    Decided(Verdict),
}

/// Data and grading for one round-based mini-game.
///
/// Implementations supply content and judgement only; `RoundGame` owns the
/// state machine, leveling and streak bookkeeping.
pub trait RoundRules {
    type Stimulus: Clone + fmt::Debug;
    type Input;
    /// Partial answer accumulated across submissions within a round.
    type Response: Default;

    fn activity(&self) -> ActivityId;

    fn score_table(&self) -> ScoreTable;

    /// `None` for games without difficulty levels.
    fn leveling(&self) -> Option<LevelPolicy> {
        None
    }

    fn generate<G: Rng + ?Sized>(&self, level: u32, rng: &mut G) -> Self::Stimulus;

    fn pacing(&self, _stimulus: &Self::Stimulus) -> Pacing {
        Pacing::Immediate
    }

    fn judge(
        &self,
        stimulus: &Self::Stimulus,
        response: &mut Self::Response,
        input: Self::Input,
    ) -> Judgement;

    /// Feedback for input that could not be read as an answer at all.
    fn forfeit_feedback(&self, _stimulus: &Self::Stimulus) -> String {
        "That answer doesn't fit this round. Let's try again!".to_owned()
    }
}

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("the current stimulus is still being presented")]
    StillPresenting,
}

//
// ─── ROUND GAME ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Presenting,
    AwaitingInput,
    Evaluated,
}

/// Result of feeding one input to a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// No round is accepting input.
    Ignored,
    /// Input recorded; the round needs more before it can be judged.
    Pending,
    Evaluated(RoundOutcome),
}

struct ActiveRound<R: RoundRules> {
    stimulus: R::Stimulus,
    response: R::Response,
    presented_at: DateTime<Utc>,
}

/// Generic driver for a round-based mini-game.
pub struct RoundGame<R: RoundRules> {
    rules: R,
    phase: RoundPhase,
    level: u32,
    streak: u32,
    rounds: u32,
    successes: u32,
    score: u32,
    round: Option<ActiveRound<R>>,
}

impl<R: RoundRules> RoundGame<R> {
    #[must_use]
    pub fn new(rules: R) -> Self {
        let level = rules.leveling().map_or(1, |policy| policy.min);
        Self {
            rules,
            phase: RoundPhase::Idle,
            level,
            streak: 0,
            rounds: 0,
            successes: 0,
            score: 0,
            round: None,
        }
    }

    /// Generate and present a new round at the current level.
    ///
    /// An unanswered round is abandoned without an outcome.
    ///
    /// # Errors
    ///
    /// Returns `GameError::StillPresenting` while the previous stimulus is
    /// still being shown.
    pub fn start<G: Rng + ?Sized>(
        &mut self,
        rng: &mut G,
        now: DateTime<Utc>,
    ) -> Result<Pacing, GameError> {
        if self.phase == RoundPhase::Presenting {
            return Err(GameError::StillPresenting);
        }
        let stimulus = self.rules.generate(self.level, rng);
        self.present(stimulus, now)
    }

    /// Present a specific stimulus instead of a generated one.
    ///
    /// # Errors
    ///
    /// Returns `GameError::StillPresenting` while the previous stimulus is
    /// still being shown.
    pub fn present(
        &mut self,
        stimulus: R::Stimulus,
        now: DateTime<Utc>,
    ) -> Result<Pacing, GameError> {
        if self.phase == RoundPhase::Presenting {
            return Err(GameError::StillPresenting);
        }
        let pacing = self.rules.pacing(&stimulus);
        self.phase = match pacing {
            Pacing::Immediate => RoundPhase::AwaitingInput,
            _ => RoundPhase::Presenting,
        };
        self.round = Some(ActiveRound {
            stimulus,
            response: R::Response::default(),
            presented_at: now,
        });
        Ok(pacing)
    }

    /// Hide the stimulus and open input. Response time counts from here.
    ///
    /// Returns `false` if nothing was being presented.
    pub fn reveal(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase != RoundPhase::Presenting {
            return false;
        }
        if let Some(round) = self.round.as_mut() {
            round.presented_at = now;
        }
        self.phase = RoundPhase::AwaitingInput;
        true
    }

    pub fn submit(&mut self, input: R::Input, now: DateTime<Utc>) -> Submission {
        if self.phase != RoundPhase::AwaitingInput {
            return Submission::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return Submission::Ignored;
        };
        match self
            .rules
            .judge(&round.stimulus, &mut round.response, input)
        {
            Judgement::Pending => Submission::Pending,
            Judgement::Decided(verdict) => Submission::Evaluated(self.conclude(verdict, now)),
        }
    }

    /// Close the round as incorrect because the input was unreadable.
    pub fn forfeit(&mut self, now: DateTime<Utc>) -> Submission {
        if self.phase != RoundPhase::AwaitingInput {
            return Submission::Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return Submission::Ignored;
        };
        let verdict = Verdict::from_table(
            &self.rules.score_table(),
            Tier::Incorrect,
            self.rules.forfeit_feedback(&round.stimulus),
        );
        Submission::Evaluated(self.conclude(verdict, now))
    }

    fn conclude(&mut self, verdict: Verdict, now: DateTime<Utc>) -> RoundOutcome {
        let response_time = self
            .round
            .as_ref()
            .map_or_else(chrono::Duration::zero, |round| now - round.presented_at);
        let success = verdict.tier.is_success();

        self.rounds += 1;
        self.score = self.score.saturating_add(verdict.reward.stars);
        if success {
            self.successes += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        if let Some(policy) = self.rules.leveling() {
            self.level = if success {
                policy.raise(self.level)
            } else {
                policy.lower(self.level)
            };
        }
        self.phase = RoundPhase::Evaluated;

        RoundOutcome::new(
            self.rules.activity(),
            verdict.tier,
            verdict.reward,
            verdict.feedback,
            response_time,
        )
    }

    /// Drop any round in progress and return to idle.
    pub fn stop(&mut self) {
        self.phase = RoundPhase::Idle;
        self.round = None;
    }

    /// Jump to a level, clamped to the game's range.
    pub fn set_level(&mut self, level: u32) {
        if let Some(policy) = self.rules.leveling() {
            self.level = policy.clamp(level);
        }
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub fn successes(&self) -> u32 {
        self.successes
    }

    /// Stars earned in this session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Percentage of evaluated rounds that succeeded, rounded to the nearest
    /// whole percent; 0 before the first.
    #[must_use]
    pub fn success_rate(&self) -> u32 {
        if self.rounds == 0 {
            0
        } else {
            (self.successes * 200 + self.rounds) / (2 * self.rounds)
        }
    }

    #[must_use]
    pub fn stimulus(&self) -> Option<&R::Stimulus> {
        self.round.as_ref().map(|round| &round.stimulus)
    }

    #[must_use]
    pub fn response(&self) -> Option<&R::Response> {
        self.round.as_ref().map(|round| &round.response)
    }
}

impl<R: RoundRules + fmt::Debug> fmt::Debug for RoundGame<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundGame")
            .field("rules", &self.rules)
            .field("phase", &self.phase)
            .field("level", &self.level)
            .field("streak", &self.streak)
            .field("rounds", &self.rounds)
            .field("stimulus", &self.stimulus())
            .finish_non_exhaustive()
    }
}
