use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};
use train_core::Clock;
use train_core::catalog::{activity_info, find_activity};
use train_core::games::{
    AttentionReport, BreathingExercise, BreathingTick, Click, Difficulty, GameError,
    ImpulseControl, RoundPhase, Submission, SustainedAttention, SustainedEvent,
};
use train_core::model::{ActivityId, ProgressRecord, RoundOutcome, TrainingSettings};

use crate::activity::{ActiveActivity, Answer, Engine, Prompt};
use crate::error::TrainingError;
use crate::notifications::{ActivityStats, Notification};
use crate::progress_store::ProgressStore;
use crate::rewards::{ProgressSnapshot, RewardAccumulator};
use crate::timers::{Fired, TimerEvent, TimerSet};

const TICK: Duration = Duration::from_secs(1);

/// Entry point for the presentation layer.
///
/// Owns the reward accumulator, the activity on screen and its timers. Every
/// call returns the notifications it produced. Timers only deliver events;
/// the host waits on [`TrainingService::next_timer_event`] and hands each one
/// back through [`TrainingService::handle_timer`].
///
/// Must be used inside a tokio runtime.
pub struct TrainingService {
    clock: Clock,
    settings: TrainingSettings,
    rewards: RewardAccumulator,
    timers: TimerSet,
    rng: StdRng,
    difficulty: Difficulty,
    active: Option<ActiveActivity>,
}

impl TrainingService {
    /// Load progress and get ready to run activities.
    pub async fn open(store: ProgressStore, settings: TrainingSettings) -> Self {
        let clock = store.clock();
        let rewards = RewardAccumulator::load(store, settings.daily_bonus_stars()).await;
        Self {
            clock,
            settings,
            rewards,
            timers: TimerSet::new(),
            rng: StdRng::from_os_rng(),
            difficulty: Difficulty::Easy,
            active: None,
        }
    }

    /// Use a seeded generator so round content is repeatable.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    //
    // ─── QUERIES ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn settings(&self) -> &TrainingSettings {
        &self.settings
    }

    #[must_use]
    pub fn active_activity(&self) -> Option<ActivityId> {
        self.active.as_ref().map(|active| active.id)
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressRecord {
        self.rewards.record()
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.rewards.snapshot()
    }

    #[must_use]
    pub fn stats(&self) -> Option<ActivityStats> {
        let now = self.clock.now();
        self.active.as_ref().map(|active| active.stats(now))
    }

    /// Stimulus of the current round, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        self.active.as_ref().and_then(ActiveActivity::prompt)
    }

    /// Timer tasks still scheduled for the active activity.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    //
    // ─── LIFECYCLE ───────────────────────────────────────────────────────────
    //

    /// Start an activity by its presentation key.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::MissingContent` for a key outside the catalog.
    /// Debug builds panic instead, since the presentation layer only offers
    /// catalog keys.
    pub fn start_activity_by_key(&mut self, key: &str) -> Result<Vec<Notification>, TrainingError> {
        let id = match find_activity(key) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "unknown activity requested");
                debug_assert!(false, "{err}");
                return Err(err.into());
            }
        };
        self.start_activity(id)
    }

    /// Start `id`, or its next round if it is already on screen.
    ///
    /// Switching activities closes the previous one and cancels its timers.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::Game` if the current stimulus is still being
    /// presented.
    pub fn start_activity(&mut self, id: ActivityId) -> Result<Vec<Notification>, TrainingError> {
        if self.active_activity() == Some(id) {
            return self.next_round();
        }

        let mut notes = self.close_active();
        let now = self.clock.now();
        self.active = Some(ActiveActivity::new(
            id,
            &self.settings,
            self.difficulty,
            now,
        ));
        debug!(activity = %id, "activity started");
        notes.push(Notification::ActivityStarted {
            activity: id,
            title: activity_info(id).title,
        });

        if id == ActivityId::ImpulseControl {
            self.timers
                .once(id, ImpulseControl::LEAD_IN, TimerEvent::NextRound);
            return Ok(notes);
        }
        notes.extend(self.next_round()?);
        Ok(notes)
    }

    /// Feed an answer to the active activity.
    ///
    /// Answers outside the input window are ignored. An `Index` answer to the
    /// sustained-attention search clicks that cell.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::NotActive` if `id` is not on screen.
    pub async fn submit_answer(
        &mut self,
        id: ActivityId,
        answer: Answer,
    ) -> Result<Vec<Notification>, TrainingError> {
        let active = self.active_mut(id)?;
        if matches!(active.engine, Engine::Sustained(_)) {
            return Ok(match answer {
                Answer::Index(index) => self.search_click(index).await,
                _ => Vec::new(),
            });
        }
        Ok(self.submit_round(answer).await)
    }

    /// Tap a cell of the search grid, or of the spot-the-difference grid.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::NotActive` if `id` is not on screen.
    pub async fn click_cell(
        &mut self,
        id: ActivityId,
        index: usize,
    ) -> Result<Vec<Notification>, TrainingError> {
        self.submit_answer(id, Answer::Index(index)).await
    }

    /// Advance a time-boxed activity by one second.
    ///
    /// Round-based activities ignore ticks.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::NotActive` if `id` is not on screen.
    pub async fn tick(&mut self, id: ActivityId) -> Result<Vec<Notification>, TrainingError> {
        let active = self.active_mut(id)?;
        let notes = match &mut active.engine {
            Engine::Sustained(game) => match game.tick() {
                Some(SustainedEvent::Running { remaining_secs }) => {
                    vec![Notification::TimeRemaining {
                        activity: id,
                        secs: remaining_secs,
                    }]
                }
                Some(SustainedEvent::Finished(report)) => self.finish_search(report).await,
                None => Vec::new(),
            },
            Engine::Breathing(exercise) => match exercise.tick() {
                Some(BreathingTick::Step(step)) => vec![Notification::BreathingStep(step)],
                Some(BreathingTick::Finished(outcome)) => {
                    self.timers.cancel_all();
                    self.finish_round(outcome).await
                }
                None => Vec::new(),
            },
            Engine::Rounds(_) => Vec::new(),
        };
        Ok(notes)
    }

    /// Leave `id`, cancelling its timers. Leaving twice is a no-op.
    pub fn exit_activity(&mut self, id: ActivityId) -> Vec<Notification> {
        if self.active_activity() != Some(id) {
            return Vec::new();
        }
        self.close_active()
    }

    /// Pick the Remember-the-number difficulty; applies immediately when it
    /// is on screen.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<Notification> {
        self.difficulty = difficulty;
        let now = self.clock.now();
        match self.active.as_mut() {
            Some(active) if active.id == ActivityId::DigitMemory => {
                if let Engine::Rounds(game) = &mut active.engine {
                    game.set_level(difficulty.level());
                }
                vec![Notification::Stats(active.stats(now))]
            }
            _ => Vec::new(),
        }
    }

    //
    // ─── TIMERS ──────────────────────────────────────────────────────────────
    //

    /// Wait for the next timer of the active activity.
    ///
    /// Waits forever when nothing is scheduled.
    pub async fn next_timer_event(&mut self) -> Option<Fired> {
        self.timers.next().await
    }

    /// Apply a timer event. Events from a cancelled activity are dropped.
    pub async fn handle_timer(&mut self, fired: Fired) -> Vec<Notification> {
        if !self.timers.is_current(&fired) || self.active_activity() != Some(fired.activity) {
            debug!(?fired, "dropping stale timer event");
            return Vec::new();
        }
        let id = fired.activity;
        let now = self.clock.now();

        match fired.event {
            TimerEvent::Reveal => {
                let revealed = match self.active.as_mut().map(|active| &mut active.engine) {
                    Some(Engine::Rounds(game)) => game.reveal(now),
                    _ => false,
                };
                if revealed {
                    vec![Notification::InputOpened { activity: id }]
                } else {
                    Vec::new()
                }
            }
            TimerEvent::Cue(index) => self
                .prompt()
                .and_then(|prompt| prompt.cue(index))
                .map(|value| {
                    vec![Notification::Cue {
                        activity: id,
                        index,
                        value,
                    }]
                })
                .unwrap_or_default(),
            TimerEvent::SignalCleared => self.clear_signal(id),
            TimerEvent::NextRound => self.next_round().unwrap_or_else(|err| {
                debug!(error = %err, "next round not started");
                Vec::new()
            }),
            TimerEvent::Tick => self.tick(id).await.unwrap_or_default(),
        }
    }

    //
    // ─── INTERNALS ───────────────────────────────────────────────────────────
    //

    fn active_mut(&mut self, id: ActivityId) -> Result<&mut ActiveActivity, TrainingError> {
        self.active
            .as_mut()
            .filter(|active| active.id == id)
            .ok_or(TrainingError::NotActive(id))
    }

    fn close_active(&mut self) -> Vec<Notification> {
        self.timers.cancel_all();
        match self.active.take() {
            Some(mut active) => {
                active.halt();
                debug!(activity = %active.id, "activity exited");
                vec![Notification::Finished {
                    activity: active.id,
                }]
            }
            None => Vec::new(),
        }
    }

    /// Present a fresh round; the previous round's timers are cancelled first.
    fn next_round(&mut self) -> Result<Vec<Notification>, TrainingError> {
        let now = self.clock.now();
        let Some(active) = self.active.as_mut() else {
            return Ok(Vec::new());
        };
        let id = active.id;

        let input_open = match &mut active.engine {
            Engine::Rounds(game) => {
                if game.phase() == RoundPhase::Presenting {
                    return Err(GameError::StillPresenting.into());
                }
                self.timers.cancel_all();
                let pacing = game.start(&mut self.rng, now)?;
                for (index, offset) in pacing.cue_offsets().into_iter().enumerate() {
                    self.timers.once(id, offset, TimerEvent::Cue(index));
                }
                match pacing.reveal_after() {
                    Some(delay) => {
                        self.timers.once(id, delay, TimerEvent::Reveal);
                        false
                    }
                    None => true,
                }
            }
            Engine::Sustained(game) => {
                self.timers.cancel_all();
                *game = SustainedAttention::start(
                    self.settings.sustained_time_limit_secs(),
                    &mut self.rng,
                );
                self.timers.every(id, TICK, TimerEvent::Tick);
                true
            }
            Engine::Breathing(exercise) => {
                self.timers.cancel_all();
                *exercise = BreathingExercise::new(
                    self.settings.breathing_phase_secs(),
                    self.settings.breathing_rounds(),
                );
                self.timers.every(id, TICK, TimerEvent::Tick);
                true
            }
        };

        let prompt = active.prompt();
        if let Some(Prompt::Signal(signal)) = &prompt {
            active.note_light(signal.light);
            self.timers
                .once(id, signal.shown_for, TimerEvent::SignalCleared);
        }
        let stats = active.stats(now);
        let mut notes = vec![Notification::RoundStarted {
            activity: id,
            round: stats.rounds + 1,
            level: stats.level,
            prompt,
        }];
        match &active.engine {
            Engine::Sustained(game) => notes.push(Notification::TimeRemaining {
                activity: id,
                secs: game.remaining_secs(),
            }),
            Engine::Breathing(exercise) => {
                notes.push(Notification::BreathingStep(exercise.current()));
            }
            Engine::Rounds(_) if input_open => {
                notes.push(Notification::InputOpened { activity: id });
            }
            Engine::Rounds(_) => {}
        }
        Ok(notes)
    }

    async fn submit_round(&mut self, answer: Answer) -> Vec<Notification> {
        let now = self.clock.now();
        let submission = match self.active.as_mut().map(|active| &mut active.engine) {
            Some(Engine::Rounds(game)) => game.submit(answer, now),
            _ => Submission::Ignored,
        };
        match submission {
            Submission::Evaluated(outcome) => self.finish_round(outcome).await,
            Submission::Pending | Submission::Ignored => Vec::new(),
        }
    }

    async fn search_click(&mut self, index: usize) -> Vec<Notification> {
        let click = match self.active.as_mut().map(|active| &mut active.engine) {
            Some(Engine::Sustained(game)) => game.click(index),
            _ => Click::Ignored,
        };
        match click {
            Click::Hit { found, total } => vec![Notification::TargetFound { found, total }],
            Click::Completed(report) => self.finish_search(report).await,
            Click::Distractor => vec![Notification::WrongCell { distractor: true }],
            Click::Empty => vec![Notification::WrongCell { distractor: false }],
            Click::AlreadyFound | Click::Ignored => Vec::new(),
        }
    }

    async fn finish_search(&mut self, report: AttentionReport) -> Vec<Notification> {
        self.timers.cancel_all();
        debug!(
            found = report.found,
            total = report.total,
            accuracy = report.accuracy_percent,
            "search finished"
        );
        let outcome = report.outcome.clone();
        let mut notes = vec![Notification::SearchFinished(report)];
        notes.extend(self.finish_round(outcome).await);
        notes
    }

    /// Reward an evaluated round and schedule the next one if the activity
    /// advances on its own.
    async fn finish_round(&mut self, outcome: RoundOutcome) -> Vec<Notification> {
        let id = outcome.activity_id;
        let success = outcome.success;
        debug!(
            activity = %id,
            tier = ?outcome.tier,
            stars = outcome.awarded_stars,
            "round evaluated"
        );
        if let Some(active) = self.active.as_mut() {
            active.note_outcome(&outcome);
        }
        self.rewards.apply(&outcome).await;

        let mut notes = vec![Notification::Outcome(outcome)];
        notes.extend(self.rewards.take_notifications());
        if let Some(stats) = self.stats() {
            notes.push(Notification::Stats(stats));
        }

        if self.settings.auto_advance() {
            if let Some(delay) = activity_info(id).advance.delay(success) {
                self.timers.once(id, delay, TimerEvent::NextRound);
            }
        }
        notes
    }

    fn clear_signal(&mut self, id: ActivityId) -> Vec<Notification> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        let Some(Prompt::Signal(signal)) = active.prompt() else {
            return Vec::new();
        };
        if let Engine::Rounds(game) = &mut active.engine {
            if game.phase() == RoundPhase::AwaitingInput {
                debug!(light = ?signal.light, "light cleared without a reaction");
                game.skip();
            }
        }
        self.timers.once(id, signal.pause, TimerEvent::NextRound);
        vec![Notification::SignalCleared { activity: id }]
    }
}
