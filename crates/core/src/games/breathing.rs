use crate::model::{ActivityId, Reward, RoundOutcome, Tier};

const REWARD: Reward = Reward::new(2, 10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Ready,
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    const CYCLE: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::Hold,
        BreathPhase::Exhale,
        BreathPhase::Rest,
    ];

    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            BreathPhase::Ready => "Get ready",
            BreathPhase::Inhale => "Breathe in",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Breathe out",
            BreathPhase::Rest => "Rest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingStep {
    pub phase: BreathPhase,
    /// 1-based breathing round.
    pub round: u32,
    pub remaining_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreathingTick {
    Step(BreathingStep),
    Finished(RoundOutcome),
}

/// Guided breathing driven by one-second ticks.
///
/// The exercise runs Ready, then Inhale, Hold, Exhale and Rest for each round,
/// skipping the final Rest.
#[derive(Debug, Clone)]
pub struct BreathingExercise {
    phase_secs: u32,
    rounds: u32,
    elapsed: u32,
    running: bool,
}

impl BreathingExercise {
    #[must_use]
    pub fn new(phase_secs: u32, rounds: u32) -> Self {
        Self {
            phase_secs: phase_secs.max(1),
            rounds: rounds.max(1),
            elapsed: 0,
            running: true,
        }
    }

    /// Length of the whole exercise in seconds.
    #[must_use]
    pub fn total_secs(&self) -> u32 {
        // Ready plus four phases per round, minus the last rest.
        4 * self.rounds * self.phase_secs
    }

    /// Where the exercise stands right now.
    #[must_use]
    pub fn current(&self) -> BreathingStep {
        let index = self.elapsed / self.phase_secs;
        let remaining_secs = self.phase_secs - self.elapsed % self.phase_secs;
        if index == 0 {
            return BreathingStep {
                phase: BreathPhase::Ready,
                round: 1,
                remaining_secs,
            };
        }
        let step = index - 1;
        BreathingStep {
            phase: BreathPhase::CYCLE[(step % 4) as usize],
            round: step / 4 + 1,
            remaining_secs,
        }
    }

    /// Advance by one second. Returns `None` once finished or stopped.
    pub fn tick(&mut self) -> Option<BreathingTick> {
        if !self.running {
            return None;
        }
        self.elapsed += 1;
        if self.elapsed >= self.total_secs() {
            self.running = false;
            return Some(BreathingTick::Finished(RoundOutcome::new(
                ActivityId::Breathing,
                Tier::Best,
                REWARD,
                "Breathing practice complete! You did really well. Do you feel calmer now?",
                chrono::Duration::seconds(i64::from(self.elapsed)),
            )));
        }
        Some(BreathingTick::Step(self.current()))
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}
