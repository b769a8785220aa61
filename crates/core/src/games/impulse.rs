use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use crate::catalog::UnknownChoice;
use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Green,
    Red,
}

/// What the child does while a light is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Tap,
    Wait,
}

impl FromStr for Reaction {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tap" | "green" => Ok(Reaction::Tap),
            "wait" | "red" => Ok(Reaction::Wait),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

/// One traffic light and how long it stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub light: Light,
    /// Time the light is lit before the neutral signal returns.
    pub shown_for: Duration,
    /// Neutral gap before the next light.
    pub pause: Duration,
}

/// Red light, green light: tap on green, hold back on red.
///
/// A light that clears without any reaction is not scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpulseControl;

impl ImpulseControl {
    /// Wait before the first light of a session.
    pub const LEAD_IN: Duration = Duration::from_millis(1000);
}

impl RoundRules for ImpulseControl {
    type Stimulus = Signal;
    type Input = Reaction;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::ImpulseControl
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(2, 8))
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> Signal {
        let light = if rng.random_bool(0.5) {
            Light::Green
        } else {
            Light::Red
        };
        let shown_ms = match light {
            Light::Green => rng.random_range(2000..5000),
            Light::Red => rng.random_range(3000..5000),
        };
        Signal {
            light,
            shown_for: Duration::from_millis(shown_ms),
            pause: Duration::from_millis(rng.random_range(500..2000)),
        }
    }

    fn judge(&self, signal: &Signal, _: &mut (), reaction: Reaction) -> Judgement {
        let table = self.score_table();
        let verdict = match (signal.light, reaction) {
            (Light::Green, Reaction::Tap) => {
                Verdict::from_table(&table, Tier::Best, "Correct! Quick reaction!")
            }
            (Light::Red, Reaction::Wait) => Verdict::from_table(
                &table,
                Tier::Best,
                "Well done! You held back the impulse!",
            ),
            (Light::Red, Reaction::Tap) => {
                Verdict::from_table(&table, Tier::Incorrect, "It's red, so we wait!")
            }
            (Light::Green, Reaction::Wait) => {
                Verdict::from_table(&table, Tier::Incorrect, "It's green, tap right away!")
            }
        };
        Judgement::Decided(verdict)
    }
}

/// Running average of correct green-light reaction times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTimes {
    samples: Vec<Duration>,
}

impl ReactionTimes {
    pub fn record(&mut self, reaction: Duration) {
        self.samples.push(reaction);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean reaction time rounded to whole milliseconds.
    #[must_use]
    pub fn average_ms(&self) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: u128 = self.samples.iter().map(Duration::as_millis).sum();
        let count = self.samples.len() as u128;
        u64::try_from((total + count / 2) / count).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::engine::{RoundGame, Submission};
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn signal(light: Light) -> Signal {
        Signal {
            light,
            shown_for: Duration::from_secs(3),
            pause: Duration::from_secs(1),
        }
    }

    #[test]
    fn light_durations_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let s = ImpulseControl.generate(1, &mut rng);
            let shown = s.shown_for.as_millis();
            match s.light {
                Light::Green => assert!((2000..5000).contains(&shown)),
                Light::Red => assert!((3000..5000).contains(&shown)),
            }
            assert!((500..2000).contains(&s.pause.as_millis()));
        }
    }

    #[test]
    fn tapping_on_red_fails_waiting_on_red_succeeds() {
        let mut game = RoundGame::new(ImpulseControl);
        game.present(signal(Light::Red), fixed_now()).unwrap();
        assert!(matches!(
            game.submit(Reaction::Tap, fixed_now()),
            Submission::Evaluated(o) if !o.success
        ));

        game.present(signal(Light::Red), fixed_now()).unwrap();
        let Submission::Evaluated(outcome) = game.submit(Reaction::Wait, fixed_now()) else {
            panic!("expected evaluation");
        };
        assert_eq!(outcome.reward(), Reward::new(2, 8));
    }

    #[test]
    fn one_reaction_per_light() {
        let mut game = RoundGame::new(ImpulseControl);
        game.present(signal(Light::Green), fixed_now()).unwrap();
        game.submit(Reaction::Tap, fixed_now());
        assert_eq!(game.submit(Reaction::Tap, fixed_now()), Submission::Ignored);
    }

    #[test]
    fn average_reaction_time_rounds() {
        let mut times = ReactionTimes::default();
        assert_eq!(times.average_ms(), None);
        times.record(Duration::from_millis(400));
        times.record(Duration::from_millis(501));
        assert_eq!(times.average_ms(), Some(451));
        assert_eq!(times.len(), 2);
    }
}
