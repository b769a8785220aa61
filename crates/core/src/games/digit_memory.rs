use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use crate::catalog::UnknownChoice;
use crate::games::engine::{Judgement, LevelPolicy, Pacing, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

const MAX_DIGITS: usize = 8;

/// Remember a number shown for a few seconds, then type it back.
#[derive(Debug, Clone)]
pub struct DigitMemory {
    memorize: Duration,
}

impl DigitMemory {
    pub const LEVELS: LevelPolicy = LevelPolicy::new(1, 10);

    #[must_use]
    pub fn new(memorize: Duration) -> Self {
        Self { memorize }
    }

    /// Number of digits shown at `level`.
    #[must_use]
    pub fn sequence_len(level: u32) -> usize {
        let grown = 3 + usize::try_from(level / 2).unwrap_or(MAX_DIGITS);
        grown.min(MAX_DIGITS)
    }
}

impl Default for DigitMemory {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl RoundRules for DigitMemory {
    type Stimulus = String;
    type Input = String;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::DigitMemory
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(2, 5))
    }

    fn leveling(&self) -> Option<LevelPolicy> {
        Some(Self::LEVELS)
    }

    fn generate<G: Rng + ?Sized>(&self, level: u32, rng: &mut G) -> String {
        (0..Self::sequence_len(level))
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }

    fn pacing(&self, _stimulus: &String) -> Pacing {
        Pacing::Memorize(self.memorize)
    }

    fn judge(&self, target: &String, _: &mut (), input: String) -> Judgement {
        let answer = input.trim();
        if answer.chars().count() < target.chars().count() {
            return Judgement::Pending;
        }
        let table = self.score_table();
        if answer == target {
            Judgement::Decided(Verdict::from_table(
                &table,
                Tier::Best,
                "Correct! Great memory!",
            ))
        } else {
            Judgement::Decided(Verdict::from_table(
                &table,
                Tier::Incorrect,
                format!("Not quite. The number was {target}."),
            ))
        }
    }
}

/// Starting level presets offered in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn level(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownChoice::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::engine::{RoundGame, Submission};
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn length_grows_with_level_and_caps() {
        assert_eq!(DigitMemory::sequence_len(1), 3);
        assert_eq!(DigitMemory::sequence_len(2), 4);
        assert_eq!(DigitMemory::sequence_len(10), 8);
    }

    #[test]
    fn seeded_rng_gives_repeatable_digits() {
        let rules = DigitMemory::default();
        let a = rules.generate(4, &mut StdRng::seed_from_u64(9));
        let b = rules.generate(4, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert!(a.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn matching_number_succeeds_and_levels_up() {
        let mut game = RoundGame::new(DigitMemory::default());
        game.set_level(2);
        game.present("4827".to_owned(), fixed_now()).unwrap();
        game.reveal(fixed_now());

        let Submission::Evaluated(outcome) = game.submit("4827".into(), fixed_now()) else {
            panic!("expected evaluation");
        };
        assert!(outcome.success);
        assert_eq!(outcome.reward(), Reward::new(2, 5));
        assert_eq!(game.level(), 3);
    }

    #[test]
    fn wrong_number_fails_and_level_floors_at_one() {
        let mut game = RoundGame::new(DigitMemory::default());
        game.present("4827".to_owned(), fixed_now()).unwrap();
        game.reveal(fixed_now());

        let Submission::Evaluated(outcome) = game.submit("4828".into(), fixed_now()) else {
            panic!("expected evaluation");
        };
        assert!(!outcome.success);
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn short_input_waits_for_more_digits() {
        let mut game = RoundGame::new(DigitMemory::default());
        game.present("4827".to_owned(), fixed_now()).unwrap();
        game.reveal(fixed_now());
        assert_eq!(game.submit(" 48 ".into(), fixed_now()), Submission::Pending);
        assert_eq!(game.rounds(), 0);
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!("medium".parse::<Difficulty>().unwrap().level(), 3);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
