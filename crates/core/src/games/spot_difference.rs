use rand::Rng;
use rand::seq::IndexedRandom;

use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

/// Number of cells in each 3×3 grid.
pub const GRID_CELLS: usize = 9;

const SHAPES: [&str; 6] = ["🔴", "🔵", "🟢", "🟡", "🟣", "🟠"];

/// Two grids that are identical except at `diff_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternPair {
    pub left: [&'static str; GRID_CELLS],
    pub right: [&'static str; GRID_CELLS],
    pub diff_index: usize,
}

impl PatternPair {
    /// Build a pair from a base grid, replacing one cell on the right side.
    ///
    /// Returns `None` if the index is outside the grid or the replacement
    /// equals the original cell.
    #[must_use]
    pub fn new(
        left: [&'static str; GRID_CELLS],
        diff_index: usize,
        replacement: &'static str,
    ) -> Option<Self> {
        if diff_index >= GRID_CELLS || left[diff_index] == replacement {
            return None;
        }
        let mut right = left;
        right[diff_index] = replacement;
        Some(Self {
            left,
            right,
            diff_index,
        })
    }
}

/// Find the single cell that differs between two grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotDifference;

impl RoundRules for SpotDifference {
    type Stimulus = PatternPair;
    type Input = usize;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::SpotDifference
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(3, 8))
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> PatternPair {
        let mut left = [SHAPES[0]; GRID_CELLS];
        for cell in &mut left {
            *cell = SHAPES[rng.random_range(0..SHAPES.len())];
        }
        let diff_index = rng.random_range(0..GRID_CELLS);
        let others: Vec<&'static str> = SHAPES
            .iter()
            .copied()
            .filter(|shape| *shape != left[diff_index])
            .collect();
        let replacement = others.choose(rng).copied().unwrap_or(SHAPES[0]);

        let mut right = left;
        right[diff_index] = replacement;
        PatternPair {
            left,
            right,
            diff_index,
        }
    }

    fn judge(&self, pair: &PatternPair, _: &mut (), index: usize) -> Judgement {
        let table = self.score_table();
        let verdict = if index == pair.diff_index {
            Verdict::from_table(&table, Tier::Best, "You found it! Sharp eyes!")
        } else if index >= GRID_CELLS {
            Verdict::from_table(&table, Tier::Incorrect, "Pick a square inside the grid.")
        } else {
            Verdict::from_table(&table, Tier::Incorrect, "Not that one. Look again carefully!")
        };
        Judgement::Decided(verdict)
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
    fn generated_grids_differ_in_exactly_one_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pair = SpotDifference.generate(1, &mut rng);
            let diffs: Vec<usize> = (0..GRID_CELLS)
                .filter(|&i| pair.left[i] != pair.right[i])
                .collect();
            assert_eq!(diffs, vec![pair.diff_index]);
        }
    }

    #[test]
    fn out_of_range_cell_is_incorrect() {
        let pair = PatternPair::new(["🔴"; GRID_CELLS], 4, "🔵").unwrap();
        let mut game = RoundGame::new(SpotDifference);
        game.present(pair, fixed_now()).unwrap();
        let Submission::Evaluated(outcome) = game.submit(42, fixed_now()) else {
            panic!("expected evaluation");
        };
        assert!(!outcome.success);
    }

    #[test]
    fn correct_cell_awards_three_stars() {
        let pair = PatternPair::new(["🔴"; GRID_CELLS], 7, "🟢").unwrap();
        let mut game = RoundGame::new(SpotDifference);
        game.present(pair, fixed_now()).unwrap();
        let Submission::Evaluated(outcome) = game.submit(7, fixed_now()) else {
            panic!("expected evaluation");
        };
        assert_eq!(outcome.reward(), Reward::new(3, 8));
    }

    #[test]
    fn pair_rejects_identical_replacement() {
        assert!(PatternPair::new(["🔴"; GRID_CELLS], 0, "🔴").is_none());
        assert!(PatternPair::new(["🔴"; GRID_CELLS], 9, "🔵").is_none());
    }
}
