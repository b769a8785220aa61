use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::MEMORY_ITEMS;
use crate::games::engine::{Judgement, LevelPolicy, Pacing, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

/// Watch pictures appear one by one, then tap them in the same order.
///
/// Stimulus and input are indices into `MEMORY_ITEMS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingMemory;

impl WorkingMemory {
    /// Sequence length equals the level; the catalog bounds it.
    pub const LEVELS: LevelPolicy = LevelPolicy::new(3, MEMORY_ITEMS.len() as u32);
    pub const GAP: Duration = Duration::from_millis(1200);
    pub const TAIL: Duration = Duration::from_millis(2000);
}

impl RoundRules for WorkingMemory {
    type Stimulus = Vec<usize>;
    type Input = usize;
    type Response = Vec<usize>;

    fn activity(&self) -> ActivityId {
        ActivityId::WorkingMemory
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(4, 12))
    }

    fn leveling(&self) -> Option<LevelPolicy> {
        Some(Self::LEVELS)
    }

    fn generate<G: Rng + ?Sized>(&self, level: u32, rng: &mut G) -> Vec<usize> {
        let len = usize::try_from(Self::LEVELS.clamp(level)).unwrap_or(MEMORY_ITEMS.len());
        let mut items: Vec<usize> = (0..MEMORY_ITEMS.len()).collect();
        items.shuffle(rng);
        items.truncate(len);
        items
    }

    fn pacing(&self, items: &Vec<usize>) -> Pacing {
        Pacing::Paced {
            lead_in: Duration::ZERO,
            gap: Self::GAP,
            count: items.len(),
            tail: Self::TAIL,
        }
    }

    fn judge(&self, items: &Vec<usize>, recalled: &mut Vec<usize>, item: usize) -> Judgement {
        // Tapping a picture twice does nothing.
        if !recalled.contains(&item) {
            recalled.push(item);
        }
        if recalled.len() < items.len() {
            return Judgement::Pending;
        }

        let table = self.score_table();
        if *recalled == *items {
            Judgement::Decided(Verdict::from_table(
                &table,
                Tier::Best,
                "Excellent! You remembered the whole order!",
            ))
        } else {
            Judgement::Decided(Verdict::from_table(
                &table,
                Tier::Incorrect,
                "The order was a little different. Try again!",
            ))
        }
    }
}
