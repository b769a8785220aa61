use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::DISTRACTOR_SYMBOLS;
use crate::model::{ActivityId, Reward, RoundOutcome, Tier};

/// Cells in the 8×6 search grid.
pub const GRID_CELLS: usize = 48;

const PROGRESS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Target { found: bool },
    Distractor(&'static str),
}

/// Result of tapping a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    Hit { found: u32, total: u32 },
    /// The last target was found; the game is over.
    Completed(AttentionReport),
    AlreadyFound,
    Distractor,
    Empty,
    /// The game is not running or the index is off the grid.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SustainedEvent {
    Running { remaining_secs: u32 },
    Finished(AttentionReport),
}

/// Summary computed once when the search ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionReport {
    pub found: u32,
    pub total: u32,
    pub accuracy_percent: u32,
    pub elapsed_secs: u32,
    pub wrong_clicks: u32,
    pub outcome: RoundOutcome,
}

/// Percentage of targets found, rounded half up; 0 when there are none.
#[must_use]
pub fn accuracy_percent(found: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (found * 200 + total) / (2 * total)
}

/// Time-boxed search for every 🎯 in a grid full of distractors.
#[derive(Debug, Clone)]
pub struct SustainedAttention {
    cells: Vec<Cell>,
    total: u32,
    found: u32,
    wrong_clicks: u32,
    time_limit_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl SustainedAttention {
    /// Fill a fresh grid with 8–11 targets and 10–15 distractors.
    pub fn generate_grid<G: Rng + ?Sized>(rng: &mut G) -> Vec<Cell> {
        let targets = 8 + rng.random_range(0..4);
        let distractors = 10 + rng.random_range(0..6);

        let mut cells = Vec::with_capacity(GRID_CELLS);
        cells.extend((0..targets).map(|_| Cell::Target { found: false }));
        cells.extend((0..distractors).map(|_| {
            Cell::Distractor(DISTRACTOR_SYMBOLS[rng.random_range(0..DISTRACTOR_SYMBOLS.len())])
        }));
        cells.resize(GRID_CELLS, Cell::Empty);
        cells.shuffle(rng);
        cells
    }

    pub fn start<G: Rng + ?Sized>(time_limit_secs: u32, rng: &mut G) -> Self {
        Self::with_grid(Self::generate_grid(rng), time_limit_secs)
    }

    /// Run the search on a prepared grid; found flags are reset.
    #[must_use]
    pub fn with_grid(mut cells: Vec<Cell>, time_limit_secs: u32) -> Self {
        let mut total = 0;
        for cell in &mut cells {
            if let Cell::Target { found } = cell {
                *found = false;
                total += 1;
            }
        }
        Self {
            cells,
            total,
            found: 0,
            wrong_clicks: 0,
            time_limit_secs,
            remaining_secs: time_limit_secs,
            running: true,
        }
    }

    pub fn click(&mut self, index: usize) -> Click {
        if !self.running {
            return Click::Ignored;
        }
        match self.cells.get_mut(index) {
            None => Click::Ignored,
            Some(Cell::Target { found: true }) => Click::AlreadyFound,
            Some(Cell::Target { found }) => {
                *found = true;
                self.found += 1;
                if self.found >= self.total {
                    Click::Completed(self.finish())
                } else {
                    Click::Hit {
                        found: self.found,
                        total: self.total,
                    }
                }
            }
            Some(Cell::Distractor(_)) => {
                self.wrong_clicks += 1;
                Click::Distractor
            }
            Some(Cell::Empty) => {
                self.wrong_clicks += 1;
                Click::Empty
            }
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `None` once the game has ended.
    pub fn tick(&mut self) -> Option<SustainedEvent> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(SustainedEvent::Finished(self.finish()));
        }
        Some(SustainedEvent::Running {
            remaining_secs: self.remaining_secs,
        })
    }

    /// End early without a report.
    pub fn stop(&mut self) {
        self.running = false;
    }

    fn finish(&mut self) -> AttentionReport {
        self.running = false;
        let accuracy = accuracy_percent(self.found, self.total);
        let elapsed_secs = self.time_limit_secs - self.remaining_secs;
        let tier = if self.total > 0 && self.found >= self.total {
            Tier::Best
        } else if self.found > 0 {
            Tier::Acceptable
        } else {
            Tier::Incorrect
        };
        let feedback = format!(
            "Training complete! Accuracy {accuracy}%, focused for {elapsed_secs} seconds."
        );
        AttentionReport {
            found: self.found,
            total: self.total,
            accuracy_percent: accuracy,
            elapsed_secs,
            wrong_clicks: self.wrong_clicks,
            outcome: RoundOutcome::new(
                ActivityId::SustainedAttention,
                tier,
                Reward::new(accuracy / 20 + 1, PROGRESS),
                feedback,
                chrono::Duration::seconds(i64::from(elapsed_secs)),
            ),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn found(&self) -> u32 {
        self.found
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn wrong_clicks(&self) -> u32 {
        self.wrong_clicks
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Ten targets at the front, one distractor, the rest empty.
    fn ten_target_grid() -> Vec<Cell> {
        let mut cells = vec![Cell::Target { found: false }; 10];
        cells.push(Cell::Distractor("⭐"));
        cells.resize(GRID_CELLS, Cell::Empty);
        cells
    }

    #[test]
    fn generated_grid_has_expected_mix() {
        let cells = SustainedAttention::generate_grid(&mut StdRng::seed_from_u64(21));
        assert_eq!(cells.len(), GRID_CELLS);
        let targets = cells
            .iter()
            .filter(|c| matches!(c, Cell::Target { .. }))
            .count();
        let distractors = cells
            .iter()
            .filter(|c| matches!(c, Cell::Distractor(_)))
            .count();
        assert!((8..=11).contains(&targets));
        assert!((10..=15).contains(&distractors));
    }

    #[test]
    fn seven_of_ten_at_timeout_is_seventy_percent() {
        let mut game = SustainedAttention::with_grid(ten_target_grid(), 60);
        for i in 0..7 {
            assert!(matches!(game.click(i), Click::Hit { .. }));
        }

        let mut report = None;
        for _ in 0..60 {
            if let Some(SustainedEvent::Finished(r)) = game.tick() {
                report = Some(r);
            }
        }
        let report = report.expect("time-out should finish the game");
        assert_eq!(report.accuracy_percent, 70);
        assert_eq!(report.elapsed_secs, 60);
        assert_eq!(report.outcome.awarded_stars, 4);
        assert_eq!(report.outcome.progress_delta, 15);
        assert_eq!(report.outcome.tier, Tier::Acceptable);
    }

    #[test]
    fn finding_everything_ends_early_and_only_once() {
        let mut game = SustainedAttention::with_grid(ten_target_grid(), 60);
        game.tick();
        game.tick();
        for i in 0..9 {
            game.click(i);
        }
        let Click::Completed(report) = game.click(9) else {
            panic!("last target should complete the game");
        };
        assert_eq!(report.accuracy_percent, 100);
        assert_eq!(report.elapsed_secs, 2);
        assert_eq!(report.outcome.awarded_stars, 6);

        assert_eq!(game.tick(), None);
        assert_eq!(game.click(0), Click::Ignored);
    }

    #[test]
    fn wrong_clicks_are_counted() {
        let mut game = SustainedAttention::with_grid(ten_target_grid(), 60);
        assert_eq!(game.click(10), Click::Distractor);
        assert_eq!(game.click(30), Click::Empty);
        game.click(0);
        assert_eq!(game.click(0), Click::AlreadyFound);
        assert_eq!(game.click(500), Click::Ignored);
        assert_eq!(game.wrong_clicks(), 2);
    }

    #[test]
    fn stop_prevents_evaluation() {
        let mut game = SustainedAttention::with_grid(ten_target_grid(), 10);
        game.stop();
        assert_eq!(game.tick(), None);
        assert!(!game.is_running());
    }

    #[test]
    fn accuracy_rounds_half_up() {
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(11, 11), 100);
    }
}
