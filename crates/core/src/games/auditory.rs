use std::time::Duration;

use rand::Rng;

use crate::catalog::TONE_FREQUENCIES_HZ;
use crate::games::engine::{Judgement, LevelPolicy, Pacing, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

const MAX_TONES: usize = 8;

/// Listen to a run of tones, then press the buttons in the same order.
///
/// Tones are numbered `1..=4`; see `TONE_FREQUENCIES_HZ` for their pitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditorySequence;

impl AuditorySequence {
    pub const LEVELS: LevelPolicy = LevelPolicy::new(1, 10);
    pub const LEAD_IN: Duration = Duration::from_millis(1000);
    pub const GAP: Duration = Duration::from_millis(800);

    #[must_use]
    pub fn sequence_len(level: u32) -> usize {
        let grown = 3 + usize::try_from(level / 2).unwrap_or(MAX_TONES);
        grown.min(MAX_TONES)
    }

    /// Pitch of a tone button, `None` for numbers outside `1..=4`.
    #[must_use]
    pub fn frequency(tone: u8) -> Option<f32> {
        let index = usize::from(tone.checked_sub(1)?);
        TONE_FREQUENCIES_HZ.get(index).copied()
    }
}

impl RoundRules for AuditorySequence {
    type Stimulus = Vec<u8>;
    type Input = u8;
    type Response = Vec<u8>;

    fn activity(&self) -> ActivityId {
        ActivityId::AuditorySequence
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(3, 10))
    }

    fn leveling(&self) -> Option<LevelPolicy> {
        Some(Self::LEVELS)
    }

    fn generate<G: Rng + ?Sized>(&self, level: u32, rng: &mut G) -> Vec<u8> {
        let tones = u8::try_from(TONE_FREQUENCIES_HZ.len()).unwrap_or(4);
        (0..Self::sequence_len(level))
            .map(|_| rng.random_range(1..=tones))
            .collect()
    }

    fn pacing(&self, tones: &Vec<u8>) -> Pacing {
        Pacing::Paced {
            lead_in: Self::LEAD_IN,
            gap: Self::GAP,
            count: tones.len(),
            tail: Duration::ZERO,
        }
    }

    fn judge(&self, tones: &Vec<u8>, heard: &mut Vec<u8>, tone: u8) -> Judgement {
        let table = self.score_table();
        let position = heard.len();
        heard.push(tone);

        if tones.get(position) != Some(&tone) {
            return Judgement::Decided(Verdict::from_table(
                &table,
                Tier::Incorrect,
                "Oops, that tone was different. Listen again!",
            ));
        }
        if heard.len() < tones.len() {
            return Judgement::Pending;
        }
        Judgement::Decided(Verdict::from_table(
            &table,
            Tier::Best,
            "Perfect! You remembered every tone!",
        ))
    }
}
