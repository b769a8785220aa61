use rand::Rng;

use crate::catalog::{EMOTION_SCENES, Emotion, EmotionScene, REGULATION_SCENES, RegulationScene, Strategy};
use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

//
// ─── RECOGNITION ──────────────────────────────────────────────────────────────
//

/// Read a short situation and name the feeling.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionRecognition;

impl RoundRules for EmotionRecognition {
    type Stimulus = EmotionScene;
    type Input = Emotion;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::EmotionRecognition
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(2, 5))
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> EmotionScene {
        EMOTION_SCENES[rng.random_range(0..EMOTION_SCENES.len())]
    }

    fn judge(&self, scene: &EmotionScene, _: &mut (), guess: Emotion) -> Judgement {
        let table = self.score_table();
        let verdict = if guess == scene.emotion {
            Verdict::from_table(
                &table,
                Tier::Best,
                format!("That's right! They feel {}.", scene.emotion.label()),
            )
        } else {
            Verdict::from_table(
                &table,
                Tier::Incorrect,
                format!(
                    "Think again: in this situation they would probably feel {}.",
                    scene.emotion.label()
                ),
            )
        };
        Judgement::Decided(verdict)
    }
}

//
// ─── REGULATION ───────────────────────────────────────────────────────────────
//

/// Pick a calming strategy for a difficult feeling.
///
/// Every strategy helps a little; the one that suits the situation best earns
/// the full reward.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionRegulation;

impl RoundRules for EmotionRegulation {
    type Stimulus = RegulationScene;
    type Input = Strategy;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::EmotionRegulation
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::new(Reward::new(3, 12), Reward::new(1, 5), Reward::NONE)
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> RegulationScene {
        REGULATION_SCENES[rng.random_range(0..REGULATION_SCENES.len())]
    }

    fn judge(&self, scene: &RegulationScene, _: &mut (), strategy: Strategy) -> Judgement {
        let table = self.score_table();
        let verdict = if strategy == scene.best {
            Verdict::from_table(
                &table,
                Tier::Best,
                format!(
                    "{} is a great way to cope with feeling {}!",
                    strategy.label(),
                    scene.emotion.label()
                ),
            )
        } else {
            Verdict::from_table(
                &table,
                Tier::Acceptable,
                format!(
                    "{} can help too. Here, {} might work even better.",
                    strategy.label(),
                    scene.best.label().to_lowercase()
                ),
            )
        };
        Judgement::Decided(verdict)
    }

    fn forfeit_feedback(&self, _scene: &RegulationScene) -> String {
        "Choose one of the calming ideas on the screen.".to_owned()
    }
}
