use rand::Rng;

use crate::catalog::{Behavior, CLASSROOM_SCENES, ClassroomScene};
use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

/// React to what the teacher says in class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classroom;

impl RoundRules for Classroom {
    type Stimulus = ClassroomScene;
    type Input = Behavior;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::Classroom
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::new(Reward::new(3, 10), Reward::new(1, 3), Reward::NONE)
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> ClassroomScene {
        CLASSROOM_SCENES[rng.random_range(0..CLASSROOM_SCENES.len())]
    }

    fn judge(&self, scene: &ClassroomScene, _: &mut (), behavior: Behavior) -> Judgement {
        let table = self.score_table();
        let verdict = if scene.good.contains(&behavior) {
            Verdict::from_table(&table, Tier::Best, "Great! That's how a good student behaves.")
        } else if scene.bad.contains(&behavior) {
            Verdict::from_table(
                &table,
                Tier::Incorrect,
                "That could disturb the lesson. What would help the class more?",
            )
        } else {
            Verdict::from_table(
                &table,
                Tier::Acceptable,
                "Not bad, but there's an even better way to act right now.",
            )
        };
        Judgement::Decided(verdict)
    }
}
