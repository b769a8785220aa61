use rand::Rng;

use crate::catalog::{Story, StoryChoice};
use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

/// Progress points per star for story choices.
const PROGRESS_PER_STAR: u32 = 10;

/// Read a situational story and choose how to respond.
///
/// A story is picked from the menu rather than drawn at random, so every round
/// presents the same story. Input is the index of the chosen option.
#[derive(Debug, Clone, Copy)]
pub struct StoryScenario {
    story: &'static Story,
}

impl StoryScenario {
    #[must_use]
    pub fn new(story: &'static Story) -> Self {
        Self { story }
    }

    #[must_use]
    pub fn story(&self) -> &'static Story {
        self.story
    }

    fn tier(&self, choice: &StoryChoice) -> Tier {
        if !choice.correct {
            Tier::Incorrect
        } else if choice.stars >= self.story.best_stars() {
            Tier::Best
        } else {
            Tier::Acceptable
        }
    }
}

impl RoundRules for StoryScenario {
    type Stimulus = &'static Story;
    type Input = usize;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::Story(self.story.id)
    }

    fn score_table(&self) -> ScoreTable {
        let best = self.story.best_stars();
        ScoreTable::new(
            Reward::new(best, best * PROGRESS_PER_STAR),
            Reward::new(best, best * PROGRESS_PER_STAR),
            Reward::NONE,
        )
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, _rng: &mut G) -> &'static Story {
        self.story
    }

    fn judge(&self, story: &&'static Story, _: &mut (), index: usize) -> Judgement {
        let Some(choice) = story.choices.get(index) else {
            return Judgement::Decided(Verdict::from_table(
                &self.score_table(),
                Tier::Incorrect,
                "Pick one of the choices in the story.",
            ));
        };
        // Wrong choices may still carry a consolation star.
        let reward = Reward::new(choice.stars, choice.stars * PROGRESS_PER_STAR);
        Judgement::Decided(Verdict::new(self.tier(choice), reward, choice.feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::story;
    use crate::games::engine::{RoundGame, Submission};
    use crate::model::{RoundOutcome, StoryId};
    use crate::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn choose(id: StoryId, index: usize) -> RoundOutcome {
        let mut game = RoundGame::new(StoryScenario::new(story(id)));
        game.start(&mut StdRng::seed_from_u64(0), fixed_now()).unwrap();
        match game.submit(index, fixed_now()) {
            Submission::Evaluated(outcome) => outcome,
            other => panic!("expected evaluation, got {other:?}"),
        }
    }

    #[test]
    fn best_choice_uses_catalog_stars() {
        let outcome = choose(StoryId::WaterCup, 2);
        assert_eq!(outcome.tier, Tier::Best);
        assert_eq!(outcome.reward(), Reward::new(5, 50));
        assert_eq!(outcome.activity_id, ActivityId::Story(StoryId::WaterCup));
    }

    #[test]
    fn good_but_not_best_choice_is_acceptable() {
        let outcome = choose(StoryId::WaterCup, 1);
        assert_eq!(outcome.tier, Tier::Acceptable);
        assert_eq!(outcome.reward(), Reward::new(3, 30));
    }

    #[test]
    fn incorrect_choice_can_keep_a_consolation_star() {
        let outcome = choose(StoryId::BoredInClass, 0);
        assert!(!outcome.success);
        assert_eq!(outcome.awarded_stars, 1);
    }

    #[test]
    fn out_of_range_choice_is_incorrect() {
        let outcome = choose(StoryId::BallGame, 9);
        assert_eq!(outcome.tier, Tier::Incorrect);
        assert_eq!(outcome.reward(), Reward::NONE);
    }
}
