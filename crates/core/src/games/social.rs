use rand::Rng;

use crate::catalog::{
    CONVERSATION_PROMPTS, ConversationPrompt, PEER_SCENES, PeerAction, PeerScene, SHARING_SCENES,
    ShareChoice, SharingScene, TurnAction,
};
use crate::games::engine::{Judgement, RoundRules, Verdict};
use crate::model::{ActivityId, Reward, ScoreTable, Tier};

//
// ─── TURN TAKING ──────────────────────────────────────────────────────────────
//

/// Decide how to respond when a friend says something.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnTaking;

impl RoundRules for TurnTaking {
    type Stimulus = ConversationPrompt;
    type Input = TurnAction;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::TurnTaking
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::pass_fail(Reward::new(2, 6))
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> ConversationPrompt {
        CONVERSATION_PROMPTS[rng.random_range(0..CONVERSATION_PROMPTS.len())]
    }

    fn judge(&self, prompt: &ConversationPrompt, _: &mut (), action: TurnAction) -> Judgement {
        let table = self.score_table();
        let verdict = if action == prompt.expected {
            Verdict::from_table(&table, Tier::Best, prompt.feedback)
        } else {
            Verdict::from_table(&table, Tier::Incorrect, action.miss_feedback())
        };
        Judgement::Decided(verdict)
    }
}

//
// ─── SHARING ──────────────────────────────────────────────────────────────────
//

/// Choose how to share something another child wants.
///
/// Rewards depend on the choice as well as the tier: taking turns is always a
/// fair idea, so it keeps more credit when it is not the best fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sharing;

impl Sharing {
    const PROGRESS_PER_STAR: u32 = 3;

    #[must_use]
    pub fn reward(choice: ShareChoice, best: bool) -> Reward {
        let stars = match (best, choice) {
            (true, _) => 3,
            (false, ShareChoice::TakeTurns) => 2,
            (false, ShareChoice::Share | ShareChoice::Explain) => 1,
        };
        Reward::new(stars, stars * Self::PROGRESS_PER_STAR)
    }
}

impl RoundRules for Sharing {
    type Stimulus = SharingScene;
    type Input = ShareChoice;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::Sharing
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::new(
            Self::reward(ShareChoice::Share, true),
            Self::reward(ShareChoice::Share, false),
            Reward::NONE,
        )
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> SharingScene {
        SHARING_SCENES[rng.random_range(0..SHARING_SCENES.len())]
    }

    fn judge(&self, scene: &SharingScene, _: &mut (), choice: ShareChoice) -> Judgement {
        let best = choice == scene.best;
        let feedback = match (best, choice) {
            (true, ShareChoice::Share) => "Lovely! Sharing makes everyone happier.",
            (true, ShareChoice::TakeTurns) => "Great idea! Taking turns is fair for everyone.",
            (true, ShareChoice::Explain) => "Well done! Explaining kindly helps others understand.",
            (false, ShareChoice::TakeTurns) => {
                "Taking turns is fair. There's an even better choice here, though."
            }
            (false, _) => "That's a start. Think about what would feel fair to both of you.",
        };
        let tier = if best { Tier::Best } else { Tier::Acceptable };
        Judgement::Decided(Verdict::new(tier, Self::reward(choice, best), feedback))
    }
}

//
// ─── PEER RELATIONSHIPS ───────────────────────────────────────────────────────
//

/// Pick a friendly way to act in a social situation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeerRelationships;

impl PeerRelationships {
    /// Change applied to the session's friendship index for an answer.
    #[must_use]
    pub fn friendship_delta(tier: Tier) -> i32 {
        match tier {
            Tier::Best => 2,
            Tier::Acceptable => 1,
            Tier::Incorrect => -1,
        }
    }

    /// Applies `friendship_delta`, never going below zero.
    #[must_use]
    pub fn next_friendship(current: u32, tier: Tier) -> u32 {
        current.saturating_add_signed(Self::friendship_delta(tier))
    }
}

impl RoundRules for PeerRelationships {
    type Stimulus = PeerScene;
    type Input = PeerAction;
    type Response = ();

    fn activity(&self) -> ActivityId {
        ActivityId::PeerRelationships
    }

    fn score_table(&self) -> ScoreTable {
        ScoreTable::new(Reward::new(3, 10), Reward::new(1, 5), Reward::NONE)
    }

    fn generate<G: Rng + ?Sized>(&self, _level: u32, rng: &mut G) -> PeerScene {
        PEER_SCENES[rng.random_range(0..PEER_SCENES.len())]
    }

    fn judge(&self, scene: &PeerScene, _: &mut (), action: PeerAction) -> Judgement {
        let table = self.score_table();
        let verdict = if scene.positive.contains(&action) {
            Verdict::from_table(
                &table,
                Tier::Best,
                format!("{} is a great way to make friends!", action.label()),
            )
        } else if scene.negative.contains(&action) {
            Verdict::from_table(
                &table,
                Tier::Incorrect,
                format!("{} might upset the others. Try a friendlier way.", action.label()),
            )
        } else {
            Verdict::from_table(
                &table,
                Tier::Acceptable,
                "That's okay. Maybe there's an even friendlier choice?",
            )
        };
        Judgement::Decided(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::engine::{RoundGame, Submission};
    use crate::model::RoundOutcome;
    use crate::time::fixed_now;

    fn play<R: RoundRules>(rules: R, stimulus: R::Stimulus, input: R::Input) -> RoundOutcome {
        let mut game = RoundGame::new(rules);
        game.present(stimulus, fixed_now()).unwrap();
        match game.submit(input, fixed_now()) {
            Submission::Evaluated(outcome) => outcome,
            other => panic!("expected evaluation, got {other:?}"),
        }
    }

    #[test]
    fn turn_taking_uses_prompt_feedback() {
        let prompt = CONVERSATION_PROMPTS[2];
        let good = play(TurnTaking, prompt, TurnAction::ListenCarefully);
        assert_eq!(good.reward(), Reward::new(2, 6));
        assert_eq!(good.feedback, prompt.feedback);

        let miss = play(TurnTaking, prompt, TurnAction::TakeTurn);
        assert!(!miss.success);
        assert_eq!(miss.feedback, TurnAction::TakeTurn.miss_feedback());
    }

    #[test]
    fn sharing_rewards_follow_choice() {
        let console = SHARING_SCENES[0];
        assert_eq!(
            play(Sharing, console, ShareChoice::TakeTurns).reward(),
            Reward::new(3, 9)
        );

        let football = SHARING_SCENES[1];
        let turns = play(Sharing, football, ShareChoice::TakeTurns);
        assert_eq!(turns.tier, Tier::Acceptable);
        assert_eq!(turns.reward(), Reward::new(2, 6));
        assert_eq!(
            play(Sharing, football, ShareChoice::Explain).reward(),
            Reward::new(1, 3)
        );
    }

    #[test]
    fn peer_answers_span_all_tiers() {
        let scene = PEER_SCENES[1];
        assert_eq!(play(PeerRelationships, scene, PeerAction::Observe).tier, Tier::Best);
        assert_eq!(play(PeerRelationships, scene, PeerAction::Invite).tier, Tier::Acceptable);
        let forced = play(PeerRelationships, scene, PeerAction::Force);
        assert_eq!(forced.tier, Tier::Incorrect);
        assert_eq!(forced.reward(), Reward::NONE);
    }

    #[test]
    fn friendship_never_goes_negative() {
        assert_eq!(PeerRelationships::next_friendship(0, Tier::Incorrect), 0);
        assert_eq!(PeerRelationships::next_friendship(3, Tier::Best), 5);
        assert_eq!(PeerRelationships::next_friendship(3, Tier::Acceptable), 4);
    }
}
