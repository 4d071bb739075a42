//! Extended action sequences.
//!
//! Some actions open a multi-step commitment: the opening action puts a
//! sequence in progress, and subsequent decisions are routed to it until it
//! reports completion. While a sequence is open it owns the decision flow -
//! normal turn advancement is suspended and the sequence's actor (who need
//! not be the turn holder) picks from the sequence's sub-actions.
//!
//! At most one sequence is in progress at a time; a sub-action must not open
//! another sequence ([`GameState::begin_sequence`] rejects nesting).
//!
//! Sequence objects hold value data only (budgets, counters, chosen IDs),
//! never references into the state, so states clone cheaply via
//! [`ExtendedSequence::clone_box`].

use crate::core::{Action, GameState, PlayerId};

/// A multi-step action in progress.
///
/// Implementations are consulted by the forward model between the opening
/// action and completion:
///
/// 1. `legal_sub_actions` replaces the game's normal action computation
/// 2. `current_actor` replaces the turn holder as the decision-maker
/// 3. `after_sub_action` updates the sequence's own bookkeeping after each
///    applied sub-action
/// 4. `is_complete` ends the delegation; only then does the turn advance
pub trait ExtendedSequence: std::fmt::Debug + Send {
    /// The player who decides the next sub-action.
    fn current_actor(&self, state: &GameState) -> PlayerId;

    /// Legal sub-actions at this point in the sequence.
    ///
    /// Must be non-empty until `is_complete` returns true.
    fn legal_sub_actions(&self, state: &GameState) -> Vec<Action>;

    /// Update sequence bookkeeping after `action` was applied to `state`.
    ///
    /// Called for every action applied while this sequence is open,
    /// including the opening action itself.
    fn after_sub_action(&mut self, state: &mut GameState, action: &Action);

    /// Whether the sequence has finished and decision flow returns to the
    /// normal turn order.
    fn is_complete(&self, state: &GameState) -> bool;

    /// Clone into a box, so states holding a sequence stay cloneable.
    fn clone_box(&self) -> Box<dyn ExtendedSequence>;
}

impl Clone for Box<dyn ExtendedSequence> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, TemplateId};

    #[derive(Clone, Debug)]
    struct CountdownSequence {
        actor: PlayerId,
        remaining: u32,
    }

    impl ExtendedSequence for CountdownSequence {
        fn current_actor(&self, _state: &GameState) -> PlayerId {
            self.actor
        }

        fn legal_sub_actions(&self, _state: &GameState) -> Vec<Action> {
            vec![Action::new(TemplateId::new(9))]
        }

        fn after_sub_action(&mut self, _state: &mut GameState, _action: &Action) {
            self.remaining = self.remaining.saturating_sub(1);
        }

        fn is_complete(&self, _state: &GameState) -> bool {
            self.remaining == 0
        }

        fn clone_box(&self) -> Box<dyn ExtendedSequence> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_sequence_completion() {
        let mut state = GameState::new(&GameConfig::new(2), 1);
        let mut seq = CountdownSequence {
            actor: PlayerId::new(1),
            remaining: 2,
        };

        assert_eq!(seq.current_actor(&state), PlayerId::new(1));
        assert!(!seq.is_complete(&state));

        let action = Action::new(TemplateId::new(9));
        seq.after_sub_action(&mut state, &action);
        assert!(!seq.is_complete(&state));

        seq.after_sub_action(&mut state, &action);
        assert!(seq.is_complete(&state));
    }

    #[test]
    fn test_boxed_clone() {
        let seq: Box<dyn ExtendedSequence> = Box::new(CountdownSequence {
            actor: PlayerId::new(0),
            remaining: 3,
        });
        let state = GameState::new(&GameConfig::new(2), 1);

        let cloned = seq.clone();
        assert_eq!(cloned.current_actor(&state), seq.current_actor(&state));
        assert_eq!(cloned.is_complete(&state), seq.is_complete(&state));
    }
}
