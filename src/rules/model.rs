//! The forward model: rules, legality, and state transitions.
//!
//! A game implements [`ForwardModel`] by providing its rules (setup, legal
//! actions, execution, outcomes); the provided methods implement the shared
//! turn machinery on top: sequence delegation, end-of-turn bookkeeping,
//! action recording, and termination checks. Games override `after_action`
//! only when their turn structure deviates from simple rotation.

use tracing::{debug, trace};

use crate::core::{
    Action, ActionRecord, GameConfig, GameState, Outcome, PlayerId, PlayerMap,
};

/// The rules of a game, driving all state transitions.
///
/// The environment never mutates a `GameState` directly; every change goes
/// through [`ForwardModel::next`].
pub trait ForwardModel {
    /// The game's static configuration.
    fn config(&self) -> &GameConfig;

    /// Initialize a fresh state: deal resources, set the opening phase.
    ///
    /// Any randomness must come from `state.rng` so episodes replay from
    /// their seed.
    fn setup(&mut self, state: &mut GameState);

    /// Legal actions for the turn holder under the game's normal rules.
    ///
    /// Called only when no extended sequence is open; sequence sub-actions
    /// come from the sequence itself. See [`ForwardModel::legal_actions`].
    fn compute_legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply `action`'s game-specific effect to `state`.
    ///
    /// Actions that open a multi-step commitment call
    /// [`GameState::begin_sequence`] here. Must not advance the turn; the
    /// engine handles that after execution.
    fn execute(&mut self, state: &mut GameState, action: &Action);

    /// Check for episode end.
    ///
    /// Returns per-player outcomes once the game's end condition holds,
    /// `None` while the episode continues.
    fn outcomes(&self, state: &GameState) -> Option<PlayerMap<Outcome>>;

    /// Heuristic score of `state` from `player`'s perspective.
    fn score(&self, state: &GameState, player: PlayerId) -> f64;

    /// The view of `state` given to `player` when deciding.
    ///
    /// Defaults to a full copy; games with hidden information override this
    /// to redact what `player` cannot see.
    fn observe(&self, state: &GameState, player: PlayerId) -> GameState {
        let _ = player;
        state.clone()
    }

    /// Legal actions for the current decision point.
    ///
    /// Delegates to the open extended sequence when one is in progress,
    /// otherwise to the game's normal rules.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        match state.active_sequence() {
            Some(seq) => seq.legal_sub_actions(state),
            None => self.compute_legal_actions(state),
        }
    }

    /// The player deciding at this point: the sequence actor when a
    /// sequence is open, the turn holder otherwise.
    fn current_player(&self, state: &GameState) -> PlayerId {
        match state.active_sequence() {
            Some(seq) => seq.current_actor(state),
            None => state.current_player(),
        }
    }

    /// End-of-turn bookkeeping once an action (or a whole sequence)
    /// resolves. Defaults to plain rotation.
    fn after_action(&mut self, state: &mut GameState) {
        state.end_player_turn();
    }

    /// Apply one action: execute it, run sequence callbacks, advance the
    /// turn when nothing is pending, record it, and check termination.
    ///
    /// Must not be called on a terminal state.
    fn next(&mut self, state: &mut GameState, action: &Action) {
        assert!(
            !state.is_terminal(),
            "cannot apply an action to a finished episode"
        );

        let actor = self.current_player(state);
        let turn = state.turn_counter();
        let sequence_no = state.next_action_sequence();

        self.execute(state, action);

        // The sequence is detached while its callback runs so it can
        // mutate the state without aliasing itself.
        match state.take_sequence() {
            Some(mut seq) => {
                seq.after_sub_action(state, action);
                if seq.is_complete(state) {
                    self.after_action(state);
                } else {
                    state.restore_sequence(seq);
                }
            }
            None => self.after_action(state),
        }

        state.record_action(ActionRecord::new(actor, action.clone(), turn, sequence_no));
        trace!(player = %actor, template = %action.template, turn, "applied action");

        if !state.is_terminal() {
            if let Some(results) = self.outcomes(state) {
                state.finish(results);
            }
        }
        if !state.is_terminal() {
            if let Some(limit) = self.config().round_limit {
                if state.round_counter() >= limit {
                    debug!(limit, "round limit reached, finishing as all-draw");
                    state.finish(PlayerMap::with_value(state.player_count(), Outcome::Draw));
                }
            }
        }
    }
}
