//! Mutable game state: turn-order bookkeeping, per-player data, results.
//!
//! `GameState` is the single mutable record of an episode. It is created by
//! the environment's `reset`, mutated exclusively through
//! [`ForwardModel::next`](crate::rules::ForwardModel::next) and extended
//! sequence callbacks, and replaced wholesale on the next `reset`.
//!
//! Games do not subclass the state; they store their data in the
//! string-keyed `player_state`/`turn_state` maps (i64 values only - encode
//! booleans as 0/1, entity references as raw IDs, enums as discriminants).

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::{GameConfig, PhaseId};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use super::timer::PlayerTimer;
use crate::rules::ExtendedSequence;

/// Per-player episode outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Episode still running for this player.
    #[default]
    Ongoing,
    /// Player won.
    Win,
    /// Player lost.
    Lose,
    /// Shared or tied result.
    Draw,
    /// Player was removed for rule violation or timeout.
    Disqualified,
}

impl Outcome {
    /// True once the episode has ended for this player.
    #[must_use]
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Scalar value of the outcome, for aggregate win-rate statistics.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Lose | Outcome::Disqualified => 0.0,
            Outcome::Ongoing => 0.0,
        }
    }
}

/// The mutable game record for one episode.
pub struct GameState {
    player_count: usize,

    /// Current phase (game-specific, opaque to the engine).
    pub phase: PhaseId,

    current_player: PlayerId,
    first_player: PlayerId,

    /// Player-turns taken so far.
    turn_counter: u32,
    /// Full rotations past `first_player`.
    round_counter: u32,
    /// Action sequence within the current turn.
    action_sequence: u32,

    terminal: bool,
    results: PlayerMap<Outcome>,

    /// Per-player state (resources, scores, ...) - games define keys.
    pub player_state: PlayerMap<FxHashMap<String, i64>>,

    /// Per-round state (cleared when the round advances).
    pub turn_state: FxHashMap<String, i64>,

    /// Decision-latency accounting, orthogonal to rules.
    pub timers: PlayerMap<PlayerTimer>,

    /// Deterministic RNG, re-seeded per episode.
    pub rng: GameRng,

    history: Vector<ActionRecord>,

    active_sequence: Option<Box<dyn ExtendedSequence>>,
}

impl GameState {
    /// Create a fresh state for one episode.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let n = config.player_count;
        Self {
            player_count: n,
            phase: config.initial_phase,
            current_player: config.first_player,
            first_player: config.first_player,
            turn_counter: 0,
            round_counter: 0,
            action_sequence: 0,
            terminal: false,
            results: PlayerMap::with_default(n),
            player_state: PlayerMap::with_default(n),
            turn_state: FxHashMap::default(),
            timers: PlayerMap::with_default(n),
            rng: GameRng::new(seed),
            history: Vector::new(),
            active_sequence: None,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    /// Player whose turn it is.
    ///
    /// An open extended sequence may route decisions to a different actor;
    /// use [`ForwardModel::current_player`](crate::rules::ForwardModel::current_player)
    /// for the decision-maker of record.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Player who opens each round.
    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    /// Override the turn holder (games with irregular turn order).
    pub fn set_current_player(&mut self, player: PlayerId) {
        self.current_player = player;
    }

    /// Player-turns taken so far.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Completed rotations past the first player.
    #[must_use]
    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    // === Player / turn state ===

    /// Get a player state value with default.
    #[must_use]
    pub fn get_player_state(&self, player: PlayerId, key: &str, default: i64) -> i64 {
        self.player_state[player].get(key).copied().unwrap_or(default)
    }

    /// Set a player state value.
    pub fn set_player_state(&mut self, player: PlayerId, key: impl Into<String>, value: i64) {
        self.player_state[player].insert(key.into(), value);
    }

    /// Modify a player state value by delta.
    pub fn modify_player_state(&mut self, player: PlayerId, key: &str, delta: i64) {
        let current = self.get_player_state(player, key, 0);
        self.player_state[player].insert(key.to_string(), current + delta);
    }

    /// Get a round-scoped state value with default.
    #[must_use]
    pub fn get_turn_state(&self, key: &str, default: i64) -> i64 {
        self.turn_state.get(key).copied().unwrap_or(default)
    }

    /// Set a round-scoped state value.
    pub fn set_turn_state(&mut self, key: impl Into<String>, value: i64) {
        self.turn_state.insert(key.into(), value);
    }

    // === Turn advancement ===

    /// Default end-of-turn bookkeeping: rotate the turn holder, bump the
    /// turn counter, and advance the round (clearing round-scoped state)
    /// when the rotation wraps past the first player.
    pub fn end_player_turn(&mut self) {
        self.current_player = self.current_player.next(self.player_count);
        self.turn_counter += 1;
        self.action_sequence = 0;
        if self.current_player == self.first_player {
            self.round_counter += 1;
            self.turn_state.clear();
        }
    }

    /// Get the next action sequence number within this turn and increment.
    pub fn next_action_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    // === Action history ===

    /// Record an applied action.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Full action history for this episode.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Extended sequences ===

    /// Mark an extended sequence as in progress.
    ///
    /// At most one sequence may be open; sequences do not nest.
    pub fn begin_sequence(&mut self, sequence: Box<dyn ExtendedSequence>) {
        assert!(
            self.active_sequence.is_none(),
            "an extended sequence is already in progress; sequences do not nest"
        );
        self.active_sequence = Some(sequence);
    }

    /// Whether an extended sequence is currently open.
    #[must_use]
    pub fn sequence_active(&self) -> bool {
        self.active_sequence.is_some()
    }

    /// Borrow the open sequence, if any.
    #[must_use]
    pub fn active_sequence(&self) -> Option<&dyn ExtendedSequence> {
        self.active_sequence.as_deref()
    }

    /// Take ownership of the open sequence for the duration of one
    /// `next()` call. Pair with [`GameState::restore_sequence`].
    pub fn take_sequence(&mut self) -> Option<Box<dyn ExtendedSequence>> {
        self.active_sequence.take()
    }

    /// Put an incomplete sequence back after its callbacks ran.
    pub fn restore_sequence(&mut self, sequence: Box<dyn ExtendedSequence>) {
        assert!(
            self.active_sequence.is_none(),
            "a different extended sequence was opened while one was taken"
        );
        self.active_sequence = Some(sequence);
    }

    // === Termination ===

    /// True once the episode has ended. Monotonic.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Per-player outcomes. All `Ongoing` until the episode ends.
    #[must_use]
    pub fn results(&self) -> &PlayerMap<Outcome> {
        &self.results
    }

    /// Outcome for a single player, queryable at any time.
    #[must_use]
    pub fn outcome_of(&self, player: PlayerId) -> Outcome {
        self.results[player]
    }

    /// End the episode with the given per-player outcomes.
    ///
    /// Every outcome must be decided; termination cannot be revoked.
    pub fn finish(&mut self, results: PlayerMap<Outcome>) {
        assert!(!self.terminal, "episode already finished");
        assert_eq!(results.player_count(), self.player_count);
        assert!(
            results.iter().all(|(_, o)| o.is_decided()),
            "finish() requires a decided outcome for every player"
        );
        self.results = results;
        self.terminal = true;
    }
}

impl Clone for GameState {
    fn clone(&self) -> Self {
        Self {
            player_count: self.player_count,
            phase: self.phase,
            current_player: self.current_player,
            first_player: self.first_player,
            turn_counter: self.turn_counter,
            round_counter: self.round_counter,
            action_sequence: self.action_sequence,
            terminal: self.terminal,
            results: self.results.clone(),
            player_state: self.player_state.clone(),
            turn_state: self.turn_state.clone(),
            timers: self.timers.clone(),
            rng: self.rng.clone(),
            history: self.history.clone(),
            active_sequence: self.active_sequence.as_ref().map(|s| s.clone_box()),
        }
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("current_player", &self.current_player)
            .field("turn_counter", &self.turn_counter)
            .field("round_counter", &self.round_counter)
            .field("terminal", &self.terminal)
            .field("sequence_active", &self.sequence_active())
            .finish_non_exhaustive()
    }
}
