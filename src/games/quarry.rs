//! Quarry: a small resource game exercising the whole engine surface.
//!
//! Each turn a player either gathers stone, passes, or starts a build. A
//! build is a multi-step commitment: the builder places blocks one at a
//! time against a strength budget, and may stop after the first block.
//! Placing a block spends that much stone and scores that many points,
//! with a bonus for the largest block size. Highest score after a fixed
//! number of rounds wins.
//!
//! The game is deliberately tiny but covers every engine feature: an
//! extended sequence, a fixed masked action space, observation vectors,
//! seeded setup randomness, and a declared no-op template.

use crate::core::{
    Action, GameConfig, GameState, Outcome, PlayerId, PlayerMap, TemplateConfig, TemplateId,
};
use crate::obs::Vectorizable;
use crate::rules::{ExtendedSequence, ForwardModel};
use crate::space::OrderedActionSpace;

/// Do nothing this turn.
pub const PASS: TemplateId = TemplateId::new(0);
/// Gather `arg0` stone.
pub const GATHER: TemplateId = TemplateId::new(1);
/// Open a build sequence.
pub const BUILD: TemplateId = TemplateId::new(2);
/// Place a block of size `arg0` (sub-action of a build).
pub const PLACE: TemplateId = TemplateId::new(3);

const STONE: &str = "stone";
const POINTS: &str = "points";

/// Configuration builder for [`Quarry`].
pub struct QuarryBuilder {
    players: usize,
    rounds: u32,
    max_gather: i64,
    max_block: i64,
    starting_stone: i64,
}

impl QuarryBuilder {
    /// Start from the defaults: 3 rounds, gather up to 3, blocks up to
    /// size 4, 2 starting stone.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            players,
            rounds: 3,
            max_gather: 3,
            max_block: 4,
            starting_stone: 2,
        }
    }

    /// Number of full rounds before scoring.
    #[must_use]
    pub fn rounds(mut self, rounds: u32) -> Self {
        assert!(rounds > 0, "Must play at least 1 round");
        self.rounds = rounds;
        self
    }

    /// Largest amount of stone a single gather yields.
    #[must_use]
    pub fn max_gather(mut self, max_gather: i64) -> Self {
        assert!(max_gather > 0, "Must be able to gather at least 1 stone");
        self.max_gather = max_gather;
        self
    }

    /// Largest block size, which is also the build strength budget.
    #[must_use]
    pub fn max_block(mut self, max_block: i64) -> Self {
        assert!(max_block > 0, "Blocks must have at least size 1");
        self.max_block = max_block;
        self
    }

    /// Stone each player starts with, before the random bonus.
    #[must_use]
    pub fn starting_stone(mut self, stone: i64) -> Self {
        assert!(stone >= 0, "Starting stone cannot be negative");
        self.starting_stone = stone;
        self
    }

    /// Build the game.
    #[must_use]
    pub fn build(self) -> Quarry {
        let config = GameConfig::new(self.players)
            .with_template(TemplateConfig::new(PASS, "Pass"))
            .with_template(TemplateConfig::new(GATHER, "Gather"))
            .with_template(TemplateConfig::new(BUILD, "Build"))
            .with_template(TemplateConfig::new(PLACE, "Place"))
            .with_no_op_template(PASS);
        Quarry {
            config,
            rounds: self.rounds,
            max_gather: self.max_gather,
            max_block: self.max_block,
            starting_stone: self.starting_stone,
        }
    }
}

/// The quarry forward model.
pub struct Quarry {
    config: GameConfig,
    rounds: u32,
    max_gather: i64,
    max_block: i64,
    starting_stone: i64,
}

impl Quarry {
    /// Start configuring a game for `players`.
    #[must_use]
    pub fn builder(players: usize) -> QuarryBuilder {
        QuarryBuilder::new(players)
    }

    fn stone(state: &GameState, player: PlayerId) -> i64 {
        state.get_player_state(player, STONE, 0)
    }

    fn points(state: &GameState, player: PlayerId) -> i64 {
        state.get_player_state(player, POINTS, 0)
    }

    /// Points for placing a block of `size`.
    fn block_points(&self, size: i64) -> i64 {
        if size == self.max_block {
            size + 1
        } else {
            size
        }
    }
}

/// One build in progress: place blocks against a strength budget, with the
/// option to stop after the first block.
#[derive(Clone, Debug)]
struct BuildSequence {
    builder: PlayerId,
    /// Remaining strength budget.
    remaining: i64,
    placed: u32,
    passed: bool,
}

impl BuildSequence {
    fn budget(&self, state: &GameState) -> i64 {
        self.remaining.min(Quarry::stone(state, self.builder))
    }
}

impl ExtendedSequence for BuildSequence {
    fn current_actor(&self, _state: &GameState) -> PlayerId {
        self.builder
    }

    fn legal_sub_actions(&self, state: &GameState) -> Vec<Action> {
        let budget = self.budget(state);
        let mut actions: Vec<Action> = (1..=budget)
            .map(|size| Action::with_args(PLACE, &[size as i32]))
            .collect();
        // Stopping early is allowed once something has been placed.
        if self.placed > 0 {
            actions.push(Action::new(PASS));
        }
        actions
    }

    fn after_sub_action(&mut self, _state: &mut GameState, action: &Action) {
        match action.template {
            PLACE => {
                let size = i64::from(action.arg(0).unwrap_or(0));
                self.remaining -= size;
                self.placed += 1;
            }
            PASS => self.passed = true,
            // The opening build action itself changes nothing.
            _ => {}
        }
    }

    fn is_complete(&self, state: &GameState) -> bool {
        self.passed || self.budget(state) < 1
    }

    fn clone_box(&self) -> Box<dyn ExtendedSequence> {
        Box::new(self.clone())
    }
}

impl ForwardModel for Quarry {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn setup(&mut self, state: &mut GameState) {
        for player in state.player_ids().collect::<Vec<_>>() {
            let bonus = state.rng.gen_range(0..3);
            state.set_player_state(player, STONE, self.starting_stone + bonus);
            state.set_player_state(player, POINTS, 0);
        }
    }

    fn compute_legal_actions(&self, state: &GameState) -> Vec<Action> {
        let player = state.current_player();
        let mut actions = vec![Action::new(PASS)];
        for amount in 1..=self.max_gather {
            actions.push(Action::with_args(GATHER, &[amount as i32]));
        }
        if Self::stone(state, player) >= 1 {
            actions.push(Action::new(BUILD));
        }
        actions
    }

    fn execute(&mut self, state: &mut GameState, action: &Action) {
        let player = self.current_player(state);
        match action.template {
            PASS => {}
            GATHER => {
                let amount = i64::from(action.arg(0).unwrap_or(0));
                state.modify_player_state(player, STONE, amount);
            }
            BUILD => {
                let budget = self.max_block.min(Self::stone(state, player));
                state.begin_sequence(Box::new(BuildSequence {
                    builder: player,
                    remaining: budget,
                    placed: 0,
                    passed: false,
                }));
            }
            PLACE => {
                let size = i64::from(action.arg(0).unwrap_or(0));
                state.modify_player_state(player, STONE, -size);
                state.modify_player_state(player, POINTS, self.block_points(size));
            }
            other => unreachable!("unknown template {other}"),
        }
    }

    fn outcomes(&self, state: &GameState) -> Option<PlayerMap<Outcome>> {
        if state.round_counter() < self.rounds {
            return None;
        }
        let best = state
            .player_ids()
            .map(|p| Self::points(state, p))
            .max()
            .unwrap_or(0);
        let leaders = state
            .player_ids()
            .filter(|&p| Self::points(state, p) == best)
            .count();

        let mut results = PlayerMap::with_value(state.player_count(), Outcome::Lose);
        for player in state.player_ids() {
            if Self::points(state, player) == best {
                results[player] = if leaders > 1 {
                    Outcome::Draw
                } else {
                    Outcome::Win
                };
            }
        }
        Some(results)
    }

    fn score(&self, state: &GameState, player: PlayerId) -> f64 {
        Self::points(state, player) as f64
    }
}

impl OrderedActionSpace for Quarry {
    /// Vocabulary layout, fixed for a given configuration:
    /// `[Pass, Gather(1..=max_gather), Build, Place(1..=max_block)]`.
    fn action_space_size(&self) -> usize {
        (2 + self.max_gather + self.max_block) as usize
    }

    fn action_index(&self, _state: &GameState, action: &Action) -> usize {
        match action.template {
            PASS => 0,
            GATHER => action.arg(0).unwrap_or(0) as usize,
            BUILD => (1 + self.max_gather) as usize,
            PLACE => (1 + self.max_gather + i64::from(action.arg(0).unwrap_or(0))) as usize,
            other => unreachable!("unknown template {other}"),
        }
    }
}

impl Vectorizable for Quarry {
    fn observation_space(&self) -> usize {
        3 * self.config.player_count + 2
    }

    fn observation_vector(&self, state: &GameState) -> Vec<f32> {
        let mut features = Vec::with_capacity(self.observation_space());
        for player in state.player_ids() {
            features.push(Self::stone(state, player) as f32);
            features.push(Self::points(state, player) as f32);
            features.push(if player == state.current_player() {
                1.0
            } else {
                0.0
            });
        }
        features.push(state.round_counter() as f32);
        features.push(if state.sequence_active() { 1.0 } else { 0.0 });
        features
    }

    fn normalized_observation_vector(&self, state: &GameState) -> Vec<f32> {
        let stone_cap = (self.starting_stone + 2 + i64::from(self.rounds) * self.max_gather) as f32;
        let point_cap = (i64::from(self.rounds) * (self.max_block + 1)).max(1) as f32;

        let mut features = self.observation_vector(state);
        let per_player = 3;
        for player in 0..state.player_count() {
            features[player * per_player] /= stone_cap;
            features[player * per_player + 1] /= point_cap;
        }
        let round_slot = state.player_count() * per_player;
        features[round_slot] /= self.rounds as f32;
        features
    }
}
