//! Gym-style episode driver.
//!
//! [`GymEnv`] runs episodes of a game through the standard reinforcement
//! learning loop: `reset` starts an episode, `step` applies one external
//! decision. Seats held by scripted participants are resolved internally;
//! the environment fast-forwards through them (and through forced
//! single-action decisions) so `reset` and `step` always return with either
//! an external seat to act or a finished episode.
//!
//! Determinism: one master seed drives a [`SeedStream`] that hands each
//! episode its own seed, so a whole run replays exactly from the master
//! seed plus the recorded action indices.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Action, GameState, Outcome, PlayerId, PlayerMap, SeedStream};
use crate::env::error::EnvError;
use crate::env::participant::{Controller, Participant};
use crate::obs::Vectorizable;
use crate::space::{ActionSpaceEncoder, ActionTree, OrderedActionSpace};

/// What an external agent sees at a decision point.
#[derive(Clone, Debug)]
pub struct Observation {
    /// Flattened state features.
    pub vector: Vec<f32>,
    /// Legality mask over the fixed action vocabulary.
    pub mask: Vec<bool>,
    /// The seat this observation is for.
    pub player: PlayerId,
    /// Whether the episode has ended (the mask is then all false).
    pub done: bool,
}

/// Result of one `step`.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Observation after the step and any internal resolution.
    pub observation: Observation,
    /// Whether the episode has ended.
    pub done: bool,
    /// Heuristic score for the seat that acted.
    pub score: f64,
}

/// Minimal replay record: the episode seed plus every external action
/// index, in order. Enough to reproduce the episode bit for bit when the
/// scripted seats are seeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Seed the episode's state was created with.
    pub seed: u64,
    /// External action indices in submission order.
    pub steps: Vec<usize>,
}

/// Gym-style environment wrapping a forward model and a seating.
pub struct GymEnv<M: OrderedActionSpace + Vectorizable> {
    model: M,
    participants: Vec<Participant>,
    seeds: SeedStream,
    state: Option<GameState>,
    encoder: Option<ActionSpaceEncoder>,
    tick: u64,
    normalized: bool,
    record: EpisodeRecord,
}

impl<M: OrderedActionSpace + Vectorizable> GymEnv<M> {
    /// Create an environment.
    ///
    /// Validates the configuration up front: one participant per player,
    /// non-empty action vocabulary, non-empty observation vector.
    pub fn new(
        model: M,
        participants: Vec<Participant>,
        master_seed: u64,
    ) -> Result<Self, EnvError> {
        let expected = model.config().player_count;
        if participants.len() != expected {
            return Err(EnvError::ParticipantCount {
                expected,
                actual: participants.len(),
            });
        }
        if model.action_space_size() == 0 {
            return Err(EnvError::EmptyActionSpace);
        }
        if model.observation_space() == 0 {
            return Err(EnvError::EmptyObservationSpace);
        }

        Ok(Self {
            model,
            participants,
            seeds: SeedStream::new(master_seed),
            state: None,
            encoder: None,
            tick: 0,
            normalized: false,
            record: EpisodeRecord::default(),
        })
    }

    /// Return normalized observation vectors instead of raw features.
    #[must_use]
    pub fn with_normalized_observations(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Start a new episode: draw a fresh seed, set up the state, and
    /// resolve internal seats until an external decision is pending or the
    /// episode is over.
    pub fn reset(&mut self) -> Result<Observation, EnvError> {
        let seed = self.seeds.next_seed();
        let mut state = GameState::new(self.model.config(), seed);
        self.model.setup(&mut state);
        debug!(seed, players = state.player_count(), "episode reset");

        self.state = Some(state);
        self.tick = 0;
        self.record = EpisodeRecord {
            seed,
            steps: Vec::new(),
        };

        self.resolve_internal_turns();
        self.refresh_encoder();
        Ok(self.current_observation())
    }

    /// Apply one external decision by its action-space index, then resolve
    /// internal seats until the next external decision or episode end.
    pub fn step(&mut self, index: usize) -> Result<StepResult, EnvError> {
        let state = self.state.as_mut().ok_or(EnvError::NotReset)?;
        if state.is_terminal() {
            return Err(EnvError::EpisodeOver);
        }
        let encoder = self.encoder.as_ref().ok_or(EnvError::NotReset)?;
        let action = encoder.decode(index)?.clone();

        let actor = self.model.current_player(state);
        state.timers[actor].pause();
        state.timers[actor].increment_action();
        trace!(player = %actor, index, "external action");

        self.record.steps.push(index);
        self.model.next(state, &action);
        self.tick += 1;

        self.resolve_internal_turns();
        self.refresh_encoder();

        let state = self.state.as_ref().ok_or(EnvError::NotReset)?;
        let done = state.is_terminal();
        let score = self.model.score(state, actor);
        Ok(StepResult {
            observation: self.current_observation(),
            done,
            score,
        })
    }

    /// Play out decision points that never leave the environment: scripted
    /// seats, forced single actions of non-interactive seats, and no-op
    /// turns for players with nothing legal to do.
    fn resolve_internal_turns(&mut self) {
        loop {
            let Some(state) = self.state.as_mut() else {
                return;
            };
            if state.is_terminal() {
                return;
            }

            let actor = self.model.current_player(state);
            let participant = &mut self.participants[actor.index()];

            let view = self.model.observe(state, actor);
            let legal = self.model.legal_actions(&view);

            if legal.is_empty() {
                // A stuck player is a rules gap unless the game declares a
                // no-op template to absorb the turn.
                let template = self
                    .model
                    .config()
                    .no_op_template
                    .unwrap_or_else(|| panic!("player {actor} has no legal action and the game declares no no-op template"));
                if let Controller::Scripted(policy) = &mut participant.controller {
                    policy.observe(&view);
                }
                trace!(player = %actor, "no legal action, applying no-op");
                self.model.next(state, &Action::new(template));
                self.tick += 1;
                continue;
            }

            let forced = legal.len() == 1 && !participant.interactive;
            let action = match &mut participant.controller {
                Controller::External if forced => {
                    trace!(player = %actor, "auto-playing forced action for external seat");
                    legal[0].clone()
                }
                Controller::External => {
                    state.timers[actor].resume();
                    return;
                }
                Controller::Scripted(policy) if forced => {
                    policy.observe(&view);
                    legal[0].clone()
                }
                Controller::Scripted(policy) => {
                    state.timers[actor].resume();
                    let action = policy.choose(&view, &legal);
                    state.timers[actor].pause();
                    state.timers[actor].increment_action();
                    action
                }
            };

            trace!(player = %actor, template = %action.template, "internal action");
            self.model.next(state, &action);
            self.tick += 1;
        }
    }

    /// Rebuild the action-space snapshot for the pending decision point.
    fn refresh_encoder(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if state.is_terminal() {
            self.encoder = Some(ActionSpaceEncoder::empty(self.model.action_space_size()));
            return;
        }
        let actor = self.model.current_player(state);
        let view = self.model.observe(state, actor);
        let legal = self.model.legal_actions(&view);
        self.encoder = Some(ActionSpaceEncoder::build(&self.model, &view, &legal));
    }

    fn current_observation(&self) -> Observation {
        let state = self
            .state
            .as_ref()
            .unwrap_or_else(|| unreachable!("observation requested before reset"));
        let encoder = self
            .encoder
            .as_ref()
            .unwrap_or_else(|| unreachable!("encoder missing after reset"));

        let done = state.is_terminal();
        let player = if done {
            state.current_player()
        } else {
            self.model.current_player(state)
        };
        let view = self.model.observe(state, player);
        let vector = if self.normalized {
            self.model.normalized_observation_vector(&view)
        } else {
            self.model.observation_vector(&view)
        };
        Observation {
            vector,
            mask: encoder.mask().to_vec(),
            player,
            done,
        }
    }

    // === Queries ===

    /// Legality mask for the pending decision point.
    pub fn action_mask(&self) -> Result<&[bool], EnvError> {
        self.encoder
            .as_ref()
            .map(ActionSpaceEncoder::mask)
            .ok_or(EnvError::NotReset)
    }

    /// Action tree for the pending decision point.
    pub fn action_tree(&self) -> Result<&ActionTree, EnvError> {
        self.encoder
            .as_ref()
            .map(ActionSpaceEncoder::tree)
            .ok_or(EnvError::NotReset)
    }

    /// Total actions applied this episode, internal and external alike.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed the current episode's state was created with.
    pub fn last_seed(&self) -> Result<u64, EnvError> {
        self.state
            .as_ref()
            .map(|_| self.record.seed)
            .ok_or(EnvError::NotReset)
    }

    /// Whether the current episode has ended. False before the first reset.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state.as_ref().is_some_and(GameState::is_terminal)
    }

    /// Seat pending a decision.
    pub fn current_player(&self) -> Result<PlayerId, EnvError> {
        self.state
            .as_ref()
            .map(|s| self.model.current_player(s))
            .ok_or(EnvError::NotReset)
    }

    /// Heuristic score for `player` in the current state.
    pub fn score(&self, player: PlayerId) -> Result<f64, EnvError> {
        self.state
            .as_ref()
            .map(|s| self.model.score(s, player))
            .ok_or(EnvError::NotReset)
    }

    /// Per-player outcomes of the current episode.
    pub fn player_results(&self) -> Result<&PlayerMap<Outcome>, EnvError> {
        self.state
            .as_ref()
            .map(GameState::results)
            .ok_or(EnvError::NotReset)
    }

    /// Replay record of the current episode so far.
    pub fn episode_record(&self) -> Result<&EpisodeRecord, EnvError> {
        self.state
            .as_ref()
            .map(|_| &self.record)
            .ok_or(EnvError::NotReset)
    }

    /// The live game state, if an episode has started.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// The wrapped forward model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }
}
