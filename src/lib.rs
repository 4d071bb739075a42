//! # boardgym
//!
//! A general-purpose turn-based game engine with a gym-style training
//! environment.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded phases, templates, or resources.
//!    Games configure these at startup and keep their data in the
//!    state's string-keyed value maps.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Forward-Model Driven**: The environment never touches game rules;
//!    every transition goes through `ForwardModel::next`, including
//!    multi-step extended sequences.
//!
//! 4. **Reproducible**: One master seed drives a per-episode seed stream,
//!    and an `EpisodeRecord` of action indices replays an episode exactly.
//!
//! ## Architecture
//!
//! - **Fixed Masked Action Space**: Games declare one indexed vocabulary;
//!   each decision point is a legality mask over it, so the same index
//!   always means the same move.
//!
//! - **Internal/External Seats**: Scripted participants are resolved
//!   inside `reset`/`step`; control returns only for external decisions
//!   or episode end.
//!
//! - **State Values**: Game data lives in `i64` maps for cheap cloning
//!   and structural comparison.
//!
//! ## Modules
//!
//! - `core`: Players, actions, state, RNG, timers, configuration
//! - `rules`: ForwardModel trait and extended action sequences
//! - `space`: Action-space encoding (fixed masked vocabulary, action tree)
//! - `obs`: Observation vectorization
//! - `env`: Gym-style episode driver and participants
//! - `games`: Bundled games

pub mod core;
pub mod rules;
pub mod space;
pub mod obs;
pub mod env;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, GameConfig, GameRng, GameRngState, GameState, Outcome, PhaseId,
    PlayerId, PlayerMap, PlayerTimer, SeedStream, TemplateConfig, TemplateId,
};

pub use crate::rules::{ExtendedSequence, ForwardModel};

pub use crate::space::{ActionSpaceEncoder, ActionTree, DecodeError, OrderedActionSpace};

pub use crate::obs::Vectorizable;

pub use crate::env::{
    EnvError, EpisodeRecord, FirstActionPolicy, GymEnv, Observation, Participant, Policy,
    RandomPolicy, StepResult,
};
