//! Core engine types: players, actions, configuration, state, RNG, timers.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod timer;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, PhaseId, TemplateConfig, TemplateId};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, SeedStream};
pub use state::{GameState, Outcome};
pub use timer::PlayerTimer;
