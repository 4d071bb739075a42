//! Gym-style episode environment: participants, driver, errors.

pub mod driver;
pub mod error;
pub mod participant;

pub use driver::{EpisodeRecord, GymEnv, Observation, StepResult};
pub use error::EnvError;
pub use participant::{Controller, FirstActionPolicy, Participant, Policy, RandomPolicy};
