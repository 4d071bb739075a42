//! Environment errors.

use thiserror::Error;

use crate::space::DecodeError;

/// Errors surfaced by the gym-style environment.
///
/// Configuration problems are reported by [`GymEnv::new`]; protocol misuse
/// (calling methods out of order, submitting illegal indices) by `reset`
/// and `step`. Rules bugs inside a game are not errors, they are panics.
///
/// [`GymEnv::new`]: crate::env::GymEnv::new
#[derive(Debug, Error)]
pub enum EnvError {
    /// `step` (or a query) was called before the first `reset`.
    #[error("environment not reset; call reset() before stepping")]
    NotReset,

    /// `step` was called after the episode ended.
    #[error("episode is over; call reset() to start a new one")]
    EpisodeOver,

    /// Participant list does not match the game's player count.
    #[error("game is configured for {expected} players but {actual} participants were supplied")]
    ParticipantCount { expected: usize, actual: usize },

    /// The game declared an empty action vocabulary.
    #[error("game declares an action space of size 0")]
    EmptyActionSpace,

    /// The game declared a zero-length observation vector.
    #[error("game declares an observation vector of length 0")]
    EmptyObservationSpace,

    /// An agent-supplied action index could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
