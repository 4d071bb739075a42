//! Observation vectorization for learning agents.

use crate::core::GameState;

/// A game whose states flatten into fixed-length feature vectors.
///
/// The vector length must be constant for a given game configuration; the
/// environment validates it once at construction.
pub trait Vectorizable {
    /// Length of the observation vector.
    fn observation_space(&self) -> usize;

    /// Flatten `state` into raw features, `observation_space()` long.
    fn observation_vector(&self, state: &GameState) -> Vec<f32>;

    /// Features scaled for network input, typically into [0, 1].
    ///
    /// Defaults to the raw features.
    fn normalized_observation_vector(&self, state: &GameState) -> Vec<f32> {
        self.observation_vector(state)
    }
}
