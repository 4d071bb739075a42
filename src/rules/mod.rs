//! Game rules: the forward model and extended action sequences.

pub mod model;
pub mod sequence;

pub use model::ForwardModel;
pub use sequence::ExtendedSequence;
