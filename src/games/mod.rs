//! Bundled games.

pub mod quarry;

pub use quarry::{Quarry, QuarryBuilder};
