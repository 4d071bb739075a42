//! Action-space encoding: fixed masked vocabularies and action trees.

pub mod encoder;
pub mod tree;

pub use encoder::{ActionSpaceEncoder, DecodeError, OrderedActionSpace};
pub use tree::{ActionTree, NodeId, TreeNode};
