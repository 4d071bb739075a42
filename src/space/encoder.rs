//! Fixed-size masked encoding of legal actions.
//!
//! Learning agents need a stable action space: every decision point maps
//! its legal actions into one fixed vocabulary of indices declared by the
//! game, with a boolean mask marking which indices are legal right now.
//! The same index always means the same move, so policies transfer across
//! states; decoding a masked or out-of-range index is the agent's error
//! and is reported, never silently substituted.

use thiserror::Error;

use crate::core::{Action, GameState};
use crate::rules::ForwardModel;
use crate::space::tree::ActionTree;

/// Failure to turn an agent-supplied index back into an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Index falls outside the declared action space.
    #[error("action index {index} out of range for action space of size {size}")]
    OutOfRange { index: usize, size: usize },

    /// Index is inside the space but not legal in the current state.
    #[error("action index {index} is masked (not legal in the current state)")]
    Masked { index: usize },
}

/// A forward model whose actions live in a fixed indexed vocabulary.
///
/// Games declare the vocabulary size and a total injective mapping from any
/// action they can ever emit to an index below that size. The mapping must
/// be state-independent for a given action value so indices stay comparable
/// across decision points.
pub trait OrderedActionSpace: ForwardModel {
    /// Size of the fixed action vocabulary.
    fn action_space_size(&self) -> usize;

    /// Fixed index of `action` within the vocabulary.
    fn action_index(&self, state: &GameState, action: &Action) -> usize;

    /// Hierarchical view of the currently legal actions.
    ///
    /// The default groups leaves under one branch per template, labelled
    /// with the configured template names.
    fn build_tree(&self, _state: &GameState, legal: &[Action]) -> ActionTree {
        let mut tree = ActionTree::new("actions");
        let mut branches: Vec<(crate::core::TemplateId, crate::space::tree::NodeId)> = Vec::new();

        for action in legal {
            let branch = match branches.iter().find(|(t, _)| *t == action.template) {
                Some((_, id)) => *id,
                None => {
                    let name = self.config().template_name(action.template);
                    let id = tree.add_branch(tree.root(), name);
                    branches.push((action.template, id));
                    id
                }
            };
            let label = if action.is_no_arg() {
                self.config().template_name(action.template)
            } else {
                format!("{:?}", action.args.as_slice())
            };
            tree.add_leaf(branch, label, action.clone());
        }
        tree
    }
}

/// Snapshot of one decision point's action space.
///
/// Holds the legality mask over the fixed vocabulary, the concrete action
/// behind each legal slot, and the hierarchical tree for inspection.
#[derive(Clone, Debug)]
pub struct ActionSpaceEncoder {
    size: usize,
    mask: Vec<bool>,
    slots: Vec<Option<Action>>,
    tree: ActionTree,
}

impl ActionSpaceEncoder {
    /// Encode `legal` for the current decision point.
    ///
    /// Panics if the game's `action_index` maps an action out of range or
    /// maps two distinct legal actions to the same index; both are game
    /// implementation bugs, not runtime conditions.
    #[must_use]
    pub fn build<M>(model: &M, state: &GameState, legal: &[Action]) -> Self
    where
        M: OrderedActionSpace + ?Sized,
    {
        let size = model.action_space_size();
        let mut mask = vec![false; size];
        let mut slots: Vec<Option<Action>> = vec![None; size];

        for action in legal {
            let index = model.action_index(state, action);
            assert!(
                index < size,
                "action {:?} mapped to index {} outside action space of size {}",
                action,
                index,
                size
            );
            assert!(
                !mask[index],
                "actions {:?} and {:?} collide at index {}",
                slots[index], action, index
            );
            mask[index] = true;
            slots[index] = Some(action.clone());
        }

        let tree = model.build_tree(state, legal);
        Self {
            size,
            mask,
            slots,
            tree,
        }
    }

    /// An all-masked encoder, used once the episode is over.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            mask: vec![false; size],
            slots: vec![None; size],
            tree: ActionTree::new("actions"),
        }
    }

    /// Size of the fixed vocabulary.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Legality mask over the vocabulary.
    #[must_use]
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Number of indices currently legal.
    #[must_use]
    pub fn legal_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// The action behind `index`.
    pub fn decode(&self, index: usize) -> Result<&Action, DecodeError> {
        if index >= self.size {
            return Err(DecodeError::OutOfRange {
                index,
                size: self.size,
            });
        }
        match &self.slots[index] {
            Some(action) => Ok(action),
            None => Err(DecodeError::Masked { index }),
        }
    }

    /// Hierarchical view of the legal actions.
    #[must_use]
    pub fn tree(&self) -> &ActionTree {
        &self.tree
    }
}
