//! Action representation: template + opaque arguments.
//!
//! Actions are compositional: a template (the "verb") plus a short list of
//! integer arguments (the "nouns"). Arguments are opaque to the engine;
//! games resolve them at execute time, typically as component identifiers
//! or magnitudes. For example:
//! - "Pass" = template only, no arguments
//! - "Gather 2 stone" = template + 1 argument (the amount)
//! - "Place block of size 3" = template + 1 argument (the size)
//!
//! Actions carry value data only, never live references into game state.
//! Equality and hashing are structural, enabling deduplication and test
//! comparison.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::TemplateId;
use super::player::PlayerId;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use boardgym::core::{Action, TemplateId};
///
/// // "Pass" action - no arguments
/// let pass = Action::new(TemplateId::new(0));
///
/// // "Gather 2" action - one argument
/// let gather = Action::with_args(TemplateId::new(1), &[2]);
/// assert_eq!(gather.arg(0), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The action template (type of action).
    pub template: TemplateId,

    /// Opaque arguments for this action.
    /// SmallVec optimizes for 0-3 arguments (common case) without heap allocation.
    pub args: SmallVec<[i32; 3]>,
}

impl Action {
    /// Create an action with no arguments.
    #[must_use]
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            args: SmallVec::new(),
        }
    }

    /// Create an action with the given arguments.
    #[must_use]
    pub fn with_args(template: TemplateId, args: &[i32]) -> Self {
        Self {
            template,
            args: SmallVec::from_slice(args),
        }
    }

    /// Get the argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<i32> {
        self.args.get(index).copied()
    }

    /// Get the number of arguments.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Check if this action has no arguments.
    #[must_use]
    pub fn is_no_arg(&self) -> bool {
        self.args.is_empty()
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay, debugging, and training data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn counter value when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
