//! Hierarchical view of an action space.
//!
//! The tree groups a flat set of legal actions into named levels (typically
//! template, then argument) for inspection, UIs, and debugging. Flattening
//! the tree enumerates its leaves in insertion order, which is also the
//! order the encoder assigns contiguous indices in when a game does not
//! declare a fixed vocabulary.

use serde::{Deserialize, Serialize};

use crate::core::Action;

/// Index of a node within its [`ActionTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

/// One node of an action tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeNode {
    /// Label for inspection ("Gather", "size 3", ...).
    pub name: String,
    /// Depth below the root (root is 0).
    pub depth: usize,
    /// Child nodes, in insertion order.
    pub children: Vec<NodeId>,
    /// The concrete action, for leaf nodes.
    pub action: Option<Action>,
}

impl TreeNode {
    /// Whether this node carries a concrete action.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.action.is_some()
    }
}

/// A named tree over a set of concrete actions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionTree {
    nodes: Vec<TreeNode>,
    leaf_order: Vec<NodeId>,
}

impl ActionTree {
    /// Create a tree containing only a root branch.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![TreeNode {
                name: root_name.into(),
                depth: 0,
                children: Vec::new(),
                action: None,
            }],
            leaf_order: Vec::new(),
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Add an inner grouping node under `parent`.
    pub fn add_branch(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        self.insert(parent, name.into(), None)
    }

    /// Add a leaf carrying `action` under `parent`.
    pub fn add_leaf(&mut self, parent: NodeId, name: impl Into<String>, action: Action) -> NodeId {
        let id = self.insert(parent, name.into(), Some(action));
        self.leaf_order.push(id);
        id
    }

    fn insert(&mut self, parent: NodeId, name: String, action: Option<Action>) -> NodeId {
        let depth = self.nodes[parent.0].depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            name,
            depth,
            children: Vec::new(),
            action,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Number of leaves (concrete actions).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_order.len()
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The leaf actions in insertion order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Action> {
        self.leaf_order
            .iter()
            .map(|id| {
                self.nodes[id.0]
                    .action
                    .as_ref()
                    .unwrap_or_else(|| unreachable!("leaf_order holds only leaves"))
            })
            .collect()
    }

    /// Node count per depth level, root first.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        for node in &self.nodes {
            if node.depth >= shape.len() {
                shape.resize(node.depth + 1, 0);
            }
            shape[node.depth] += 1;
        }
        shape
    }
}
