//! The shared MCTS tree.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::Move;

use super::node::{Edge, MCTSNode};

/// Root node plus a node budget.
///
/// Node creation goes through `expand`, which reserves a slot before the
/// edge's child is created, so the node count never exceeds `max_nodes`.
#[derive(Debug)]
pub struct MCTSTree {
    root: Arc<MCTSNode>,
    node_count: AtomicUsize,
    max_nodes: usize,
}

impl MCTSTree {
    /// Tree holding only a root node.
    #[must_use]
    pub fn new(max_nodes: usize) -> Self {
        Self {
            root: Arc::new(MCTSNode::new()),
            node_count: AtomicUsize::new(1),
            max_nodes: max_nodes.max(1),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Arc<MCTSNode> {
        &self.root
    }

    /// Nodes currently allocated, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node_count.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_nodes
    }

    /// Child of `edge`, expanding it if the node budget allows.
    ///
    /// Returns `None` when the edge has no child and the tree is full.
    /// The flag is `true` if this call created the child.
    pub fn expand(&self, edge: &Edge) -> Option<(Arc<MCTSNode>, bool)> {
        if let Some(child) = edge.child() {
            return Some((Arc::clone(child), false));
        }
        if !self.try_reserve() {
            return None;
        }
        let (child, created) = edge.child_or_expand();
        if !created {
            // Another worker won the race; give the slot back.
            self.node_count.fetch_sub(1, Ordering::AcqRel);
        }
        Some((Arc::clone(child), created))
    }

    fn try_reserve(&self) -> bool {
        self.node_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.max_nodes).then_some(count + 1)
            })
            .is_ok()
    }

    /// Drop every node except a fresh root.
    pub fn reset(&mut self) {
        self.root = Arc::new(MCTSNode::new());
        *self.node_count.get_mut() = 1;
    }

    /// Per-move statistics at the root, most visited first.
    #[must_use]
    pub fn root_moves(&self) -> Vec<RootMoveStats> {
        let mut moves: Vec<_> = self
            .root
            .children()
            .snapshot()
            .iter()
            .map(|edge| {
                let stats = edge.stats().snapshot();
                RootMoveStats {
                    mv: *edge.mv(),
                    visits: stats.visits,
                    mean_value: stats.mean(),
                }
            })
            .collect();
        // Stable sort keeps choice-key order among ties.
        moves.sort_by(|a, b| b.visits.cmp(&a.visits));
        moves
    }

    /// Walk the whole tree and collect shape statistics.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(Arc::clone(&self.root), 0u32)];

        while let Some((node, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(depth);

            let edges = node.children().snapshot();
            if edges.is_empty() {
                stats.leaf_count += 1;
            }
            for edge in edges {
                stats.total_edges += 1;
                if let Some(child) = edge.child() {
                    stats.expanded_edges += 1;
                    stack.push((Arc::clone(child), depth + 1));
                }
            }
        }
        stats
    }
}

/// Visit statistics of one root move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootMoveStats {
    pub mv: Move,
    pub visits: u64,
    /// Mean reward for the side that plays the move.
    pub mean_value: f64,
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u32,

    /// Nodes without outgoing edges.
    pub leaf_count: usize,

    /// Total number of edges (moves).
    pub total_edges: usize,

    /// Number of expanded edges (with children).
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Get the branching factor (average edges per node).
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes: {}, max depth: {}, leaves: {}, edges: {} ({} expanded, branching {:.2})",
            self.node_count,
            self.max_depth,
            self.leaf_count,
            self.total_edges,
            self.expanded_edges,
            self.branching_factor()
        )
    }
}
