//! MCTS node and edge structures.
//!
//! The tree is shared by every search worker, so nodes own their children
//! directly instead of living in an arena:
//!
//! - a node keeps its outgoing edges in a `ChildNodeMap`, keyed by the
//!   move's choice key and guarded by a `parking_lot::RwLock`;
//! - edges are `Arc`-allocated, so a handle stays valid while other keys
//!   are inserted;
//! - an edge's child node sits in a `OnceLock`, so at most one child is
//!   ever created for it;
//! - all statistics are atomics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::Move;
use crate::error::SearchError;

/// Visit count and accumulated value of an edge.
///
/// The value sum is stored as `f64` bits and updated by compare-exchange,
/// so concurrent back-propagation never loses an update.
#[derive(Debug, Default)]
pub struct EdgeStats {
    visits: AtomicU64,
    total_value: AtomicU64,
}

impl EdgeStats {
    /// Add one visit worth `value`.
    pub fn record(&self, value: f64) {
        let mut current = self.total_value.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + value).to_bits();
            match self.total_value.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
        self.visits.fetch_add(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn visits(&self) -> u64 {
        self.visits.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        f64::from_bits(self.total_value.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn snapshot(&self) -> EdgeSnapshot {
        EdgeSnapshot {
            visits: self.visits(),
            total_value: self.total_value(),
        }
    }
}

/// Point-in-time copy of `EdgeStats`, handed to selection policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub visits: u64,
    pub total_value: f64,
}

impl EdgeSnapshot {
    /// Mean value, 0 when unvisited.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }
}

/// Edge representing a move from a parent node to a child.
#[derive(Debug)]
pub struct Edge {
    choice: i32,
    mv: Move,
    stats: EdgeStats,
    child: OnceLock<Arc<MCTSNode>>,
}

impl Edge {
    #[must_use]
    pub fn new(choice: i32, mv: Move) -> Self {
        Self {
            choice,
            mv,
            stats: EdgeStats::default(),
            child: OnceLock::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn choice(&self) -> i32 {
        self.choice
    }

    #[inline]
    #[must_use]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> &EdgeStats {
        &self.stats
    }

    /// Child node, if this edge has been expanded.
    #[must_use]
    pub fn child(&self) -> Option<&Arc<MCTSNode>> {
        self.child.get()
    }

    /// Child node, creating it on first call.
    ///
    /// Returns the child and whether this call created it. When several
    /// workers race, exactly one of them sees `true`.
    pub fn child_or_expand(&self) -> (&Arc<MCTSNode>, bool) {
        let mut created = false;
        let child = self.child.get_or_init(|| {
            created = true;
            Arc::new(MCTSNode::new())
        });
        (child, created)
    }
}

/// Outgoing edges of a node, keyed by `Move::choice_key`.
#[derive(Debug, Default)]
pub struct ChildNodeMap {
    map: RwLock<FxHashMap<i32, Arc<Edge>>>,
}

impl ChildNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge for `choice`, if one exists.
    #[must_use]
    pub fn get(&self, choice: i32) -> Option<Arc<Edge>> {
        self.map.read().get(&choice).cloned()
    }

    /// Insert a new edge. Fails if `choice` already has one.
    pub fn create(&self, choice: i32, mv: Move) -> Result<Arc<Edge>, SearchError> {
        let mut map = self.map.write();
        if map.contains_key(&choice) {
            return Err(SearchError::DuplicateEdge { choice });
        }
        let edge = Arc::new(Edge::new(choice, mv));
        map.insert(choice, Arc::clone(&edge));
        Ok(edge)
    }

    /// Edge for `choice`, inserting it if absent.
    ///
    /// The check is repeated under the write lock, so concurrent callers
    /// all receive the same `Arc`.
    pub fn get_or_create(&self, choice: i32, mv: Move) -> Arc<Edge> {
        if let Some(edge) = self.get(choice) {
            return edge;
        }
        let mut map = self.map.write();
        Arc::clone(
            map.entry(choice)
                .or_insert_with(|| Arc::new(Edge::new(choice, mv))),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// All edges, ordered by choice key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<Edge>> {
        let mut edges: Vec<_> = self.map.read().values().cloned().collect();
        edges.sort_by_key(|edge| edge.choice());
        edges
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Default)]
pub struct MCTSNode {
    visits: AtomicU64,
    children: ChildNodeMap,
}

impl MCTSNode {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> u64 {
        self.visits.load(Ordering::Acquire)
    }

    pub fn record_visit(&self) {
        self.visits.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &ChildNodeMap {
        &self.children
    }

    /// Most visited edge; ties go to the lowest choice key.
    #[must_use]
    pub fn best_edge(&self) -> Option<Arc<Edge>> {
        self.children
            .snapshot()
            .into_iter()
            .rev()
            .max_by_key(|edge| edge.stats().visits())
    }
}
