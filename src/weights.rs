//! Per-extraction weight annotations.
//!
//! Scoring writes content-likelihood weights for individual elements (its own
//! candidates and, as a side effect, their children and grandchildren). The
//! formatter reads them back to decide what to prune. The table is keyed by
//! node identity and threaded explicitly through every call, so the parsed
//! tree itself is never written to.

use std::collections::HashMap;

use dom_query::NodeId;

/// Signed weight per element. Elements without an entry have weight 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightTable {
    weights: HashMap<NodeId, i32>,
}

impl WeightTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of `id`, or 0 when never annotated.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> i32 {
        self.weights.get(&id).copied().unwrap_or(0)
    }

    /// Whether `id` carries an annotation at all.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.weights.contains_key(&id)
    }

    /// Overwrite the weight of `id`.
    pub fn set(&mut self, id: NodeId, weight: i32) {
        self.weights.insert(id, weight);
    }

    /// Add `delta` to the weight of `id`, starting from 0 when absent.
    pub fn add(&mut self, id: NodeId, delta: i32) {
        *self.weights.entry(id).or_insert(0) += delta;
    }

    /// Number of annotated elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no element is annotated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Drop every annotation.
    pub fn clear(&mut self) {
        self.weights.clear();
    }
}
