//! Street coverage: how many streets a path has completed.
//!
//! A street is completed when every node of every one of its segments is on
//! the path, in any order.  Membership is always tested against a hash set of
//! path nodes, never by scanning the path.
//!
//! The search evaluates thousands of candidate extensions of one fixed path.
//! [`CoverageTracker`] caches the fixed part once and re-checks only the
//! streets an extension actually touches.

use rustc_hash::FxHashSet;

use strides_core::{NodeId, StreetId};

use crate::{Street, StreetGraph};

/// Number of streets completed by `path`.
pub fn streets_completed(graph: &StreetGraph, path: &[NodeId]) -> usize {
    let visited: FxHashSet<NodeId> = path.iter().copied().collect();
    graph
        .streets()
        .iter()
        .filter(|s| s.counts_toward_coverage() && s.nodes.iter().all(|n| visited.contains(n)))
        .count()
}

/// The streets completed by `path`, in name order.
pub fn completed_streets<'g>(graph: &'g StreetGraph, path: &[NodeId]) -> Vec<&'g Street> {
    let visited: FxHashSet<NodeId> = path.iter().copied().collect();
    graph
        .streets()
        .iter()
        .filter(|s| s.counts_toward_coverage() && s.nodes.iter().all(|n| visited.contains(n)))
        .collect()
}

/// Coverage of a fixed base path, queried against candidate extensions.
pub struct CoverageTracker<'g> {
    graph:          &'g StreetGraph,
    visited:        FxHashSet<NodeId>,
    /// `true` for named streets not yet completed by the base path.
    pending:        Vec<bool>,
    base_completed: usize,
}

impl<'g> CoverageTracker<'g> {
    pub fn new(graph: &'g StreetGraph, base: &[NodeId]) -> Self {
        let visited: FxHashSet<NodeId> = base.iter().copied().collect();
        let mut base_completed = 0;
        let pending = graph
            .streets()
            .iter()
            .map(|s| {
                if !s.counts_toward_coverage() {
                    return false;
                }
                let done = s.nodes.iter().all(|n| visited.contains(n));
                if done {
                    base_completed += 1;
                }
                !done
            })
            .collect();

        Self { graph, visited, pending, base_completed }
    }

    /// Streets completed by the base path alone.
    #[inline]
    pub fn base_completed(&self) -> usize {
        self.base_completed
    }

    /// `true` if `street` is named and not yet completed by the base path.
    #[inline]
    pub fn is_pending(&self, street: StreetId) -> bool {
        self.pending[street.index()]
    }

    /// Streets completed by the base path followed by `extension`.
    pub fn completed_with(&self, extension: &[NodeId]) -> usize {
        if extension.is_empty() {
            return self.base_completed;
        }
        let fresh: FxHashSet<NodeId> = extension
            .iter()
            .copied()
            .filter(|n| !self.visited.contains(n))
            .collect();
        if fresh.is_empty() {
            return self.base_completed;
        }

        let mut touched: Vec<StreetId> = fresh
            .iter()
            .flat_map(|&n| self.graph.streets_at(n).iter().copied())
            .filter(|&s| self.is_pending(s))
            .collect();
        touched.sort_unstable();
        touched.dedup();

        let newly_done = touched
            .into_iter()
            .filter(|&s| {
                self.graph
                    .street(s)
                    .nodes
                    .iter()
                    .all(|n| self.visited.contains(n) || fresh.contains(n))
            })
            .count();

        self.base_completed + newly_done
    }
}
