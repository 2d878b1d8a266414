//! Bounded breadth-first enumeration of path extensions.
//!
//! Starting from the end of a fixed root path the search walks outward in
//! breadth-first order.  Intersections cost one unit of the branch budget;
//! stretches with a single way forward (the middle of a street, a dead end)
//! are free.  An entry becomes a leaf when its budget is spent, or when a free
//! step would repeat a directed edge already walked by the same extension:
//! that is how a loop without intersections or an out-and-back spur ends.
//!
//! ```text
//! queue ← [(ext = [], d = 0, budget)]
//! while let Some(entry) = queue.pop_front():
//!   budget == 0                  → leaf
//!   choices = neighbors(tip) − previous   (only when > 1 neighbor)
//!   one choice, edge already walked → leaf
//!   one choice                   → push (ext + next, budget)
//!   several                      → push (ext + c, budget − 1) for each c
//! ```
//!
//! Every leaf is scored by streets completed per kilometre walked; the best
//! strictly positive score wins, ties going to the earliest leaf.

use std::collections::VecDeque;

use strides_core::{DistanceFn, GeoPoint, NodeId};
use strides_core::config::DEFAULT_MAX_EXPANSIONS;
use strides_graph::{CoverageTracker, StreetGraph};

use crate::{SearchError, SearchResult};

// ── Parameters & results ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Intersections the search may branch at.
    pub branch_budget:  u32,
    /// Queue pops before the search stops expanding.
    pub max_expansions: usize,
}

impl SearchParams {
    pub fn new(branch_budget: u32) -> Self {
        Self { branch_budget, max_expansions: DEFAULT_MAX_EXPANSIONS }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// A fully expanded extension of the root path.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    /// Nodes appended after the root's last node.
    pub extension:     Vec<NodeId>,
    pub distance_km:   f64,
    /// Intersections branched at along the extension.
    pub branches_used: u32,
}

/// The winning extension, already joined to its root.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Root path followed by the extension.
    pub path:        Vec<NodeId>,
    pub score:       f64,
    /// Streets completed by the whole of `path`.
    pub completed:   usize,
    /// Length of the extension alone.
    pub distance_km: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Improved(Candidate),
    /// No leaf scored above zero.
    NoImprovement { leaves: usize },
}

impl SearchOutcome {
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            SearchOutcome::Improved(c) => Some(c),
            SearchOutcome::NoImprovement { .. } => None,
        }
    }

    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            SearchOutcome::Improved(c) => Some(c),
            SearchOutcome::NoImprovement { .. } => None,
        }
    }
}

struct Pending {
    extension:     Vec<NodeId>,
    distance_km:   f64,
    remaining:     u32,
    branches_used: u32,
}

// ── BoundedSearch ─────────────────────────────────────────────────────────────

/// One search over a borrowed graph with a fixed distance metric.
///
/// Cheap to construct; the growth loop builds one per iteration.
pub struct BoundedSearch<'g, D: DistanceFn + ?Sized> {
    graph:    &'g StreetGraph,
    dist:     &'g D,
    /// When set, leaves that end closer to this point score higher.
    hot_spot: Option<GeoPoint>,
}

impl<'g, D: DistanceFn + ?Sized> BoundedSearch<'g, D> {
    pub fn new(graph: &'g StreetGraph, dist: &'g D) -> Self {
        Self { graph, dist, hot_spot: None }
    }

    pub fn with_hot_spot(mut self, target: Option<GeoPoint>) -> Self {
        self.hot_spot = target;
        self
    }

    /// Enumerate every leaf reachable from the end of `root` within `params`.
    ///
    /// An empty root yields no leaves.
    ///
    /// # Errors
    ///
    /// [`SearchError::Disconnected`] if the last node of `root` has no
    /// neighbors.
    pub fn leaves(&self, root: &[NodeId], params: SearchParams) -> SearchResult<Vec<Leaf>> {
        let Some(&tip) = root.last() else {
            return Ok(Vec::new());
        };
        if self.graph.neighbors(tip).is_empty() {
            return Err(SearchError::Disconnected(self.graph.osm_id(tip)));
        }
        let before_tip = root.len().checked_sub(2).map(|i| root[i]);

        let mut queue = VecDeque::new();
        queue.push_back(Pending {
            extension:     Vec::new(),
            distance_km:   0.0,
            remaining:     params.branch_budget,
            branches_used: 0,
        });

        let mut leaves = Vec::new();
        let mut expansions = 0usize;

        while let Some(Pending { mut extension, distance_km, remaining, branches_used }) =
            queue.pop_front()
        {
            if expansions >= params.max_expansions {
                log::warn!(
                    "search stopped after {expansions} expansions with {} entries queued; \
                     scoring {} leaves",
                    queue.len() + 1,
                    leaves.len()
                );
                break;
            }
            expansions += 1;

            if remaining == 0 {
                leaves.push(Leaf { extension, distance_km, branches_used });
                continue;
            }

            let (current, previous) = match extension.as_slice() {
                [] => (tip, before_tip),
                [only] => (*only, Some(tip)),
                [.., prev, last] => (*last, Some(*prev)),
            };
            let choices = forward_choices(self.graph, current, previous);

            match choices.as_slice() {
                [] => leaves.push(Leaf { extension, distance_km, branches_used }),
                &[next] => {
                    if walked(tip, &extension, current, next) {
                        leaves.push(Leaf { extension, distance_km, branches_used });
                        continue;
                    }
                    let step = self.graph.edge_km(current, next, self.dist);
                    extension.push(next);
                    queue.push_back(Pending {
                        extension,
                        distance_km: distance_km + step,
                        remaining,
                        branches_used,
                    });
                }
                _ => {
                    for &next in &choices {
                        let mut branch = Vec::with_capacity(extension.len() + 1);
                        branch.extend_from_slice(&extension);
                        branch.push(next);
                        queue.push_back(Pending {
                            extension:     branch,
                            distance_km:   distance_km + self.graph.edge_km(current, next, self.dist),
                            remaining:     remaining - 1,
                            branches_used: branches_used + 1,
                        });
                    }
                }
            }
        }

        log::debug!(
            "budget {}: {} leaves from {} expansions",
            params.branch_budget,
            leaves.len(),
            expansions
        );
        Ok(leaves)
    }

    /// Find the extension of `root` that completes the most streets per
    /// kilometre.
    ///
    /// # Errors
    ///
    /// [`SearchError::Disconnected`] if the last node of `root` has no
    /// neighbors.
    pub fn search(&self, root: &[NodeId], params: SearchParams) -> SearchResult<SearchOutcome> {
        let leaves = self.leaves(root, params)?;
        let Some(&tip) = root.last() else {
            return Ok(SearchOutcome::NoImprovement { leaves: 0 });
        };

        let tracker = CoverageTracker::new(self.graph, root);
        let scorer = Scorer {
            graph:    self.graph,
            dist:     self.dist,
            tracker:  &tracker,
            hot_spot: self.hot_spot.map(|t| (t, self.dist.distance_km(self.graph.position(tip), t))),
        };

        let Some((index, score)) = scorer.best(&leaves) else {
            return Ok(SearchOutcome::NoImprovement { leaves: leaves.len() });
        };

        let leaf = &leaves[index];
        let mut path = Vec::with_capacity(root.len() + leaf.extension.len());
        path.extend_from_slice(root);
        path.extend_from_slice(&leaf.extension);

        Ok(SearchOutcome::Improved(Candidate {
            path,
            score,
            completed: tracker.completed_with(&leaf.extension),
            distance_km: leaf.distance_km,
        }))
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

struct Scorer<'a, D: DistanceFn + ?Sized> {
    graph:    &'a StreetGraph,
    dist:     &'a D,
    tracker:  &'a CoverageTracker<'a>,
    /// Hot-spot centre and its distance from the root's last node.
    hot_spot: Option<(GeoPoint, f64)>,
}

impl<D: DistanceFn + ?Sized> Scorer<'_, D> {
    /// `None` for zero-length leaves, which cannot be scored.
    fn score(&self, leaf: &Leaf) -> Option<f64> {
        if leaf.distance_km <= 0.0 {
            return None;
        }
        let gained = self.tracker.completed_with(&leaf.extension) - self.tracker.base_completed();
        let mut score = gained as f64 / leaf.distance_km;

        if let (Some((target, gap_at_root)), Some(&end)) = (self.hot_spot, leaf.extension.last()) {
            let gap_at_leaf = self.dist.distance_km(self.graph.position(end), target);
            score += (gap_at_root - gap_at_leaf) / leaf.distance_km;
        }
        Some(score)
    }

    #[cfg(not(feature = "parallel"))]
    fn best(&self, leaves: &[Leaf]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, leaf) in leaves.iter().enumerate() {
            let Some(score) = self.score(leaf) else { continue };
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((i, score));
            }
        }
        best
    }

    #[cfg(feature = "parallel")]
    fn best(&self, leaves: &[Leaf]) -> Option<(usize, f64)> {
        use rayon::prelude::*;

        leaves
            .par_iter()
            .enumerate()
            .filter_map(|(i, leaf)| self.score(leaf).filter(|&s| s > 0.0).map(|s| (i, s)))
            .reduce_with(|a, b| if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a })
    }
}

// ── Walk helpers ──────────────────────────────────────────────────────────────

/// Neighbors of `current` worth stepping to.  The node just left is dropped
/// unless it is the only way out.
pub(crate) fn forward_choices(
    graph:    &StreetGraph,
    current:  NodeId,
    previous: Option<NodeId>,
) -> Vec<NodeId> {
    let neighbors = graph.neighbors(current);
    match previous {
        Some(prev) if neighbors.len() > 1 => {
            neighbors.iter().copied().filter(|&n| n != prev).collect()
        }
        _ => neighbors.to_vec(),
    }
}

/// Whether the walk `tip, extension…` already stepped from `from` to `to`.
fn walked(tip: NodeId, extension: &[NodeId], from: NodeId, to: NodeId) -> bool {
    std::iter::once(&tip)
        .chain(extension)
        .zip(extension)
        .any(|(&a, &b)| a == from && b == to)
}
