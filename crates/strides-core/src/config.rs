//! Route-planning configuration.
//!
//! `RouteConfig` gathers every tunable the growth loop and the search read.
//! It is typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and then overridden field by field from the command line.

use crate::{CoreError, CoreResult, DistanceMetric, GeoPoint, OsmId};

/// Lookahead depth: true decision points explored before scoring a leaf.
pub const DEFAULT_BRANCH_BUDGET: u32 = 8;

/// How far the budget may be widened when a search finds no improvement.
pub const DEFAULT_BUDGET_HEADROOM: u32 = 4;

/// Speculative tail nodes dropped from every accepted search result.
pub const DEFAULT_TAIL_TRIM: usize = 3;

pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;

/// Queue pops per search before expansion stops.
pub const DEFAULT_MAX_EXPANSIONS: usize = 2_000_000;

// ── StartPoint ────────────────────────────────────────────────────────────────

/// Where the route begins.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StartPoint {
    /// A node id from the source extract.
    Node(OsmId),
    /// A coordinate, snapped to the nearest graph node.
    Coordinate(GeoPoint),
}

// ── UnnamedPolicy ─────────────────────────────────────────────────────────────

/// What the graph builder does with ways that carry no `name` tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnnamedPolicy {
    /// Keep them under the `"unnamed"` sentinel street: they add walkable
    /// edges but never count toward coverage.
    #[default]
    Walkable,
    /// Drop them entirely.
    Skip,
}

// ── RouteConfig ───────────────────────────────────────────────────────────────

/// Top-level route-planning configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteConfig {
    /// Where the route starts.
    pub start: StartPoint,

    /// Total route length to reach, in kilometres.
    pub target_km: f64,

    /// True (multi-choice) decision points the search explores ahead.
    #[cfg_attr(feature = "serde", serde(default = "default_branch_budget"))]
    pub branch_budget: u32,

    /// Upper bound for the widened budget after a search without improvement.
    /// Must be `>= branch_budget`.
    #[cfg_attr(feature = "serde", serde(default = "default_max_branch_budget"))]
    pub max_branch_budget: u32,

    /// Nodes dropped from the end of every accepted search result.
    #[cfg_attr(feature = "serde", serde(default = "default_tail_trim"))]
    pub tail_trim: usize,

    /// Distance provider.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metric: DistanceMetric,

    /// Treatment of ways without a name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unnamed: UnnamedPolicy,

    /// Hard cap on growth-loop iterations.
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: u32,

    /// Hard cap on queue pops in a single search.
    #[cfg_attr(feature = "serde", serde(default = "default_max_expansions"))]
    pub max_expansions: usize,

    /// Bias leaf scores toward the densest cluster of unfinished streets.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hot_spot_bias: bool,
}

impl RouteConfig {
    /// A configuration with every tunable at its default.
    pub fn new(start: StartPoint, target_km: f64) -> Self {
        Self {
            start,
            target_km,
            branch_budget:     DEFAULT_BRANCH_BUDGET,
            max_branch_budget: DEFAULT_BRANCH_BUDGET + DEFAULT_BUDGET_HEADROOM,
            tail_trim:         DEFAULT_TAIL_TRIM,
            metric:            DistanceMetric::default(),
            unnamed:           UnnamedPolicy::default(),
            max_iterations:    DEFAULT_MAX_ITERATIONS,
            max_expansions:    DEFAULT_MAX_EXPANSIONS,
            hot_spot_bias:     false,
        }
    }

    /// Set `branch_budget` and move `max_branch_budget` along with it.
    pub fn with_branch_budget(mut self, budget: u32) -> Self {
        self.branch_budget = budget;
        self.max_branch_budget = budget.saturating_add(DEFAULT_BUDGET_HEADROOM);
        self
    }

    /// Reject configurations the growth loop cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.target_km.is_finite() || self.target_km <= 0.0 {
            return Err(CoreError::Config(format!(
                "target distance must be a positive number of km, got {}",
                self.target_km
            )));
        }
        if self.branch_budget == 0 {
            return Err(CoreError::Config("branch budget must be at least 1".into()));
        }
        if self.max_branch_budget < self.branch_budget {
            return Err(CoreError::Config(format!(
                "max branch budget {} is below branch budget {}",
                self.max_branch_budget, self.branch_budget
            )));
        }
        if self.max_expansions == 0 {
            return Err(CoreError::Config("max expansions must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
fn default_branch_budget() -> u32 {
    DEFAULT_BRANCH_BUDGET
}

#[cfg(feature = "serde")]
fn default_max_branch_budget() -> u32 {
    DEFAULT_BRANCH_BUDGET + DEFAULT_BUDGET_HEADROOM
}

#[cfg(feature = "serde")]
fn default_tail_trim() -> usize {
    DEFAULT_TAIL_TRIM
}

#[cfg(feature = "serde")]
fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

#[cfg(feature = "serde")]
fn default_max_expansions() -> usize {
    DEFAULT_MAX_EXPANSIONS
}
