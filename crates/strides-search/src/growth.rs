//! The route growth loop.
//!
//! Each iteration runs a [`BoundedSearch`] from the end of the route, keeps
//! the winning extension minus a short tail, and repeats until the route is
//! long enough.  The trimmed tail leaves the next search room to pick a
//! better continuation than the one this search happened to end on.

use strides_core::{DistanceFn, GeoPoint, NodeId, RouteConfig, StartPoint};
use strides_graph::{StreetGraph, streets_completed};

use crate::{
    BoundedSearch, Candidate, GrowthObserver, SearchError, SearchOutcome, SearchParams,
    SearchResult, find_hot_spots,
};

/// Budget added on each retry after a search finds no improving leaf.
pub const BUDGET_STEP: u32 = 2;

/// A hot spot counts as reached once the route ends this close to it.
pub const HOT_SPOT_REACHED_KM: f64 = 0.5;

// ── Reports ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The route reached the target distance.
    TargetReached,
    /// No search improved coverage, even at the widest budget.
    Stalled,
    /// `max_iterations` ran out first.
    IterationLimit,
}

/// One accepted growth step, as seen by a [`GrowthObserver`].
#[derive(Clone, Debug)]
pub struct GrowthStep<'a> {
    /// 1-based.
    pub iteration:         u32,
    pub path:              &'a [NodeId],
    pub total_km:          f64,
    pub streets_completed: usize,
    /// Budget of the search that produced this step.
    pub branch_budget:     u32,
    pub score:             f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GrowthReport {
    pub path:              Vec<NodeId>,
    pub total_km:          f64,
    pub streets_completed: usize,
    pub iterations:        u32,
    pub termination:       Termination,
}

// ── Start resolution ──────────────────────────────────────────────────────────

/// Turn a configured start into a node of `graph`.
///
/// Coordinates snap to the nearest node.
///
/// # Errors
///
/// [`SearchError::EmptyGraph`] for a graph without nodes,
/// [`SearchError::UnknownStart`] for an OSM id the graph does not contain.
pub fn resolve_start(graph: &StreetGraph, start: &StartPoint) -> SearchResult<NodeId> {
    if graph.is_empty() {
        return Err(SearchError::EmptyGraph);
    }
    match *start {
        StartPoint::Node(osm) => graph.resolve(osm).ok_or(SearchError::UnknownStart(osm)),
        StartPoint::Coordinate(pos) => graph.snap_to_node(pos).ok_or(SearchError::EmptyGraph),
    }
}

// ── RouteGrower ───────────────────────────────────────────────────────────────

/// Grows a route over a borrowed graph according to a [`RouteConfig`].
///
/// # Example
///
/// ```rust,ignore
/// let grower = RouteGrower::new(&graph, config)?;
/// let report = grower.plan(&mut NoopObserver)?;
/// println!("{:.2} km, {} streets", report.total_km, report.streets_completed);
/// ```
pub struct RouteGrower<'g> {
    graph:  &'g StreetGraph,
    config: RouteConfig,
}

impl<'g> RouteGrower<'g> {
    /// # Errors
    ///
    /// [`SearchError::Config`] if `config` fails validation.
    pub fn new(graph: &'g StreetGraph, config: RouteConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Resolve the configured start point and [`run`](Self::run) from it.
    pub fn plan<O: GrowthObserver>(&self, observer: &mut O) -> SearchResult<GrowthReport> {
        let start = resolve_start(self.graph, &self.config.start)?;
        self.run(start, observer)
    }

    /// Grow a route from `start` until the target distance, a stall, or the
    /// iteration cap.
    ///
    /// # Errors
    ///
    /// [`SearchError::Disconnected`] if `start` has no neighbors.
    pub fn run<O: GrowthObserver>(&self, start: NodeId, observer: &mut O) -> SearchResult<GrowthReport> {
        let graph = self.graph;
        let cfg = &self.config;

        if graph.neighbors(start).is_empty() {
            return Err(SearchError::Disconnected(graph.osm_id(start)));
        }
        log::info!(
            "growing route from node {} toward {:.2} km ({} metric)",
            graph.osm_id(start),
            cfg.target_km,
            cfg.metric
        );

        let mut path = vec![start];
        let mut total_km = 0.0;
        let mut iterations = 0u32;
        let mut termination = Termination::TargetReached;
        let mut hot_spot = if cfg.hot_spot_bias { self.next_hot_spot(&path, observer) } else { None };

        while total_km < cfg.target_km {
            if iterations >= cfg.max_iterations {
                log::warn!("iteration limit {} reached at {total_km:.2} km", cfg.max_iterations);
                termination = Termination::IterationLimit;
                break;
            }
            iterations += 1;

            let Some((candidate, budget)) = self.widening_search(&path, hot_spot)? else {
                log::warn!(
                    "no improving extension at {total_km:.2} km, even with branch budget {}",
                    cfg.max_branch_budget
                );
                termination = Termination::Stalled;
                break;
            };

            let score = candidate.score;
            path = self.accept(path.len(), total_km, candidate);
            total_km = graph.path_distance_km(&path, &cfg.metric);
            let completed = streets_completed(graph, &path);

            log::debug!(
                "iteration {iterations}: {} nodes, {total_km:.2} km, {completed} streets (budget {budget}, score {score:.3})",
                path.len()
            );
            observer.on_step(
                &GrowthStep {
                    iteration: iterations,
                    path: &path,
                    total_km,
                    streets_completed: completed,
                    branch_budget: budget,
                    score,
                },
                graph,
            );

            if let Some(target) = hot_spot {
                let end = graph.position(path[path.len() - 1]);
                if cfg.metric.distance_km(end, target) <= HOT_SPOT_REACHED_KM {
                    hot_spot = self.next_hot_spot(&path, observer);
                }
            }
        }

        let report = GrowthReport {
            streets_completed: streets_completed(graph, &path),
            path,
            total_km,
            iterations,
            termination,
        };
        log::info!(
            "finished after {} iterations ({:?}): {:.2} km, {} streets completed",
            report.iterations,
            report.termination,
            report.total_km,
            report.streets_completed
        );
        observer.on_finish(&report, graph);
        Ok(report)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Search at the configured budget, widening by [`BUDGET_STEP`] up to
    /// `max_branch_budget` while nothing improves.
    fn widening_search(
        &self,
        path:     &[NodeId],
        hot_spot: Option<GeoPoint>,
    ) -> SearchResult<Option<(Candidate, u32)>> {
        let cfg = &self.config;
        let search = BoundedSearch::new(self.graph, &cfg.metric).with_hot_spot(hot_spot);

        let mut budget = cfg.branch_budget;
        loop {
            let params = SearchParams::new(budget).with_max_expansions(cfg.max_expansions);
            match search.search(path, params)? {
                SearchOutcome::Improved(candidate) => return Ok(Some((candidate, budget))),
                SearchOutcome::NoImprovement { leaves } => {
                    if budget >= cfg.max_branch_budget {
                        return Ok(None);
                    }
                    let widened = budget.saturating_add(BUDGET_STEP).min(cfg.max_branch_budget);
                    log::debug!("no improvement among {leaves} leaves at budget {budget}; retrying at {widened}");
                    budget = widened;
                }
            }
        }
    }

    /// Join a candidate to the route.  A candidate that reaches the target is
    /// kept whole; otherwise its last `tail_trim` nodes are dropped, keeping
    /// at least one new node.
    fn accept(&self, root_len: usize, total_km: f64, candidate: Candidate) -> Vec<NodeId> {
        let mut path = candidate.path;
        if total_km + candidate.distance_km < self.config.target_km {
            let keep = path.len().saturating_sub(self.config.tail_trim).max(root_len + 1);
            path.truncate(keep);
        }
        path
    }

    /// Recompute hot spots from the current path end and pick the fullest one
    /// not already reached.
    fn next_hot_spot<O: GrowthObserver>(&self, path: &[NodeId], observer: &mut O) -> Option<GeoPoint> {
        let end = self.graph.position(path[path.len() - 1]);
        let spots = find_hot_spots(self.graph, end, path);
        observer.on_hot_spots(&spots, self.graph);

        let target = spots
            .iter()
            .find(|s| self.config.metric.distance_km(end, s.center) > HOT_SPOT_REACHED_KM)
            .map(|s| s.center);
        match target {
            Some(t) => log::debug!("steering toward hot spot at {t}"),
            None => log::debug!("no hot spot left to steer toward"),
        }
        target
    }
}
