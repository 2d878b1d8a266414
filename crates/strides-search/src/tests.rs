//! Unit tests for strides-search.

use strides_core::{NodeId, OsmId, PlanarDistance, RouteConfig, StartPoint, UnnamedPolicy};
use strides_graph::{Element, StreetGraph};

use crate::{GrowthObserver, GrowthReport, GrowthStep, HotSpot};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Degrees per planar kilometre.
const KM: f64 = 1.0 / 111.0;

fn build(elements: Vec<Element>) -> StreetGraph {
    StreetGraph::from_elements(elements, UnnamedPolicy::Walkable).unwrap()
}

/// 1 km square, nodes 1..=4 counter-clockwise from the origin, one way
/// `[1, 2, 3, 4, 1]`.
fn square(name: Option<&str>) -> Vec<Element> {
    vec![
        Element::node(1, 0.0, 0.0),
        Element::node(2, 0.0, KM),
        Element::node(3, KM, KM),
        Element::node(4, KM, 0.0),
        Element::way(100, &[1, 2, 3, 4, 1], name),
    ]
}

/// Dead-end lane 1 – 2 – 3 – 4 – 5 with 1 km links.
fn lane() -> Vec<Element> {
    let mut elements: Vec<Element> = (1..=5).map(|i| Element::node(i, (i - 1) as f64 * KM, 0.0)).collect();
    elements.push(Element::way(200, &[1, 2, 3, 4, 5], Some("Lane")));
    elements
}

/// `n × n` grid with 1 km spacing.  Node `r * n + c + 1` sits at row `r`,
/// column `c`; every row and every column is its own named street.
fn grid(n: i64) -> Vec<Element> {
    let id = |r: i64, c: i64| r * n + c + 1;
    let mut elements = Vec::new();
    for r in 0..n {
        for c in 0..n {
            elements.push(Element::node(id(r, c), r as f64 * KM, c as f64 * KM));
        }
    }
    for r in 0..n {
        let nodes: Vec<i64> = (0..n).map(|c| id(r, c)).collect();
        let name = format!("Row {r}");
        elements.push(Element::way(1_000 + r, &nodes, Some(name.as_str())));
    }
    for c in 0..n {
        let nodes: Vec<i64> = (0..n).map(|r| id(r, c)).collect();
        let name = format!("Col {c}");
        elements.push(Element::way(2_000 + c, &nodes, Some(name.as_str())));
    }
    elements
}

fn node(g: &StreetGraph, osm: i64) -> NodeId {
    g.resolve(OsmId(osm)).unwrap()
}

fn osm_path(g: &StreetGraph, path: &[NodeId]) -> Vec<i64> {
    path.iter().map(|&n| g.osm_id(n).0).collect()
}

#[derive(Default)]
struct Recorder {
    steps:     Vec<(u32, Vec<NodeId>, f64)>,
    hot_spots: Vec<Vec<HotSpot>>,
    finished:  Option<GrowthReport>,
}

impl GrowthObserver for Recorder {
    fn on_hot_spots(&mut self, spots: &[HotSpot], _graph: &StreetGraph) {
        self.hot_spots.push(spots.to_vec());
    }

    fn on_step(&mut self, step: &GrowthStep<'_>, _graph: &StreetGraph) {
        self.steps.push((step.iteration, step.path.to_vec(), step.total_km));
    }

    fn on_finish(&mut self, report: &GrowthReport, _graph: &StreetGraph) {
        self.finished = Some(report.clone());
    }
}

// ── Bounded search ────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use super::*;
    use crate::search::forward_choices;
    use crate::{BoundedSearch, SearchError, SearchOutcome, SearchParams};

    #[test]
    fn square_loop_closes_after_one_lap() {
        let g = build(square(Some("Loop")));
        let leaves = BoundedSearch::new(&g, &PlanarDistance)
            .leaves(&[node(&g, 1)], SearchParams::new(2))
            .unwrap();

        let walks: Vec<Vec<i64>> = leaves.iter().map(|l| osm_path(&g, &l.extension)).collect();
        assert_eq!(walks, [vec![2, 3, 4, 1], vec![4, 3, 2, 1]]);
        for leaf in &leaves {
            assert_eq!(leaf.branches_used, 1);
            assert!((leaf.distance_km - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn square_search_prefers_first_leaf_on_tie() {
        let g = build(square(Some("Loop")));
        let outcome = BoundedSearch::new(&g, &PlanarDistance)
            .search(&[node(&g, 1)], SearchParams::new(2))
            .unwrap();
        let candidate = outcome.into_candidate().unwrap();
        assert_eq!(osm_path(&g, &candidate.path), [1, 2, 3, 4, 1]);
        assert_eq!(candidate.completed, 1);
        assert!((candidate.score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn dead_end_corridor_is_free() {
        let g = build(lane());
        let leaves = BoundedSearch::new(&g, &PlanarDistance)
            .leaves(&[node(&g, 1)], SearchParams::new(1))
            .unwrap();

        assert_eq!(leaves.len(), 1);
        assert_eq!(osm_path(&g, &leaves[0].extension), [2, 3, 4, 5, 4, 3, 2, 1]);
        assert_eq!(leaves[0].branches_used, 0);
        assert!((leaves[0].distance_km - 8.0).abs() < 1e-9);
    }

    #[test]
    fn budget_caps_branching_on_grid() {
        let g = build(grid(3));
        let leaves = BoundedSearch::new(&g, &PlanarDistance)
            .leaves(&[node(&g, 1)], SearchParams::new(2))
            .unwrap();
        let walks: Vec<Vec<i64>> = leaves.iter().map(|l| osm_path(&g, &l.extension)).collect();
        assert_eq!(walks, [vec![2, 3], vec![2, 5], vec![4, 5], vec![4, 7]]);
    }

    #[test]
    fn row_completion_beats_interior_step() {
        let g = build(grid(3));
        let candidate = BoundedSearch::new(&g, &PlanarDistance)
            .search(&[node(&g, 1)], SearchParams::new(2))
            .unwrap()
            .into_candidate()
            .unwrap();
        assert_eq!(osm_path(&g, &candidate.path), [1, 2, 3]);
        assert!((candidate.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn nothing_completable_is_no_improvement() {
        let g = build(square(None));
        let outcome = BoundedSearch::new(&g, &PlanarDistance)
            .search(&[node(&g, 1)], SearchParams::new(4))
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoImprovement { leaves: 2 });
        assert!(outcome.candidate().is_none());
    }

    #[test]
    fn disconnected_root_errors() {
        let mut elements = square(Some("Loop"));
        elements.push(Element::node(50, 1.0, 1.0));
        let g = build(elements);
        let err = BoundedSearch::new(&g, &PlanarDistance)
            .search(&[node(&g, 50)], SearchParams::new(2))
            .unwrap_err();
        assert!(matches!(err, SearchError::Disconnected(OsmId(50))));
    }

    #[test]
    fn empty_root_has_no_leaves() {
        let g = build(square(Some("Loop")));
        let search = BoundedSearch::new(&g, &PlanarDistance);
        assert!(search.leaves(&[], SearchParams::new(3)).unwrap().is_empty());
        assert_eq!(
            search.search(&[], SearchParams::new(3)).unwrap(),
            SearchOutcome::NoImprovement { leaves: 0 }
        );
    }

    #[test]
    fn expansion_cap_stops_search() {
        let g = build(grid(3));
        let params = SearchParams::new(4).with_max_expansions(1);
        let search = BoundedSearch::new(&g, &PlanarDistance);
        assert!(search.leaves(&[node(&g, 1)], params).unwrap().is_empty());
        assert_eq!(
            search.search(&[node(&g, 1)], params).unwrap(),
            SearchOutcome::NoImprovement { leaves: 0 }
        );
    }

    #[test]
    fn leaves_continue_from_root_direction() {
        // Root arrives at 2 from 1, so 1 is not a choice.
        let g = build(grid(3));
        let leaves = BoundedSearch::new(&g, &PlanarDistance)
            .leaves(&[node(&g, 1), node(&g, 2)], SearchParams::new(1))
            .unwrap();
        let firsts: Vec<i64> = leaves.iter().map(|l| g.osm_id(l.extension[0]).0).collect();
        assert_eq!(firsts, [3, 5]);
    }

    #[test]
    fn branch_points_recount_matches_budget() {
        let g = build(grid(4));
        let root = [node(&g, 1), node(&g, 2)];
        for budget in 1..=4 {
            let leaves = BoundedSearch::new(&g, &PlanarDistance)
                .leaves(&root, SearchParams::new(budget))
                .unwrap();
            assert!(!leaves.is_empty());

            for leaf in &leaves {
                let walk: Vec<NodeId> = root.iter().chain(&leaf.extension).copied().collect();
                let mut branches = 0;
                for i in root.len()..walk.len() {
                    let previous = if i >= 2 { Some(walk[i - 2]) } else { None };
                    let choices = forward_choices(&g, walk[i - 1], previous);
                    assert!(choices.contains(&walk[i]));
                    if choices.len() > 1 {
                        branches += 1;
                    }
                }
                assert_eq!(branches, leaf.branches_used);
                assert!(branches <= budget);
            }
        }
    }
}

// ── Growth loop ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod growth {
    use strides_core::GeoPoint;

    use super::*;
    use crate::{NoopObserver, RouteGrower, SearchError, Termination, resolve_start};

    #[test]
    fn square_scenario_completes_loop() {
        let g = build(square(Some("Loop")));
        let config = RouteConfig::new(StartPoint::Node(OsmId(1)), 2.0).with_branch_budget(2);
        let mut recorder = Recorder::default();
        let report = RouteGrower::new(&g, config).unwrap().plan(&mut recorder).unwrap();

        assert_eq!(osm_path(&g, &report.path), [1, 2, 3, 4, 1]);
        assert_eq!(report.streets_completed, 1);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.termination, Termination::TargetReached);
        assert!((report.total_km - 4.0).abs() < 1e-9);

        assert_eq!(recorder.steps.len(), 1);
        assert_eq!(recorder.finished, Some(report));
    }

    #[test]
    fn trimmed_step_then_iteration_limit() {
        let g = build(grid(3));
        let mut config = RouteConfig::new(StartPoint::Node(OsmId(1)), 100.0).with_branch_budget(2);
        config.max_iterations = 1;
        let report = RouteGrower::new(&g, config).unwrap().plan(&mut NoopObserver).unwrap();

        // Winner [1, 2, 3] loses its tail but keeps one new node.
        assert_eq!(osm_path(&g, &report.path), [1, 2]);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.termination, Termination::IterationLimit);
        assert!((report.total_km - 1.0).abs() < 1e-9);
    }

    #[test]
    fn every_step_extends_the_route() {
        let g = build(grid(3));
        let config = RouteConfig::new(StartPoint::Node(OsmId(5)), 6.0).with_branch_budget(3);
        let mut recorder = Recorder::default();
        let report = RouteGrower::new(&g, config).unwrap().plan(&mut recorder).unwrap();

        assert!(!recorder.steps.is_empty());
        assert_ne!(report.termination, Termination::IterationLimit);

        let mut previous: (Vec<NodeId>, f64) = (vec![node(&g, 5)], 0.0);
        for (i, (iteration, path, total)) in recorder.steps.iter().enumerate() {
            assert_eq!(*iteration as usize, i + 1);
            assert!(path.starts_with(&previous.0));
            assert!(path.len() > previous.0.len());
            assert!(*total > previous.1);
            previous = (path.clone(), *total);
        }
        assert_eq!(report.path, previous.0);
    }

    #[test]
    fn unnamed_only_graph_stalls() {
        let g = build(square(None));
        let config = RouteConfig::new(StartPoint::Node(OsmId(1)), 10.0);
        let mut recorder = Recorder::default();
        let report = RouteGrower::new(&g, config).unwrap().plan(&mut recorder).unwrap();

        assert_eq!(report.termination, Termination::Stalled);
        assert_eq!(report.iterations, 1);
        assert_eq!(osm_path(&g, &report.path), [1]);
        assert_eq!(report.total_km, 0.0);
        assert!(recorder.steps.is_empty());
        assert!(recorder.finished.is_some());
    }

    #[test]
    fn disconnected_start_errors() {
        let mut elements = square(Some("Loop"));
        elements.push(Element::node(50, 1.0, 1.0));
        let g = build(elements);
        let config = RouteConfig::new(StartPoint::Node(OsmId(50)), 2.0);
        let err = RouteGrower::new(&g, config).unwrap().plan(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SearchError::Disconnected(OsmId(50))));
    }

    #[test]
    fn start_resolution() {
        let g = build(square(Some("Loop")));
        assert_eq!(resolve_start(&g, &StartPoint::Node(OsmId(3))).unwrap(), node(&g, 3));
        assert!(matches!(
            resolve_start(&g, &StartPoint::Node(OsmId(999))),
            Err(SearchError::UnknownStart(OsmId(999)))
        ));
        let snapped = resolve_start(&g, &StartPoint::Coordinate(GeoPoint::new(0.9 * KM, 0.8 * KM))).unwrap();
        assert_eq!(g.osm_id(snapped), OsmId(3));

        let empty = build(Vec::new());
        assert!(matches!(
            resolve_start(&empty, &StartPoint::Node(OsmId(1))),
            Err(SearchError::EmptyGraph)
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let g = build(square(Some("Loop")));
        let config = RouteConfig::new(StartPoint::Node(OsmId(1)), -1.0);
        assert!(matches!(RouteGrower::new(&g, config), Err(SearchError::Config(_))));
    }

    #[test]
    fn hot_spots_reported_only_with_bias() {
        let g = build(grid(3));

        let mut config = RouteConfig::new(StartPoint::Node(OsmId(1)), 3.0).with_branch_budget(2);
        let mut plain = Recorder::default();
        RouteGrower::new(&g, config.clone()).unwrap().plan(&mut plain).unwrap();
        assert!(plain.hot_spots.is_empty());

        config.hot_spot_bias = true;
        let mut biased = Recorder::default();
        let report = RouteGrower::new(&g, config).unwrap().plan(&mut biased).unwrap();
        assert!(!biased.hot_spots.is_empty());
        assert!(biased.hot_spots[0].iter().map(|s| s.streets).sum::<usize>() == 6);
        assert!(report.path.len() > 1);
    }
}

// ── Hot spots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hotspot {
    use strides_core::GeoPoint;

    use super::*;
    use crate::find_hot_spots;

    /// Two streets in cell (0, 0), one in (2, 0), one in (4, 0).
    fn clustered() -> Vec<Element> {
        vec![
            Element::node(1, 0.001, 0.001),
            Element::node(2, 0.002, 0.001),
            Element::node(3, 0.003, 0.003),
            Element::node(4, 0.004, 0.003),
            Element::node(5, 0.021, 0.001),
            Element::node(6, 0.022, 0.001),
            Element::node(7, 0.041, 0.001),
            Element::node(8, 0.042, 0.001),
            Element::way(1, &[1, 2], Some("A1")),
            Element::way(2, &[3, 4], Some("A2")),
            Element::way(3, &[5, 6], Some("B1")),
            Element::way(4, &[7, 8], Some("C1")),
        ]
    }

    #[test]
    fn fullest_cell_first_then_nearest() {
        let g = build(clustered());
        let spots = find_hot_spots(&g, GeoPoint::new(0.045, 0.001), &[]);

        let counts: Vec<usize> = spots.iter().map(|s| s.streets).collect();
        assert_eq!(counts, [2, 1, 1]);
        assert!((spots[0].center.lat - 0.005).abs() < 1e-12);
        assert!((spots[0].center.lon - 0.005).abs() < 1e-12);
        // C1's cell is closer to the origin than B1's.
        assert!((spots[1].center.lat - 0.045).abs() < 1e-12);
        assert!((spots[2].center.lat - 0.025).abs() < 1e-12);
    }

    #[test]
    fn completed_streets_leave_their_cell() {
        let g = build(clustered());
        let walked = [node(&g, 1), node(&g, 2), node(&g, 5), node(&g, 6)];
        let spots = find_hot_spots(&g, GeoPoint::new(0.0, 0.0), &walked);

        let counts: Vec<usize> = spots.iter().map(|s| s.streets).collect();
        assert_eq!(counts, [1, 1]);
        assert!((spots[0].center.lat - 0.005).abs() < 1e-12);
    }

    #[test]
    fn unnamed_streets_are_not_hot() {
        let g = build(square(None));
        assert!(find_hot_spots(&g, GeoPoint::new(0.0, 0.0), &[]).is_empty());
    }
}
