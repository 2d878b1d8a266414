//! Clusters of unfinished streets.
//!
//! Named streets that the current path has not completed are bucketed by the
//! grid cell of their centroid.  The fullest cell is the "hot spot" the growth
//! loop can steer toward.

use rustc_hash::{FxHashMap, FxHashSet};

use strides_core::{GeoPoint, NodeId};
use strides_graph::StreetGraph;

/// Edge length of a hot-spot grid cell, in degrees.
pub const HOT_SPOT_CELL_DEG: f64 = 0.01;

/// A grid cell and how many unfinished streets have their centroid in it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HotSpot {
    pub streets: usize,
    /// Centre of the grid cell.
    pub center:  GeoPoint,
}

/// Hot spots for `path`, fullest first; equal counts are ordered by planar
/// distance from `origin`.
pub fn find_hot_spots(graph: &StreetGraph, origin: GeoPoint, path: &[NodeId]) -> Vec<HotSpot> {
    let visited: FxHashSet<NodeId> = path.iter().copied().collect();

    let mut cells: FxHashMap<(i64, i64), usize> = FxHashMap::default();
    for (id, street) in graph.street_entries() {
        if !street.counts_toward_coverage() || street.nodes.iter().all(|n| visited.contains(n)) {
            continue;
        }
        let Some(c) = graph.street_centroid(id) else {
            continue;
        };
        let key = (
            (c.lat / HOT_SPOT_CELL_DEG).floor() as i64,
            (c.lon / HOT_SPOT_CELL_DEG).floor() as i64,
        );
        *cells.entry(key).or_default() += 1;
    }

    let mut spots: Vec<((i64, i64), HotSpot, f64)> = cells
        .into_iter()
        .map(|(key, streets)| {
            let center = GeoPoint::new(
                (key.0 as f64 + 0.5) * HOT_SPOT_CELL_DEG,
                (key.1 as f64 + 0.5) * HOT_SPOT_CELL_DEG,
            );
            (key, HotSpot { streets, center }, origin.planar_km(center))
        })
        .collect();

    // Cell key last so the order never depends on hash iteration.
    spots.sort_by(|a, b| {
        b.1.streets
            .cmp(&a.1.streets)
            .then(a.2.total_cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });
    spots.into_iter().map(|(_, spot, _)| spot).collect()
}
