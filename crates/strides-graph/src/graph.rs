//! Street graph representation.
//!
//! # Data layout
//!
//! The undirected adjacency map is stored in **Compressed Sparse Row (CSR)**
//! format.  Given a `NodeId n`, its neighbors occupy the slice:
//!
//! ```text
//! neighbor_ids[ neighbor_start[n] .. neighbor_start[n+1] ]
//! ```
//!
//! Each neighbor slice is sorted by `NodeId` and free of duplicates, so the
//! iteration order the search depends on is deterministic.  The node → street
//! reverse index (`node_street_*`) uses the same layout.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used to
//! snap a coordinate start point to the graph.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use strides_core::{DistanceFn, GeoPoint, NodeId, OsmId, StreetId};

/// Display name of the street holding every way without a `name` tag.
pub const UNNAMED_STREET: &str = "unnamed";

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
pub(crate) struct NodeEntry {
    pub(crate) point: [f64; 2], // [lat, lon]
    pub(crate) id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough for
    /// nearest-node queries within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Street ────────────────────────────────────────────────────────────────────

/// A named street: every way sharing the name, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Street {
    pub name: String,

    /// One entry per contributing way, node order preserved.
    pub segments: Vec<Vec<NodeId>>,

    /// Distinct nodes over all segments, sorted.  A street is completed when
    /// every one of these is on the path.
    pub nodes: Vec<NodeId>,

    /// Set on the street that collects untagged ways, never on a street whose
    /// `name` tag merely reads "unnamed".
    pub unnamed: bool,
}

impl Street {
    #[inline]
    pub fn is_unnamed(&self) -> bool {
        self.unnamed
    }

    /// Only named streets can be completed.
    #[inline]
    pub fn counts_toward_coverage(&self) -> bool {
        !self.is_unnamed()
    }
}

// ── StreetGraph ───────────────────────────────────────────────────────────────

/// Immutable street network: node positions, streets, undirected adjacency,
/// and a spatial index.
///
/// Do not construct directly; use
/// [`StreetGraphBuilder`](crate::StreetGraphBuilder).  The graph is `Sync` and
/// is shared by reference with every search.
pub struct StreetGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Source identifier of each node.  Indexed by `NodeId`.
    pub node_osm: Vec<OsmId>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub neighbor_start: Vec<u32>,

    /// Concatenated, per-node sorted neighbor lists.
    pub neighbor_ids: Vec<NodeId>,

    // ── CSR node → street index ───────────────────────────────────────────
    pub node_street_start: Vec<u32>,
    pub node_street_ids:   Vec<StreetId>,

    // ── Lookup tables ─────────────────────────────────────────────────────
    pub(crate) osm_index:   FxHashMap<OsmId, NodeId>,
    /// Sorted by name; `StreetId` is the position in this list.
    pub(crate) streets:     Vec<Street>,
    pub(crate) spatial_idx: RTree<NodeEntry>,
}

impl StreetGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbor_ids.len() / 2
    }

    pub fn street_count(&self) -> usize {
        self.streets.len()
    }

    /// Streets that can be completed (everything except the unnamed sentinel).
    pub fn named_street_count(&self) -> usize {
        self.streets.iter().filter(|s| s.counts_toward_coverage()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    #[inline]
    pub fn osm_id(&self, node: NodeId) -> OsmId {
        self.node_osm[node.index()]
    }

    /// Map a source identifier to its dense id, if the node is in the graph.
    pub fn resolve(&self, osm: OsmId) -> Option<NodeId> {
        self.osm_index.get(&osm).copied()
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Neighbors of `node`, sorted ascending.  No heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.neighbor_start[node.index()] as usize;
        let end   = self.neighbor_start[node.index() + 1] as usize;
        &self.neighbor_ids[start..end]
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// `true` if `a` and `b` are consecutive in at least one segment.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    // ── Streets ───────────────────────────────────────────────────────────

    /// All streets, sorted by name; the unnamed street follows a named one
    /// spelled the same.
    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    #[inline]
    pub fn street(&self, id: StreetId) -> &Street {
        &self.streets[id.index()]
    }

    /// Look up a named street.  The unnamed street is never returned.
    pub fn street_by_name(&self, name: &str) -> Option<StreetId> {
        self.streets
            .binary_search_by(|s| (s.name.as_str(), s.unnamed).cmp(&(name, false)))
            .ok()
            .and_then(|i| StreetId::try_from(i).ok())
    }

    /// Every street with its id, in id order.
    pub fn street_entries(&self) -> impl Iterator<Item = (StreetId, &Street)> {
        (0..).map(StreetId).zip(&self.streets)
    }

    /// Streets with at least one segment passing through `node`.
    #[inline]
    pub fn streets_at(&self, node: NodeId) -> &[StreetId] {
        let start = self.node_street_start[node.index()] as usize;
        let end   = self.node_street_start[node.index() + 1] as usize;
        &self.node_street_ids[start..end]
    }

    /// Mean position of a street's distinct nodes.
    pub fn street_centroid(&self, id: StreetId) -> Option<GeoPoint> {
        let nodes = &self.street(id).nodes;
        if nodes.is_empty() {
            return None;
        }
        let (lat, lon) = nodes.iter().fold((0.0, 0.0), |(lat, lon), &n| {
            let p = self.position(n);
            (lat + p.lat, lon + p.lon)
        });
        let n = nodes.len() as f64;
        Some(GeoPoint::new(lat / n, lon / n))
    }

    // ── Distances ─────────────────────────────────────────────────────────

    #[inline]
    pub fn edge_km<D: DistanceFn + ?Sized>(&self, a: NodeId, b: NodeId, dist: &D) -> f64 {
        dist.distance_km(self.position(a), self.position(b))
    }

    /// Cumulative distance along `path`.
    pub fn path_distance_km<D: DistanceFn + ?Sized>(&self, path: &[NodeId], dist: &D) -> f64 {
        path.windows(2).map(|w| self.edge_km(w[0], w[1], dist)).sum()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}
