//! Construct a [`StreetGraph`] from raw elements.
//!
//! The builder accepts nodes and ways in any order (an Overpass response lists
//! nodes first, a PBF file may interleave them) and defers all validation to
//! [`build`](StreetGraphBuilder::build).  Several extracts of the same area
//! can be merged with [`extend`](StreetGraphBuilder::extend): duplicate nodes
//! and duplicate way ids keep their first occurrence.

use std::collections::BTreeMap;

use rstar::RTree;
use rustc_hash::{FxHashMap, FxHashSet};

use strides_core::{GeoPoint, NodeId, OsmId, StreetId, UnnamedPolicy};

use crate::graph::{NodeEntry, Street, StreetGraph, UNNAMED_STREET};
use crate::{Element, GraphError, GraphResult};

/// Incremental street-graph builder.
///
/// # Example
///
/// ```
/// use strides_graph::{Element, StreetGraphBuilder};
///
/// let mut b = StreetGraphBuilder::new();
/// b.extend([
///     Element::node(1, 13.750, 100.500),
///     Element::node(2, 13.751, 100.500),
///     Element::way(10, &[1, 2], Some("Soi 1")),
/// ]);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct StreetGraphBuilder {
    unnamed:    UnnamedPolicy,
    positions:  FxHashMap<OsmId, GeoPoint>,
    /// First-appearance order of node ids; becomes `NodeId` order.
    node_order: Vec<OsmId>,
    ways:       Vec<RawWay>,
    seen_ways:  FxHashSet<i64>,
}

struct RawWay {
    id:    i64,
    nodes: Vec<OsmId>,
    name:  Option<String>,
}

impl StreetGraphBuilder {
    pub fn new() -> Self {
        Self::with_policy(UnnamedPolicy::default())
    }

    pub fn with_policy(unnamed: UnnamedPolicy) -> Self {
        Self {
            unnamed,
            positions:  FxHashMap::default(),
            node_order: Vec::new(),
            ways:       Vec::new(),
            seen_ways:  FxHashSet::default(),
        }
    }

    /// Add a node.  Returns `false` if the id was already present (the first
    /// position is kept).
    pub fn add_node(&mut self, id: OsmId, pos: GeoPoint) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, pos);
        self.node_order.push(id);
        true
    }

    /// Add a way.  Returns `false` if the way id was already present or the
    /// way has no node references.
    pub fn add_way(&mut self, id: i64, nodes: Vec<OsmId>, name: Option<String>) -> bool {
        if nodes.is_empty() || !self.seen_ways.insert(id) {
            return false;
        }
        self.ways.push(RawWay { id, nodes, name });
        true
    }

    pub fn add_element(&mut self, element: Element) -> bool {
        match element {
            Element::Node { id, pos } => self.add_node(id, pos),
            Element::Way { id, nodes, name } => self.add_way(id, nodes, name),
        }
    }

    pub fn extend<I: IntoIterator<Item = Element>>(&mut self, elements: I) {
        for element in elements {
            self.add_element(element);
        }
    }

    pub fn node_count(&self) -> usize { self.node_order.len() }
    pub fn way_count(&self) -> usize { self.ways.len() }

    /// Consume the builder and produce a [`StreetGraph`].
    ///
    /// Time complexity: O(E log E) for the adjacency sort + O(N log N) for the
    /// R-tree bulk load, where N = nodes, E = consecutive way-node pairs.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] if a way references a node id that was
    /// never added.
    pub fn build(self) -> GraphResult<StreetGraph> {
        let node_count = self.node_order.len();

        // ── Dense ids in first-appearance order ───────────────────────────
        let node_ids: Vec<NodeId> = (0..node_count)
            .map(NodeId::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| GraphError::TooLarge { what: "nodes", count: node_count })?;
        let osm_index: FxHashMap<OsmId, NodeId> =
            self.node_order.iter().copied().zip(node_ids.iter().copied()).collect();
        let node_pos: Vec<GeoPoint> = self.node_order.iter().map(|id| self.positions[id]).collect();

        // ── Group ways into streets, validating every reference ───────────
        // Keyed by (name, untagged) so a way literally named "unnamed" stays
        // a street of its own.
        let mut by_name: BTreeMap<(String, bool), Vec<Vec<NodeId>>> = BTreeMap::new();
        let mut skipped_unnamed = 0usize;
        for way in self.ways {
            let key = match way.name {
                Some(name) => (name, false),
                None if self.unnamed == UnnamedPolicy::Skip => {
                    skipped_unnamed += 1;
                    continue;
                }
                None => (UNNAMED_STREET.to_owned(), true),
            };
            let segment = way
                .nodes
                .iter()
                .map(|osm| {
                    osm_index
                        .get(osm)
                        .copied()
                        .ok_or(GraphError::UnknownNode { way: way.id, node: *osm })
                })
                .collect::<GraphResult<Vec<NodeId>>>()?;
            by_name.entry(key).or_default().push(segment);
        }
        if skipped_unnamed > 0 {
            log::debug!("skipped {skipped_unnamed} unnamed ways");
        }

        let streets: Vec<Street> = by_name
            .into_iter()
            .map(|((name, unnamed), segments)| {
                let mut nodes: Vec<NodeId> = segments.iter().flatten().copied().collect();
                nodes.sort_unstable();
                nodes.dedup();
                Street { name, segments, nodes, unnamed }
            })
            .collect();
        let street_ids: Vec<StreetId> = (0..streets.len())
            .map(StreetId::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| GraphError::TooLarge { what: "streets", count: streets.len() })?;

        // ── Undirected adjacency from consecutive pairs ───────────────────
        let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
        for segment in streets.iter().flat_map(|s| s.segments.iter()) {
            for w in segment.windows(2) {
                if w[0] != w[1] {
                    pairs.push((w[0], w[1]));
                    pairs.push((w[1], w[0]));
                }
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        fits_u32("adjacency entries", pairs.len())?;
        let (neighbor_start, neighbor_ids) = csr(node_count, &pairs);

        // ── Node → street reverse index ───────────────────────────────────
        let street_pairs: Vec<(NodeId, StreetId)> = {
            let mut v: Vec<(NodeId, StreetId)> = streets
                .iter()
                .zip(&street_ids)
                .flat_map(|(s, &id)| s.nodes.iter().map(move |&n| (n, id)))
                .collect();
            v.sort_unstable();
            v
        };
        fits_u32("node-street entries", street_pairs.len())?;
        let (node_street_start, node_street_ids) = csr(node_count, &street_pairs);

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = node_pos
            .iter()
            .zip(node_ids)
            .map(|(pos, id)| NodeEntry { point: [pos.lat, pos.lon], id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        log::debug!(
            "built street graph: {} nodes, {} edges, {} streets",
            node_count,
            neighbor_ids.len() / 2,
            streets.len()
        );

        Ok(StreetGraph {
            node_pos,
            node_osm: self.node_order,
            neighbor_start,
            neighbor_ids,
            node_street_start,
            node_street_ids,
            osm_index,
            streets,
            spatial_idx,
        })
    }
}

impl Default for StreetGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreetGraph {
    /// Build a graph directly from an element list.
    pub fn from_elements<I>(elements: I, unnamed: UnnamedPolicy) -> GraphResult<Self>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut builder = StreetGraphBuilder::with_policy(unnamed);
        builder.extend(elements);
        builder.build()
    }
}

/// CSR row pointers are `u32`, so no column array may outgrow one.
fn fits_u32(what: &'static str, count: usize) -> GraphResult<()> {
    u32::try_from(count)
        .map(|_| ())
        .map_err(|_| GraphError::TooLarge { what, count })
}

/// Build a CSR row pointer + column array from `(row, value)` pairs sorted by
/// row.
fn csr<T: Copy>(rows: usize, sorted: &[(NodeId, T)]) -> (Vec<u32>, Vec<T>) {
    let mut start = vec![0u32; rows + 1];
    for (row, _) in sorted {
        start[row.index() + 1] += 1;
    }
    for i in 1..=rows {
        start[i] += start[i - 1];
    }
    debug_assert_eq!(start[rows] as usize, sorted.len());
    let values = sorted.iter().map(|&(_, v)| v).collect();
    (start, values)
}
