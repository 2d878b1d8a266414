//! OSM PBF loader: enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use strides_core::UnnamedPolicy;
//! use strides_graph::{StreetGraph, osm::load_elements_from_pbf};
//!
//! let elements = load_elements_from_pbf(Path::new("bangkok.osm.pbf"))?;
//! let graph = StreetGraph::from_elements(elements, UnnamedPolicy::Walkable)?;
//! ```
//!
//! # What is loaded
//!
//! Only walkable `highway=*` ways (see [`is_walkable`]) and the nodes they
//! reference.  Buildings, POIs, and relations are ignored.  Direction tags are
//! irrelevant on foot, so every way is treated as two-way.
//!
//! # Memory note
//!
//! All nodes of the file are buffered during the single read pass because
//! ways reference them by id; unreferenced ones are dropped before returning.

use std::path::Path;

use osmpbf::{Element as PbfElement, ElementReader};
use rustc_hash::FxHashSet;

use strides_core::{GeoPoint, OsmId};

use crate::{Element, GraphError, GraphResult};

// ── Public entry point ────────────────────────────────────────────────────────

/// Read walkable ways and their nodes from an OSM PBF file.
///
/// Nodes come first in the returned list, then ways, matching the layout of
/// an Overpass response.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] on read or parse errors.
pub fn load_elements_from_pbf(path: &Path) -> GraphResult<Vec<Element>> {
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut nodes: Vec<Element> = Vec::new();
    let mut ways:  Vec<Element> = Vec::new();

    reader
        .for_each(|elem| match elem {
            PbfElement::Node(n) => {
                nodes.push(Element::Node { id: OsmId(n.id()), pos: GeoPoint::new(n.lat(), n.lon()) });
            }
            PbfElement::DenseNode(n) => {
                nodes.push(Element::Node { id: OsmId(n.id()), pos: GeoPoint::new(n.lat(), n.lon()) });
            }
            PbfElement::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let walkable = tags
                    .iter()
                    .find(|(k, _)| *k == "highway")
                    .is_some_and(|(_, v)| is_walkable(v));
                if walkable {
                    let name = tags.iter().find(|(k, _)| *k == "name").map(|(_, v)| (*v).to_owned());
                    ways.push(Element::Way { id: w.id(), nodes: w.refs().map(OsmId).collect(), name });
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    let referenced: FxHashSet<OsmId> = ways
        .iter()
        .filter_map(|w| match w {
            Element::Way { nodes, .. } => Some(nodes),
            Element::Node { .. } => None,
        })
        .flatten()
        .copied()
        .collect();
    nodes.retain(|n| matches!(n, Element::Node { id, .. } if referenced.contains(id)));

    log::info!(
        "loaded {} nodes and {} walkable ways from {}",
        nodes.len(),
        ways.len(),
        path.display()
    );

    nodes.extend(ways);
    Ok(nodes)
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// Whether a `highway` value can be walked or run along.
fn is_walkable(highway: &str) -> bool {
    !matches!(
        highway,
        "motorway" | "motorway_link" | "construction" | "proposed" | "raceway" | "bus_guideway"
            | "abandoned" | "platform"
    )
}
