//! Raw map elements and the Overpass JSON loader.
//!
//! An extract is a flat list of elements, each either a node (id + position)
//! or a way (ordered node references + optional `name` tag).  Everything else
//! an Overpass response may contain (relations, areas, metadata) is ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use strides_core::{GeoPoint, OsmId};

use crate::GraphResult;

/// One record of a street-network extract.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Node {
        id:  OsmId,
        pos: GeoPoint,
    },
    Way {
        id:    i64,
        nodes: Vec<OsmId>,
        name:  Option<String>,
    },
}

impl Element {
    /// Shorthand for a node record.
    pub fn node(id: i64, lat: f64, lon: f64) -> Self {
        Element::Node { id: OsmId(id), pos: GeoPoint::new(lat, lon) }
    }

    /// Shorthand for a way record.
    pub fn way(id: i64, nodes: &[i64], name: Option<&str>) -> Self {
        Element::Way {
            id,
            nodes: nodes.iter().copied().map(OsmId).collect(),
            name:  name.map(str::to_owned),
        }
    }
}

// ── Overpass JSON ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OverpassDocument {
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawElement {
    Node {
        id:  i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Parse an Overpass API JSON response (`{"elements": [...]}`).
///
/// # Errors
///
/// Returns [`GraphError::Json`](crate::GraphError::Json) on malformed input,
/// [`GraphError::Io`](crate::GraphError::Io) on read failures.
pub fn load_overpass_json<R: Read>(reader: R) -> GraphResult<Vec<Element>> {
    let doc: OverpassDocument = serde_json::from_reader(BufReader::new(reader))?;

    let elements: Vec<Element> = doc
        .elements
        .into_iter()
        .filter_map(|raw| match raw {
            RawElement::Node { id, lat, lon } => Some(Element::node(id, lat, lon)),
            RawElement::Way { id, nodes, mut tags } => Some(Element::Way {
                id,
                nodes: nodes.into_iter().map(OsmId).collect(),
                name:  tags.remove("name"),
            }),
            RawElement::Other => None,
        })
        .collect();

    log::debug!("parsed {} elements from Overpass JSON", elements.len());
    Ok(elements)
}

/// Open `path` and parse it with [`load_overpass_json`].
pub fn load_overpass_path(path: &Path) -> GraphResult<Vec<Element>> {
    let file = File::open(path)?;
    load_overpass_json(file)
}
