//! Built-in synthetic street network for `--demo` runs.
//!
//! A 6×6 block grid on the Rattanakosin island latitude, ~150 m blocks:
//!
//! ```text
//!  row 5  ●──●──●──●──●──●   Soi 6
//!         │  │  │  │  │  │
//!   ...                       Soi 2 … Soi 5
//!         │  │  │  │  │  │
//!  row 0  ●──●──●──●──●──●   Soi 1
//!        Th. A … Th. F (columns)
//! ```
//!
//! Plus a dead-end lane off the north-east corner and an unnamed footpath
//! cutting one block diagonally.

use strides_core::OsmId;
use strides_graph::Element;

pub const ROWS: i64 = 6;
pub const COLS: i64 = 6;

const LAT_MIN:  f64 = 13.750;
const LON_MIN:  f64 = 100.490;
/// ~150 m in both directions at this latitude.
const STEP_DEG: f64 = 0.001_35;

const COLUMN_NAMES: [&str; COLS as usize] = [
    "Thanon A", "Thanon B", "Thanon C", "Thanon D", "Thanon E", "Thanon F",
];

/// South-west corner of the grid.
pub const DEMO_START: OsmId = OsmId(1);

/// Default route length for demo runs, in kilometres.
pub const DEMO_TARGET_KM: f64 = 3.0;

fn node_id(row: i64, col: i64) -> i64 {
    row * COLS + col + 1
}

/// Build the demo element list: nodes first, then ways, like an Overpass
/// response.
pub fn demo_elements() -> Vec<Element> {
    let mut elements = Vec::new();

    for row in 0..ROWS {
        for col in 0..COLS {
            let lat = LAT_MIN + row as f64 * STEP_DEG;
            let lon = LON_MIN + col as f64 * STEP_DEG;
            elements.push(Element::node(node_id(row, col), lat, lon));
        }
    }

    // Dead-end lane: two nodes north of the north-east corner.
    let corner = node_id(ROWS - 1, COLS - 1);
    let lane = [corner, 1_001, 1_002];
    for (i, &id) in lane.iter().enumerate().skip(1) {
        let lat = LAT_MIN + (ROWS - 1 + i as i64) as f64 * STEP_DEG;
        elements.push(Element::node(id, lat, LON_MIN + (COLS - 1) as f64 * STEP_DEG));
    }

    for row in 0..ROWS {
        let nodes: Vec<i64> = (0..COLS).map(|col| node_id(row, col)).collect();
        let name = format!("Soi {}", row + 1);
        elements.push(Element::way(10_000 + row, &nodes, Some(name.as_str())));
    }
    for (col, name) in COLUMN_NAMES.iter().enumerate() {
        let col = col as i64;
        let nodes: Vec<i64> = (0..ROWS).map(|row| node_id(row, col)).collect();
        elements.push(Element::way(20_000 + col, &nodes, Some(*name)));
    }
    elements.push(Element::way(30_000, &lane, Some("Trok Tan")));
    elements.push(Element::way(30_001, &[node_id(1, 1), node_id(2, 2)], None));

    elements
}
