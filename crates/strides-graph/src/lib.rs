//! `strides-graph`: street graph, raw-element loaders, and street coverage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`element`]  | `Element` (node / way records), Overpass JSON loader         |
//! | [`builder`]  | `StreetGraphBuilder`                                         |
//! | [`graph`]    | `StreetGraph` (CSR adjacency + R-tree), `Street`             |
//! | [`coverage`] | `streets_completed`, `CoverageTracker`                       |
//! | [`osm`]      | `load_elements_from_pbf` (feature = `"osm"` only)            |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//! | `serde` | Propagates serde derives on `strides-core` types.            |

pub mod builder;
pub mod coverage;
pub mod element;
pub mod error;
pub mod graph;

#[cfg(feature = "osm")]
pub mod osm;


pub use builder::StreetGraphBuilder;
pub use coverage::{CoverageTracker, completed_streets, streets_completed};
pub use element::{Element, load_overpass_json, load_overpass_path};
pub use error::{GraphError, GraphResult};
pub use graph::{Street, StreetGraph, UNNAMED_STREET};
