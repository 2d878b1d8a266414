//! `strides-search`: bounded path search and the route growth loop.
//!
//! # Growth loop
//!
//! ```text
//! path = [start]
//! while length(path) < target:
//!   ① Search : enumerate extensions of path within the branch budget and
//!              score each by streets completed per km.
//!   ② Widen  : nothing improved? retry with budget + 2, up to the cap;
//!              still nothing → Stalled.
//!   ③ Trim   : drop the winner's last `tail_trim` nodes unless it already
//!              reaches the target.
//!   ④ Report : hand the new path to the observer.
//! ```
//!
//! # Modules
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`search`]   | `BoundedSearch`, leaves, scoring                        |
//! | [`growth`]   | `RouteGrower`, `GrowthReport`, `Termination`            |
//! | [`hotspot`]  | `find_hot_spots`: clusters of unfinished streets        |
//! | [`observer`] | `GrowthObserver` callbacks                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores search leaves on Rayon's thread pool.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use strides_core::{RouteConfig, StartPoint, UnnamedPolicy};
//! use strides_graph::{StreetGraph, load_overpass_path};
//! use strides_search::{NoopObserver, RouteGrower};
//!
//! let elements = load_overpass_path(Path::new("bangkok.json"))?;
//! let graph = StreetGraph::from_elements(elements, UnnamedPolicy::Walkable)?;
//! let config = RouteConfig::new(StartPoint::Node(OsmId(702_209_198)), 21.1);
//! let report = RouteGrower::new(&graph, config)?.plan(&mut NoopObserver)?;
//! ```

pub mod error;
pub mod growth;
pub mod hotspot;
pub mod observer;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{SearchError, SearchResult};
pub use growth::{GrowthReport, GrowthStep, RouteGrower, Termination, resolve_start};
pub use hotspot::{HotSpot, find_hot_spots};
pub use observer::{GrowthObserver, NoopObserver};
pub use search::{BoundedSearch, Candidate, Leaf, SearchOutcome, SearchParams};
