//! `strides-core`: foundational types for street-coverage route planning.
//!
//! This crate is a dependency of every other `strides-*` crate.  It has no
//! `strides-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`ids`]        | `NodeId`, `StreetId` (dense), `OsmId` (source identifier)  |
//! | [`geo`]        | `GeoPoint`, planar and haversine kilometre distances       |
//! | [`distance`]   | `DistanceFn` trait, `PlanarDistance`, `GeodesicDistance`   |
//! | [`config`]     | `RouteConfig`, `StartPoint`, `UnnamedPolicy`               |
//! | [`error`]      | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod distance;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RouteConfig, StartPoint, UnnamedPolicy};
pub use distance::{DistanceFn, DistanceMetric, GeodesicDistance, PlanarDistance};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{NodeId, OsmId, StreetId};
