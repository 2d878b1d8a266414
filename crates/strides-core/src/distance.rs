//! Geo-distance providers.
//!
//! # Pluggability
//!
//! Every distance call site takes a [`DistanceFn`], so the planar and the
//! great-circle providers are interchangeable.  [`DistanceMetric`] is the
//! configuration-level choice and implements the trait itself by dispatch;
//! callers that want static dispatch can use the unit structs directly.
//!
//! All providers return kilometres, are symmetric, and return `0.0` for
//! identical points.  Out-of-range coordinates are not checked.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, GeoPoint};

/// Pluggable point-to-point distance in kilometres.
///
/// Implementations must be `Send + Sync` so a single provider can be shared
/// by parallel search workers.
pub trait DistanceFn: Send + Sync {
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// Fast equirectangular approximation (~111 km per degree).
#[derive(Copy, Clone, Debug, Default)]
pub struct PlanarDistance;

impl DistanceFn for PlanarDistance {
    #[inline]
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        a.planar_km(b)
    }
}

/// Great-circle (haversine) distance on a spherical Earth.
#[derive(Copy, Clone, Debug, Default)]
pub struct GeodesicDistance;

impl DistanceFn for GeodesicDistance {
    #[inline]
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        a.haversine_km(b)
    }
}

/// Configuration value selecting a distance provider.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceMetric {
    #[default]
    Planar,
    Geodesic,
}

impl DistanceFn for DistanceMetric {
    #[inline]
    fn distance_km(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        match self {
            DistanceMetric::Planar => PlanarDistance.distance_km(a, b),
            DistanceMetric::Geodesic => GeodesicDistance.distance_km(a, b),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Planar => f.write_str("planar"),
            DistanceMetric::Geodesic => f.write_str("geodesic"),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planar" | "fast" => Ok(DistanceMetric::Planar),
            "geodesic" | "precise" | "haversine" => Ok(DistanceMetric::Geodesic),
            other => Err(CoreError::Parse(format!("unknown distance metric `{other}`"))),
        }
    }
}
