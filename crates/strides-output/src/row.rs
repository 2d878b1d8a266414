//! Plain data row types written by output backends.

use strides_core::NodeId;
use strides_graph::StreetGraph;
use strides_search::{GrowthStep, HotSpot};

/// Marker size of a route point.
pub const PATH_MARKER_SIZE: f64 = 2.0;

/// Sequence value shared by every hot-spot point.
pub const HOT_SPOT_SEQUENCE: u32 = 5;

/// One plotted point: a route node or a hot spot.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPointRow {
    pub lat:         f64,
    pub lon:         f64,
    pub marker_size: f64,
    pub label:       String,
    /// Position along the route for route nodes.
    pub sequence:    u32,
}

impl PathPointRow {
    /// One row per node of `path`, in order.
    pub fn from_path(graph: &StreetGraph, path: &[NodeId]) -> Vec<Self> {
        path.iter()
            .enumerate()
            .map(|(i, &node)| {
                let pos = graph.position(node);
                PathPointRow {
                    lat:         pos.lat,
                    lon:         pos.lon,
                    marker_size: PATH_MARKER_SIZE,
                    label:       format!("Name: {}", graph.osm_id(node)),
                    sequence:    i as u32,
                }
            })
            .collect()
    }

    /// One row per hot spot, sized by its street count.
    pub fn from_hot_spots(spots: &[HotSpot]) -> Vec<Self> {
        spots
            .iter()
            .map(|spot| PathPointRow {
                lat:         spot.center.lat,
                lon:         spot.center.lon,
                marker_size: spot.streets as f64 / 10.0,
                label:       format!("Streets Completed: {}", spot.streets),
                sequence:    HOT_SPOT_SEQUENCE,
            })
            .collect()
    }
}

/// Progress of one growth step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub iteration:         u32,
    pub nodes:             u32,
    pub total_km:          f64,
    pub streets_completed: u32,
    pub branch_budget:     u32,
    pub score:             f64,
}

impl From<&GrowthStep<'_>> for StepSummaryRow {
    fn from(step: &GrowthStep<'_>) -> Self {
        StepSummaryRow {
            iteration:         step.iteration,
            nodes:             step.path.len() as u32,
            total_km:          step.total_km,
            streets_completed: step.streets_completed as u32,
            branch_budget:     step.branch_budget,
            score:             step.score,
        }
    }
}
