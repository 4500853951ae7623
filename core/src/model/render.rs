use crate::model::position::{GeoPosition, Point};
use serde::{Deserialize, Serialize};

/// A fix projected onto the radar square, ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub position: GeoPosition,
    pub point: Point,
    /// `altitude / max_altitude`, clamped into [0, 1].
    pub weight: f64,
}

/// Everything a render adapter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub points: Vec<RenderPoint>,
    /// Center followed by every visible point, in arrival order.
    pub polyline: Vec<Point>,
    pub domain: f64,
    pub rings: u32,
    pub ring_distances: Vec<f64>,
    pub transform: String,
}

impl RenderSnapshot {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
