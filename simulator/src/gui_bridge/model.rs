use radarcore::radar::RadarPhase;
use radarcore::telemetry::MetricsSnapshot;
use radarcore::{Point, RenderPoint, RenderSnapshot};
use serde::{Deserialize, Serialize};

/// JSON payload served to the render adapter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub active: bool,
    pub points: Vec<RenderPoint>,
    pub polyline: Vec<Point>,
    pub domain: f64,
    pub ring_distances: Vec<f64>,
    pub transform: String,
    pub processed: usize,
    pub rejected: usize,
}

impl VisualizationModel {
    pub fn from_snapshot(
        phase: RadarPhase,
        snapshot: RenderSnapshot,
        metrics: MetricsSnapshot,
    ) -> Self {
        Self {
            active: phase == RadarPhase::Active,
            points: snapshot.points,
            polyline: snapshot.polyline,
            domain: snapshot.domain,
            ring_distances: snapshot.ring_distances,
            transform: snapshot.transform,
            processed: metrics.processed,
            rejected: metrics.rejected,
        }
    }
}
