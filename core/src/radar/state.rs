use crate::math::GeodesyHelper;
use crate::model::{GeoPosition, Point, RenderPoint, RenderSnapshot};
use crate::prelude::{RadarConfig, RadarError, RadarResult};
use crate::radar::brush::{BrushRange, TimeBrushIndex};
use crate::radar::domain::DomainScaler;
use crate::radar::events::RadarEvent;
use crate::radar::history::History;
use crate::radar::projector::{RadarProjector, RADAR_CENTER};
use crate::radar::transform::{TransformCodec, TransformState};
use crate::telemetry::log::LogManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarPhase {
    /// No center configured yet; nothing can be projected.
    Idle,
    Active,
}

/// Side effects of applying one event, reported for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transition {
    pub appended: bool,
    /// Previous and new domain when the event rescaled the radar.
    pub domain_change: Option<(f64, f64)>,
    pub reprojected: bool,
}

/// Owns the fix history and every piece of display state derived from it.
///
/// All mutation goes through [`RadarState::apply`]. Each event either
/// completes, including any re-projection it triggers, or is rejected with
/// the state left exactly as it was.
pub struct RadarState {
    scaler: DomainScaler,
    center: Option<GeoPosition>,
    domain: f64,
    history: History,
    timestamps: TimeBrushIndex,
    /// Parallel to `history` while active, empty while idle.
    projections: Vec<RenderPoint>,
    max_altitude: f64,
    transform: TransformState,
    brush: BrushRange,
    logger: LogManager,
}

impl RadarState {
    pub fn new(config: &RadarConfig) -> RadarResult<Self> {
        config.validate()?;
        let scaler = DomainScaler::new(config.rings, config.multiplier)?;
        Ok(Self {
            scaler,
            center: config.initial_center,
            domain: config.initial_domain,
            history: History::with_retention(config.retention),
            timestamps: TimeBrushIndex::new(),
            projections: Vec::new(),
            max_altitude: 0.0,
            transform: TransformState::identity(),
            brush: BrushRange::unbounded(),
            logger: LogManager::new(),
        })
    }

    pub fn apply(&mut self, event: RadarEvent) -> RadarResult<Transition> {
        match event {
            RadarEvent::NewPosition(fix) => self.on_new_position(fix),
            RadarEvent::NewCenter(center) => self.on_new_center(center),
            RadarEvent::NewRotation(degrees) => {
                self.set_rotation(degrees)?;
                Ok(Transition::default())
            }
            RadarEvent::RotateBy(delta) => {
                self.set_rotation(self.transform.rotation_degrees + delta)?;
                Ok(Transition::default())
            }
            RadarEvent::NewZoomTransform(zoom) => {
                if !zoom.is_finite() || zoom.scale <= 0.0 {
                    return Err(RadarError::InvalidInput(format!(
                        "zoom transform must be finite with positive scale, got {zoom:?}"
                    )));
                }
                self.transform = self.transform.with_zoom_of(&zoom);
                Ok(Transition::default())
            }
            RadarEvent::ResetZoom => {
                self.transform = self.transform.with_zoom_of(&TransformState::identity());
                Ok(Transition::default())
            }
            RadarEvent::NewBrushRange { start, end } => {
                self.brush = BrushRange::new(start, end)?;
                Ok(Transition::default())
            }
            RadarEvent::ClearBrush => {
                self.brush = BrushRange::unbounded();
                Ok(Transition::default())
            }
        }
    }

    fn on_new_position(&mut self, fix: GeoPosition) -> RadarResult<Transition> {
        if !fix.is_finite() {
            return Err(RadarError::InvalidInput(format!(
                "fix has non-finite fields: {fix:?}"
            )));
        }

        // Everything fallible happens before the first mutation.
        let rescaled = match &self.center {
            Some(center) => {
                let radius = GeodesyHelper::distance_meters(center, &fix) as f64;
                Some(self.scaler.rescale(radius, self.domain)?)
            }
            None => None,
        };

        let mut transition = Transition::default();
        let admission = self.history.admit(fix);
        transition.appended = admission.appended;
        if admission.appended {
            self.timestamps.insert(fix.timestamp);
        }
        if !admission.evicted.is_empty() {
            let stale = admission.evicted.len().min(self.projections.len());
            self.projections.drain(..stale);
            for old in &admission.evicted {
                if !self.history.contains_timestamp(old.timestamp) {
                    self.timestamps.remove(old.timestamp);
                }
            }
        }

        let mut reproject = false;
        if let Some(new_max) = rescaled {
            if new_max != self.domain {
                self.logger.domain_changed(self.domain, new_max);
                transition.domain_change = Some((self.domain, new_max));
                self.domain = new_max;
                reproject = true;
            }
        }
        if fix.altitude > self.max_altitude {
            self.max_altitude = fix.altitude;
            reproject = true;
        }

        if reproject {
            transition.reprojected = self.reproject_all("domain or altitude scale changed")?;
        } else if admission.appended {
            if let Some(center) = self.center {
                let projected = self.render_point(&fix, &center)?;
                self.projections.push(projected);
            }
        }
        Ok(transition)
    }

    fn on_new_center(&mut self, center: GeoPosition) -> RadarResult<Transition> {
        if !center.longitude.is_finite() || !center.latitude.is_finite() {
            return Err(RadarError::InvalidInput(format!(
                "center has non-finite coordinates: {center:?}"
            )));
        }
        self.center = Some(center);
        let reprojected = self.reproject_all("center moved")?;
        Ok(Transition {
            reprojected,
            ..Default::default()
        })
    }

    fn set_rotation(&mut self, degrees: f64) -> RadarResult<()> {
        if !degrees.is_finite() {
            return Err(RadarError::InvalidInput(format!(
                "rotation must be finite, got {degrees}"
            )));
        }
        self.transform = self.transform.with_rotation(degrees);
        Ok(())
    }

    fn reproject_all(&mut self, reason: &str) -> RadarResult<bool> {
        let Some(center) = self.center else {
            return Ok(false);
        };
        let projections = self
            .history
            .iter()
            .map(|fix| self.render_point(fix, &center))
            .collect::<RadarResult<Vec<_>>>()?;
        self.projections = projections;
        self.logger.reprojected(self.projections.len(), reason);
        Ok(true)
    }

    fn render_point(&self, fix: &GeoPosition, center: &GeoPosition) -> RadarResult<RenderPoint> {
        let point = RadarProjector::project_clamped(fix, center, self.domain)?;
        Ok(RenderPoint {
            position: *fix,
            point,
            weight: self.weight(fix.altitude),
        })
    }

    fn weight(&self, altitude: f64) -> f64 {
        if self.max_altitude > 0.0 {
            (altitude / self.max_altitude).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Brush-filtered projections in arrival order.
    pub fn visible_points(&self) -> Vec<RenderPoint> {
        self.projections
            .iter()
            .filter(|projected| self.brush.contains(projected.position.timestamp))
            .cloned()
            .collect()
    }

    /// Full frame: visible points, the polyline from center through them,
    /// domain, rings and the canonical transform string.
    pub fn render_set(&self) -> RenderSnapshot {
        let points = self.visible_points();
        self.snapshot_of(points)
    }

    /// Frame built from an arbitrary subset of the visible points.
    pub fn snapshot_of(&self, points: Vec<RenderPoint>) -> RenderSnapshot {
        let polyline = if self.center.is_some() {
            std::iter::once(RADAR_CENTER)
                .chain(points.iter().map(|projected| projected.point))
                .collect::<Vec<Point>>()
        } else {
            Vec::new()
        };
        RenderSnapshot {
            points,
            polyline,
            domain: self.domain,
            rings: self.scaler.rings(),
            ring_distances: self.ring_distances(),
            transform: self.transform_string(),
        }
    }

    /// Snaps a raw selection to stored timestamps, ready for `NewBrushRange`.
    pub fn snap_brush(&self, x0: f64, x1: f64) -> RadarResult<Option<BrushRange>> {
        self.timestamps.snap(x0, x1)
    }

    pub fn phase(&self) -> RadarPhase {
        if self.center.is_some() {
            RadarPhase::Active
        } else {
            RadarPhase::Idle
        }
    }

    pub fn center(&self) -> Option<&GeoPosition> {
        self.center.as_ref()
    }

    pub fn domain(&self) -> f64 {
        self.domain
    }

    pub fn ring_distances(&self) -> Vec<f64> {
        self.scaler.ring_distances(self.domain)
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation_degrees
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn transform_string(&self) -> String {
        TransformCodec::build(&self.transform)
    }

    pub fn brush(&self) -> BrushRange {
        self.brush
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn timestamps(&self) -> &TimeBrushIndex {
        &self.timestamps
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }
}
