use crate::math::GeodesyHelper;
use crate::model::{GeoPosition, Point};
use crate::prelude::{RadarError, RadarResult};

/// Side length of the logical radar square.
pub const RADAR_SIZE: f64 = 100.0;
const HALF: f64 = RADAR_SIZE / 2.0;

/// Screen coordinate of the radar center.
pub const RADAR_CENTER: Point = Point::new(HALF, HALF);

/// Places polar coordinates inside the 100x100 radar square.
pub struct RadarProjector;

impl RadarProjector {
    /// Maps a bearing and a radial `factor` in [0, 1] to the square.
    /// The y axis is inverted so increasing latitude points up.
    pub fn position_on_radar(direction: Point, factor: f64) -> RadarResult<Point> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(RadarError::InvalidInput(format!(
                "radial factor {factor} outside [0, 1]"
            )));
        }
        let angle = direction.y.atan2(direction.x);
        Ok(Point::new(
            HALF * (1.0 + angle.cos() * factor),
            HALF * (1.0 - angle.sin() * factor),
        ))
    }

    /// Radial factor of `position` against `domain`, without clamping.
    pub fn factor(position: &GeoPosition, center: &GeoPosition, domain: f64) -> f64 {
        GeodesyHelper::distance_meters(center, position) as f64 / domain
    }

    pub fn project(position: &GeoPosition, center: &GeoPosition, domain: f64) -> RadarResult<Point> {
        let direction = GeodesyHelper::normalized_bearing(center, position);
        Self::position_on_radar(direction, Self::factor(position, center, domain))
    }

    /// Like [`RadarProjector::project`], but pins fixes beyond the domain
    /// to the outer ring.
    pub fn project_clamped(
        position: &GeoPosition,
        center: &GeoPosition,
        domain: f64,
    ) -> RadarResult<Point> {
        let direction = GeodesyHelper::normalized_bearing(center, position);
        let factor = Self::factor(position, center, domain).clamp(0.0, 1.0);
        Self::position_on_radar(direction, factor)
    }
}
