use crate::model::{GeoPosition, Point};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance and tangent-plane bearing between fixes.
pub struct GeodesyHelper;

impl GeodesyHelper {
    /// Haversine distance rounded to the nearest meter.
    pub fn distance_meters(a: &GeoPosition, b: &GeoPosition) -> u64 {
        let phi1 = a.latitude.to_radians();
        let phi2 = b.latitude.to_radians();
        let delta_phi = (b.latitude - a.latitude).to_radians();
        let delta_lambda = (b.longitude - a.longitude).to_radians();

        let h = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let h = h.clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        (EARTH_RADIUS_METERS * c).round() as u64
    }

    /// Unit vector from `a` towards `b` in raw (longitude, latitude) space,
    /// each component rounded to three decimals.
    ///
    /// Coincident positions have no direction and yield `(0, 0)`.
    pub fn normalized_bearing(a: &GeoPosition, b: &GeoPosition) -> Point {
        let dx = b.longitude - a.longitude;
        let dy = b.latitude - a.latitude;
        let length = dx.hypot(dy);
        if length == 0.0 || !length.is_finite() {
            return Point::default();
        }
        Point::new(round3(dx / length), round3(dy / length))
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        for fix in [
            GeoPosition::at(0.0, 0.0),
            GeoPosition::at(4.89, 52.37),
            GeoPosition::at(-179.9, -89.5),
        ] {
            assert_eq!(GeodesyHelper::distance_meters(&fix, &fix), 0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPosition::at(4.89, 52.37);
        let b = GeoPosition::at(2.35, 48.86);
        assert_eq!(
            GeodesyHelper::distance_meters(&a, &b),
            GeodesyHelper::distance_meters(&b, &a)
        );
    }

    #[test]
    fn one_degree_of_latitude_on_the_equator() {
        let a = GeoPosition::at(0.0, 0.0);
        let b = GeoPosition::at(0.0, 1.0);
        assert_eq!(GeodesyHelper::distance_meters(&a, &b), 111_195);
    }

    #[test]
    fn amsterdam_to_paris_is_roughly_430_km() {
        let a = GeoPosition::at(4.8952, 52.3702);
        let b = GeoPosition::at(2.3522, 48.8566);
        let d = GeodesyHelper::distance_meters(&a, &b);
        assert!((425_000..435_000).contains(&d), "got {d}");
    }

    #[test]
    fn bearing_of_coincident_points_is_zero() {
        let a = GeoPosition::new(1.0, 2.0, 30.0, 4.0);
        assert_eq!(GeodesyHelper::normalized_bearing(&a, &a), Point::new(0.0, 0.0));
    }

    #[test]
    fn bearing_is_normalized_and_rounded() {
        let a = GeoPosition::at(0.0, 0.0);
        let b = GeoPosition::at(3.0, 4.0);
        assert_eq!(GeodesyHelper::normalized_bearing(&a, &b), Point::new(0.6, 0.8));

        let c = GeoPosition::at(1.0, 1.0);
        let bearing = GeodesyHelper::normalized_bearing(&a, &c);
        assert_eq!(bearing, Point::new(0.707, 0.707));
    }

    #[test]
    fn bearing_points_west() {
        let a = GeoPosition::at(10.0, 10.0);
        let b = GeoPosition::at(9.0, 10.0);
        assert_eq!(GeodesyHelper::normalized_bearing(&a, &b), Point::new(-1.0, 0.0));
    }
}
