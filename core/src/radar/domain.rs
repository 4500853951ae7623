use crate::prelude::{RadarError, RadarResult};

/// Shrinking never takes the domain below this many meters.
pub const MIN_DOMAIN_METERS: f64 = 1.0;

/// Computes the visible range after a fix at `radius` meters arrives.
///
/// The shrink phase runs first: while the fix sits inside half of the
/// innermost ring, the domain is divided by `multiplier` so the rings stay
/// distinguishable. The growth phase then multiplies the domain until the
/// fix is on screen. Either phase may iterate several times.
pub fn get_new_domain_max(
    radius: f64,
    current_max: f64,
    num_rings: u32,
    multiplier: f64,
) -> RadarResult<f64> {
    if num_rings == 0 {
        return Err(RadarError::Configuration(
            "ring count must be positive".into(),
        ));
    }
    if !multiplier.is_finite() || multiplier <= 1.0 {
        return Err(RadarError::Configuration(format!(
            "domain multiplier must be finite and greater than 1, got {multiplier}"
        )));
    }
    if !current_max.is_finite() || current_max <= 0.0 {
        return Err(RadarError::InvalidInput(format!(
            "current domain must be finite and positive, got {current_max}"
        )));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(RadarError::InvalidInput(format!(
            "radius must be finite and non-negative, got {radius}"
        )));
    }

    let rings = f64::from(num_rings);
    let mut max = current_max;

    while radius < (max / rings) * 0.5 && max / multiplier >= MIN_DOMAIN_METERS {
        max /= multiplier;
    }
    while radius > max {
        max *= multiplier;
    }

    Ok(max)
}

/// Ring and multiplier settings bound once at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainScaler {
    rings: u32,
    multiplier: f64,
}

impl DomainScaler {
    pub fn new(rings: u32, multiplier: f64) -> RadarResult<Self> {
        // Probe once so bad settings fail at setup instead of per fix.
        get_new_domain_max(0.0, 1.0, rings, multiplier)?;
        Ok(Self { rings, multiplier })
    }

    pub fn rings(&self) -> u32 {
        self.rings
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn rescale(&self, radius: f64, current_max: f64) -> RadarResult<f64> {
        get_new_domain_max(radius, current_max, self.rings, self.multiplier)
    }

    /// Radii of the equidistant rings, innermost first.
    pub fn ring_distances(&self, domain: f64) -> Vec<f64> {
        let rings = f64::from(self.rings);
        (1..=self.rings)
            .map(|i| domain * f64::from(i) / rings)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_inside_range_keeps_domain() {
        assert_eq!(get_new_domain_max(50.0, 100.0, 5, 10.0).unwrap(), 100.0);
    }

    #[test]
    fn point_near_center_shrinks_once() {
        assert_eq!(get_new_domain_max(8.0, 100.0, 5, 10.0).unwrap(), 10.0);
    }

    #[test]
    fn point_just_outside_grows_once() {
        assert_eq!(get_new_domain_max(110.0, 100.0, 5, 10.0).unwrap(), 1000.0);
    }

    #[test]
    fn large_jump_grows_repeatedly() {
        assert_eq!(
            get_new_domain_max(20_000.0, 100.0, 5, 10.0).unwrap(),
            100_000.0
        );
    }

    #[test]
    fn radius_on_the_boundary_is_left_alone() {
        assert_eq!(get_new_domain_max(100.0, 100.0, 5, 10.0).unwrap(), 100.0);
        assert_eq!(get_new_domain_max(10.0, 100.0, 5, 10.0).unwrap(), 100.0);
    }

    #[test]
    fn coincident_fix_stops_at_the_floor() {
        let max = get_new_domain_max(0.0, 100.0, 5, 10.0).unwrap();
        assert_eq!(max, 1.0);
        assert!(max >= MIN_DOMAIN_METERS);
    }

    #[test]
    fn zero_rings_is_fatal() {
        let err = get_new_domain_max(10.0, 100.0, 0, 10.0).unwrap_err();
        assert!(matches!(err, RadarError::Configuration(_)));
    }

    #[test]
    fn non_growing_multiplier_is_fatal() {
        assert!(matches!(
            get_new_domain_max(10.0, 100.0, 5, 1.0),
            Err(RadarError::Configuration(_))
        ));
    }

    #[test]
    fn scaler_rejects_bad_settings_up_front() {
        assert!(DomainScaler::new(0, 10.0).is_err());
        assert!(DomainScaler::new(5, 0.5).is_err());
        let scaler = DomainScaler::new(4, 2.0).unwrap();
        assert_eq!(scaler.rescale(300.0, 100.0).unwrap(), 400.0);
    }

    #[test]
    fn ring_distances_are_equidistant() {
        let scaler = DomainScaler::new(4, 10.0).unwrap();
        assert_eq!(scaler.ring_distances(100.0), vec![25.0, 50.0, 75.0, 100.0]);
    }
}
