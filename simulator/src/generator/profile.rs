use crate::generator::template::altitude_wave;
use anyhow::ensure;
use radarcore::GeoPosition;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude on the reference sphere.
const METERS_PER_DEGREE: f64 = 111_195.0;

/// Configuration for generating a synthetic vehicle track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub fixes: usize,
    pub start_longitude: f64,
    pub start_latitude: f64,
    /// Speed at the first fix; grows by `acceleration_mps2` every second.
    pub speed_mps: f64,
    pub acceleration_mps2: f64,
    pub heading_deg: f64,
    pub turn_rate_deg: f64,
    pub altitude_base: f64,
    pub altitude_swing: f64,
    pub altitude_period: usize,
    /// Horizontal jitter in meters.
    pub noise_m: f64,
    pub interval_s: f64,
    pub start_timestamp: f64,
    pub seed: u64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            fixes: 120,
            start_longitude: 4.4777,
            start_latitude: 51.9244,
            speed_mps: 2.0,
            acceleration_mps2: 0.25,
            heading_deg: 45.0,
            turn_rate_deg: 1.5,
            altitude_base: 40.0,
            altitude_swing: 15.0,
            altitude_period: 60,
            noise_m: 1.5,
            interval_s: 1.0,
            start_timestamp: 0.0,
            seed: 0,
        }
    }
}

/// Builds a deterministic track leaving the start point on a slow spiral.
pub fn build_track(config: &TrackConfig) -> anyhow::Result<Vec<GeoPosition>> {
    ensure!(config.interval_s > 0.0, "fix interval must be positive");
    ensure!(
        config.start_latitude.abs() < 90.0,
        "start latitude must be off the poles"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut track = Vec::with_capacity(config.fixes);
    let mut north = 0.0;
    let mut east = 0.0;
    let mut speed = config.speed_mps;
    let mut heading = config.heading_deg;
    let lon_scale = METERS_PER_DEGREE * config.start_latitude.to_radians().cos();

    for index in 0..config.fixes {
        let (jitter_north, jitter_east) = if config.noise_m > 0.0 {
            (
                rng.gen_range(-config.noise_m..config.noise_m),
                rng.gen_range(-config.noise_m..config.noise_m),
            )
        } else {
            (0.0, 0.0)
        };

        track.push(GeoPosition::new(
            config.start_longitude + (east + jitter_east) / lon_scale,
            config.start_latitude + (north + jitter_north) / METERS_PER_DEGREE,
            config.altitude_base
                + altitude_wave(index, config.altitude_period, config.altitude_swing),
            config.start_timestamp + index as f64 * config.interval_s,
        ));

        let step = speed * config.interval_s;
        north += step * heading.to_radians().cos();
        east += step * heading.to_radians().sin();
        speed += config.acceleration_mps2 * config.interval_s;
        heading += config.turn_rate_deg * config.interval_s;
    }

    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use radarcore::math::GeodesyHelper;

    #[test]
    fn generator_builds_requested_fix_count() {
        let track = build_track(&TrackConfig::default()).unwrap();
        assert_eq!(track.len(), 120);
        assert!(track.iter().all(GeoPosition::is_finite));
    }

    #[test]
    fn timestamps_follow_the_interval() {
        let config = TrackConfig {
            fixes: 4,
            interval_s: 2.0,
            start_timestamp: 100.0,
            ..Default::default()
        };
        let times: Vec<f64> = build_track(&config)
            .unwrap()
            .iter()
            .map(|fix| fix.timestamp)
            .collect();
        assert_eq!(times, vec![100.0, 102.0, 104.0, 106.0]);
    }

    #[test]
    fn same_seed_same_track() {
        let config = TrackConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(build_track(&config).unwrap(), build_track(&config).unwrap());
    }

    #[test]
    fn noiseless_track_moves_away_from_start() {
        let config = TrackConfig {
            fixes: 30,
            noise_m: 0.0,
            turn_rate_deg: 0.0,
            ..Default::default()
        };
        let track = build_track(&config).unwrap();
        let start = track[0];
        let distances: Vec<u64> = track
            .iter()
            .map(|fix| GeodesyHelper::distance_meters(&start, fix))
            .collect();
        assert_eq!(distances[0], 0);
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = TrackConfig {
            interval_s: 0.0,
            ..Default::default()
        };
        assert!(build_track(&config).is_err());
    }
}
