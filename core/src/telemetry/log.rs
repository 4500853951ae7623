use crate::prelude::RadarError;
use log::{debug, info, warn};

/// Thin wrapper over the `log` facade naming the engine's notable moments.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn domain_changed(&self, previous: f64, current: f64) {
        info!("radar domain {} m -> {} m", previous, current);
    }

    pub fn reprojected(&self, count: usize, reason: &str) {
        debug!("re-projected {} fixes ({})", count, reason);
    }

    pub fn rejected(&self, event: &str, error: &RadarError) {
        warn!("dropped {}: {}", event, error);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
