use crate::model::GeoPosition;
use crate::radar::history::HistoryRetention;
use serde::{Deserialize, Serialize};

/// Static configuration supplied once when the radar is set up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Number of equidistant rings drawn across the domain.
    pub rings: u32,
    /// Factor by which the domain grows or shrinks per adjustment step.
    pub multiplier: f64,
    /// Domain max in meters before the first fix arrives.
    pub initial_domain: f64,
    pub initial_center: Option<GeoPosition>,
    pub retention: HistoryRetention,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            rings: 5,
            multiplier: 10.0,
            initial_domain: 100.0,
            initial_center: None,
            retention: HistoryRetention::Unbounded,
        }
    }
}

impl RadarConfig {
    /// Rejects configurations the engine cannot run with. Failures here are fatal.
    pub fn validate(&self) -> RadarResult<()> {
        if self.rings == 0 {
            return Err(RadarError::Configuration(
                "ring count must be positive".into(),
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 1.0 {
            return Err(RadarError::Configuration(format!(
                "domain multiplier must be finite and greater than 1, got {}",
                self.multiplier
            )));
        }
        if !self.initial_domain.is_finite() || self.initial_domain <= 0.0 {
            return Err(RadarError::Configuration(format!(
                "initial domain must be finite and positive, got {}",
                self.initial_domain
            )));
        }
        if let Some(center) = &self.initial_center {
            if !center.is_finite() {
                return Err(RadarError::Configuration(
                    "initial center has non-finite coordinates".into(),
                ));
            }
        }
        if self.retention == HistoryRetention::MostRecent(0) {
            return Err(RadarError::Configuration(
                "history retention must keep at least one fix".into(),
            ));
        }
        Ok(())
    }
}

/// Common error type for the radar engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RadarError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("event queue closed")]
    ChannelClosed,
}

impl RadarError {
    /// Whether the engine may drop the offending event and keep going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RadarError::InvalidInput(_))
    }
}

pub type RadarResult<T> = Result<T, RadarError>;
