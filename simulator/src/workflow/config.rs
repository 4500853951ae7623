use anyhow::Context;
use radarcore::radar::HistoryRetention;
use radarcore::{GeoPosition, RadarConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub rings: u32,
    pub multiplier: f64,
    pub initial_domain: f64,
    pub center_longitude: f64,
    pub center_latitude: f64,
    /// Keep only this many fixes; unbounded when absent.
    pub history_limit: Option<usize>,
    /// Show only the newest fix instead of the full trail.
    pub beacon: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let radar = RadarConfig::default();
        Self {
            rings: radar.rings,
            multiplier: radar.multiplier,
            initial_domain: radar.initial_domain,
            center_longitude: 4.4777,
            center_latitude: 51.9244,
            history_limit: None,
            beacon: false,
        }
    }
}

impl ConsoleConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading console config {}", path_ref.display()))?;
        let config: ConsoleConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing console config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(rings: u32, multiplier: f64, initial_domain: f64) -> Self {
        Self {
            rings,
            multiplier,
            initial_domain,
            ..Default::default()
        }
    }

    pub fn center(&self) -> GeoPosition {
        GeoPosition::at(self.center_longitude, self.center_latitude)
    }

    /// Engine settings; the center arrives later as an event.
    pub fn to_radar_config(&self) -> RadarConfig {
        RadarConfig {
            rings: self.rings,
            multiplier: self.multiplier,
            initial_domain: self.initial_domain,
            initial_center: None,
            retention: match self.history_limit {
                Some(limit) => HistoryRetention::MostRecent(limit),
                None => HistoryRetention::Unbounded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_radar_config() {
        let cfg = ConsoleConfig::from_args(4, 2.0, 500.0);
        let radar = cfg.to_radar_config();
        assert_eq!(radar.rings, 4);
        assert_eq!(radar.initial_domain, 500.0);
        assert_eq!(radar.retention, HistoryRetention::Unbounded);
        assert!(radar.validate().is_ok());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"rings: 3\nmultiplier: 2.0\nhistory_limit: 50\nbeacon: true\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ConsoleConfig::load(&path).unwrap();
        assert_eq!(cfg.rings, 3);
        assert_eq!(cfg.initial_domain, 100.0);
        assert!(cfg.beacon);
        assert_eq!(
            cfg.to_radar_config().retention,
            HistoryRetention::MostRecent(50)
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConsoleConfig::load("/nonexistent/console.yaml").unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/console.yaml"));
    }
}
