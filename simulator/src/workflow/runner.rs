use crate::workflow::config::ConsoleConfig;
use anyhow::Context;
use radarcore::radar::{
    event_bus, BeaconRadar, EventPublisher, RadarDriver, RadarEvent, RadarView, TrackRadar,
};
use radarcore::telemetry::MetricsSnapshot;
use radarcore::{GeoPosition, RenderSnapshot};

pub type ConsoleView = Box<dyn RadarView + Send>;

pub struct WorkflowResult {
    pub snapshot: RenderSnapshot,
    pub metrics: MetricsSnapshot,
    pub history_len: usize,
}

/// One live radar plus the publisher feeding it.
pub struct ConsoleSession {
    publisher: EventPublisher,
    driver: RadarDriver<ConsoleView>,
}

impl ConsoleSession {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let radar_config = config.to_radar_config();
        let view: ConsoleView = if config.beacon {
            Box::new(BeaconRadar::new(&radar_config).context("building beacon radar")?)
        } else {
            Box::new(TrackRadar::new(&radar_config).context("building track radar")?)
        };
        let (publisher, queue) = event_bus();
        Ok(Self {
            publisher,
            driver: RadarDriver::new(view, queue),
        })
    }

    /// Queues `event` and processes everything pending. Returns the number
    /// of events accepted.
    pub fn submit(&mut self, event: RadarEvent) -> anyhow::Result<usize> {
        self.publisher
            .publish(event)
            .context("publishing radar event")?;
        Ok(self.driver.pump())
    }

    pub fn driver(&self) -> &RadarDriver<ConsoleView> {
        &self.driver
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.driver.snapshot()
    }
}

#[derive(Clone)]
pub struct Runner {
    config: ConsoleConfig,
}

impl Runner {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// Centers a fresh radar and replays `track` through it.
    pub fn execute(&self, track: &[GeoPosition]) -> anyhow::Result<WorkflowResult> {
        let mut session = ConsoleSession::new(&self.config)?;
        session
            .submit(RadarEvent::NewCenter(self.config.center()))
            .context("centering radar")?;
        for fix in track {
            session.submit(RadarEvent::NewPosition(*fix))?;
        }

        let driver = session.driver();
        Ok(WorkflowResult {
            snapshot: driver.snapshot(),
            metrics: driver.metrics(),
            history_len: driver.view().state().history().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_track, TrackConfig};

    #[test]
    fn runner_executes_workflow() {
        let cfg = ConsoleConfig::default();
        let runner = Runner::new(cfg.clone());
        let track = build_track(&TrackConfig {
            fixes: 60,
            ..Default::default()
        })
        .unwrap();
        let result = runner.execute(&track).unwrap();
        assert_eq!(result.history_len, 60);
        assert_eq!(result.snapshot.points.len(), 60);
        assert_eq!(result.metrics.processed, 61);
        assert_eq!(result.metrics.rejected, 0);
        assert!(result.snapshot.domain > 0.0);
        assert_eq!(result.snapshot.ring_distances.len(), cfg.rings as usize);
    }

    #[test]
    fn beacon_runner_keeps_full_history_but_draws_one_fix() {
        let cfg = ConsoleConfig {
            beacon: true,
            ..Default::default()
        };
        let track = build_track(&TrackConfig {
            fixes: 10,
            ..Default::default()
        })
        .unwrap();
        let result = Runner::new(cfg).execute(&track).unwrap();
        assert_eq!(result.history_len, 10);
        assert_eq!(result.snapshot.points.len(), 1);
    }

    #[test]
    fn invalid_ring_count_fails_setup() {
        let cfg = ConsoleConfig {
            rings: 0,
            ..Default::default()
        };
        assert!(ConsoleSession::new(&cfg).is_err());
    }

    #[test]
    fn session_counts_rejected_fixes() {
        let mut session = ConsoleSession::new(&ConsoleConfig::default()).unwrap();
        let accepted = session
            .submit(RadarEvent::NewPosition(GeoPosition::new(
                f64::NAN,
                0.0,
                0.0,
                0.0,
            )))
            .unwrap();
        assert_eq!(accepted, 0);
        assert_eq!(session.driver().metrics().rejected, 1);
    }
}
