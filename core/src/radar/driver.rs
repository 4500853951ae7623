use crate::model::RenderSnapshot;
use crate::prelude::{RadarError, RadarResult};
use crate::radar::events::{EventQueue, RadarEvent};
use crate::radar::view::RadarView;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use tokio::sync::watch;

/// Sole owner of a radar view and the queue that feeds it.
///
/// Events are applied one at a time, each to completion, and every
/// accepted event publishes a fresh frame to subscribers. Rejected events
/// are logged and counted; the view keeps its previous state.
pub struct RadarDriver<V: RadarView> {
    view: V,
    queue: EventQueue,
    frames: watch::Sender<RenderSnapshot>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<V: RadarView> RadarDriver<V> {
    pub fn new(view: V, queue: EventQueue) -> Self {
        let (frames, _) = watch::channel(view.redraw());
        Self {
            view,
            queue,
            frames,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    /// Receiver of every frame published from now on. Dropping it is all
    /// it takes to stop observing.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.frames.subscribe()
    }

    /// Applies every event currently queued and returns how many were
    /// accepted. Stops quietly once all publishers are gone.
    pub fn pump(&mut self) -> usize {
        let mut accepted = 0;
        loop {
            match self.queue.try_next() {
                Ok(Some(event)) => {
                    if self.dispatch(event) {
                        accepted += 1;
                    }
                }
                Ok(None) | Err(RadarError::ChannelClosed) => break,
                Err(err) => {
                    self.logger.rejected("queue read", &err);
                    break;
                }
            }
        }
        accepted
    }

    /// Processes events as they arrive until every publisher is dropped.
    pub async fn run(mut self) -> V {
        while let Some(event) = self.queue.next().await {
            self.dispatch(event);
        }
        self.logger.record("event queue closed, radar driver stopping");
        self.view
    }

    fn dispatch(&mut self, event: RadarEvent) -> bool {
        let label = event.label();
        match self.view.handle(event) {
            Ok(transition) => {
                self.metrics.record_processed();
                if transition.reprojected {
                    self.metrics.record_reprojection();
                }
                self.frames.send_replace(self.view.redraw());
                true
            }
            Err(err) => {
                self.logger.rejected(label, &err);
                self.metrics.record_rejected();
                false
            }
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.view.redraw()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
