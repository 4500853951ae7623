use crate::model::GeoPosition;
use crate::prelude::{RadarError, RadarResult};
use crate::radar::transform::TransformState;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Every input the radar reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RadarEvent {
    NewPosition(GeoPosition),
    NewCenter(GeoPosition),
    /// Absolute display rotation in degrees.
    NewRotation(f64),
    /// Rotation relative to the current one.
    RotateBy(f64),
    NewZoomTransform(TransformState),
    ResetZoom,
    NewBrushRange { start: f64, end: f64 },
    ClearBrush,
}

impl RadarEvent {
    pub fn label(&self) -> &'static str {
        match self {
            RadarEvent::NewPosition(_) => "position",
            RadarEvent::NewCenter(_) => "center",
            RadarEvent::NewRotation(_) => "rotation",
            RadarEvent::RotateBy(_) => "rotation delta",
            RadarEvent::NewZoomTransform(_) => "zoom",
            RadarEvent::ResetZoom => "zoom reset",
            RadarEvent::NewBrushRange { .. } => "brush",
            RadarEvent::ClearBrush => "brush clear",
        }
    }
}

/// Creates the single-consumer queue feeding one radar.
pub fn event_bus() -> (EventPublisher, EventQueue) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (EventPublisher { sender }, EventQueue { receiver })
}

/// Producer half; clone it for every input source.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: mpsc::UnboundedSender<RadarEvent>,
}

impl EventPublisher {
    pub fn publish(&self, event: RadarEvent) -> RadarResult<()> {
        self.sender
            .send(event)
            .map_err(|_| RadarError::ChannelClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer half, owned by whoever drives the radar.
#[derive(Debug)]
pub struct EventQueue {
    receiver: mpsc::UnboundedReceiver<RadarEvent>,
}

impl EventQueue {
    /// Next queued event without waiting. `Ok(None)` when the queue is
    /// momentarily empty.
    pub fn try_next(&mut self) -> RadarResult<Option<RadarEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RadarError::ChannelClosed),
        }
    }

    /// Waits for the next event; `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<RadarEvent> {
        self.receiver.recv().await
    }
}
