pub mod brush;
pub mod domain;
pub mod driver;
pub mod events;
pub mod history;
pub mod projector;
pub mod state;
pub mod transform;
pub mod view;

pub use brush::{BrushRange, TimeBrushIndex};
pub use domain::{get_new_domain_max, DomainScaler};
pub use driver::RadarDriver;
pub use events::{event_bus, EventPublisher, EventQueue, RadarEvent};
pub use history::{History, HistoryRetention};
pub use projector::RadarProjector;
pub use state::{RadarPhase, RadarState, Transition};
pub use transform::{TransformCodec, TransformState};
pub use view::{BeaconRadar, RadarView, TrackRadar};
