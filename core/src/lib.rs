//! Radar geometry and state engine for the live vehicle operator console.
//!
//! Position fixes and operator input flow through a single event queue into
//! [`radar::RadarState`], which keeps the auto-ranging domain, projections,
//! transform and brush window consistent and emits render-ready frames.

pub mod math;
pub mod model;
pub mod prelude;
pub mod radar;
pub mod telemetry;

pub use model::{GeoPosition, Point, RenderPoint, RenderSnapshot};
pub use prelude::{RadarConfig, RadarError, RadarResult};
