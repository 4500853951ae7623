pub mod position;
pub mod render;

pub use position::{GeoPosition, Point};
pub use render::{RenderPoint, RenderSnapshot};
