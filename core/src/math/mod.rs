pub mod geodesy;

pub use geodesy::GeodesyHelper;
