//! Plantar-Core: Foundation types for plantar pressure analysis
//!
//! Sensor grids, the composite canvas and the error taxonomy shared by the
//! parser, compositor and analyzer.

pub mod error;
pub mod field;
pub mod foot;
pub mod matrix;

pub use error::{PlantarError, PlantarResult};
pub use field::*;
pub use foot::*;
pub use matrix::PressureMatrix;
