//! Plantar-Simulation: synthetic sensor-mat measurements
//!
//! Generates left/right foot readings and writes them in the device export
//! layout for testing and development.

pub mod export_writer;
pub mod foot_patterns;
pub mod foot_simulator;

pub use export_writer::*;
pub use foot_patterns::*;
pub use foot_simulator::*;
