//! Plantar-Processing: export parsing, canvas composition and analysis
//!
//! `extract` turns a left/right pair of device export files into the
//! composite pressure field plus center-of-pressure and load statistics.

pub mod compositor;
pub mod config;
pub mod features;
pub mod parser;
pub mod pipeline;

pub use compositor::{compose, FieldCompositor};
pub use config::{AnalysisConfig, AnalysisProfile, HeaderLayout, OverlapPolicy, QuadrantExtent, SentinelPolicy};
pub use features::{
    analyze, center_of_pressure, foot_center_of_pressure, peak_pressure, quadrant_pressures, AnalysisResult,
    PeakPressure, PressureDistribution, QuadrantPressures,
};
pub use parser::{parse_foot_file, FootFileParser};
pub use pipeline::{extract, PressurePipeline};
