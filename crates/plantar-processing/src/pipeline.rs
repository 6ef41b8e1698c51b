//! Extraction pipeline: parse both feet, compose the canvas, analyze

use crate::compositor::FieldCompositor;
use crate::config::AnalysisConfig;
use crate::features::{analyze, AnalysisResult};
use crate::parser::FootFileParser;
use plantar_core::{PlantarResult, PressureField, RawFoot};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Parser, compositor and analyzer sharing one configuration
///
/// Holds no per-call state; a single pipeline can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct PressurePipeline {
    config: AnalysisConfig,
    parser: FootFileParser,
    compositor: FieldCompositor,
}

impl PressurePipeline {
    /// Create pipeline from a validated configuration
    pub fn new(config: AnalysisConfig) -> PlantarResult<Self> {
        config.validate()?;

        Ok(Self {
            parser: FootFileParser::from_config(&config),
            compositor: FieldCompositor::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse both export files and analyze them
    pub fn extract(&self, left_path: &Path, right_path: &Path) -> PlantarResult<(PressureField, AnalysisResult)> {
        let start_time = Instant::now();

        let left = self.parser.parse_file(left_path)?;
        let right = self.parser.parse_file(right_path)?;
        debug!(
            left = %left_path.display(),
            right = %right_path.display(),
            "Parsed both export files"
        );

        let output = self.analyze(&left, &right)?;

        info!(
            profile = ?self.config.profile,
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "Extracted plantar pressure field"
        );

        Ok(output)
    }

    /// Compose and analyze an already parsed pair
    pub fn analyze(&self, left: &RawFoot, right: &RawFoot) -> PlantarResult<(PressureField, AnalysisResult)> {
        let field = self.compositor.compose(left, right)?;
        let results = analyze(left, right, &field, &self.config)?;

        debug!(
            global_cop_x = results.global_cop.x,
            global_cop_y = results.global_cop.y,
            total_pressure = results.total_pressure,
            "Analyzed pressure field"
        );

        Ok((field, results))
    }
}

impl Default for PressurePipeline {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            parser: FootFileParser::from_config(&config),
            compositor: FieldCompositor::new(&config),
            config,
        }
    }
}

/// Extract the composite field and results from two export files using the
/// default configuration
pub fn extract(left_path: impl AsRef<Path>, right_path: impl AsRef<Path>) -> PlantarResult<(PressureField, AnalysisResult)> {
    PressurePipeline::default().extract(left_path.as_ref(), right_path.as_ref())
}
