//! Configuration management for plantar pressure analysis

use plantar_core::{PlantarError, PlantarResult, CALIBRATION_FACTOR, CANVAS_BACKGROUND, CANVAS_SIZE, RAW_SENTINEL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Configuration name/profile label
    pub name: String,
    /// Preset this configuration was derived from
    pub profile: AnalysisProfile,
    /// Where the header values and matrix live in an export file
    pub header: HeaderLayout,
    /// Multiplier from device units to reported units
    pub calibration_factor: f64,
    /// Value of canvas cells not covered by either foot
    pub canvas_background: f64,
    /// Replacement for blank or unparseable matrix cells
    pub raw_sentinel: f64,
    /// How sentinel cells enter the quadrant sums
    pub sentinel_policy: SentinelPolicy,
    /// Upper bound of the lower/right quadrants
    pub quadrant_extent: QuadrantExtent,
    /// What to do when the two feet cover the same canvas cell
    pub overlap_policy: OverlapPolicy,
}

/// Analysis presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisProfile {
    /// Strict input checks, quadrants partition the whole canvas
    Standard,
    /// Numerically matches the historical desktop tool
    Legacy,
    /// Hand-edited configuration
    Custom,
}

/// Line indices (0-based) of the export header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLayout {
    pub row_line: usize,
    pub col_line: usize,
    pub height_line: usize,
    pub width_line: usize,
    /// First line of the tab-separated matrix
    pub matrix_start_line: usize,
}

impl HeaderLayout {
    /// Highest line index holding a header value
    pub fn last_header_line(&self) -> usize {
        self.row_line
            .max(self.col_line)
            .max(self.height_line)
            .max(self.width_line)
    }
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            row_line: 19,
            col_line: 20,
            height_line: 21,
            width_line: 22,
            matrix_start_line: 27,
        }
    }
}

/// Treatment of negative (no-sensor) cells in region sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentinelPolicy {
    /// Sum composite values as stored, sentinels included
    SumRaw,
    /// Count negative cells as zero
    ClampToZero,
}

impl SentinelPolicy {
    /// Contribution of one canvas cell to a region sum
    pub fn contribution(self, value: f64) -> f64 {
        match self {
            SentinelPolicy::SumRaw => value,
            SentinelPolicy::ClampToZero => value.max(0.0),
        }
    }
}

/// Exclusive upper bound for quadrant rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuadrantExtent {
    /// Quadrants run to the canvas edge and partition it exactly
    FullCanvas,
    /// Quadrants stop one cell short, leaving the last row and column out
    ExcludeTrailingEdge,
}

impl QuadrantExtent {
    pub fn limit(self) -> usize {
        match self {
            QuadrantExtent::FullCanvas => CANVAS_SIZE,
            QuadrantExtent::ExcludeTrailingEdge => CANVAS_SIZE - 1,
        }
    }
}

/// Handling of overlapping foot placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapPolicy {
    /// Fail with `OverlappingPlacement`
    Reject,
    /// Write left then right; the right foot wins shared cells
    LastWriteWins,
}

impl AnalysisConfig {
    /// Default configuration
    pub fn standard() -> Self {
        Self {
            name: "Standard".to_string(),
            profile: AnalysisProfile::Standard,
            header: HeaderLayout::default(),
            calibration_factor: CALIBRATION_FACTOR,
            canvas_background: CANVAS_BACKGROUND,
            raw_sentinel: RAW_SENTINEL,
            sentinel_policy: SentinelPolicy::SumRaw,
            quadrant_extent: QuadrantExtent::FullCanvas,
            overlap_policy: OverlapPolicy::Reject,
        }
    }

    /// Settings reproducing the desktop tool's numbers
    pub fn legacy() -> Self {
        Self {
            name: "Legacy".to_string(),
            profile: AnalysisProfile::Legacy,
            canvas_background: RAW_SENTINEL * CALIBRATION_FACTOR,
            sentinel_policy: SentinelPolicy::ClampToZero,
            quadrant_extent: QuadrantExtent::ExcludeTrailingEdge,
            overlap_policy: OverlapPolicy::LastWriteWins,
            ..Self::standard()
        }
    }

    /// Create configuration for a given profile
    pub fn for_profile(profile: AnalysisProfile) -> Self {
        match profile {
            AnalysisProfile::Standard => Self::standard(),
            AnalysisProfile::Legacy => Self::legacy(),
            AnalysisProfile::Custom => Self {
                name: "Custom".to_string(),
                profile: AnalysisProfile::Custom,
                ..Self::standard()
            },
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> PlantarResult<()> {
        if self.name.is_empty() {
            return Err(config_error("Configuration name cannot be empty"));
        }

        if !self.calibration_factor.is_finite() || self.calibration_factor <= 0.0 {
            return Err(config_error(format!(
                "Calibration factor must be positive, got {}",
                self.calibration_factor
            )));
        }

        if !self.canvas_background.is_finite() {
            return Err(config_error("Canvas background must be finite"));
        }

        // Sentinels must stay distinguishable from real (non-negative) readings
        if !(self.raw_sentinel.is_finite() && self.raw_sentinel < 0.0) {
            return Err(config_error(format!(
                "Raw sentinel must be negative, got {}",
                self.raw_sentinel
            )));
        }

        self.validate_header()
    }

    fn validate_header(&self) -> PlantarResult<()> {
        let header = &self.header;
        let lines = [header.row_line, header.col_line, header.height_line, header.width_line];

        for (i, line) in lines.iter().enumerate() {
            if lines[i + 1..].contains(line) {
                return Err(config_error(format!("Header line {} is assigned twice", line)));
            }
        }

        if header.matrix_start_line <= header.last_header_line() {
            return Err(config_error(format!(
                "Matrix must start after the header (line {} <= {})",
                header.matrix_start_line,
                header.last_header_line()
            )));
        }

        Ok(())
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> PlantarResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| config_error(format!("Failed to serialize configuration: {}", e)))
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> PlantarResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| config_error(format!("Failed to deserialize configuration: {}", e)))
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: &Path) -> PlantarResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| PlantarError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn config_error(message: impl Into<String>) -> PlantarError {
    PlantarError::Configuration {
        message: message.into(),
    }
}
