//! Field compositor: places both feet on the shared canvas

use crate::config::{AnalysisConfig, OverlapPolicy};
use plantar_core::{PlantarError, PlantarResult, PressureField, RawFoot};
use tracing::{debug, warn};

/// Builds the composite `PressureField` from a left/right pair
#[derive(Debug, Clone)]
pub struct FieldCompositor {
    calibration_factor: f64,
    canvas_background: f64,
    overlap_policy: OverlapPolicy,
}

impl FieldCompositor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            calibration_factor: config.calibration_factor,
            canvas_background: config.canvas_background,
            overlap_policy: config.overlap_policy,
        }
    }

    /// Write `matrix * calibration` of each foot into
    /// `[row, row + height) x [col, col + width + 1)` of a fresh canvas.
    pub fn compose(&self, left: &RawFoot, right: &RawFoot) -> PlantarResult<PressureField> {
        if let Some(cell) = left.footprint().overlap(&right.footprint()) {
            match self.overlap_policy {
                OverlapPolicy::Reject => {
                    return Err(PlantarError::OverlappingPlacement {
                        row: cell.row,
                        col: cell.col,
                    });
                }
                OverlapPolicy::LastWriteWins => {
                    warn!(row = cell.row, col = cell.col, "Foot placements overlap, right foot overwrites shared cells");
                }
            }
        }

        let mut field = PressureField::new(self.canvas_background);
        for foot in [left, right] {
            field.stamp(foot.row(), foot.col(), foot.matrix(), self.calibration_factor)?;
        }

        debug!(
            left = ?left.footprint(),
            right = ?right.footprint(),
            "Composed pressure field"
        );

        Ok(field)
    }
}

impl Default for FieldCompositor {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// Compose with the default configuration
pub fn compose(left: &RawFoot, right: &RawFoot) -> PlantarResult<PressureField> {
    FieldCompositor::default().compose(left, right)
}
