//! Feature extraction for plantar pressure analysis
//!
//! Center of pressure, quadrant load distribution and peak pressure over the
//! per-foot matrices and the composite canvas.

use crate::config::{AnalysisConfig, QuadrantExtent, SentinelPolicy};
use plantar_core::{
    CenterOfPressure, GridPosition, PlantarError, PlantarResult, PressureField, PressureMatrix, RawFoot, Region,
    CANVAS_SIZE,
};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Summary statistics for one left/right measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Left foot CoP in canvas coordinates
    pub left_cop: CenterOfPressure,
    /// Right foot CoP in canvas coordinates
    pub right_cop: CenterOfPressure,
    /// CoP of the composite canvas
    pub global_cop: CenterOfPressure,
    pub total_pressure: f64,
    pub pressure_q1: f64,
    pub pressure_q2: f64,
    pub pressure_q3: f64,
    pub pressure_q4: f64,
    pub left_pressure: f64,
    pub left_pressure_perc: f64,
    pub right_pressure: f64,
    pub right_pressure_perc: f64,
    pub forefoot_pressure: f64,
    pub forefoot_pressure_perc: f64,
    pub rearfoot_pressure: f64,
    pub rearfoot_pressure_perc: f64,
    /// Largest raw reading of the left foot (device units)
    pub left_max: f64,
    /// Canvas cell of `left_max`
    pub left_peak_pos: GridPosition,
}

/// Canvas sums split at the composite CoP
///
/// Q1 upper-left, Q2 lower-left, Q3 upper-right, Q4 lower-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantPressures {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub q4: f64,
    /// Sum over the whole canvas
    pub total: f64,
}

/// Left/right and forefoot/rearfoot load with shares of the total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureDistribution {
    pub left: f64,
    pub left_perc: f64,
    pub right: f64,
    pub right_perc: f64,
    pub forefoot: f64,
    pub forefoot_perc: f64,
    pub rearfoot: f64,
    pub rearfoot_perc: f64,
}

/// Largest reading of a foot and where it sits on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakPressure {
    pub value: f64,
    pub position: GridPosition,
}

/// Weighted centroid of the strictly positive cells of `values`.
///
/// Negative cells are clamped to zero. A cell at row `r`, column `c` sits at
/// `(c - 0.5, r - 0.5)`, matching plotted pixel coordinates.
pub fn center_of_pressure(values: &PressureMatrix, region: Region) -> PlantarResult<CenterOfPressure> {
    let weights = values.clamped_non_negative();
    let weight = weights.sum();

    if weight <= 0.0 {
        return Err(PlantarError::UndefinedCenterOfPressure { region });
    }

    let (moment_x, moment_y) = weights
        .cells()
        .fold((0.0, 0.0), |(mx, my), (row, col, value)| {
            (mx + value * (col as f64 - 0.5), my + value * (row as f64 - 0.5))
        });

    Ok(CenterOfPressure::new(moment_x / weight, moment_y / weight))
}

/// CoP of a single foot, expressed in canvas coordinates
pub fn foot_center_of_pressure(foot: &RawFoot, region: Region) -> PlantarResult<CenterOfPressure> {
    center_of_pressure(foot.matrix(), region).map(|cop| cop.offset(foot.col(), foot.row()))
}

/// Sum the canvas in four quadrants split at the truncated `split` point
pub fn quadrant_pressures(
    field: &PressureField,
    split: CenterOfPressure,
    extent: QuadrantExtent,
    policy: SentinelPolicy,
) -> QuadrantPressures {
    let limit = extent.limit();
    let split_col = split_index(split.x, limit);
    let split_row = split_index(split.y, limit);
    let grid = field.as_matrix();

    QuadrantPressures {
        q1: region_sum(grid, 0..split_row, 0..split_col, policy),
        q2: region_sum(grid, split_row..limit, 0..split_col, policy),
        q3: region_sum(grid, 0..split_row, split_col..limit, policy),
        q4: region_sum(grid, split_row..limit, split_col..limit, policy),
        total: region_sum(grid, 0..CANVAS_SIZE, 0..CANVAS_SIZE, policy),
    }
}

/// Integer part of a CoP coordinate, kept inside `[0, limit]`
fn split_index(coordinate: f64, limit: usize) -> usize {
    // `as` truncates toward zero and saturates negatives at 0
    (coordinate as usize).min(limit)
}

fn region_sum(grid: &PressureMatrix, rows: Range<usize>, cols: Range<usize>, policy: SentinelPolicy) -> f64 {
    grid.block_sum(rows, cols, |value| policy.contribution(value))
}

impl PressureDistribution {
    /// Combine quadrants into side and fore/rear loads
    pub fn from_quadrants(quadrants: &QuadrantPressures) -> PlantarResult<Self> {
        let total = quadrants.total;
        if total == 0.0 {
            return Err(PlantarError::UndefinedPressureShare { total });
        }

        let share = |value: f64| value * 100.0 / total;
        let left = quadrants.q1 + quadrants.q2;
        let right = quadrants.q3 + quadrants.q4;
        let forefoot = quadrants.q1 + quadrants.q3;
        let rearfoot = quadrants.q2 + quadrants.q4;

        Ok(Self {
            left,
            left_perc: share(left),
            right,
            right_perc: share(right),
            forefoot,
            forefoot_perc: share(forefoot),
            rearfoot,
            rearfoot_perc: share(rearfoot),
        })
    }
}

/// Maximum raw reading of a foot, located in canvas coordinates
pub fn peak_pressure(foot: &RawFoot) -> Option<PeakPressure> {
    foot.matrix().max_position().map(|(row, col, value)| PeakPressure {
        value,
        position: foot.to_canvas(GridPosition::new(row, col)),
    })
}

/// Compute every metric for a composed left/right pair
///
/// Only the left foot's peak is reported.
pub fn analyze(left: &RawFoot, right: &RawFoot, field: &PressureField, config: &AnalysisConfig) -> PlantarResult<AnalysisResult> {
    let left_cop = foot_center_of_pressure(left, Region::LeftFoot)?;
    let right_cop = foot_center_of_pressure(right, Region::RightFoot)?;
    let global_cop = center_of_pressure(field.as_matrix(), Region::Composite)?;

    let quadrants = quadrant_pressures(field, global_cop, config.quadrant_extent, config.sentinel_policy);
    let distribution = PressureDistribution::from_quadrants(&quadrants)?;

    // A matrix without cells has no positive reading, so the left CoP above
    // has already failed for it.
    let peak = peak_pressure(left).ok_or(PlantarError::UndefinedCenterOfPressure {
        region: Region::LeftFoot,
    })?;

    Ok(AnalysisResult {
        left_cop,
        right_cop,
        global_cop,
        total_pressure: quadrants.total,
        pressure_q1: quadrants.q1,
        pressure_q2: quadrants.q2,
        pressure_q3: quadrants.q3,
        pressure_q4: quadrants.q4,
        left_pressure: distribution.left,
        left_pressure_perc: distribution.left_perc,
        right_pressure: distribution.right,
        right_pressure_perc: distribution.right_perc,
        forefoot_pressure: distribution.forefoot,
        forefoot_pressure_perc: distribution.forefoot_perc,
        rearfoot_pressure: distribution.rearfoot,
        rearfoot_pressure_perc: distribution.rearfoot_perc,
        left_max: peak.value,
        left_peak_pos: peak.position,
    })
}
