//! Per-foot sensor grid and its placement on the canvas

use crate::error::{PlantarError, PlantarResult};
use crate::field::{fits_canvas, GridPosition, CANVAS_SIZE};
use crate::matrix::PressureMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which foot an export file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootSide {
    Left,
    Right,
}

impl fmt::Display for FootSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootSide::Left => write!(f, "left"),
            FootSide::Right => write!(f, "right"),
        }
    }
}

/// Rectangle of canvas cells, `[row, row + rows) x [col, col + cols)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Footprint {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.rows && col >= self.col && col < self.col + self.cols
    }

    /// Top-left cell shared with `other`, if any
    pub fn overlap(&self, other: &Footprint) -> Option<GridPosition> {
        let row = self.row.max(other.row);
        let col = self.col.max(other.col);
        let row_end = (self.row + self.rows).min(other.row + other.rows);
        let col_end = (self.col + self.cols).min(other.col + other.cols);

        if row < row_end && col < col_end {
            Some(GridPosition::new(row, col))
        } else {
            None
        }
    }
}

/// One foot's sensor grid, as read from an export file
///
/// The matrix has `width + 1` columns, matching the body the device writes
/// for a declared `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFoot {
    row: usize,
    col: usize,
    height: usize,
    width: usize,
    matrix: PressureMatrix,
}

impl RawFoot {
    /// Create a foot from 0-based offsets, validating shape and placement
    pub fn new(row: usize, col: usize, height: usize, width: usize, matrix: PressureMatrix) -> PlantarResult<Self> {
        let cols = width.saturating_add(1);
        if !fits_canvas(row, height) || !fits_canvas(col, cols) {
            return Err(PlantarError::PlacementOutOfBounds {
                path: None,
                row,
                col,
                rows: height,
                cols,
                canvas: CANVAS_SIZE,
            });
        }

        if matrix.shape() != (height, cols) {
            return Err(PlantarError::MatrixShapeMismatch {
                path: None,
                expected_rows: height,
                expected_cols: cols,
                actual_rows: matrix.rows(),
                actual_cols: matrix.cols(),
            });
        }

        Ok(Self {
            row,
            col,
            height,
            width,
            matrix,
        })
    }

    /// 0-based top offset
    pub fn row(&self) -> usize {
        self.row
    }

    /// 0-based left offset
    pub fn col(&self) -> usize {
        self.col
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Readings in native device units, `-1.0` where nothing was detected
    pub fn matrix(&self) -> &PressureMatrix {
        &self.matrix
    }

    /// Canvas cells written by this foot, including the boundary column
    pub fn footprint(&self) -> Footprint {
        Footprint {
            row: self.row,
            col: self.col,
            rows: self.height,
            cols: self.width + 1,
        }
    }

    /// Convert a position in this foot's matrix into canvas coordinates
    pub fn to_canvas(&self, local: GridPosition) -> GridPosition {
        GridPosition::new(local.row + self.row, local.col + self.col)
    }
}
