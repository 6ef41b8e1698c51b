//! Composite pressure canvas and the point types measured on it

use crate::error::{PlantarError, PlantarResult};
use crate::matrix::PressureMatrix;
use ndarray::s;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Side length of the square composite canvas
pub const CANVAS_SIZE: usize = 48;

/// Raw cell value marking "below minimum detectable pressure"
pub const RAW_SENTINEL: f64 = -1.0;

/// Factor converting native device units into reported units
pub const CALIBRATION_FACTOR: f64 = 10.0;

/// Canvas value for cells never covered by a sensor
pub const CANVAS_BACKGROUND: f64 = -100.0;

/// Fixed-size canvas holding both feet in a shared coordinate frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureField {
    grid: PressureMatrix,
}

impl PressureField {
    /// Blank canvas filled with `background`
    pub fn new(background: f64) -> Self {
        Self {
            grid: PressureMatrix::filled(CANVAS_SIZE, CANVAS_SIZE, background),
        }
    }

    /// Write `values * scale` with the top-left corner at (`row`, `col`)
    pub fn stamp(&mut self, row: usize, col: usize, values: &PressureMatrix, scale: f64) -> PlantarResult<()> {
        let (rows, cols) = values.shape();
        if !fits_canvas(row, rows) || !fits_canvas(col, cols) {
            return Err(PlantarError::PlacementOutOfBounds {
                path: None,
                row,
                col,
                rows,
                cols,
                canvas: CANVAS_SIZE,
            });
        }

        self.grid
            .as_array_mut()
            .slice_mut(s![row..row + rows, col..col + cols])
            .assign(values.scaled(scale).as_array());

        Ok(())
    }

    pub fn as_matrix(&self) -> &PressureMatrix {
        &self.grid
    }
}

/// Whether `[offset, offset + extent)` lies on the canvas, without overflow
pub fn fits_canvas(offset: usize, extent: usize) -> bool {
    offset.checked_add(extent).map_or(false, |end| end <= CANVAS_SIZE)
}

impl Default for PressureField {
    fn default() -> Self {
        Self::new(CANVAS_BACKGROUND)
    }
}

impl Index<(usize, usize)> for PressureField {
    type Output = f64;

    fn index(&self, cell: (usize, usize)) -> &f64 {
        &self.grid[cell]
    }
}

/// Weighted centroid of the positive readings in a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterOfPressure {
    pub x: f64,
    pub y: f64,
}

impl CenterOfPressure {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a column (`dx`) and row (`dy`) offset
    pub fn offset(self, dx: usize, dy: usize) -> Self {
        Self {
            x: self.x + dx as f64,
            y: self.y + dy as f64,
        }
    }
}

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Area over which a center of pressure is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    LeftFoot,
    RightFoot,
    Composite,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::LeftFoot => write!(f, "left foot"),
            Region::RightFoot => write!(f, "right foot"),
            Region::Composite => write!(f, "composite field"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_is_background() {
        let field = PressureField::default();
        assert_eq!(field.as_matrix().shape(), (CANVAS_SIZE, CANVAS_SIZE));
        assert!(field.as_matrix().values().all(|v| v == CANVAS_BACKGROUND));
    }

    #[test]
    fn test_stamp_scales_values() {
        let mut field = PressureField::default();
        let block = PressureMatrix::from_rows(vec![vec![1.0, -1.0]]).unwrap();
        field.stamp(3, 4, &block, CALIBRATION_FACTOR).unwrap();

        assert_eq!(field[(3, 4)], 10.0);
        assert_eq!(field[(3, 5)], -10.0);
        assert_eq!(field[(3, 6)], CANVAS_BACKGROUND);
    }

    #[test]
    fn test_stamp_out_of_bounds() {
        let mut field = PressureField::default();
        let block = PressureMatrix::filled(2, 2, 1.0);
        let result = field.stamp(47, 0, &block, 1.0);
        assert!(matches!(result, Err(PlantarError::PlacementOutOfBounds { row: 47, .. })));
    }

    #[test]
    fn test_fits_canvas() {
        assert!(fits_canvas(45, 3));
        assert!(!fits_canvas(46, 3));
        assert!(!fits_canvas(1, usize::MAX));
    }

    #[test]
    fn test_cop_offset() {
        let cop = CenterOfPressure::new(0.5, 1.5).offset(3, 2);
        assert_eq!(cop, CenterOfPressure::new(3.5, 3.5));
    }
}
