//! PressureMatrix: 2-D container for sensor readings

use crate::error::{PlantarError, PlantarResult};
use ndarray::{s, Array2, ArrayView1};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};
use std::ops::{Index, Range};

/// Two-dimensional grid of pressure readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureMatrix {
    data: Array2<f64>,
}

impl PressureMatrix {
    /// Create a matrix with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> PlantarResult<Self> {
        let len = data.len();
        let data = Array2::from_shape_vec((rows, cols), data).map_err(|_| PlantarError::MatrixShapeMismatch {
            path: None,
            expected_rows: rows,
            expected_cols: cols,
            actual_rows: if cols == 0 { 0 } else { len / cols },
            actual_cols: cols,
        })?;

        Ok(Self { data })
    }

    /// Create a matrix from nested rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PlantarResult<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);

        if let Some(ragged) = rows.iter().find(|row| row.len() != col_count) {
            return Err(PlantarError::MatrixShapeMismatch {
                path: None,
                expected_rows: row_count,
                expected_cols: col_count,
                actual_rows: row_count,
                actual_cols: ragged.len(),
            });
        }

        Self::new(row_count, col_count, rows.into_iter().flatten().collect())
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Values of one row
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.data.row(row)
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }

    /// Values in row-major order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.indexed_iter().map(|((row, col), &value)| (row, col, value))
    }

    /// New matrix with every value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            data: &self.data * factor,
        }
    }

    /// New matrix with negative values replaced by zero
    pub fn clamped_non_negative(&self) -> Self {
        Self {
            data: self.data.mapv(|v| v.max(0.0)),
        }
    }

    /// Sum of all values
    pub fn sum(&self) -> f64 {
        self.data.sum()
    }

    /// Sum over `rows x cols` after mapping every cell through `contribution`
    pub fn block_sum(&self, rows: Range<usize>, cols: Range<usize>, contribution: impl Fn(f64) -> f64) -> f64 {
        self.data.slice(s![rows, cols]).mapv(contribution).sum()
    }

    /// Maximum value with its position; ties resolve to the first cell in
    /// row-major order. `None` when empty or a NaN prevents ordering.
    pub fn max_position(&self) -> Option<(usize, usize, f64)> {
        let (row, col) = self.data.argmax().ok()?;
        Some((row, col, self.data[[row, col]]))
    }
}

impl Index<(usize, usize)> for PressureMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[[row, col]]
    }
}
