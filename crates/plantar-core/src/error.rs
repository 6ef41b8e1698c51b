//! Error handling for plantar pressure analysis
//!
//! Every failure carries enough context (file, stage, region) to be shown to
//! a user. Nothing here is downgraded to a default value.

use crate::field::Region;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for plantar operations
pub type PlantarResult<T> = Result<T, PlantarError>;

/// Error type for parsing, compositing and analysis
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlantarError {
    /// The export file could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required header line is missing or is not `key=<int>`
    #[error("Malformed header in {} at line {line}: {reason}", .path.display())]
    MalformedHeader {
        path: PathBuf,
        /// 0-based line index
        line: usize,
        reason: String,
    },

    /// The matrix body could not be tokenised
    #[error("Malformed matrix body in {} at row {row}: {reason}", .path.display())]
    MalformedMatrix {
        path: PathBuf,
        /// 0-based matrix row
        row: usize,
        reason: String,
    },

    /// The matrix body disagrees with the declared height/width
    #[error(
        "Matrix shape mismatch{}: expected {expected_rows}x{expected_cols}, found {actual_rows}x{actual_cols}",
        in_file(.path)
    )]
    MatrixShapeMismatch {
        path: Option<PathBuf>,
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// A sensor grid would extend past the canvas
    #[error(
        "Sensor grid{} at row {row}, col {col} spanning {rows}x{cols} cells does not fit the {canvas}x{canvas} canvas",
        in_file(.path)
    )]
    PlacementOutOfBounds {
        path: Option<PathBuf>,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
        canvas: usize,
    },

    /// Left and right sensor grids cover the same canvas cell
    #[error("Left and right sensor grids overlap at canvas cell ({row}, {col})")]
    OverlappingPlacement { row: usize, col: usize },

    /// No strictly positive reading in the region
    #[error("Center of pressure is undefined for {region}: no positive readings")]
    UndefinedCenterOfPressure { region: Region },

    /// Percentages cannot be formed against a zero total
    #[error("Pressure distribution is undefined: total pressure is {total}")]
    UndefinedPressureShare { total: f64 },

    /// Invalid analysis configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Synthetic data generation failed
    #[error("Simulation error: {message}")]
    Simulation { message: String },
}

fn in_file(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

impl PlantarError {
    /// True for the "malformed input file" family: the file was readable
    /// but its contents do not follow the export layout.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            PlantarError::MalformedHeader { .. }
                | PlantarError::MalformedMatrix { .. }
                | PlantarError::MatrixShapeMismatch { .. }
                | PlantarError::PlacementOutOfBounds { .. }
        )
    }

    /// Attach the originating file to errors raised before the path was known.
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            PlantarError::MatrixShapeMismatch {
                path: None,
                expected_rows,
                expected_cols,
                actual_rows,
                actual_cols,
            } => PlantarError::MatrixShapeMismatch {
                path: Some(file.to_path_buf()),
                expected_rows,
                expected_cols,
                actual_rows,
                actual_cols,
            },
            PlantarError::PlacementOutOfBounds {
                path: None,
                row,
                col,
                rows,
                cols,
                canvas,
            } => PlantarError::PlacementOutOfBounds {
                path: Some(file.to_path_buf()),
                row,
                col,
                rows,
                cols,
                canvas,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_header() {
        let error = PlantarError::MalformedHeader {
            path: PathBuf::from("/data/left.txt"),
            line: 21,
            reason: "expected integer after '=', found 'abc'".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("/data/left.txt"));
        assert!(display.contains("line 21"));
        assert!(display.contains("abc"));
    }

    #[test]
    fn test_shape_mismatch_gains_path() {
        let error = PlantarError::MatrixShapeMismatch {
            path: None,
            expected_rows: 2,
            expected_cols: 3,
            actual_rows: 1,
            actual_cols: 3,
        };
        assert_eq!(
            error.to_string(),
            "Matrix shape mismatch: expected 2x3, found 1x3"
        );

        let error = error.with_path(Path::new("right.txt"));
        assert!(error.to_string().contains("in right.txt"));
        assert!(error.is_malformed_input());
    }

    #[test]
    fn test_undefined_cop_display() {
        let error = PlantarError::UndefinedCenterOfPressure {
            region: Region::Composite,
        };
        assert_eq!(
            error.to_string(),
            "Center of pressure is undefined for composite field: no positive readings"
        );
        assert!(!error.is_malformed_input());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = PlantarError::Io {
            path: PathBuf::from("/missing.txt"),
            source: io_err,
        };
        let display = error.to_string();
        assert!(display.contains("/missing.txt"));
        assert!(display.contains("no such file"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
