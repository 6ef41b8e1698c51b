//! Export file parser: header metadata plus tab-separated sensor matrix
//!
//! The device writes ISO-8859-1 text. Lines before `matrix_start_line` are
//! metadata; four of them carry `key=<int>` placement values. Offsets are
//! stored 1-based and converted to 0-based canvas coordinates here.

use crate::config::{AnalysisConfig, HeaderLayout};
use plantar_core::{fits_canvas, PlantarError, PlantarResult, PressureMatrix, RawFoot, CANVAS_SIZE, RAW_SENTINEL};
use std::path::Path;
use tracing::debug;

/// Parser for a single foot's export file
#[derive(Debug, Clone)]
pub struct FootFileParser {
    layout: HeaderLayout,
    raw_sentinel: f64,
}

impl FootFileParser {
    /// Create parser for a given header layout
    pub fn new(layout: HeaderLayout) -> Self {
        Self {
            layout,
            raw_sentinel: RAW_SENTINEL,
        }
    }

    /// Create parser matching an analysis configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            layout: config.header.clone(),
            raw_sentinel: config.raw_sentinel,
        }
    }

    /// Read and parse an export file
    pub fn parse_file(&self, path: &Path) -> PlantarResult<RawFoot> {
        let bytes = std::fs::read(path).map_err(|source| PlantarError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_bytes(path, &bytes)
    }

    /// Parse export file contents; `path` is only used for error context
    pub fn parse_bytes(&self, path: &Path, bytes: &[u8]) -> PlantarResult<RawFoot> {
        let text = decode_latin1(bytes);
        let lines: Vec<&str> = text.lines().collect();

        let row = self.one_based_offset(path, &lines, self.layout.row_line, "row")?;
        let col = self.one_based_offset(path, &lines, self.layout.col_line, "col")?;
        let height = self.extent(path, &lines, self.layout.height_line, "height")?;
        let width = self.extent(path, &lines, self.layout.width_line, "width")?;

        debug!(
            path = %path.display(),
            row, col, height, width,
            "Parsed export header"
        );

        // Reject the placement before sizing anything from the header
        let cols = width.saturating_add(1);
        if !fits_canvas(row, height) || !fits_canvas(col, cols) {
            return Err(PlantarError::PlacementOutOfBounds {
                path: Some(path.to_path_buf()),
                row,
                col,
                rows: height,
                cols,
                canvas: CANVAS_SIZE,
            });
        }

        let body = lines.get(self.layout.matrix_start_line..).unwrap_or(&[]);
        let matrix = self.read_matrix(path, body, height, cols)?;

        RawFoot::new(row, col, height, width, matrix).map_err(|e| e.with_path(path))
    }

    /// 1-based offset converted to 0-based
    fn one_based_offset(&self, path: &Path, lines: &[&str], line: usize, key: &str) -> PlantarResult<usize> {
        let value = header_value(path, lines, line, key)?;
        if value < 1 {
            return Err(PlantarError::MalformedHeader {
                path: path.to_path_buf(),
                line,
                reason: format!("'{}' is a 1-based offset, got {}", key, value),
            });
        }
        Ok((value - 1) as usize)
    }

    fn extent(&self, path: &Path, lines: &[&str], line: usize, key: &str) -> PlantarResult<usize> {
        let value = header_value(path, lines, line, key)?;
        usize::try_from(value).map_err(|_| PlantarError::MalformedHeader {
            path: path.to_path_buf(),
            line,
            reason: format!("'{}' cannot be negative, got {}", key, value),
        })
    }

    fn read_matrix(&self, path: &Path, body: &[&str], height: usize, cols: usize) -> PlantarResult<PressureMatrix> {
        let content = body
            .iter()
            .filter(|line| !line.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(content.as_bytes());

        let mut data = Vec::with_capacity(body.len().saturating_mul(cols));
        let mut row_count = 0;

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PlantarError::MalformedMatrix {
                path: path.to_path_buf(),
                row,
                reason: e.to_string(),
            })?;

            if record.len() != cols {
                return Err(PlantarError::MatrixShapeMismatch {
                    path: Some(path.to_path_buf()),
                    expected_rows: height,
                    expected_cols: cols,
                    actual_rows: body.iter().filter(|line| !line.is_empty()).count(),
                    actual_cols: record.len(),
                });
            }

            data.extend(record.iter().map(|cell| self.parse_cell(cell)));
            row_count += 1;
        }

        if row_count != height {
            return Err(PlantarError::MatrixShapeMismatch {
                path: Some(path.to_path_buf()),
                expected_rows: height,
                expected_cols: cols,
                actual_rows: row_count,
                actual_cols: cols,
            });
        }

        PressureMatrix::new(height, cols, data).map_err(|e| e.with_path(path))
    }

    /// Blank, non-numeric and non-finite cells become the sentinel
    fn parse_cell(&self, cell: &str) -> f64 {
        cell.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(self.raw_sentinel)
    }
}

impl Default for FootFileParser {
    fn default() -> Self {
        Self::new(HeaderLayout::default())
    }
}

/// Parse an export file with the default device layout
pub fn parse_foot_file(path: impl AsRef<Path>) -> PlantarResult<RawFoot> {
    FootFileParser::default().parse_file(path.as_ref())
}

/// Integer after the last `=` on a header line
fn header_value(path: &Path, lines: &[&str], line: usize, key: &str) -> PlantarResult<i64> {
    let malformed = |reason: String| PlantarError::MalformedHeader {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let text = lines.get(line).ok_or_else(|| {
        malformed(format!(
            "missing '{}' line, file ends after {} lines",
            key,
            lines.len()
        ))
    })?;

    let (_, value) = text
        .rsplit_once('=')
        .ok_or_else(|| malformed(format!("expected '{}=<int>', found '{}'", key, text.trim())))?;

    value
        .trim()
        .parse::<i64>()
        .map_err(|_| malformed(format!("expected integer after '=', found '{}'", value.trim())))
}

/// ISO-8859-1 maps every byte to the code point with the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
