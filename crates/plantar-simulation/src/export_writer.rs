//! Writes a foot in the sensor-mat export layout
//!
//! Lines 0..19 are free-form metadata, lines 19..23 hold the 1-based
//! placement and extent, lines 23..27 more metadata, then one tab-separated
//! row per sensor row. Cells holding the raw sentinel are left blank, the
//! way the device marks readings below its detection limit.

use plantar_core::{FootSide, PlantarError, PlantarResult, RawFoot, RAW_SENTINEL};
use std::io::Write;
use std::path::Path;

const MATRIX_START_LINE: usize = 27;

/// Render `foot` as ISO-8859-1 export text
pub fn write_export<W: Write>(foot: &RawFoot, side: FootSide, writer: &mut W) -> std::io::Result<()> {
    let mut lines = metadata_lines(foot, side);
    debug_assert_eq!(lines.len(), MATRIX_START_LINE);

    for r in 0..foot.matrix().rows() {
        let cells: Vec<String> = foot
            .matrix()
            .row(r)
            .iter()
            .map(|&value| {
                if value == RAW_SENTINEL {
                    String::new()
                } else {
                    value.to_string()
                }
            })
            .collect();
        lines.push(cells.join("\t"));
    }

    for line in lines {
        writer.write_all(&encode_latin1(&line))?;
        writer.write_all(b"\r\n")?;
    }

    writer.flush()
}

/// Write `foot` to an export file at `path`
pub fn write_export_file(foot: &RawFoot, side: FootSide, path: &Path) -> PlantarResult<()> {
    let io_error = |source| PlantarError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(io_error)?;
    let mut writer = std::io::BufWriter::new(file);
    write_export(foot, side, &mut writer).map_err(io_error)
}

fn metadata_lines(foot: &RawFoot, side: FootSide) -> Vec<String> {
    let side_label = match side {
        FootSide::Left => "Izquierdo",
        FootSide::Right => "Derecho",
    };

    let mut lines = vec![
        "[Plantar pressure export]".to_string(),
        "Device=Synthetic mat".to_string(),
        format!("Foot={}", side_label),
        "Units=N/cm²".to_string(),
        "Sensor pitch=8.4mm".to_string(),
    ];
    while lines.len() < 19 {
        lines.push(format!("Reserved{}=", lines.len()));
    }

    lines.push(format!("row={}", foot.row() + 1));
    lines.push(format!("col={}", foot.col() + 1));
    lines.push(format!("height={}", foot.height()));
    lines.push(format!("width={}", foot.width()));

    lines.push(format!("nonzero={}", foot.matrix().values().filter(|&v| v > 0.0).count()));
    lines.push("frames=1".to_string());
    lines.push("[Data]".to_string());
    lines.push(String::new());

    lines
}

/// Characters outside Latin-1 are replaced by '?'
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantar_core::PressureMatrix;

    fn sample_foot() -> RawFoot {
        let matrix = PressureMatrix::from_rows(vec![vec![1.5, -1.0, 3.0], vec![0.0, 12.25, -1.0]]).unwrap();
        RawFoot::new(1, 2, 2, 2, matrix).unwrap()
    }

    fn render(foot: &RawFoot) -> Vec<u8> {
        let mut buffer = Vec::new();
        write_export(foot, FootSide::Left, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_header_lines_are_one_based() {
        let bytes = render(&sample_foot());
        let text: String = bytes.iter().map(|&b| b as char).collect();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[19], "row=2");
        assert_eq!(lines[20], "col=3");
        assert_eq!(lines[21], "height=2");
        assert_eq!(lines[22], "width=2");
        assert_eq!(lines.len(), MATRIX_START_LINE + 2);
    }

    #[test]
    fn test_sentinels_written_blank() {
        let bytes = render(&sample_foot());
        let text: String = bytes.iter().map(|&b| b as char).collect();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[27], "1.5\t\t3");
        assert_eq!(lines[28], "0\t12.25\t");
    }

    #[test]
    fn test_output_is_latin1() {
        let bytes = render(&sample_foot());
        // '²' is the single byte 0xB2
        assert!(bytes.contains(&0xB2));
        assert!(std::str::from_utf8(&bytes).is_err());
    }

    #[test]
    fn test_write_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("left.txt");
        write_export_file(&sample_foot(), FootSide::Left, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), render(&sample_foot()));

        let missing = dir.path().join("no_such_dir").join("left.txt");
        assert!(matches!(
            write_export_file(&sample_foot(), FootSide::Left, &missing),
            Err(PlantarError::Io { .. })
        ));
    }
}
