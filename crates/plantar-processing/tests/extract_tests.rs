use plantar_core::{FootSide, PlantarError, Region, CANVAS_BACKGROUND};
use plantar_processing::{extract, parse_foot_file, AnalysisConfig, PressurePipeline};
use plantar_simulation::{simulate_pair, write_export_file};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Export file with the device layout: placement on lines 19-22, body from line 27
fn export_text(row: i64, col: i64, height: usize, width: usize, body: &[&str]) -> String {
    let mut lines: Vec<String> = (0..19).map(|i| format!("meta{}=x", i)).collect();
    lines.push(format!("row={}", row));
    lines.push(format!("col={}", col));
    lines.push(format!("height={}", height));
    lines.push(format!("width={}", width));
    lines.extend((23..27).map(|i| format!("meta{}=x", i)));
    lines.extend(body.iter().map(|line| line.to_string()));
    lines.join("\n")
}

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn small_pair(dir: &TempDir, right_body: &[&str]) -> (PathBuf, PathBuf) {
    let left = write_fixture(dir, "left.txt", &export_text(2, 3, 2, 2, &["1\t2\t3", "4\t5\t6"]));
    let right = write_fixture(dir, "right.txt", &export_text(2, 30, 2, 2, right_body));
    (left, right)
}

fn simulated_pair(dir: &TempDir, seed: u64) -> (PathBuf, PathBuf) {
    let (left, right) = simulate_pair(seed).unwrap();
    let left_path = dir.path().join("left.txt");
    let right_path = dir.path().join("right.txt");
    write_export_file(&left, FootSide::Left, &left_path).unwrap();
    write_export_file(&right, FootSide::Right, &right_path).unwrap();
    (left_path, right_path)
}

#[test]
fn test_declared_offsets_become_zero_based() {
    let dir = TempDir::new().unwrap();
    let (left, right) = small_pair(&dir, &["0\t0\t0", "0\t0\t0"]);

    let left = parse_foot_file(&left).unwrap();
    let right = parse_foot_file(&right).unwrap();
    assert_eq!((left.row(), left.col()), (1, 2));
    assert_eq!((right.row(), right.col()), (1, 29));
    assert_eq!(left.matrix().shape(), (2, 3));
}

#[test]
fn test_composite_canvas_from_parsed_files() {
    let dir = TempDir::new().unwrap();
    let (left, right) = small_pair(&dir, &["0\t0\t0", "0\t0\t0"]);
    let left = parse_foot_file(&left).unwrap();
    let right = parse_foot_file(&right).unwrap();

    let field = plantar_processing::compose(&left, &right).unwrap();
    assert_eq!(field[(1, 2)], 10.0);
    assert_eq!(field[(1, 4)], 30.0);
    assert_eq!(field[(2, 4)], 60.0);
    assert_eq!(field[(1, 29)], 0.0);
    assert_eq!(field[(0, 0)], CANVAS_BACKGROUND);
    assert_eq!(field[(47, 47)], CANVAS_BACKGROUND);
}

#[test]
fn test_unloaded_right_foot_fails_extract() {
    let dir = TempDir::new().unwrap();
    let (left, right) = small_pair(&dir, &["0\t0\t0", "0\t0\t0"]);

    let result = extract(&left, &right);
    assert!(matches!(
        result,
        Err(PlantarError::UndefinedCenterOfPressure { region: Region::RightFoot })
    ));
}

#[test]
fn test_small_pair_statistics() {
    let dir = TempDir::new().unwrap();
    let (left, right) = small_pair(&dir, &["1\t1\t1", "1\t1\t1"]);

    let (_, results) = extract(&left, &right).unwrap();

    // Left CoP: weights 1..6 over rows 0-1, cols 0-2, shifted by (col 2, row 1)
    assert!((results.left_cop.x - (2.0 + 25.0 / 21.0 - 0.5)).abs() < 1e-9);
    assert!((results.left_cop.y - (1.0 + 15.0 / 21.0 - 0.5)).abs() < 1e-9);
    assert_eq!(results.left_max, 6.0);
    assert_eq!(results.left_peak_pos.row, 2);
    assert_eq!(results.left_peak_pos.col, 4);
}

#[test]
fn test_simulated_round_trip() {
    let dir = TempDir::new().unwrap();
    let (left_path, right_path) = simulated_pair(&dir, 42);
    let (left, right) = simulate_pair(42).unwrap();

    assert_eq!(parse_foot_file(&left_path).unwrap(), left);
    assert_eq!(parse_foot_file(&right_path).unwrap(), right);

    let from_files = extract(&left_path, &right_path).unwrap();
    let in_memory = PressurePipeline::default().analyze(&left, &right).unwrap();
    assert_eq!(from_files, in_memory);
}

#[test]
fn test_extract_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (left, right) = simulated_pair(&dir, 3);

    let first = extract(&left, &right).unwrap();
    let second = extract(&left, &right).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_load_shares_are_consistent() {
    let dir = TempDir::new().unwrap();
    let (left, right) = simulated_pair(&dir, 11);
    let (_, results) = extract(&left, &right).unwrap();

    let tolerance = 1e-9 * results.total_pressure.abs().max(1.0);
    assert!((results.left_pressure + results.right_pressure - results.total_pressure).abs() < tolerance);
    assert!((results.forefoot_pressure + results.rearfoot_pressure - results.total_pressure).abs() < tolerance);
    assert!((results.left_pressure_perc + results.right_pressure_perc - 100.0).abs() < 1e-9);
    assert!((results.forefoot_pressure_perc + results.rearfoot_pressure_perc - 100.0).abs() < 1e-9);

    let quadrants = results.pressure_q1 + results.pressure_q2 + results.pressure_q3 + results.pressure_q4;
    assert!((quadrants - results.total_pressure).abs() < tolerance);

    // Left foot sits left of the right foot on the mat
    assert!(results.left_cop.x < results.global_cop.x);
    assert!(results.global_cop.x < results.right_cop.x);
}

#[test]
fn test_legacy_profile_background() {
    let dir = TempDir::new().unwrap();
    let (left, right) = simulated_pair(&dir, 5);

    let pipeline = PressurePipeline::new(AnalysisConfig::legacy()).unwrap();
    let (field, _) = pipeline.extract(&left, &right).unwrap();
    assert_eq!(field[(0, 0)], -10.0);
}

#[test]
fn test_all_sentinel_pair_fails() {
    let dir = TempDir::new().unwrap();
    let left = write_fixture(&dir, "left.txt", &export_text(2, 3, 2, 2, &["\t\t", "\t\t"]));
    let right = write_fixture(&dir, "right.txt", &export_text(2, 30, 2, 2, &["\t\t", "\t\t"]));

    assert!(matches!(
        extract(&left, &right),
        Err(PlantarError::UndefinedCenterOfPressure { .. })
    ));
}

#[test]
fn test_malformed_inputs() {
    let dir = TempDir::new().unwrap();
    let good = write_fixture(&dir, "good.txt", &export_text(2, 30, 2, 2, &["1\t1\t1", "1\t1\t1"]));

    let cases: Vec<(&str, String)> = vec![
        ("truncated.txt", "row=2\ncol=3\n".to_string()),
        ("short_rows.txt", export_text(2, 3, 3, 2, &["1\t2\t3", "4\t5\t6"])),
        ("narrow.txt", export_text(2, 3, 2, 2, &["1\t2", "4\t5"])),
        ("zero_offset.txt", export_text(0, 3, 2, 2, &["1\t2\t3", "4\t5\t6"])),
        ("off_canvas.txt", export_text(2, 47, 2, 2, &["1\t2\t3", "4\t5\t6"])),
    ];

    for (name, contents) in cases {
        let path = write_fixture(&dir, name, &contents);
        let error = extract(&path, &good).unwrap_err();
        assert!(error.is_malformed_input(), "{}: {}", name, error);
        assert!(error.to_string().contains(name), "{} missing from '{}'", name, error);
    }
}

#[test]
fn test_missing_right_file() {
    let dir = TempDir::new().unwrap();
    let (left, _) = small_pair(&dir, &["1\t1\t1", "1\t1\t1"]);
    let missing = Path::new("/nonexistent/right.txt");

    assert!(matches!(extract(&left, missing), Err(PlantarError::Io { path, .. }) if path == missing));
}
