//! Integration tests: race results written to CSV files

use std::collections::HashMap;
use std::fs;

use chrono::NaiveDate;
use laptrack::racing::{Point, RaceConfig, RaceState, Rgb};
use laptrack::recording::{export_all, ExportError};
use tempfile::tempdir;

fn at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn step(race: &mut RaceState, id: &str, x: i32, y: i32, t: f64) {
    let mut detections = HashMap::new();
    detections.insert(id.to_string(), Point::new(x, y));
    race.tick(&detections, t);
}

fn raced() -> RaceState {
    let mut race = RaceState::new(RaceConfig::default());
    race.add_entrant("blue-car", "Blue Car", Rgb(0, 0, 255))
        .unwrap();
    race.add_entrant("green-car", "Green Car", Rgb(0, 255, 0))
        .unwrap();
    race.set_finish_line_point1(Point::new(0, 100));
    race.set_finish_line_point2(Point::new(200, 100));

    step(&mut race, "blue-car", 50, 90, 0.0);
    step(&mut race, "blue-car", 50, 110, 0.0);
    step(&mut race, "blue-car", 50, 90, 3.0);
    race.add_penalty("blue-car", 2.0, 4.0).unwrap();
    step(&mut race, "blue-car", 50, 110, 7.5);
    // Pending penalty with no completed lap is not exported
    race.add_penalty("blue-car", 1.0, 8.0).unwrap();
    race
}

#[test]
fn test_export_writes_lap_ledger() {
    let dir = tempdir().unwrap();
    let race = raced();

    let written = export_all(&race.snapshot(8.0), dir.path(), at()).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0], dir.path().join("Blue_Car_20261018_093000.csv"));

    let content = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(content, "Lap,Time,Penalty\n1,3.00,0.0\n2,6.50,2.0\n");
}

#[test]
fn test_export_after_reset_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut race = raced();
    race.reset_all();

    let written = export_all(&race.snapshot(8.0), dir.path(), at()).unwrap();

    assert!(written.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_export_into_unwritable_path_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let result = export_all(&raced().snapshot(8.0), &blocker, at());

    assert!(matches!(result, Err(ExportError::IoError(_))));
}
