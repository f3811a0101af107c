//! Integration tests: recorded sessions replayed end to end

use std::io::Write;

use laptrack::detection::{EventSource, ReplayError, ReplayReader};
use laptrack::storage::config::{load_config_from, save_config};
use laptrack::{AppConfig, RaceSession, SessionOutcome};
use tempfile::{tempdir, NamedTempFile};

const SESSION: &str = r#"# two clicks place the finish line
{"type":"click","x":0,"y":100}
{"type":"click","x":200,"y":100}
{"type":"frame","t":0.0,"detections":{"blue-car":{"x":50,"y":90},"green-car":{"x":150,"y":90}}}
{"type":"frame","t":0.1,"detections":{"blue-car":{"x":50,"y":110},"green-car":{"x":150,"y":110}}}
{"type":"key","t":1.0,"key":"b"}
{"type":"frame","t":3.1,"detections":{"blue-car":{"x":50,"y":90}}}
{"type":"frame","t":3.2,"detections":{"blue-car":{"x":50,"y":110}}}
{"type":"boxes","t":4.1,"boxes":[{"class":"green-car","confidence":0.4,"bbox":[140,80,160,100]},{"class":"green-car","confidence":0.8,"bbox":[140,80,160,100]}]}
"#;

fn write_session(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_replay_times_laps() {
    let file = write_session(SESSION);
    let mut session = RaceSession::from_config(&AppConfig::default()).unwrap();
    let mut reader = ReplayReader::open(file.path()).unwrap();

    let outcome = session.run(&mut reader).unwrap();
    assert_eq!(outcome, SessionOutcome::Continue);

    let snapshot = session.race().snapshot(session.now());
    let blue = &snapshot[0];
    assert_eq!(blue.laps.len(), 1);
    assert!((blue.laps[0].time - 5.0).abs() < 1e-9);
    assert_eq!(blue.laps[0].penalty, 2.0);

    // Green crosses back at 4.1 from the high-confidence box center (150, 90)
    let green = &snapshot[1];
    assert_eq!(green.laps.len(), 1);
    assert!((green.laps[0].time - 4.0).abs() < 1e-9);
    assert_eq!(green.laps[0].penalty, 0.0);
}

#[test]
fn test_replay_quit_and_export() {
    let dir = tempdir().unwrap();
    let mut config = AppConfig::default();
    config.export.directory = dir.path().join("laps");

    let content = format!(
        "{}{}\n{}\n",
        SESSION,
        r#"{"type":"key","t":5.0,"key":"e"}"#,
        r#"{"type":"key","t":5.5,"key":"q"}"#
    );
    let file = write_session(&format!(
        "{}{}\n",
        content, r#"{"type":"key","t":6.0,"key":"r"}"#
    ));

    let mut session = RaceSession::from_config(&config).unwrap();
    let mut reader = ReplayReader::open(file.path()).unwrap();

    assert_eq!(session.run(&mut reader).unwrap(), SessionOutcome::Quit);
    // Reset after quit was never applied
    assert_eq!(session.race().entrant("blue-car").unwrap().laps().len(), 1);

    let mut files: Vec<String> = std::fs::read_dir(dir.path().join("laps"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert!(files[0].starts_with("Blue_Car_"));
    assert!(files[1].starts_with("Green_Car_"));
    assert!(files.iter().all(|f| f.ends_with(".csv")));
}

#[test]
fn test_reset_key_clears_laps() {
    let file = write_session(&format!(
        "{}{}\n",
        SESSION, r#"{"type":"key","t":5.0,"key":"R"}"#
    ));
    let mut session = RaceSession::from_config(&AppConfig::default()).unwrap();
    let mut reader = ReplayReader::open(file.path()).unwrap();
    session.run(&mut reader).unwrap();

    assert!(session.race().finish_line().is_ready());
    assert!(session
        .race()
        .snapshot(session.now())
        .iter()
        .all(|s| s.laps.is_empty()));
}

#[test]
fn test_malformed_line_reports_position() {
    let file = write_session("{\"type\":\"click\",\"x\":0,\"y\":100}\n\n{\"type\":\"warp\"}\n");
    let mut reader = ReplayReader::open(file.path()).unwrap();

    assert!(reader.next_event().unwrap().is_some());
    match reader.next_event() {
        Err(ReplayError::Malformed { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected malformed event, got {:?}", other),
    }
}

#[test]
fn test_config_file_drives_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.race.penalty_seconds = 3.0;
    config.entrants.truncate(1);
    save_config(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let mut session = RaceSession::from_config(&loaded).unwrap();
    let file = write_session(SESSION);
    let mut reader = ReplayReader::open(file.path()).unwrap();
    session.run(&mut reader).unwrap();

    let snapshot = session.race().snapshot(session.now());
    assert_eq!(snapshot.len(), 1);
    assert!((snapshot[0].laps[0].time - 6.0).abs() < 1e-9);
    assert_eq!(snapshot[0].laps[0].penalty, 3.0);
}
