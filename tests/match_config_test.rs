//! Tests for loading match configuration from disk.

use std::io::Write;
use strictly_hoops::{EndCondition, MatchConfig, ScriptedDraws, ShotType, TurnController};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[shots.near]
baseline = 80.0
distance_penalty = 0.0
optimal_low = 30
optimal_high = 50
points = 2

[power]
min_power = 0
max_power = 100
power_bonus = 15.0

[meter]
start = 0
end = 200
step = 4

[end_condition]
kind = "turn_limit"
turns_per_player = 5
"#,
    );

    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.shots().near().points(), 2);
    assert_eq!(*config.shots().mid(), *MatchConfig::default().shots().mid());
    assert_eq!(*config.power().power_bonus(), 15.0);
    assert_eq!(*config.meter().end(), 200);
    assert_eq!(
        *config.end_condition(),
        EndCondition::TurnLimit { turns_per_player: 5 }
    );

    let game = TurnController::new(config, "Ada", "Bo", ScriptedDraws::default()).unwrap();
    assert_eq!(game.shot_model().points_for(ShotType::Near), 2);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(config, MatchConfig::default());
}

#[test]
fn test_invalid_window_is_fatal() {
    let file = write_config(
        r#"
[shots.far]
baseline = 50.0
distance_penalty = 20.0
optimal_low = 80
optimal_high = 60
points = 1
"#,
    );
    let err = MatchConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Far"));
}

#[test]
fn test_malformed_toml_is_fatal() {
    let file = write_config("[meter\nstart = ");
    let err = MatchConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("parse"));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = MatchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("read"));
}
