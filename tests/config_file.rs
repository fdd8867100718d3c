use std::io::Write;

use sun_position::{Config, ConfigError, HouseOrientation};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_all_house_fields() {
    let file = write_config(
        r#"{
            "house": {
                "direction": 200,
                "latitude": 41.9,
                "longitude": 12.5,
                "timezone": "Europe/Rome"
            }
        }"#,
    );
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.orientation(), HouseOrientation(200.0));

    let location = config.location().unwrap();
    assert_eq!(location.latitude, 41.9);
    assert_eq!(location.longitude, 12.5);
    assert_eq!(location.elevation, 0.0);
    assert_eq!(location.timezone, chrono_tz::Europe::Rome);
}

#[test]
fn missing_house_key_uses_defaults() {
    let file = write_config(r#"{"garden": {"trees": 3}}"#);
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.house.direction, 165.0);
    assert_eq!(config.house.latitude, 45.0);
    assert_eq!(config.house.longitude, 9.0);
    assert_eq!(config.house.timezone, "UTC");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let file = write_config(r#"{"house": {"direction": 165,"#);
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("malformed configuration file"));
}

#[test]
fn unknown_timezone_fails_at_load() {
    let file = write_config(r#"{"house": {"timezone": "Europe/Atlantis"}}"#);
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTimezone(_)));
}

#[test]
fn top_level_array_is_rejected() {
    let file = write_config("[]");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject { key: "root", .. }));
    assert!(err.to_string().contains("malformed configuration file"));
}

#[test]
fn positional_house_is_rejected() {
    let file = write_config(r#"{"house": [200, 41.9, 12.5, "Europe/Rome"]}"#);
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject { key: "house", .. }));
}

#[test]
fn null_house_is_rejected() {
    let file = write_config(r#"{"house": null}"#);
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotAnObject { key: "house", .. }));
}
