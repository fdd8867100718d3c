use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::state::{HouseOrientation, Location};

/// Default house facing, degrees clockwise from North
pub const DEFAULT_DIRECTION: f64 = 165.0;
pub const DEFAULT_LATITUDE: f64 = 45.0;
pub const DEFAULT_LONGITUDE: f64 = 9.0;
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Root of the configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub house: HouseConfig,
}

/// The `house` section; every field falls back to its default when omitted
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HouseConfig {
    /// Compass bearing the house front faces
    pub direction: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA zone name used for log timestamps
    pub timezone: String,
}

impl Default for HouseConfig {
    fn default() -> Self {
        HouseConfig {
            direction: DEFAULT_DIRECTION,
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    /// Reads and validates the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |source: serde_json::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let value: Value = serde_json::from_str(&text).map_err(parse_error)?;
        // The derive would also accept arrays read by position
        if !value.is_object() {
            return Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
                key: "root",
            });
        }
        if value.get("house").is_some_and(|house| !house.is_object()) {
            return Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
                key: "house",
            });
        }
        let config: Config = serde_json::from_value(value).map_err(parse_error)?;
        // Reject unknown zones at load time rather than on the first tick
        config.timezone()?;
        Ok(config)
    }

    /// Resolves the configured timezone name
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        Tz::from_str(&self.house.timezone)
            .map_err(|_| ConfigError::UnknownTimezone(self.house.timezone.clone()))
    }

    /// Observer location at ground level
    pub fn location(&self) -> Result<Location, ConfigError> {
        Ok(Location {
            latitude: self.house.latitude,
            longitude: self.house.longitude,
            elevation: 0.0,
            timezone: self.timezone()?,
        })
    }

    pub fn orientation(&self) -> HouseOrientation {
        HouseOrientation(self.house.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.house, HouseConfig::default());
        assert_eq!(config.orientation(), HouseOrientation(165.0));
    }

    #[test]
    fn partial_house_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"house": {"latitude": 51.5, "timezone": "Europe/London"}}"#)
                .unwrap();
        assert_eq!(config.house.latitude, 51.5);
        assert_eq!(config.house.longitude, DEFAULT_LONGITUDE);
        assert_eq!(config.house.direction, DEFAULT_DIRECTION);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::London);
    }

    #[test]
    fn location_has_zero_elevation() {
        let location = Config::default().location().unwrap();
        assert_eq!(location.elevation, 0.0);
        assert_eq!(location.timezone, chrono_tz::UTC);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let config: Config =
            serde_json::from_str(r#"{"house": {"timezone": "Mars/Olympus_Mons"}}"#).unwrap();
        assert!(matches!(
            config.timezone(),
            Err(ConfigError::UnknownTimezone(name)) if name == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn wrong_field_type_fails_to_parse() {
        let parsed = serde_json::from_str::<Config>(r#"{"house": {"direction": "south"}}"#);
        assert!(parsed.is_err());
    }
}
