use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be opened or read
    #[error("cannot read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON or a field has the wrong type
    #[error("malformed configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The root, or the `house` section, is valid JSON but not an object
    #[error("malformed configuration file {path}: {key} must be a JSON object")]
    NotAnObject { path: PathBuf, key: &'static str },
    /// The timezone is not a known IANA zone name
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
}

/// Recoverable errors raised by a position provider
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// The observer coordinates were rejected by the ephemeris
    #[error("invalid observer location (lat {latitude}, lon {longitude})")]
    InvalidLocation { latitude: f64, longitude: f64 },
    /// The ephemeris returned a non-finite angle
    #[error("ephemeris returned a non-finite position (zenith {zenith}, azimuth {azimuth})")]
    NonFinite { zenith: f64, azimuth: f64 },
}
