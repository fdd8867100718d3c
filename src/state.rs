use chrono_tz::Tz;

/// Observer location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in degrees, North positive
    pub latitude: f64,
    /// Longitude in degrees, East positive
    pub longitude: f64,
    /// Height above sea level in meters
    pub elevation: f64,
    /// Zone used to display local time
    pub timezone: Tz,
}

/// Compass bearing the house front faces (0 North, 90 East, 180 South, 270 West)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseOrientation(pub f64);

impl HouseOrientation {
    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// Apparent sun position, overwritten as a whole on every successful tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Degrees above the horizon, 90 at the zenith
    pub altitude: f64,
    /// Degrees clockwise from North
    pub azimuth: f64,
}

impl Default for SunState {
    fn default() -> Self {
        SunState {
            altitude: 45.0,
            azimuth: 0.0,
        }
    }
}

/// Update loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal; no further ticks are run
    Stopped,
}
