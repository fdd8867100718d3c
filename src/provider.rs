use std::time::SystemTime;

use chrono::{DateTime, Utc};
use spa::StdFloatOps;

use crate::error::ProviderError;
use crate::math::normalize_angle;
use crate::state::{Location, SunState};

/// Source of apparent sun positions for an observer
pub trait PositionProvider {
    /// Sun altitude and azimuth seen from `location` at `instant`
    fn position(
        &self,
        location: &Location,
        instant: DateTime<Utc>,
    ) -> Result<SunState, ProviderError>;
}

/// Solar Position Algorithm backed provider
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaProvider;

impl PositionProvider for SpaProvider {
    fn position(
        &self,
        location: &Location,
        instant: DateTime<Utc>,
    ) -> Result<SunState, ProviderError> {
        let time = SystemTime::from(instant);
        let pos = spa::solar_position::<StdFloatOps>(
            time.into(),
            location.latitude,
            location.longitude,
        )
        .map_err(|_| ProviderError::InvalidLocation {
            latitude: location.latitude,
            longitude: location.longitude,
        })?;

        if !pos.zenith_angle.is_finite() || !pos.azimuth.is_finite() {
            return Err(ProviderError::NonFinite {
                zenith: pos.zenith_angle,
                azimuth: pos.azimuth,
            });
        }

        Ok(SunState {
            altitude: 90.0 - pos.zenith_angle,
            azimuth: normalize_angle(pos.azimuth),
        })
    }
}
