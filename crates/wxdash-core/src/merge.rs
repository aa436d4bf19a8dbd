//! Field-wise merge of source updates into the displayed snapshot

use crate::types::{EnvironmentReading, ReadingUpdate, SnapshotUpdate, StationSnapshot};

impl EnvironmentReading {
    /// Replace only the measured fields
    pub fn merge(&self, update: &ReadingUpdate) -> EnvironmentReading {
        EnvironmentReading {
            temperature: update.temperature.unwrap_or(self.temperature),
            humidity: update.humidity.unwrap_or(self.humidity),
            pressure: update.pressure.unwrap_or(self.pressure),
            wind_speed: update.wind_speed.unwrap_or(self.wind_speed),
        }
    }
}

impl StationSnapshot {
    /// Build the next snapshot from `self` and a source update.
    ///
    /// Fields absent from the update keep their prior value; `observed_at`
    /// always comes from the update. An absent image in the update never
    /// clears an existing one.
    pub fn merge(&self, update: SnapshotUpdate) -> StationSnapshot {
        StationSnapshot {
            reading: self.reading.merge(&update.reading),
            last_image: update.last_image.or_else(|| self.last_image.clone()),
            forecast: update.forecast.unwrap_or_else(|| self.forecast.clone()),
            devices: update.devices.unwrap_or_else(|| self.devices.clone()),
            observed_at: update.observed_at,
        }
    }
}
