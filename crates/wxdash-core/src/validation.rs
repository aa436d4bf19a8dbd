//! Data-model invariants

use crate::types::{
    DeviceStatus, EnvironmentReading, ForecastEstimate, ImageCapture, ReadingUpdate,
    SnapshotUpdate, StationSnapshot,
};

/// Invariant violation in a snapshot or update
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Humidity out of range: {0}%")]
    HumidityOutOfRange(u8),

    #[error("Confidence out of range: {0}%")]
    ConfidenceOutOfRange(u8),

    #[error("Non-finite value for {field}")]
    NonFinite { field: &'static str },

    #[error("Image URL is empty")]
    EmptyImageUrl,

    #[error("Invalid image URL '{url}': {reason}")]
    InvalidImageUrl { url: String, reason: String },

    #[error("Device name is empty")]
    EmptyDeviceName,
}

pub type ModelResult<T> = Result<T, ModelError>;

const MAX_PERCENT: u8 = 100;

fn check_finite(field: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite { field })
    }
}

fn check_humidity(value: u8) -> ModelResult<()> {
    if value > MAX_PERCENT {
        return Err(ModelError::HumidityOutOfRange(value));
    }
    Ok(())
}

impl EnvironmentReading {
    pub fn validate(&self) -> ModelResult<()> {
        check_finite("temperature", self.temperature)?;
        check_humidity(self.humidity)?;
        check_finite("pressure", self.pressure)?;
        check_finite("windSpeed", self.wind_speed)
    }
}

impl ReadingUpdate {
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(t) = self.temperature {
            check_finite("temperature", t)?;
        }
        if let Some(h) = self.humidity {
            check_humidity(h)?;
        }
        if let Some(p) = self.pressure {
            check_finite("pressure", p)?;
        }
        if let Some(w) = self.wind_speed {
            check_finite("windSpeed", w)?;
        }
        Ok(())
    }
}

impl ImageCapture {
    pub fn validate(&self) -> ModelResult<()> {
        if self.url.trim().is_empty() {
            return Err(ModelError::EmptyImageUrl);
        }
        url::Url::parse(&self.url).map_err(|e| ModelError::InvalidImageUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

impl ForecastEstimate {
    pub fn validate(&self) -> ModelResult<()> {
        if self.confidence > MAX_PERCENT {
            return Err(ModelError::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}

impl DeviceStatus {
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyDeviceName);
        }
        Ok(())
    }
}

impl StationSnapshot {
    /// Check every invariant of the aggregate
    pub fn validate(&self) -> ModelResult<()> {
        self.reading.validate()?;
        if let Some(image) = &self.last_image {
            image.validate()?;
        }
        self.forecast.validate()?;
        self.devices.iter().try_for_each(DeviceStatus::validate)
    }
}

impl SnapshotUpdate {
    /// Check the invariants of the fields that are present
    pub fn validate(&self) -> ModelResult<()> {
        self.reading.validate()?;
        if let Some(image) = &self.last_image {
            image.validate()?;
        }
        if let Some(forecast) = &self.forecast {
            forecast.validate()?;
        }
        if let Some(devices) = &self.devices {
            devices.iter().try_for_each(DeviceStatus::validate)?;
        }
        Ok(())
    }
}
