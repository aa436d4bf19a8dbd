//! Closed label sets used by the forecast and device panels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Forecast status label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
}

impl ForecastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastStatus::Clear => "clear",
            ForecastStatus::PartlyCloudy => "partly_cloudy",
            ForecastStatus::Cloudy => "cloudy",
            ForecastStatus::Rain => "rain",
        }
    }

    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ForecastStatus::Clear => "Clear",
            ForecastStatus::PartlyCloudy => "Partly cloudy",
            ForecastStatus::Cloudy => "Cloudy",
            ForecastStatus::Rain => "Rain",
        }
    }

    pub const fn all() -> &'static [ForecastStatus] {
        &[
            ForecastStatus::Clear,
            ForecastStatus::PartlyCloudy,
            ForecastStatus::Cloudy,
            ForecastStatus::Rain,
        ]
    }
}

impl fmt::Display for ForecastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not in the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown label '{0}'")]
pub struct UnknownLabel(pub String);

impl FromStr for ForecastStatus {
    type Err = UnknownLabel;

    /// Accepts the machine name or the human label, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == lower || status.label().to_lowercase() == lower)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Reported state of a station component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Connected,
    Ready,
    Missing,
}

impl DeviceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::Connected => "connected",
            DeviceState::Ready => "ready",
            DeviceState::Missing => "missing",
        }
    }

    /// Whether the component is usable
    pub fn is_available(&self) -> bool {
        !matches!(self, DeviceState::Missing)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "connected" => Ok(DeviceState::Connected),
            "ready" => Ok(DeviceState::Ready),
            "missing" => Ok(DeviceState::Missing),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_status_parse() {
        for status in ForecastStatus::all() {
            assert_eq!(status.as_str().parse::<ForecastStatus>(), Ok(*status));
        }
        assert_eq!("Partly cloudy".parse(), Ok(ForecastStatus::PartlyCloudy));
        assert_eq!(" CLEAR ".parse(), Ok(ForecastStatus::Clear));
    }

    #[test]
    fn test_unknown_status() {
        let err = "hail".parse::<ForecastStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown label 'hail'");
    }

    #[test]
    fn test_device_state() {
        assert_eq!("Ready".parse(), Ok(DeviceState::Ready));
        assert!(DeviceState::Connected.is_available());
        assert!(!DeviceState::Missing.is_available());
        assert!("offline".parse::<DeviceState>().is_err());
    }
}
