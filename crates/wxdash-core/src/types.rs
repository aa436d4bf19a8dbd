//! Core data types for station snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forecast::{DeviceState, ForecastStatus};

/// Environmental sensor reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReading {
    /// Air temperature (°C)
    pub temperature: f64,

    /// Relative humidity (%, 0-100)
    pub humidity: u8,

    /// Barometric pressure (hPa)
    pub pressure: f64,

    /// Wind speed (km/h)
    pub wind_speed: f64,
}

/// When the last camera image was taken
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CaptureTime {
    At(DateTime<Utc>),
    Label(String),
}

/// Descriptor of the most recent camera capture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageCapture {
    pub url: String,
    pub captured_at: CaptureTime,
}

/// Derived forecast block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEstimate {
    pub status: ForecastStatus,

    /// Confidence (%, 0-100)
    pub confidence: u8,

    pub summary: String,
}

/// Health of a single station component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceStatus {
    pub name: String,
    pub state: DeviceState,
}

/// One immutable point-in-time view of the station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub reading: EnvironmentReading,

    /// `None` until the camera has produced an image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_image: Option<ImageCapture>,

    pub forecast: ForecastEstimate,

    #[serde(default)]
    pub devices: Vec<DeviceStatus>,

    pub observed_at: DateTime<Utc>,
}

/// Reading fields a source actually measured
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

/// What a snapshot source returns from a fetch.
///
/// A full source fills every field; a partial one (e.g. a sensor that only
/// reports temperature and pressure) leaves the rest as `None` and the
/// previous values are kept on merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotUpdate {
    #[serde(default)]
    pub reading: ReadingUpdate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_image: Option<ImageCapture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceStatus>>,
    pub observed_at: DateTime<Utc>,
}

impl SnapshotUpdate {
    /// An update carrying no fields, stamped with `observed_at`
    pub fn empty(observed_at: DateTime<Utc>) -> Self {
        Self {
            reading: ReadingUpdate::default(),
            last_image: None,
            forecast: None,
            devices: None,
            observed_at,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.reading.temperature = Some(temperature);
        self
    }

    pub fn with_humidity(mut self, humidity: u8) -> Self {
        self.reading.humidity = Some(humidity);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.reading.pressure = Some(pressure);
        self
    }

    pub fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.reading.wind_speed = Some(wind_speed);
        self
    }

    pub fn with_image(mut self, image: ImageCapture) -> Self {
        self.last_image = Some(image);
        self
    }

    pub fn with_forecast(mut self, forecast: ForecastEstimate) -> Self {
        self.forecast = Some(forecast);
        self
    }

    pub fn with_devices(mut self, devices: Vec<DeviceStatus>) -> Self {
        self.devices = Some(devices);
        self
    }

    /// True when the update carries nothing but a timestamp
    pub fn is_empty(&self) -> bool {
        self.reading == ReadingUpdate::default()
            && self.last_image.is_none()
            && self.forecast.is_none()
            && self.devices.is_none()
    }
}

impl From<EnvironmentReading> for ReadingUpdate {
    fn from(reading: EnvironmentReading) -> Self {
        Self {
            temperature: Some(reading.temperature),
            humidity: Some(reading.humidity),
            pressure: Some(reading.pressure),
            wind_speed: Some(reading.wind_speed),
        }
    }
}

impl From<StationSnapshot> for SnapshotUpdate {
    fn from(snapshot: StationSnapshot) -> Self {
        Self {
            reading: snapshot.reading.into(),
            last_image: snapshot.last_image,
            forecast: Some(snapshot.forecast),
            devices: Some(snapshot.devices),
            observed_at: snapshot.observed_at,
        }
    }
}

/// Stock image used by the seeded snapshot and the simulator
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1592210633469-a1d09276883c?auto=format&fit=crop&q=80&w=1000";

impl StationSnapshot {
    /// Snapshot shown before the first refresh completes
    pub fn seeded() -> Self {
        Self {
            reading: EnvironmentReading {
                temperature: 24.5,
                humidity: 45,
                pressure: 1012.0,
                wind_speed: 12.4,
            },
            last_image: Some(ImageCapture {
                url: DEFAULT_IMAGE_URL.to_string(),
                captured_at: CaptureTime::Label("15 minutes ago".to_string()),
            }),
            forecast: ForecastEstimate {
                status: ForecastStatus::Clear,
                confidence: 92,
                summary: "Conditions are stable. No precipitation expected in the next 6 hours."
                    .to_string(),
            },
            devices: default_devices(),
            observed_at: Utc::now(),
        }
    }
}

/// Components reported by the reference station
pub fn default_devices() -> Vec<DeviceStatus> {
    vec![
        DeviceStatus {
            name: "ESP32-CORE".to_string(),
            state: DeviceState::Connected,
        },
        DeviceStatus {
            name: "OV2640 CAMERA".to_string(),
            state: DeviceState::Ready,
        },
        DeviceStatus {
            name: "SD CARD".to_string(),
            state: DeviceState::Missing,
        },
    ]
}
