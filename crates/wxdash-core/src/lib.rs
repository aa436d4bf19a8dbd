//! Core data types for the weather-station dashboard
//!
//! This crate provides the snapshot data model shared by sources, the
//! refresh controller and whatever renders the dashboard: readings, image
//! descriptors, forecast labels, invariants and the field-wise merge.

pub mod forecast;
pub mod merge;
pub mod types;
pub mod validation;

pub use forecast::*;
pub use types::*;
pub use validation::*;

/// Round to one decimal place, as the dashboard displays readings
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(24.46), 24.5);
        assert_eq!(round1(1011.94), 1011.9);
        assert_eq!(round1(-0.05), -0.1);
    }
}
