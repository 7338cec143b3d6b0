//! Core data models for Skycast
//!
//! This module contains the types shared between the weather proxy client
//! and the application state: coordinates resolved by geocoding and the
//! weather report produced by a successful fetch.

pub mod proxy;

pub use proxy::{kelvin_to_fahrenheit, FetchError, ProxyClient};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair resolved from a city name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
}

/// Result of a successful weather fetch for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    /// City the report was requested for
    pub city: String,
    /// Coordinates the geocode step resolved
    pub coordinates: Coordinates,
    /// Current temperature, rounded to whole degrees Fahrenheit
    pub temperature_f: i32,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_serialization_roundtrip() {
        let coords = Coordinates {
            lat: 47.6,
            lon: -122.3,
        };

        let json = serde_json::to_string(&coords).expect("Failed to serialize Coordinates");
        let deserialized: Coordinates =
            serde_json::from_str(&json).expect("Failed to deserialize Coordinates");

        assert!((deserialized.lat - 47.6).abs() < 0.0001);
        assert!((deserialized.lon - (-122.3)).abs() < 0.0001);
    }

    #[test]
    fn test_weather_report_creation() {
        let report = WeatherReport {
            city: "Seattle".to_string(),
            coordinates: Coordinates {
                lat: 47.6,
                lon: -122.3,
            },
            temperature_f: 80,
            fetched_at: Utc::now(),
        };

        assert_eq!(report.city, "Seattle");
        assert_eq!(report.temperature_f, 80);
    }
}
