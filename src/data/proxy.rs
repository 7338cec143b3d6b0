//! Weather proxy API client
//!
//! This module provides the two-step weather fetch pipeline: resolve a
//! city name to coordinates through the proxy's geocode endpoint, then
//! fetch current conditions for those coordinates. The pipeline
//! short-circuits on the first failing step and never retries; every
//! failure is a typed [`FetchError`] the caller turns into a single
//! user-visible notice.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Coordinates, WeatherReport};

/// Default base URL for the weather proxy (local development host).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Errors that can occur during the weather fetch pipeline
#[derive(Debug, Error)]
pub enum FetchError {
    /// City name was blank; no request was issued
    #[error("Please enter a city name.")]
    MissingCityName,

    /// Geocode returned an empty candidate list
    #[error("No location found for '{city}'.")]
    NoLocationFound {
        /// The city that failed to resolve
        city: String,
    },

    /// HTTP request failed (timeout, connection, non-2xx)
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Response body was not valid JSON of the expected shape
    #[error("Failed to parse response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Weather response lacked a usable temperature field
    #[error("Weather response is missing a usable temperature.")]
    InvalidPayload {
        /// Coordinates the weather request was issued for
        coordinates: Coordinates,
    },
}

impl FetchError {
    /// Structured detail for the diagnostics log, where available.
    ///
    /// The banner shows only the message; the detail carries the failing
    /// city or coordinates and the underlying transport message.
    pub fn detail(&self) -> Option<String> {
        match self {
            FetchError::MissingCityName => None,
            FetchError::NoLocationFound { city } => Some(format!("city: {city}")),
            FetchError::RequestFailed(err) => Some(err.to_string()),
            FetchError::MalformedBody(err) => Some(err.to_string()),
            FetchError::InvalidPayload { coordinates } => Some(format!(
                "coordinates: {}, {}",
                coordinates.lat, coordinates.lon
            )),
        }
    }
}

/// Client for the weather proxy's geocode and weather endpoints
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyClient {
    /// Create a new ProxyClient pointing at the default proxy host
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new ProxyClient with a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current weather for a city name.
    ///
    /// Runs the full pipeline: validate the city, geocode it, then fetch
    /// current conditions for the first matching coordinates. The weather
    /// step never starts before the geocode step completes.
    ///
    /// # Returns
    /// * `Ok(WeatherReport)` - Rounded Fahrenheit reading plus the resolved
    ///   coordinates and a fetch timestamp
    /// * `Err(FetchError)` - The first failing step's error
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::MissingCityName);
        }

        let coordinates = self.geocode(city).await?;
        let kelvin = self.current_weather(coordinates).await?;

        Ok(WeatherReport {
            city: city.to_string(),
            coordinates,
            temperature_f: kelvin_to_fahrenheit(kelvin),
            fetched_at: Utc::now(),
        })
    }

    /// Resolve a city name to coordinates via `GET {base}/location?q=<city>`.
    ///
    /// The proxy returns an array of candidates; the first one wins.
    async fn geocode(&self, city: &str) -> Result<Coordinates, FetchError> {
        let url = format!("{}/location", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", city)])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        parse_geocode(&text, city)
    }

    /// Fetch current conditions via `GET {base}/weather?lat=<lat>&lon=<lon>`.
    ///
    /// Returns the raw temperature in Kelvin.
    async fn current_weather(&self, coordinates: Coordinates) -> Result<f64, FetchError> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("lat", coordinates.lat), ("lon", coordinates.lon)])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let payload: WeatherResponse = serde_json::from_str(&text)?;

        extract_kelvin(&payload).ok_or(FetchError::InvalidPayload { coordinates })
    }
}

/// Converts a Kelvin temperature to whole degrees Fahrenheit.
///
/// `F = round((K - 273.15) * 9/5 + 32)`
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i32 {
    ((kelvin - 273.15) * 9.0 / 5.0 + 32.0).round() as i32
}

/// Parses a geocode response body into coordinates.
///
/// An empty candidate array maps to [`FetchError::NoLocationFound`], so
/// the pipeline short-circuits before the weather step for a city the
/// proxy cannot resolve.
fn parse_geocode(body: &str, city: &str) -> Result<Coordinates, FetchError> {
    let candidates: Vec<LocationCandidate> = serde_json::from_str(body)?;
    first_candidate(&candidates).ok_or_else(|| FetchError::NoLocationFound {
        city: city.to_string(),
    })
}

/// Takes the first geocode candidate, if the list is non-empty.
fn first_candidate(candidates: &[LocationCandidate]) -> Option<Coordinates> {
    candidates.first().map(|c| Coordinates {
        lat: c.lat,
        lon: c.lon,
    })
}

/// Extracts the Kelvin temperature from a weather response.
///
/// Absent `main`, absent `temp`, and non-positive values are all treated
/// as an unusable payload.
fn extract_kelvin(payload: &WeatherResponse) -> Option<f64> {
    let temp = payload.main.as_ref()?.temp?;
    if temp > 0.0 {
        Some(temp)
    } else {
        None
    }
}

/// One entry of the geocode endpoint's candidate array
#[derive(Debug, Deserialize)]
struct LocationCandidate {
    lat: f64,
    lon: f64,
}

/// Weather endpoint response body
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<MainConditions>,
}

/// The `main` block of the weather response
#[derive(Debug, Deserialize)]
struct MainConditions {
    temp: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample geocode response with the extra fields the proxy passes through
    const GEOCODE_RESPONSE: &str = r#"[
        {
            "name": "Seattle",
            "lat": 47.6038321,
            "lon": -122.330062,
            "country": "US",
            "state": "Washington"
        },
        {
            "name": "Seattle",
            "lat": 20.7199684,
            "lon": -103.3763286,
            "country": "MX"
        }
    ]"#;

    /// Sample weather response in the proxy's OpenWeatherMap shape
    const WEATHER_RESPONSE: &str = r#"{
        "coord": { "lon": -122.33, "lat": 47.6 },
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
        "main": {
            "temp": 300.0,
            "feels_like": 299.2,
            "pressure": 1014,
            "humidity": 38
        },
        "name": "Seattle"
    }"#;

    #[test]
    fn test_kelvin_to_fahrenheit_freezing_point() {
        assert_eq!(kelvin_to_fahrenheit(273.15), 32);
    }

    #[test]
    fn test_kelvin_to_fahrenheit_boiling_point() {
        assert_eq!(kelvin_to_fahrenheit(373.15), 212);
    }

    #[test]
    fn test_kelvin_to_fahrenheit_rounds() {
        assert_eq!(kelvin_to_fahrenheit(300.0), 80);
        assert_eq!(kelvin_to_fahrenheit(299.82), 80);
        assert_eq!(kelvin_to_fahrenheit(283.15), 50);
    }

    #[test]
    fn test_kelvin_to_fahrenheit_below_freezing() {
        assert_eq!(kelvin_to_fahrenheit(255.372), 0);
        assert!(kelvin_to_fahrenheit(200.0) < 0);
    }

    #[test]
    fn test_first_candidate_takes_first_match() {
        let candidates: Vec<LocationCandidate> =
            serde_json::from_str(GEOCODE_RESPONSE).expect("Failed to parse geocode response");

        let coords = first_candidate(&candidates).expect("Expected a candidate");
        assert!((coords.lat - 47.6038321).abs() < 0.0001);
        assert!((coords.lon - (-122.330062)).abs() < 0.0001);
    }

    #[test]
    fn test_first_candidate_empty_list() {
        let candidates: Vec<LocationCandidate> =
            serde_json::from_str("[]").expect("Failed to parse empty array");
        assert!(first_candidate(&candidates).is_none());
    }

    #[test]
    fn test_extract_kelvin_valid_payload() {
        let payload: WeatherResponse =
            serde_json::from_str(WEATHER_RESPONSE).expect("Failed to parse weather response");
        let kelvin = extract_kelvin(&payload).expect("Expected a temperature");
        assert!((kelvin - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_extract_kelvin_missing_main() {
        let payload: WeatherResponse =
            serde_json::from_str(r#"{ "name": "Seattle" }"#).expect("Failed to parse");
        assert!(extract_kelvin(&payload).is_none());
    }

    #[test]
    fn test_extract_kelvin_missing_temp() {
        let payload: WeatherResponse =
            serde_json::from_str(r#"{ "main": { "humidity": 38 } }"#).expect("Failed to parse");
        assert!(extract_kelvin(&payload).is_none());
    }

    #[test]
    fn test_extract_kelvin_zero_temp_is_invalid() {
        let payload: WeatherResponse =
            serde_json::from_str(r#"{ "main": { "temp": 0 } }"#).expect("Failed to parse");
        assert!(extract_kelvin(&payload).is_none());
    }

    #[test]
    fn test_parse_geocode_takes_first_candidate() {
        let coords = parse_geocode(GEOCODE_RESPONSE, "Seattle").expect("Expected coordinates");
        assert!((coords.lat - 47.6038321).abs() < 0.0001);
        assert!((coords.lon - (-122.330062)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_geocode_empty_array_is_no_location_found() {
        // An unresolvable city must surface as NoLocationFound before the
        // weather step can run
        let result = parse_geocode("[]", "Atlantis");
        match result {
            Err(FetchError::NoLocationFound { city }) => assert_eq!(city, "Atlantis"),
            other => panic!("Expected NoLocationFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_geocode_malformed_body() {
        let result = parse_geocode("{ not json }", "Seattle");
        assert!(matches!(result, Err(FetchError::MalformedBody(_))));
    }

    #[tokio::test]
    async fn test_fetch_weather_rejects_blank_city() {
        // Validation happens before any request, so no proxy is needed.
        let client = ProxyClient::new();

        let result = client.fetch_weather("").await;
        assert!(matches!(result, Err(FetchError::MissingCityName)));

        let result = client.fetch_weather("   ").await;
        assert!(matches!(result, Err(FetchError::MissingCityName)));
    }

    #[test]
    fn test_proxy_client_default_base_url() {
        let client = ProxyClient::new();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_proxy_client_with_base_url() {
        let client = ProxyClient::new().with_base_url("https://proxy.example.com");
        assert_eq!(client.base_url, "https://proxy.example.com");
    }

    #[test]
    fn test_fetch_error_detail_payloads() {
        assert!(FetchError::MissingCityName.detail().is_none());

        let err = FetchError::NoLocationFound {
            city: "Atlantis".to_string(),
        };
        assert_eq!(err.detail().as_deref(), Some("city: Atlantis"));

        let err = FetchError::InvalidPayload {
            coordinates: Coordinates {
                lat: 47.6,
                lon: -122.3,
            },
        };
        assert_eq!(err.detail().as_deref(), Some("coordinates: 47.6, -122.3"));
    }
}
