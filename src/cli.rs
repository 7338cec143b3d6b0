//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! initial city, the initial sky scene, and the weather proxy base URL.

use clap::Parser;
use thiserror::Error;

use crate::data::proxy::DEFAULT_BASE_URL;
use crate::scheme::{SkySelection, DEFAULT_CITY, DEFAULT_SKY};

/// Environment variable consulted for the proxy base URL when --base-url
/// is not given.
pub const BASE_URL_ENV: &str = "SKYCAST_PROXY_URL";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified sky name is not recognized
    #[error("Invalid sky: '{0}'. Valid skies: sunny, cloudy, rainy, snowy")]
    InvalidSky(String),
}

/// Skycast - view current weather for a city in your terminal
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Terminal weather widget with emoji landscape and sky scenes")]
#[command(version)]
pub struct Cli {
    /// City to fetch weather for at startup (default: Seattle)
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// Initial sky scene
    ///
    /// Valid skies: sunny, cloudy, rainy, snowy
    #[arg(long, value_name = "SKY")]
    pub sky: Option<String>,

    /// Base URL of the weather proxy
    ///
    /// Falls back to the SKYCAST_PROXY_URL environment variable, then to
    /// the local development host.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City shown and fetched at startup
    pub city: String,
    /// Sky scene selected at startup
    pub sky: SkySelection,
    /// Weather proxy base URL
    pub base_url: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            sky: DEFAULT_SKY,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Parses a sky string argument into a SkySelection.
///
/// # Arguments
/// * `s` - The sky string from CLI
///
/// # Returns
/// * `Ok(SkySelection)` if the string matches a valid sky
/// * `Err(CliError::InvalidSky)` if the string doesn't match
pub fn parse_sky_arg(s: &str) -> Result<SkySelection, CliError> {
    SkySelection::from_str(s).ok_or_else(|| CliError::InvalidSky(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// Base URL resolution order: --base-url flag, then the
    /// SKYCAST_PROXY_URL environment variable, then the built-in default.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid sky was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = StartupConfig::default();

        if let Some(city) = &cli.city {
            config.city = city.clone();
        }
        if let Some(sky_str) = &cli.sky {
            config.sky = parse_sky_arg(sky_str)?;
        }
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        } else if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sky_arg_valid() {
        assert_eq!(parse_sky_arg("sunny").unwrap(), SkySelection::Sunny);
        assert_eq!(parse_sky_arg("cloudy").unwrap(), SkySelection::Cloudy);
        assert_eq!(parse_sky_arg("rainy").unwrap(), SkySelection::Rainy);
        assert_eq!(parse_sky_arg("snowy").unwrap(), SkySelection::Snowy);
    }

    #[test]
    fn test_parse_sky_arg_aliases() {
        assert_eq!(parse_sky_arg("rain").unwrap(), SkySelection::Rainy);
        assert_eq!(parse_sky_arg("SNOW").unwrap(), SkySelection::Snowy);
    }

    #[test]
    fn test_parse_sky_arg_invalid() {
        let result = parse_sky_arg("hurricane");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid sky"));
        assert!(err.to_string().contains("hurricane"));
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.city, "Seattle");
        assert_eq!(config.sky, SkySelection::Sunny);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["skycast"]);
        assert!(cli.city.is_none());
        assert!(cli.sky.is_none());
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["skycast"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.city, "Seattle");
        assert_eq!(config.sky, SkySelection::Sunny);
    }

    #[test]
    fn test_startup_config_from_cli_city_and_sky() {
        let cli = Cli::parse_from(["skycast", "--city", "Portland", "--sky", "rainy"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.city, "Portland");
        assert_eq!(config.sky, SkySelection::Rainy);
    }

    #[test]
    fn test_startup_config_from_cli_base_url_flag() {
        let cli = Cli::parse_from(["skycast", "--base-url", "https://proxy.example.com"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url, "https://proxy.example.com");
    }

    #[test]
    fn test_startup_config_from_cli_invalid_sky() {
        let cli = Cli::parse_from(["skycast", "--sky", "hurricane"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
    }
}
