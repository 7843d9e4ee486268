//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! display-config.toml file. It covers the location shown on the weather
//! slide, the fixed UTC offset for the local clock, feed endpoints and the
//! panel wiring used by the `hardware` feature.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "display-config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("config encode: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Application configuration loaded from display-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Location label and time zone offset
    pub location: LocationConfig,
    /// Feed endpoints and credentials
    pub feeds: FeedConfig,
    /// Panel wiring (only read with the `hardware` feature)
    pub hardware: HardwareConfig,
}

/// Where the display lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Label drawn at the top of the weather slide
    pub name: String,
    /// Postal code sent to the weather feed
    pub zip: String,
    /// ISO country code paired with `zip`
    pub country: String,
    /// Fixed local offset from UTC in hours (e.g. -5 for EST)
    pub utc_offset_hours: f32,
}

/// External feed settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// OpenWeatherMap API key; the weather feed stays unavailable while empty
    pub owm_api_key: String,
    /// OpenWeatherMap current-weather endpoint
    pub weather_url: String,
    /// HamQSL solar XML endpoint
    pub hf_url: String,
    /// SNTP server as host:port
    pub ntp_server: String,
    /// Upper bound on any single fetch, in seconds
    pub fetch_timeout_secs: u64,
}

/// SPI panel wiring for the ILI9341
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// spidev device node
    pub spi_device: String,
    /// Data/command GPIO
    pub dc_pin: u64,
    /// Reset GPIO
    pub rst_pin: u64,
    /// Backlight GPIO
    pub backlight_pin: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                name: "Jefferson Hills, PA".to_string(),
                zip: "15025".to_string(),
                country: "US".to_string(),
                utc_offset_hours: -5.0,
            },
            feeds: FeedConfig {
                owm_api_key: String::new(),
                weather_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
                hf_url: "http://www.hamqsl.com/solarxml.php".to_string(),
                ntp_server: "pool.ntp.org:123".to_string(),
                fetch_timeout_secs: 15,
            },
            hardware: HardwareConfig {
                spi_device: "/dev/spidev0.0".to_string(),
                dc_pin: 25,
                rst_pin: 27,
                backlight_pin: 18,
            },
        }
    }
}

impl FeedConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}

impl LocationConfig {
    /// UTC offset in whole seconds.
    pub fn utc_offset_secs(&self) -> i64 {
        (f64::from(self.utc_offset_hours) * 3600.0).round() as i64
    }
}

impl Config {
    /// Load configuration from display-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration for {}", config.location.name);
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format: {}", e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Save current configuration to display-config.toml
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(CONFIG_FILE)
    }
}
