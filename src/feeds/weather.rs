//! OpenWeatherMap current conditions

use super::FeedError;
use crate::config::{FeedConfig, LocationConfig};
use crate::WeatherSnapshot;
use reqwest::StatusCode;
use serde::Deserialize;

// ── OWM JSON structures ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OwmCurrent {
    main: Option<OwmMain>,
    weather: Option<Vec<OwmWeather>>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: Option<String>,
}

impl From<OwmCurrent> for WeatherSnapshot {
    fn from(current: OwmCurrent) -> Self {
        let temperature_f = current.main.and_then(|m| m.temp).map(|t| t as f32);
        let description = current
            .weather
            .and_then(|list| list.into_iter().next())
            .and_then(|w| w.description)
            .unwrap_or_default();
        WeatherSnapshot {
            temperature_f,
            description,
        }
    }
}

/// Current-weather URL for the configured location, imperial units.
pub fn request_url(feeds: &FeedConfig, location: &LocationConfig) -> String {
    format!(
        "{}?zip={},{}&units=imperial&appid={}",
        feeds.weather_url, location.zip, location.country, feeds.owm_api_key
    )
}

/// Decode a current-weather JSON body.
pub fn parse_current(body: &str) -> Result<WeatherSnapshot, FeedError> {
    let current: OwmCurrent = serde_json::from_str(body)?;
    Ok(current.into())
}

pub async fn fetch(
    client: &reqwest::Client,
    feeds: &FeedConfig,
    location: &LocationConfig,
) -> Result<WeatherSnapshot, FeedError> {
    if feeds.owm_api_key.trim().is_empty() {
        return Err(FeedError::MissingApiKey);
    }

    let url = request_url(feeds, location);
    log::debug!("GET {}", feeds.weather_url);
    let resp = client.get(&url).send().await?;
    log::debug!("weather status: {}", resp.status());
    if resp.status() != StatusCode::OK {
        return Err(FeedError::Status(resp.status().as_u16()));
    }

    let body = resp.text().await?;
    let snapshot = parse_current(&body)?;
    log::info!(
        "weather: {:?} F, {:?}",
        snapshot.temperature_f,
        snapshot.description
    );
    Ok(snapshot)
}
