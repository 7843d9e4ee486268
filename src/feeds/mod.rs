//! # External Data Feeds
//!
//! The core only sees the [`DataFeeds`] trait: three async fetches that
//! return `Some` on success and `None` when the feed is unavailable. Why a
//! feed failed is logged here and never reaches the display.
//!
//! ## Sources
//! - **Weather**: OpenWeatherMap current conditions (JSON over HTTPS)
//! - **HF**: HamQSL solar XML (plain text, scraped by tag)
//! - **Time**: SNTP over UDP
//!
//! ## Error Handling
//! Each source reports a typed [`FeedError`] internally: transport failures,
//! non-200 statuses, undecodable payloads, missing credentials and malformed
//! NTP replies. [`HttpFeeds`] logs the error and collapses it to `None`.

pub mod hf;
pub mod ntp;
pub mod weather;

use crate::config::{Config, FeedConfig, LocationConfig};
use crate::{HfSnapshot, WeatherSnapshot};
use std::future::Future;
use thiserror::Error;

/// Errors that can occur while fetching or decoding a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed (network, TLS, or protocol error)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Weather feed cannot be queried without a key
    #[error("no OpenWeatherMap API key configured")]
    MissingApiKey,

    /// Response body did not match the expected JSON shape
    #[error("payload decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// UDP socket operations failed
    #[error("socket IO: {0}")]
    Io(#[from] std::io::Error),

    /// NTP reply was unusable
    #[error("NTP: {0}")]
    Ntp(&'static str),
}

/// The three feeds the display consumes.
pub trait DataFeeds {
    fn fetch_weather(&mut self) -> impl Future<Output = Option<WeatherSnapshot>>;

    fn fetch_hf(&mut self) -> impl Future<Output = Option<HfSnapshot>>;

    /// Current UTC as Unix seconds.
    fn fetch_utc(&mut self) -> impl Future<Output = Option<i64>>;
}

/// Network-backed feeds.
pub struct HttpFeeds {
    client: reqwest::Client,
    feeds: FeedConfig,
    location: LocationConfig,
}

impl HttpFeeds {
    pub fn new(config: &Config) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.feeds.fetch_timeout())
            .user_agent(concat!("rotating-display/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            feeds: config.feeds.clone(),
            location: config.location.clone(),
        })
    }
}

/// Log a failed fetch and turn the result into the trait's `Option`.
fn settle<T>(source: &str, result: Result<T, FeedError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!("{} feed unavailable: {}", source, error);
            None
        }
    }
}

impl DataFeeds for HttpFeeds {
    async fn fetch_weather(&mut self) -> Option<WeatherSnapshot> {
        let result = weather::fetch(&self.client, &self.feeds, &self.location).await;
        settle("weather", result)
    }

    async fn fetch_hf(&mut self) -> Option<HfSnapshot> {
        settle("hf", hf::fetch(&self.client, &self.feeds.hf_url).await)
    }

    async fn fetch_utc(&mut self) -> Option<i64> {
        settle("time", ntp::query(&self.feeds.ntp_server).await)
    }
}
