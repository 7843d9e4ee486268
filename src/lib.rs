//! # Rotating Display Core Library
//!
//! This library drives a small 240x320 TFT panel that cycles through three
//! informational slides: local weather, HF radio propagation and a UTC/local
//! clock. Each slide is backed by its own external feed, refreshed on its own
//! cadence, and the last good value of every feed is kept on screen when the
//! network misbehaves.
//!
//! ## Design Philosophy
//!
//! ### Never Blank the Screen
//! - **Last-good caching**: a [`cache::CachedEntry`] only ever moves from
//!   "nothing" to "something newer"; a failed fetch never clears it
//! - **Placeholders**: until a feed has succeeded once, its slide shows a
//!   `LOADING...` / `UNAVAILABLE` / `SYNCING...` banner instead of stale zeros
//! - **Interval gating**: the [`scheduler`] is the only retry mechanism, so an
//!   outage costs one attempt per interval rather than a retry storm
//!
//! ### Rendering Pipeline
//! The renderer draws into a 320x240 *logical* landscape canvas. Every pixel
//! is rotated 90° clockwise into the panel's 240x320 *physical* portrait
//! space by [`geometry::to_physical`] and written individually through the
//! [`display::Panel`] trait. Text uses a 5x7 bitmap font ([`font`]) scaled by
//! integer factors.
//!
//! ### Data Flow
//! 1. **Refresh**: each tick, the scheduler decides per feed whether a fetch is due
//! 2. **Rotate**: every 10 seconds the rotator advances Weather → HF → UTC
//! 3. **Compose**: the new slide is drawn from the caches and the [`classify`] colours
//!
//! ## Core Types
//!
//! - [`WeatherSnapshot`]: temperature and description from the weather feed
//! - [`HfSnapshot`]: solar flux, K/A indices and per-band condition labels
//! - [`TimeSnapshot`]: a UTC sync point used to derive the live clock

use serde::{Deserialize, Serialize};

// Module declarations
pub mod app;
pub mod cache;
pub mod classify;
pub mod config;
pub mod display;
pub mod feeds;
pub mod font;
pub mod framebuffer;
pub mod geometry;
#[cfg(feature = "hardware")]
pub mod ili9341;
pub mod renderer;
pub mod rotator;
pub mod scheduler;
pub mod slides;

/// Whole seconds on the control loop's monotonic clock.
pub type Timestamp = u64;

/// Current conditions reported by the weather feed.
///
/// # Example
/// ```
/// use rotating_display_lib::WeatherSnapshot;
///
/// let snapshot = WeatherSnapshot {
///     temperature_f: Some(72.0),
///     description: "clear sky".to_string(),
/// };
/// assert!(snapshot.temperature_f.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in degrees Fahrenheit, if the feed reported one
    pub temperature_f: Option<f32>,
    /// Free-form description such as "light rain"
    pub description: String,
}

/// HF propagation indices as reported by the propagation feed.
///
/// All fields are kept as the raw strings the feed returned; they are shown
/// verbatim and only parsed when classified. Band fields are empty when the
/// feed did not report a condition for that band.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HfSnapshot {
    pub solar_flux: String,
    pub k_index: String,
    pub a_index: String,
    pub band_10m: String,
    pub band_20m: String,
    pub band_40m: String,
}

/// A successful time sync: UTC seconds paired with the loop clock reading
/// taken at the same moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    /// Unix timestamp (UTC seconds) returned by the time feed
    pub unix_secs: i64,
    /// Loop clock reading when the sync completed
    pub synced_at: Timestamp,
}

impl TimeSnapshot {
    /// UTC Unix seconds at loop time `now`, advancing from the sync point.
    ///
    /// ```
    /// use rotating_display_lib::TimeSnapshot;
    ///
    /// let sync = TimeSnapshot { unix_secs: 1_700_000_000, synced_at: 50 };
    /// assert_eq!(sync.utc_at(65), 1_700_000_015);
    /// ```
    pub fn utc_at(&self, now: Timestamp) -> i64 {
        let elapsed = now.saturating_sub(self.synced_at);
        self.unix_secs
            .saturating_add(i64::try_from(elapsed).unwrap_or(i64::MAX))
    }
}
