//! # Slide Composition
//!
//! Builds each full-screen slide from the cached feed values. Every slide
//! starts by clearing the panel to black, then draws a fixed layout on the
//! 320x240 logical canvas:
//!
//! - **Weather**: location (cyan), temperature (large, white), description
//!   coloured by [`classify::weather_color`]
//! - **HF**: solar flux, K/A indices and `10M 20M 40M` labels coloured by
//!   band condition, falling back to the overall [`classify::hf_quality`]
//! - **UTC**: UTC time and date plus local time at a fixed offset
//!
//! A feed that has never succeeded shows a yellow placeholder instead.

use crate::app::DisplayState;
use crate::cache::CachedEntry;
use crate::classify::{self, band_or_overall};
use crate::display::{Panel, PanelError, BLACK, CYAN, GREEN, WHITE, YELLOW};
use crate::renderer::Canvas;
use crate::rotator::Slide;
use crate::{HfSnapshot, TimeSnapshot, Timestamp, WeatherSnapshot};
use chrono::{DateTime, FixedOffset};

pub const WEATHER_LOADING: &str = "WEATHER LOADING...";
pub const HF_TITLE: &str = "HF CONDITIONS";
pub const HF_LOADING: &str = "HF LOADING...";
pub const HF_UNAVAILABLE: &str = "HF UNAVAILABLE";
pub const UTC_TITLE: &str = "UTC / LOCAL";
pub const UTC_SYNCING: &str = "SYNCING...";
const CLOCK_PLACEHOLDER: &str = "--:--:--";

/// Fixed slide inputs that do not come from feeds.
#[derive(Clone, Debug)]
pub struct SlideLabels {
    /// Location shown on the weather slide
    pub location: String,
    /// Local clock offset from UTC in seconds
    pub utc_offset_secs: i64,
}

/// Draw `slide` from `state` at loop time `now`.
pub fn draw_slide<P: Panel>(
    canvas: &mut Canvas<'_, P>,
    slide: Slide,
    state: &DisplayState,
    labels: &SlideLabels,
    now: Timestamp,
) -> Result<(), PanelError> {
    match slide {
        Slide::Weather => draw_weather_slide(canvas, &state.weather, &labels.location),
        Slide::Hf => draw_hf_slide(canvas, &state.hf),
        Slide::Utc => draw_utc_slide(canvas, &state.time, labels.utc_offset_secs, now),
    }
}

pub fn draw_weather_slide<P: Panel>(
    canvas: &mut Canvas<'_, P>,
    weather: &CachedEntry<WeatherSnapshot>,
    location: &str,
) -> Result<(), PanelError> {
    canvas.clear(BLACK)?;
    let Some(data) = weather.value() else {
        return canvas.draw_centered_text(WEATHER_LOADING, 120, YELLOW, 3);
    };

    canvas.draw_centered_text(&location.to_uppercase(), 20, CYAN, 2)?;

    let temperature = match data.temperature_f {
        Some(t) => format!("{t:.0} F"),
        None => "N/A".to_string(),
    };
    canvas.draw_centered_text(&temperature, 100, WHITE, 5)?;

    let description = data.description.to_uppercase();
    let color = classify::weather_color(&description);
    canvas.draw_centered_text(&description, 180, color, 2)
}

pub fn draw_hf_slide<P: Panel>(
    canvas: &mut Canvas<'_, P>,
    hf: &CachedEntry<HfSnapshot>,
) -> Result<(), PanelError> {
    canvas.clear(BLACK)?;
    canvas.draw_centered_text(HF_TITLE, 20, CYAN, 2)?;

    let Some(data) = hf.value() else {
        let placeholder = if hf.attempted() {
            HF_UNAVAILABLE
        } else {
            HF_LOADING
        };
        return canvas.draw_centered_text(placeholder, 120, YELLOW, 3);
    };

    canvas.draw_centered_text(&format!("SFI {}", data.solar_flux), 70, WHITE, 4)?;
    canvas.draw_centered_text(
        &format!("K {}   A {}", data.k_index, data.a_index),
        135,
        WHITE,
        3,
    )?;

    let overall = classify::hf_quality(&data.solar_flux, &data.k_index);
    let bands = [
        ("10M", 40, &data.band_10m),
        ("20M", 140, &data.band_20m),
        ("40M", 240, &data.band_40m),
    ];
    for (label, x, condition) in bands {
        canvas.draw_text(label, x, 190, band_or_overall(condition, overall), 3)?;
    }
    Ok(())
}

pub fn draw_utc_slide<P: Panel>(
    canvas: &mut Canvas<'_, P>,
    time: &CachedEntry<TimeSnapshot>,
    utc_offset_secs: i64,
    now: Timestamp,
) -> Result<(), PanelError> {
    canvas.clear(BLACK)?;
    canvas.draw_centered_text(UTC_TITLE, 10, CYAN, 2)?;

    let Some(sync) = time.value() else {
        return canvas.draw_centered_text(UTC_SYNCING, 120, YELLOW, 3);
    };

    let utc = DateTime::from_timestamp(sync.utc_at(now), 0);
    let (utc_time, utc_date) = match utc {
        Some(dt) => (
            dt.format("%H:%M:%S").to_string(),
            dt.format("%Y-%m-%d").to_string(),
        ),
        None => (CLOCK_PLACEHOLDER.to_string(), String::new()),
    };
    let local_time = utc
        .zip(
            i32::try_from(utc_offset_secs)
                .ok()
                .and_then(FixedOffset::east_opt),
        )
        .map(|(dt, offset)| dt.with_timezone(&offset).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| CLOCK_PLACEHOLDER.to_string());

    canvas.draw_centered_text(&utc_time, 60, WHITE, 4)?;
    canvas.draw_centered_text(&utc_date, 110, GREEN, 2)?;
    canvas.draw_centered_text(&format!("LOCAL {local_time}"), 170, WHITE, 3)
}
