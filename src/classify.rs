//! Feed value classification
//!
//! Pure, total functions that turn raw feed strings into display colours.
//! None of them can fail: unparseable numbers count as zero and unknown
//! labels fall back to white.

use crate::display::{CYAN, GREEN, RED, WHITE, YELLOW};
use embedded_graphics::pixelcolor::Rgb565;

/// Severe weather; checked first.
const SEVERE_KEYWORDS: &[&str] = &[
    "thunderstorm",
    "tornado",
    "hurricane",
    "blizzard",
    "freezing",
    "ice",
    "sleet",
    "storm",
    "squall",
];

/// Precipitation, obscuration and mixed cloud cover.
const MODERATE_KEYWORDS: &[&str] = &[
    "heavy rain",
    "rain",
    "showers",
    "drizzle",
    "snow",
    "overcast",
    "fog",
    "mist",
    "haze",
    "smoke",
    "scattered",
    "partly",
    "few clouds",
    "broken clouds",
];

const FAVORABLE_KEYWORDS: &[&str] = &["clear", "sun", "fair"];

/// Colour for a weather description: RED for severe, YELLOW for moderate,
/// GREEN for favourable, WHITE otherwise.
pub fn weather_color(description: &str) -> Rgb565 {
    let d = description.trim().to_lowercase();
    if d.is_empty() {
        return WHITE;
    }
    let matches = |keywords: &[&str]| keywords.iter().any(|k| d.contains(k));

    if matches(SEVERE_KEYWORDS) {
        RED
    } else if matches(MODERATE_KEYWORDS) {
        YELLOW
    } else if matches(FAVORABLE_KEYWORDS) {
        GREEN
    } else {
        WHITE
    }
}

/// Overall HF band quality derived from solar flux and K-index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HfQuality {
    Poor,
    Fair,
    Good,
}

impl HfQuality {
    pub fn label(self) -> &'static str {
        match self {
            HfQuality::Poor => "POOR",
            HfQuality::Fair => "FAIR",
            HfQuality::Good => "GOOD",
        }
    }

    pub fn color(self) -> Rgb565 {
        match self {
            HfQuality::Poor => RED,
            HfQuality::Fair => YELLOW,
            HfQuality::Good => GREEN,
        }
    }
}

/// Parse a feed index, treating anything non-numeric as zero.
fn parse_index(raw: &str) -> f32 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Classify HF conditions:
/// - POOR when `k >= 5` or `flux < 80`
/// - GOOD when `k <= 2` and `flux >= 120`
/// - FAIR otherwise
pub fn hf_quality(solar_flux: &str, k_index: &str) -> HfQuality {
    let flux = parse_index(solar_flux);
    let k = parse_index(k_index);

    if k >= 5.0 || flux < 80.0 {
        HfQuality::Poor
    } else if k <= 2.0 && flux >= 120.0 {
        HfQuality::Good
    } else {
        HfQuality::Fair
    }
}

/// Colour for a band condition label. Matching is a case-insensitive prefix
/// test, so "Poorish" counts as poor. Fair is shown in cyan, the closest
/// palette entry to blue.
pub fn band_color(label: &str) -> Rgb565 {
    let l = label.trim().to_lowercase();
    if l.starts_with("poor") {
        RED
    } else if l.starts_with("fair") {
        CYAN
    } else if l.starts_with("good") {
        GREEN
    } else {
        WHITE
    }
}

/// Colour for one band: its own label when present, otherwise the overall
/// quality colour.
pub fn band_or_overall(label: &str, overall: HfQuality) -> Rgb565 {
    if label.is_empty() {
        overall.color()
    } else {
        band_color(label)
    }
}
