//! HamQSL solar XML
//!
//! The feed is a small XML document; only a handful of leaf values are
//! needed, so they are pulled out by tag search instead of a full parse.
//! Per-band conditions live in the `calculatedconditions` block:
//!
//! ```text
//! <band name="80m-40m" time="day">Fair</band>
//! <band name="30m-20m" time="day">Good</band>
//! <band name="12m-10m" time="day">Poor</band>
//! ```

use super::FeedError;
use crate::classify::hf_quality;
use crate::HfSnapshot;
use reqwest::StatusCode;

/// Band group reported for the 10 m slot.
const BAND_10M: &str = "12m-10m";
/// Band group reported for the 20 m slot.
const BAND_20M: &str = "30m-20m";
/// Band group reported for the 40 m slot.
const BAND_40M: &str = "80m-40m";

/// Trimmed text between the first `<tag>` and the following `</tag>`, or an
/// empty string if either marker is missing.
pub fn extract_field(raw: &str, tag: &str) -> String {
    let start_tag = format!("<{tag}>");
    let end_tag = format!("</{tag}>");
    between(raw, &start_tag, &end_tag)
}

/// Condition label for one band group and time of day (`"day"`/`"night"`),
/// or an empty string if the feed does not report it.
pub fn extract_band(raw: &str, name: &str, time: &str) -> String {
    let start_tag = format!("<band name=\"{name}\" time=\"{time}\">");
    between(raw, &start_tag, "</band>")
}

fn between(raw: &str, start: &str, end: &str) -> String {
    let Some(i) = raw.find(start) else {
        return String::new();
    };
    let rest = &raw[i + start.len()..];
    match rest.find(end) {
        Some(j) => rest[..j].trim().to_string(),
        None => String::new(),
    }
}

/// Pull the displayed indices out of a solar XML document.
pub fn parse_solar_xml(raw: &str) -> HfSnapshot {
    HfSnapshot {
        solar_flux: extract_field(raw, "solarflux"),
        k_index: extract_field(raw, "kindex"),
        a_index: extract_field(raw, "aindex"),
        band_10m: extract_band(raw, BAND_10M, "day"),
        band_20m: extract_band(raw, BAND_20M, "day"),
        band_40m: extract_band(raw, BAND_40M, "day"),
    }
}

pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<HfSnapshot, FeedError> {
    log::debug!("GET {}", url);
    let resp = client.get(url).send().await?;
    log::debug!("hf status: {}", resp.status());
    if resp.status() != StatusCode::OK {
        return Err(FeedError::Status(resp.status().as_u16()));
    }

    let text = resp.text().await?;
    let snapshot = parse_solar_xml(&text);
    log::info!(
        "hf: SFI {} K {} A {} ({}) bands {}/{}/{}",
        snapshot.solar_flux,
        snapshot.k_index,
        snapshot.a_index,
        hf_quality(&snapshot.solar_flux, &snapshot.k_index).label(),
        snapshot.band_10m,
        snapshot.band_20m,
        snapshot.band_40m
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<solar>
  <solardata>
    <source url="http://www.hamqsl.com/solar.html">N0NBH</source>
    <updated> 17 Oct 2026 1200 GMT</updated>
    <solarflux> 142</solarflux>
    <aindex> 8</aindex>
    <kindex> 2</kindex>
    <calculatedconditions>
      <band name="80m-40m" time="day">Fair</band>
      <band name="30m-20m" time="day">Good</band>
      <band name="17m-15m" time="day">Good</band>
      <band name="12m-10m" time="day">Poor</band>
      <band name="80m-40m" time="night">Good</band>
      <band name="30m-20m" time="night">Good</band>
      <band name="17m-15m" time="night">Poor</band>
      <band name="12m-10m" time="night">Poor</band>
    </calculatedconditions>
  </solardata>
</solar>"#;

    #[test]
    fn test_extract_field_trims() {
        assert_eq!(extract_field(SAMPLE, "solarflux"), "142");
        assert_eq!(extract_field(SAMPLE, "kindex"), "2");
        assert_eq!(extract_field(SAMPLE, "aindex"), "8");
    }

    #[test]
    fn test_extract_field_absent_or_unterminated() {
        assert_eq!(extract_field(SAMPLE, "xray"), "");
        assert_eq!(extract_field("<kindex>3", "kindex"), "");
        assert_eq!(extract_field("", "kindex"), "");
    }

    #[test]
    fn test_extract_band_day_and_night() {
        assert_eq!(extract_band(SAMPLE, "80m-40m", "day"), "Fair");
        assert_eq!(extract_band(SAMPLE, "80m-40m", "night"), "Good");
        assert_eq!(extract_band(SAMPLE, "160m", "day"), "");
    }

    #[test]
    fn test_parse_solar_xml() {
        let snapshot = parse_solar_xml(SAMPLE);
        assert_eq!(
            snapshot,
            HfSnapshot {
                solar_flux: "142".to_string(),
                k_index: "2".to_string(),
                a_index: "8".to_string(),
                band_10m: "Poor".to_string(),
                band_20m: "Good".to_string(),
                band_40m: "Fair".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_without_band_block() {
        let raw = "<solarflux>95</solarflux><kindex>4</kindex><aindex>20</aindex>";
        let snapshot = parse_solar_xml(raw);
        assert_eq!(snapshot.solar_flux, "95");
        assert!(snapshot.band_10m.is_empty());
        assert!(snapshot.band_20m.is_empty());
        assert!(snapshot.band_40m.is_empty());
    }
}
