//! # Display Scenarios
//!
//! Runs the control loop against scripted feeds and a frame buffer, then
//! compares what ended up on the panel with frames composed by hand.

use embedded_graphics::pixelcolor::Rgb565;
use rotating_display_lib::app::{App, Clock, SystemClock};
use rotating_display_lib::config::Config;
use rotating_display_lib::display::{BLACK, CYAN, GREEN, RED, WHITE, YELLOW};
use rotating_display_lib::feeds::DataFeeds;
use rotating_display_lib::framebuffer::FrameBuffer;
use rotating_display_lib::renderer::Canvas;
use rotating_display_lib::rotator::Slide;
use rotating_display_lib::slides::{HF_TITLE, UTC_SYNCING, UTC_TITLE, WEATHER_LOADING};
use rotating_display_lib::{HfSnapshot, Timestamp, WeatherSnapshot};
use std::cell::Cell;
use std::collections::VecDeque;
use std::future::{ready, Future};
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;

/// Clock set by hand; clones share one reading.
#[derive(Clone, Default)]
struct SteppedClock(Rc<Cell<Timestamp>>);

impl Clock for SteppedClock {
    fn now(&self) -> Timestamp {
        self.0.get()
    }
}

/// Feeds that replay queued outcomes; an empty queue means "unavailable".
#[derive(Default)]
struct ScriptedFeeds {
    weather: VecDeque<Option<WeatherSnapshot>>,
    hf: VecDeque<Option<HfSnapshot>>,
    utc: VecDeque<Option<i64>>,
}

impl DataFeeds for ScriptedFeeds {
    fn fetch_weather(&mut self) -> impl Future<Output = Option<WeatherSnapshot>> {
        ready(self.weather.pop_front().flatten())
    }

    fn fetch_hf(&mut self) -> impl Future<Output = Option<HfSnapshot>> {
        ready(self.hf.pop_front().flatten())
    }

    fn fetch_utc(&mut self) -> impl Future<Output = Option<i64>> {
        ready(self.utc.pop_front().flatten())
    }
}

/// Feeds that take real (runtime) time to answer. The time server reports
/// `epoch` plus the time elapsed when its reply is sent.
struct TimedFeeds {
    weather_delay: Duration,
    hf_delay: Duration,
    epoch: i64,
    start: Instant,
}

impl DataFeeds for TimedFeeds {
    async fn fetch_weather(&mut self) -> Option<WeatherSnapshot> {
        tokio::time::sleep(self.weather_delay).await;
        None
    }

    async fn fetch_hf(&mut self) -> Option<HfSnapshot> {
        tokio::time::sleep(self.hf_delay).await;
        None
    }

    async fn fetch_utc(&mut self) -> Option<i64> {
        Some(self.epoch + self.start.elapsed().as_secs() as i64)
    }
}

/// Text drawn on a black frame: (text, left edge or centred, y, colour, scale).
fn frame(items: &[(&str, Option<i32>, i32, Rgb565, i32)]) -> FrameBuffer {
    let mut fb = FrameBuffer::new();
    let mut canvas = Canvas::new(&mut fb);
    canvas.clear(BLACK).unwrap();
    for &(text, x, y, color, scale) in items {
        match x {
            Some(x) => canvas.draw_text(text, x, y, color, scale).unwrap(),
            None => canvas.draw_centered_text(text, y, color, scale).unwrap(),
        }
    }
    fb
}

fn assert_same_frame(actual: &FrameBuffer, expected: &FrameBuffer) {
    for x in 0..240u16 {
        for y in 0..320u16 {
            assert_eq!(
                actual.pixel(x, y),
                expected.pixel(x, y),
                "pixel mismatch at physical ({}, {})",
                x,
                y
            );
        }
    }
}

/// Loop under test plus the clock that drives it.
struct Harness {
    app: App<FrameBuffer, ScriptedFeeds, SteppedClock>,
    clock: SteppedClock,
}

impl Harness {
    fn new(feeds: ScriptedFeeds) -> Self {
        let clock = SteppedClock::default();
        let app = App::new(FrameBuffer::new(), feeds, clock.clone(), &Config::default());
        Self { app, clock }
    }

    async fn tick(&mut self, now: Timestamp) -> Option<Slide> {
        self.clock.0.set(now);
        self.app.tick().await
    }
}

/// Weather fails at start, succeeds on the next scheduled attempt, and the
/// new reading shows up the next time the weather slide comes around.
#[tokio::test]
async fn weather_recovers_after_failed_first_fetch() {
    let mut feeds = ScriptedFeeds::default();
    feeds.weather = VecDeque::from([
        None,
        Some(WeatherSnapshot {
            temperature_f: Some(72.0),
            description: "clear sky".to_string(),
        }),
    ]);
    let mut h = Harness::new(feeds);

    h.app.redraw();
    assert_eq!(h.tick(0).await, None);
    assert_same_frame(
        h.app.panel(),
        &frame(&[(WEATHER_LOADING, None, 120, YELLOW, 3)]),
    );
    assert!(h.app.state().weather.attempted());
    assert!(!h.app.state().weather.has_value());

    // Still inside the 600 s interval: no retry
    h.tick(599).await;
    assert!(!h.app.state().weather.has_value());

    assert_eq!(h.tick(601).await, Some(Slide::Hf));
    assert_eq!(h.app.state().weather.last_fetch(), Some(601));
    assert_eq!(h.tick(611).await, Some(Slide::Utc));
    assert_eq!(h.tick(621).await, Some(Slide::Weather));

    assert_same_frame(
        h.app.panel(),
        &frame(&[
            ("JEFFERSON HILLS, PA", None, 20, CYAN, 2),
            ("72 F", None, 100, WHITE, 5),
            ("CLEAR SKY", None, 180, GREEN, 2),
        ]),
    );
}

/// A cached reading survives a later failure.
#[tokio::test]
async fn stale_weather_is_kept_when_refresh_fails() {
    let mut feeds = ScriptedFeeds::default();
    feeds.weather = VecDeque::from([
        Some(WeatherSnapshot {
            temperature_f: Some(40.4),
            description: "thunderstorm".to_string(),
        }),
        None,
    ]);
    let mut h = Harness::new(feeds);

    h.tick(0).await;
    h.tick(600).await;
    assert_eq!(h.app.state().weather.last_fetch(), Some(600));
    let kept = h.app.state().weather.value().unwrap();
    assert_eq!(kept.temperature_f, Some(40.4));

    // 600 is a transition to HF; walk round to weather again
    h.tick(610).await;
    assert_eq!(h.tick(620).await, Some(Slide::Weather));
    assert_same_frame(
        h.app.panel(),
        &frame(&[
            ("JEFFERSON HILLS, PA", None, 20, CYAN, 2),
            ("40 F", None, 100, WHITE, 5),
            ("THUNDERSTORM", None, 180, RED, 2),
        ]),
    );
}

#[tokio::test]
async fn hf_slide_shows_indices_and_band_colors() {
    let mut feeds = ScriptedFeeds::default();
    feeds.hf = VecDeque::from([Some(HfSnapshot {
        solar_flux: "142".to_string(),
        k_index: "2".to_string(),
        a_index: "8".to_string(),
        band_10m: "Poor".to_string(),
        band_20m: "Good".to_string(),
        band_40m: String::new(),
    })]);
    let mut h = Harness::new(feeds);

    h.tick(0).await;
    assert_eq!(h.tick(10).await, Some(Slide::Hf));

    // SFI 142 with K 2 is good overall, so the unreported 40 m band is green
    assert_same_frame(
        h.app.panel(),
        &frame(&[
            (HF_TITLE, None, 20, CYAN, 2),
            ("SFI 142", None, 70, WHITE, 4),
            ("K 2   A 8", None, 135, WHITE, 3),
            ("10M", Some(40), 190, RED, 3),
            ("20M", Some(140), 190, GREEN, 3),
            ("40M", Some(240), 190, GREEN, 3),
        ]),
    );
}

#[tokio::test]
async fn clock_syncs_after_backoff_and_runs_from_loop_time() {
    let mut feeds = ScriptedFeeds::default();
    // 2026-10-17T12:00:00Z
    feeds.utc = VecDeque::from([None, Some(1_792_238_400)]);
    let mut h = Harness::new(feeds);

    h.tick(0).await;
    h.tick(10).await;
    assert_eq!(h.tick(20).await, Some(Slide::Utc));
    assert_same_frame(
        h.app.panel(),
        &frame(&[
            (UTC_TITLE, None, 10, CYAN, 2),
            (UTC_SYNCING, None, 120, YELLOW, 3),
        ]),
    );

    // Backoff retry at 30 s succeeds; 20 s later the clock has moved on
    h.tick(30).await;
    h.tick(40).await;
    assert_eq!(h.tick(50).await, Some(Slide::Utc));
    assert_same_frame(
        h.app.panel(),
        &frame(&[
            (UTC_TITLE, None, 10, CYAN, 2),
            ("12:00:20", None, 60, WHITE, 4),
            ("2026-10-17", None, 110, GREEN, 2),
            ("LOCAL 07:00:20", None, 170, WHITE, 3),
        ]),
    );
}

/// Slow weather and HF fetches run before the time sync in the same tick;
/// the clock on screen must still show true UTC.
#[tokio::test(start_paused = true)]
async fn utc_slide_shows_true_time_after_slow_fetches() {
    let feeds = TimedFeeds {
        weather_delay: Duration::from_secs(5),
        hf_delay: Duration::from_secs(3),
        // 2026-10-17T12:00:00Z
        epoch: 1_792_238_400,
        start: Instant::now(),
    };
    let mut app = App::new(
        FrameBuffer::new(),
        feeds,
        SystemClock::new(),
        &Config::default(),
    );

    app.redraw();
    assert_eq!(app.tick().await, None);
    assert_eq!(app.now(), 8);
    assert_eq!(app.state().time.value().unwrap().synced_at, 8);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(app.tick().await, Some(Slide::Hf));
    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(app.tick().await, Some(Slide::Utc));

    assert_same_frame(
        app.panel(),
        &frame(&[
            (UTC_TITLE, None, 10, CYAN, 2),
            ("12:00:20", None, 60, WHITE, 4),
            ("2026-10-17", None, 110, GREEN, 2),
            ("LOCAL 07:00:20", None, 170, WHITE, 3),
        ]),
    );
}
