//! # Control Loop
//!
//! [`App`] owns every piece of mutable state: the three feed caches, the
//! slide rotator, the panel, the feeds and the clock. One loop iteration is
//! strictly sequential:
//!
//! 1. **Refresh**: each feed that is due is fetched and awaited, bounded by
//!    the configured fetch timeout
//! 2. **Rotate**: if the current slide has been up for 10 seconds, advance
//! 3. **Draw**: only when the slide changed, compose it onto the panel
//! 4. **Sleep**: a fixed 200 ms pause
//!
//! Nothing runs concurrently, so no locking is needed. A slow feed still
//! delays rotation, but never by more than the fetch timeout.
//!
//! The clock is read afresh at every step rather than once per tick: a time
//! sync is stamped when the reply arrives, and rotation and drawing use the
//! time after all fetches have finished.

use crate::cache::CachedEntry;
use crate::config::Config;
use crate::display::Panel;
use crate::feeds::DataFeeds;
use crate::renderer::Canvas;
use crate::rotator::{Slide, SlideRotator};
use crate::scheduler::{maybe_refresh, HF_POLICY, TIME_POLICY, WEATHER_POLICY};
use crate::slides::{self, SlideLabels};
use crate::{HfSnapshot, TimeSnapshot, Timestamp, WeatherSnapshot};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Pause between loop iterations.
pub const LOOP_SLEEP: Duration = Duration::from_millis(200);

/// Feed caches owned by the control loop.
#[derive(Debug, Default)]
pub struct DisplayState {
    pub weather: CachedEntry<WeatherSnapshot>,
    pub hf: CachedEntry<HfSnapshot>,
    pub time: CachedEntry<TimeSnapshot>,
}

/// Source of loop time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic seconds since the clock was created, on the runtime's clock.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_secs()
    }
}

/// Await `fetch`, treating a timeout as an unavailable feed.
async fn bounded<T>(
    source: &str,
    limit: Duration,
    fetch: impl Future<Output = Option<T>>,
) -> Option<T> {
    match tokio::time::timeout(limit, fetch).await {
        Ok(outcome) => outcome,
        Err(_) => {
            log::warn!("{} fetch timed out after {:?}", source, limit);
            None
        }
    }
}

pub struct App<P, F, C> {
    panel: P,
    feeds: F,
    clock: C,
    state: DisplayState,
    rotator: SlideRotator,
    labels: SlideLabels,
    fetch_timeout: Duration,
}

impl<P: Panel, F: DataFeeds, C: Clock> App<P, F, C> {
    /// Build the loop state; the rotator starts on the weather slide now.
    pub fn new(panel: P, feeds: F, clock: C, config: &Config) -> Self {
        let rotator = SlideRotator::new(clock.now());
        Self {
            panel,
            feeds,
            clock,
            state: DisplayState::default(),
            rotator,
            labels: SlideLabels {
                location: config.location.name.clone(),
                utc_offset_secs: config.location.utc_offset_secs(),
            },
            fetch_timeout: config.feeds.fetch_timeout(),
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Current loop time.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn current_slide(&self) -> Slide {
        self.rotator.current()
    }

    /// Draw `slide` as of now. Panel errors are logged, not propagated.
    pub fn draw(&mut self, slide: Slide) {
        let now = self.clock.now();
        let mut canvas = Canvas::new(&mut self.panel);
        if let Err(e) = slides::draw_slide(&mut canvas, slide, &self.state, &self.labels, now) {
            log::warn!("drawing {} slide failed: {}", slide.name(), e);
        }
    }

    /// Draw the current slide.
    pub fn redraw(&mut self) {
        self.draw(self.rotator.current());
    }

    /// Fetch every feed that is due.
    pub async fn refresh(&mut self) {
        let limit = self.fetch_timeout;

        let now = self.clock.now();
        let feeds = &mut self.feeds;
        let attempted = maybe_refresh(
            &mut self.state.weather,
            WEATHER_POLICY,
            now,
            move || async move { bounded("weather", limit, feeds.fetch_weather()).await },
        )
        .await;
        if attempted {
            log::debug!("weather refresh attempted at {}", now);
        }

        let now = self.clock.now();
        let feeds = &mut self.feeds;
        let attempted = maybe_refresh(&mut self.state.hf, HF_POLICY, now, move || async move {
            bounded("hf", limit, feeds.fetch_hf()).await
        })
        .await;
        if attempted {
            log::debug!("hf refresh attempted at {}", now);
        }

        let now = self.clock.now();
        let feeds = &mut self.feeds;
        let clock = &self.clock;
        let attempted = maybe_refresh(&mut self.state.time, TIME_POLICY, now, move || async move {
            let unix_secs = bounded("time", limit, feeds.fetch_utc()).await?;
            // Stamp when the reply arrived, not when the request left
            Some(TimeSnapshot {
                unix_secs,
                synced_at: clock.now(),
            })
        })
        .await;
        if attempted {
            log::debug!("time sync attempted at {}", now);
        }
    }

    /// One loop iteration without the sleep. Returns the slide drawn, if any.
    pub async fn tick(&mut self) -> Option<Slide> {
        self.refresh().await;

        let slide = self.rotator.advance(self.clock.now())?;
        log::debug!("showing {} slide", slide.name());
        self.redraw();
        Some(slide)
    }

    /// Initial weather draw, then loop forever.
    pub async fn run(mut self) {
        log::info!("Rotating display starting...");
        self.redraw();

        loop {
            self.tick().await;
            tokio::time::sleep(LOOP_SLEEP).await;
        }
    }
}
