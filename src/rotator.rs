//! Slide rotation state machine
//!
//! Three slides in a fixed cycle, `Weather → Hf → Utc → Weather`, each held
//! for [`SLIDE_DURATION`] seconds.

use crate::Timestamp;

/// Seconds each slide stays on screen.
pub const SLIDE_DURATION: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slide {
    Weather,
    Hf,
    Utc,
}

impl Slide {
    /// All slides in display order.
    pub const ALL: [Slide; 3] = [Slide::Weather, Slide::Hf, Slide::Utc];

    pub fn next(self) -> Slide {
        match self {
            Slide::Weather => Slide::Hf,
            Slide::Hf => Slide::Utc,
            Slide::Utc => Slide::Weather,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Slide::Weather => "weather",
            Slide::Hf => "hf",
            Slide::Utc => "utc",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SlideRotator {
    current: Slide,
    entered_at: Timestamp,
    duration: u64,
}

impl SlideRotator {
    /// Start on the weather slide at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self::with_duration(now, SLIDE_DURATION)
    }

    pub fn with_duration(now: Timestamp, duration: u64) -> Self {
        Self {
            current: Slide::Weather,
            entered_at: now,
            duration,
        }
    }

    pub fn current(&self) -> Slide {
        self.current
    }

    pub fn entered_at(&self) -> Timestamp {
        self.entered_at
    }

    /// Advance to the next slide if the current one has been shown long
    /// enough. Returns the newly entered slide, or `None` if nothing changed.
    pub fn advance(&mut self, now: Timestamp) -> Option<Slide> {
        if now.saturating_sub(self.entered_at) < self.duration {
            return None;
        }
        self.current = self.current.next();
        self.entered_at = now;
        Some(self.current)
    }
}
