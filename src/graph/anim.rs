//! src/graph/anim.rs
//!
//! Time-based animation clocks for the glowing indicator and the segment
//! highlight. Both take `Instant`s explicitly so frames can be replayed.

use std::time::{Duration, Instant};

use super::config::PlotConfig;

/// Glow timings captured when the indicator mounts. Later config changes do
/// not reach a running glow until the indicator is mounted again.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowAnimation {
    pub started: Instant,
    pub duration: Duration,
    pub delay: Duration,
    pub background_scale: f64,
}

/// Snapshot of a glow cycle at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowFrame {
    /// Ring radius as a multiple of the core radius.
    pub scale: f64,
    /// Ring intensity; 1 at the start of a glow, 0 when resting.
    pub intensity: f64,
}

impl GlowAnimation {
    pub fn mount(config: &PlotConfig, now: Instant) -> Self {
        Self {
            started: now,
            duration: config.glow_duration(),
            delay: config.glow_delay(),
            background_scale: config.glowing_indicator_background_scale.max(1.0),
        }
    }

    /// Progress through the current glow in [0, 1], or `None` while resting
    /// between glows.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let period = self.duration + self.delay;
        if self.duration.is_zero() || period.is_zero() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let into_cycle = elapsed.as_secs_f64() % period.as_secs_f64();
        let glow = self.duration.as_secs_f64();
        (into_cycle < glow).then(|| into_cycle / glow)
    }

    pub fn frame(&self, now: Instant) -> GlowFrame {
        match self.progress(now) {
            Some(p) => GlowFrame {
                scale: 1.0 + (self.background_scale - 1.0) * p,
                intensity: 1.0 - p,
            },
            None => GlowFrame {
                scale: 1.0,
                intensity: 0.0,
            },
        }
    }
}

/// Cross-fade between the previously and currently highlighted segment.
///
/// `None` means no segment is singled out and every segment is drawn at full
/// brightness.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentHighlight {
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub started: Instant,
}

impl SegmentHighlight {
    pub fn new(now: Instant) -> Self {
        Self {
            from: None,
            to: None,
            started: now,
        }
    }

    /// Retarget the highlight; a no-op when `segment` is already the target.
    pub fn retarget(&mut self, segment: Option<usize>, now: Instant) -> bool {
        if self.to == segment {
            return false;
        }
        self.from = self.to;
        self.to = segment;
        self.started = now;
        true
    }

    pub fn progress(&self, now: Instant, duration: Duration) -> f64 {
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Brightness weight of `segment` in [0, 1].
    pub fn weight(&self, segment: usize, now: Instant, duration: Duration) -> f64 {
        let lit = |target: Option<usize>| match target {
            None => 1.0,
            Some(s) if s == segment => 1.0,
            Some(_) => 0.0,
        };
        let source = lit(self.from);
        let target = lit(self.to);
        let p = self.progress(now, duration);
        source + (target - source) * p
    }
}
