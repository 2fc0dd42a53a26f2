//! Redraw coalescing for the fixed-rate render loop.

use crate::operation::DrawingBuffer;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default render rate.
pub const DEFAULT_FPS: u32 = 60;

/// Drawing-surface capability implemented outside the core.
pub trait Renderer {
    /// Wipe the surface.
    fn clear(&mut self);

    /// Draw the whole buffer onto a cleared surface.
    fn redraw(&mut self, buffer: &DrawingBuffer);
}

/// Dirty flag consumed once per render tick.
///
/// Any number of [`mark_dirty`](Self::mark_dirty) calls between two ticks
/// produce a single redraw.
#[derive(Debug, Clone, Default)]
pub struct ViewInvalidator {
    dirty: bool,
}

impl ViewInvalidator {
    /// Create a clean invalidator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop the pending redraw.
    pub fn clear(&mut self) {
        self.dirty = false;
    }

    /// Redraw through `renderer` if dirty. Returns true if a redraw happened.
    pub fn tick(&mut self, renderer: &mut dyn Renderer, buffer: &DrawingBuffer) -> bool {
        if !self.dirty {
            return false;
        }
        renderer.clear();
        renderer.redraw(buffer);
        self.dirty = false;
        true
    }
}

/// Fixed tick cadence derived from a frames-per-second value.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_fps(DEFAULT_FPS)
    }
}

impl FrameClock {
    /// Create a clock ticking `fps` times per second (at least once).
    pub fn from_fps(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last_tick: None,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick is due at `now`.
    ///
    /// Missed ticks are not queued: after a long stall only one tick fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time left until the next tick is due at `now`.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.interval.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
