//! Frame timing
//!
//! Converts wall-clock timestamps into deltas normalized to a 60 Hz frame
//! (1.0 = one frame). Deltas that are too large to be real gameplay time are
//! reported as skipped so the caller can render without updating.

use crate::consts::FRAME_MS;

/// Result of sampling the clock for a new frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameDelta {
    /// Normal frame: advance the simulation by this many frames
    Step(f32),
    /// Anomalous gap (e.g. tab was backgrounded): skip the update
    Skipped(f32),
}

/// Tracks the timestamp of the previous frame
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            max_delta,
        }
    }

    /// Sample the clock at `now_ms`. The first sample after creation/reset is a zero step.
    pub fn sample(&mut self, now_ms: f64) -> FrameDelta {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return FrameDelta::Step(0.0);
        };

        let delta = (((now_ms - last) / FRAME_MS as f64) as f32).max(0.0);
        if delta < self.max_delta {
            FrameDelta::Step(delta)
        } else {
            log::warn!("Large frame delta skipped: {:.1}", delta);
            FrameDelta::Skipped(delta)
        }
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
