//! Playback settings shared by every animation kind.

use serde::{Deserialize, Serialize};

use sparkle_tick::TaskBuilder;

use crate::error::{FxError, Result};
use crate::interp::Easing;

/// Timing and playback flags of an animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Number of interpolation steps; frame lists hold `duration + 1` entries.
    pub duration: u32,
    /// Playback speed. Values below 1 slow the animation down; values above
    /// 1 are clamped to one frame per heartbeat.
    pub speed: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Reverse direction on every loop boundary.
    pub reverse: bool,
    /// Reveal the point cloud progressively over one pass.
    pub progressive_draw: bool,
    pub easing: Easing,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duration: 40,
            speed: 1.0,
            looping: false,
            reverse: false,
            progressive_draw: false,
            easing: Easing::Linear,
        }
    }
}

impl PlaybackConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(FxError::degenerate("duration must be at least one step"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(FxError::config(
                "speed",
                format!("expected a positive finite value, got {}", self.speed),
            ));
        }
        Ok(())
    }

    /// Heartbeats per frame: `max(1, floor(1 / speed))`.
    #[inline]
    pub fn every(&self) -> u64 {
        ((1.0 / self.speed).floor() as u64).max(1)
    }

    /// Set the task rate from the speed. A one-shot animation ends after
    /// its last frame is drawn.
    pub(crate) fn apply_to(&self, task: &mut TaskBuilder, frame_count: usize) {
        let cfg = task.config_mut();
        cfg.every = self.every();
        if !self.looping {
            cfg.limit = (frame_count > 0).then_some(frame_count as u64);
            cfg.auto_stop = true;
        }
    }
}
