//! Timed sequences
//!
//! Small state records advanced by elapsed time from `step`/`render`.
//! Nothing here blocks; each call does one slice of work and returns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_DURATION;

/// One-shot countdown. Restarting supersedes the running countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    remaining: f32,
    running: bool,
}

impl Timer {
    pub fn started(duration: f32) -> Self {
        let mut timer = Self::default();
        timer.start(duration);
        timer
    }

    /// (Re)start from `duration` seconds
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
        self.running = false;
    }

    /// Time left is still positive
    pub fn is_active(&self) -> bool {
        self.running && self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        if self.running { self.remaining } else { 0.0 }
    }

    /// Advance by `dt`. Returns true exactly once, on the call that expires it.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            true
        } else {
            false
        }
    }
}

/// Phase of a reward token animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardPhase {
    Rising,
    Falling,
    Done,
}

/// Cosmetic rise-then-fall of a reward token.
///
/// Cannot be cancelled: once started it runs to `Done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSequence {
    origin: Vec2,
    peak: Vec2,
    rise_time: f32,
    fall_time: f32,
    phase: RewardPhase,
    /// 0..1 within the current phase
    progress: f32,
}

impl RewardSequence {
    pub fn new(origin: Vec2, rise_height: f32, rise_time: f32, fall_time: f32) -> Self {
        Self {
            origin,
            peak: origin + Vec2::Y * rise_height,
            rise_time: rise_time.max(MIN_DURATION),
            fall_time: fall_time.max(MIN_DURATION),
            phase: RewardPhase::Rising,
            progress: 0.0,
        }
    }

    pub fn phase(&self) -> RewardPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RewardPhase::Done
    }

    /// Where the token is drawn, `None` once it has been removed
    pub fn token_position(&self) -> Option<Vec2> {
        let t = self.progress.clamp(0.0, 1.0);
        match self.phase {
            RewardPhase::Rising => Some(self.origin.lerp(self.peak, t)),
            RewardPhase::Falling => Some(self.peak.lerp(self.origin, t)),
            RewardPhase::Done => None,
        }
    }

    /// Advance by `dt`; returns the phase after advancing.
    ///
    /// Leftover time at a phase boundary is dropped, so a huge `dt` still
    /// shows the peak for one frame before falling.
    pub fn advance(&mut self, dt: f32) -> RewardPhase {
        let dt = dt.max(0.0);
        match self.phase {
            RewardPhase::Rising => {
                self.progress += dt / self.rise_time;
                if self.progress >= 1.0 {
                    self.phase = RewardPhase::Falling;
                    self.progress = 0.0;
                }
            }
            RewardPhase::Falling => {
                self.progress += dt / self.fall_time;
                if self.progress >= 1.0 {
                    self.phase = RewardPhase::Done;
                    self.progress = 1.0;
                }
            }
            RewardPhase::Done => {}
        }
        self.phase
    }
}
