//! Camera tracker
//!
//! Follows the player on both axes with critically damped smoothing.
//! Horizontally the camera is clamped between its starting x and the level
//! end; vertically it rests on a ground baseline and may only float a limited
//! distance above it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::smooth_damp;
use crate::tuning::{CameraTuning, ConfigError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraTracker {
    position: Vec2,
    initial_position: Vec2,
    /// Smoothing velocity caches
    x_vel: f32,
    y_vel: f32,
    start_x: f32,
    end_x: f32,
    x_offset: f32,
    baseline_y: f32,
    initial_baseline_y: f32,
    tuning: CameraTuning,
}

impl CameraTracker {
    /// Set up from the scene's initial framing.
    ///
    /// `level_end_x` is the level-end marker; without one the camera never
    /// scrolls right of where it starts.
    pub fn new(
        camera_position: Vec2,
        player_position: Vec2,
        viewport_half_width: f32,
        level_end_x: Option<f32>,
        tuning: &CameraTuning,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        if !viewport_half_width.is_finite() {
            return Err(ConfigError::NotFinite { field: "viewport_half_width" });
        }
        if viewport_half_width <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "viewport_half_width",
                value: viewport_half_width,
            });
        }
        if !camera_position.is_finite() || !player_position.is_finite() {
            return Err(ConfigError::NotFinite { field: "camera/player position" });
        }

        let start_x = camera_position.x;
        let mut end_x = level_end_x
            .filter(|x| x.is_finite())
            .map_or(start_x, |x| x - viewport_half_width);
        if end_x < start_x {
            log::warn!(
                "Level end ({}) is inside the first screen; camera will not scroll",
                end_x
            );
            end_x = start_x;
        }

        let x_offset = if tuning.x_offset.abs() <= f32::EPSILON {
            camera_position.x - player_position.x
        } else {
            tuning.x_offset
        };

        let baseline_y = camera_position.y.max(tuning.min_y);
        let position = Vec2::new(start_x, baseline_y);

        Ok(Self {
            position,
            initial_position: position,
            x_vel: 0.0,
            y_vel: 0.0,
            start_x,
            end_x,
            x_offset,
            baseline_y,
            initial_baseline_y: baseline_y,
            tuning: tuning.clone(),
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Horizontal clamp range
    pub fn bounds(&self) -> (f32, f32) {
        (self.start_x, self.end_x)
    }

    pub fn baseline_y(&self) -> f32 {
        self.baseline_y
    }

    /// Highest y the camera may reach with the current baseline
    pub fn max_y(&self) -> f32 {
        self.baseline_y + self.tuning.max_rise
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Move one render step toward the player
    pub fn follow(&mut self, player: Vec2, dt: f32) {
        if !player.is_finite() || !dt.is_finite() {
            return;
        }

        let target_x = (player.x + self.x_offset).clamp(self.start_x, self.end_x);
        let new_x = smooth_damp(
            self.position.x,
            target_x,
            &mut self.x_vel,
            self.tuning.x_smooth_time,
            dt,
        );

        let mut target_y = self.baseline_y;
        if player.y > self.baseline_y {
            target_y = player.y.min(self.max_y());
        }
        target_y = target_y.max(self.tuning.min_y);
        let new_y = smooth_damp(
            self.position.y,
            target_y,
            &mut self.y_vel,
            self.tuning.y_smooth_time,
            dt,
        );

        self.position = Vec2::new(
            new_x.clamp(self.start_x, self.end_x),
            new_y.clamp(self.tuning.min_y, self.max_y()),
        );
    }

    /// Move the ground baseline (call when the player lands)
    pub fn reanchor(&mut self, ground_y: f32) {
        if ground_y.is_finite() {
            self.baseline_y = ground_y.max(self.tuning.min_y);
        }
    }

    /// Back to the initial framing
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.x_vel = 0.0;
        self.y_vel = 0.0;
        self.baseline_y = self.initial_baseline_y;
    }
}
