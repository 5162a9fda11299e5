//! Stomp Core - gameplay simulation for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Step-driven simulation (player, enemies, blocks, camera)
//! - `tuning`: Data-driven game balance
//! - `score`: Score accumulator fed by the simulation

pub mod score;
pub mod sim;
pub mod tuning;

pub use score::Score;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (50 Hz)
    pub const PHYSICS_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the loop will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Smallest smoothing time / tween duration accepted
    pub const MIN_DURATION: f32 = 0.0001;
}

/// Critically damped spring toward `target`.
///
/// Keeps `velocity` between calls so motion stays continuous across frames.
/// Never overshoots the target.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(consts::MIN_DURATION);
    let omega = 2.0 / smooth_time;

    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp if we passed the target this frame
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}
