//! Data-driven game balance
//!
//! Every magic number the simulation uses lives here so a level can ship its
//! own JSON tuning file. Defaults match the shipped first level.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning validation / loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

/// Global physics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Gravity acceleration applied to dynamic bodies (units/s²)
    pub gravity: Vec2,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -30.0),
        }
    }
}

/// Player locomotion and lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal force per unit of axis input
    pub speed: f32,
    /// Velocity magnitude above which no more force is applied
    pub max_speed: f32,
    /// Jump impulse
    pub up_speed: f32,
    pub mass: f32,
    /// Upward kick applied when the player dies
    pub death_impulse: f32,
    /// Seconds after a stomp during which side contacts are harmless
    pub grace_duration: f32,
    /// Opposing horizontal speed needed for a facing flip to count as a skid
    pub skid_threshold: f32,
    /// Seconds between death and the game-over pause
    pub game_over_delay: f32,
    /// Where the player (re)spawns
    pub spawn: Vec2,
    /// Physics layers that count as walkable (ground, enemies, obstacles)
    pub walkable_layers: Vec<u8>,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 10.0,
            max_speed: 20.0,
            up_speed: 10.0,
            mass: 1.0,
            death_impulse: 25.0,
            grace_duration: 0.15,
            skid_threshold: 0.1,
            game_over_delay: 1.0,
            spawn: Vec2::new(-5.0, -1.0),
            walkable_layers: vec![3, 6, 7],
        }
    }
}

impl PlayerTuning {
    /// Bit mask of `walkable_layers`
    pub fn walkable_mask(&self) -> u32 {
        self.walkable_layers
            .iter()
            .filter(|&&layer| layer < 32)
            .fold(0, |mask, &layer| mask | (1 << layer))
    }
}

/// Collision classifier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StompTuning {
    /// Upward impulse after a successful stomp
    pub bounce_impulse: f32,
    /// Player vertical velocity above which a stomp is refused
    pub stomp_velocity_cutoff: f32,
    /// Contact normal Y above which a solid enemy contact is a safe top landing
    pub top_normal_threshold: f32,
}

impl Default for StompTuning {
    fn default() -> Self {
        Self {
            bounce_impulse: 10.0,
            stomp_velocity_cutoff: 0.0,
            top_normal_threshold: 0.45,
        }
    }
}

/// Enemy defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub points: u32,
    /// Delay between defeat and removal (lets the flatten anim play)
    pub removal_delay: f32,
    pub patrol_speed: f32,
    /// Half-width of the patrol span around the start position
    pub patrol_range: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            points: 100,
            removal_delay: 0.25,
            patrol_speed: 2.0,
            patrol_range: 3.0,
        }
    }
}

/// Reward ("coin") block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTuning {
    pub bump_impulse: f32,
    pub mass: f32,
    pub spawn_offset_y: f32,
    pub rise_height: f32,
    pub rise_time: f32,
    pub fall_time: f32,
    /// Contacts with a normal Y below minus this are ignored
    pub from_below_threshold: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
}

impl Default for BlockTuning {
    fn default() -> Self {
        Self {
            bump_impulse: 3.0,
            mass: 1.0,
            spawn_offset_y: 0.6,
            rise_height: 1.2,
            rise_time: 0.22,
            fall_time: 0.22,
            from_below_threshold: 0.5,
            spring_stiffness: 300.0,
            spring_damping: 20.0,
        }
    }
}

/// Camera follow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal offset from the player; 0 = keep the initial displacement
    pub x_offset: f32,
    pub x_smooth_time: f32,
    /// How far above the ground baseline the camera may float
    pub max_rise: f32,
    pub min_y: f32,
    pub y_smooth_time: f32,
    /// Re-anchor the baseline whenever the player lands
    pub reanchor_on_landing: bool,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            x_smooth_time: 0.08,
            max_rise: 3.0,
            min_y: 0.0,
            y_smooth_time: 0.12,
            reanchor_on_landing: true,
        }
    }
}

/// All tuning, grouped per component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub stomp: StompTuning,
    pub enemy: EnemyTuning,
    pub block: BlockTuning,
    pub camera: CameraTuning,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NotFinite { field })
    } else if value <= 0.0 {
        Err(ConfigError::NotPositive { field, value })
    } else {
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NotFinite { field })
    } else if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

impl CameraTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("camera.x_offset", self.x_offset)?;
        positive("camera.x_smooth_time", self.x_smooth_time)?;
        non_negative("camera.max_rise", self.max_rise)?;
        finite("camera.min_y", self.min_y)?;
        positive("camera.y_smooth_time", self.y_smooth_time)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning file. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every field the simulation divides by or compares against
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_core()?;
        self.camera.validate()
    }

    /// Everything except the camera. A bad camera section only disables the
    /// camera, so the simulation checks it separately.
    pub fn validate_core(&self) -> Result<(), ConfigError> {
        finite("world.gravity.x", self.world.gravity.x)?;
        finite("world.gravity.y", self.world.gravity.y)?;

        let p = &self.player;
        non_negative("player.speed", p.speed)?;
        positive("player.max_speed", p.max_speed)?;
        non_negative("player.up_speed", p.up_speed)?;
        positive("player.mass", p.mass)?;
        non_negative("player.death_impulse", p.death_impulse)?;
        non_negative("player.grace_duration", p.grace_duration)?;
        non_negative("player.skid_threshold", p.skid_threshold)?;
        non_negative("player.game_over_delay", p.game_over_delay)?;
        finite("player.spawn.x", p.spawn.x)?;
        finite("player.spawn.y", p.spawn.y)?;

        non_negative("stomp.bounce_impulse", self.stomp.bounce_impulse)?;
        finite("stomp.stomp_velocity_cutoff", self.stomp.stomp_velocity_cutoff)?;
        finite("stomp.top_normal_threshold", self.stomp.top_normal_threshold)?;

        non_negative("enemy.removal_delay", self.enemy.removal_delay)?;
        non_negative("enemy.patrol_speed", self.enemy.patrol_speed)?;
        non_negative("enemy.patrol_range", self.enemy.patrol_range)?;

        let b = &self.block;
        non_negative("block.bump_impulse", b.bump_impulse)?;
        positive("block.mass", b.mass)?;
        finite("block.spawn_offset_y", b.spawn_offset_y)?;
        finite("block.rise_height", b.rise_height)?;
        non_negative("block.rise_time", b.rise_time)?;
        non_negative("block.fall_time", b.fall_time)?;
        finite("block.from_below_threshold", b.from_below_threshold)?;
        non_negative("block.spring_stiffness", b.spring_stiffness)?;
        non_negative("block.spring_damping", b.spring_damping)
    }
}
