//! Simulation state
//!
//! Owns every controller and the event queue. The per-step logic lives in
//! `tick.rs`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::RewardBlock;
use super::camera::CameraTracker;
use super::enemy::Enemy;
use super::events::GameEvent;
use super::player::Player;
use crate::score::Score;
use crate::tuning::{ConfigError, Tuning};

/// Stable identifier for enemies and blocks
pub type EntityId = u32;

/// Level layout handed over at scene setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSetup {
    /// Where the camera starts (also its leftmost x)
    pub camera_position: Vec2,
    /// Half the visible world width
    pub viewport_half_width: f32,
    /// Level-end marker x
    pub level_end_x: Option<f32>,
    /// Enemy start positions
    pub enemies: Vec<Vec2>,
    /// Reward block positions
    pub blocks: Vec<Vec2>,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            camera_position: Vec2::ZERO,
            viewport_half_width: 8.0,
            level_end_x: None,
            enemies: Vec::new(),
            blocks: Vec::new(),
        }
    }
}

/// The whole simulated world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub(super) tuning: Tuning,
    pub(super) player: Player,
    /// Sorted by id
    pub(super) enemies: Vec<Enemy>,
    /// Sorted by id
    pub(super) blocks: Vec<RewardBlock>,
    /// `None` when the camera was misconfigured
    pub(super) camera: Option<CameraTracker>,
    pub(super) score: Score,
    /// Set on game over; the owning loop stops stepping while set
    pub(super) paused: bool,
    /// Physics steps taken
    pub(super) time_steps: u64,
    #[serde(skip)]
    pub(super) events: Vec<GameEvent>,
    next_id: EntityId,
}

impl Simulation {
    /// Build a world from tuning and layout.
    ///
    /// Bad gameplay tuning is an error. A bad camera setup only disables the
    /// camera.
    pub fn new(tuning: Tuning, scene: &SceneSetup) -> Result<Self, ConfigError> {
        tuning.validate_core()?;

        let player = Player::new(tuning.player.spawn, tuning.player.mass);

        let camera = match CameraTracker::new(
            scene.camera_position,
            player.position(),
            scene.viewport_half_width,
            scene.level_end_x,
            &tuning.camera,
        ) {
            Ok(camera) => Some(camera),
            Err(e) => {
                log::error!("Camera disabled: {}", e);
                None
            }
        };

        let mut sim = Self {
            tuning,
            player,
            enemies: Vec::with_capacity(scene.enemies.len()),
            blocks: Vec::with_capacity(scene.blocks.len()),
            camera,
            score: Score::new(),
            paused: false,
            time_steps: 0,
            events: Vec::new(),
            next_id: 1,
        };

        for &position in &scene.enemies {
            sim.spawn_enemy(position);
        }
        for &position in &scene.blocks {
            sim.spawn_block(position);
        }

        log::info!(
            "Simulation ready: {} enemies, {} blocks, camera {}",
            sim.enemies.len(),
            sim.blocks.len(),
            if sim.camera.is_some() { "on" } else { "off" }
        );
        Ok(sim)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, position: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, position, &self.tuning.enemy));
        id
    }

    pub fn spawn_block(&mut self, position: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.blocks.push(RewardBlock::new(id, position, &self.tuning.block));
        id
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// For the physics layer to write back resolved positions/velocities
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn blocks(&self) -> &[RewardBlock] {
        &self.blocks
    }

    pub fn block(&self, id: EntityId) -> Option<&RewardBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn camera(&self) -> Option<&CameraTracker> {
        self.camera.as_ref()
    }

    /// Explicit re-anchor hook (no-op without a camera)
    pub fn reanchor_camera(&mut self, ground_y: f32) {
        if let Some(camera) = self.camera.as_mut() {
            camera.reanchor(ground_y);
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause/resume from the outside (menus)
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn time_steps(&self) -> u64 {
        self.time_steps
    }

    /// Hand queued events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.blocks.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::CameraTuning;

    fn scene() -> SceneSetup {
        SceneSetup {
            level_end_x: Some(60.0),
            enemies: vec![Vec2::new(5.0, -1.0), Vec2::new(12.0, -1.0)],
            blocks: vec![Vec2::new(2.0, 2.5)],
            ..Default::default()
        }
    }

    #[test]
    fn test_new_spawns_entities_with_unique_ids() {
        let sim = Simulation::new(Tuning::default(), &scene()).unwrap();
        assert_eq!(sim.enemies().len(), 2);
        assert_eq!(sim.blocks().len(), 1);
        let mut ids: Vec<_> = sim.enemies().iter().map(|e| e.id).collect();
        ids.extend(sim.blocks().iter().map(|b| b.id));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(sim.camera().is_some());
        assert_eq!(sim.player().position(), Vec2::new(-5.0, -1.0));
    }

    #[test]
    fn test_bad_camera_disables_camera_only() {
        let mut tuning = Tuning::default();
        tuning.camera = CameraTuning {
            y_smooth_time: -1.0,
            ..Default::default()
        };
        let sim = Simulation::new(tuning, &scene()).unwrap();
        assert!(sim.camera().is_none());
        assert_eq!(sim.enemies().len(), 2);
    }

    #[test]
    fn test_bad_gameplay_tuning_is_an_error() {
        let mut tuning = Tuning::default();
        tuning.player.max_speed = 0.0;
        assert!(Simulation::new(tuning, &scene()).is_err());
    }

    #[test]
    fn test_scene_from_json() {
        let scene: SceneSetup = serde_json::from_str(
            r#"{ "level_end_x": 80.0, "enemies": [[4.0, -1.0]] }"#,
        )
        .unwrap();
        assert_eq!(scene.viewport_half_width, 8.0);
        assert_eq!(scene.enemies, vec![Vec2::new(4.0, -1.0)]);
    }
}
