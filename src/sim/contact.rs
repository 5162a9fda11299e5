//! Contact records from the physics layer
//!
//! One `ContactEvent` is delivered per receiving collider per physical
//! contact per step. Normals point from the other collider toward the
//! receiver, so a player landing on an enemy sees normals with positive Y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Physics layer enemies live on
pub const ENEMY_LAYER: u8 = 6;
/// Physics layer reward blocks live on
pub const BLOCK_LAYER: u8 = 7;

/// Tag on static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceTag {
    Ground,
    Obstacle,
    Untagged,
}

/// Identity of one side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collider {
    /// Player's solid body
    Player,
    /// Trigger region under the player's feet
    StompSensor,
    Enemy(EntityId),
    Block(EntityId),
    /// Level geometry on a physics layer
    Terrain { tag: SurfaceTag, layer: u8 },
}

/// Solid contacts push bodies apart; sensor contacts only report overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Solid,
    Sensor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEvent {
    pub receiver: Collider,
    pub other: Collider,
    pub kind: ContactKind,
    /// Per-contact-point surface normals (toward the receiver)
    pub normals: Vec<Vec2>,
    /// Passed through for presentation; no gameplay rule reads it
    pub relative_velocity: Vec2,
}

impl ContactEvent {
    pub fn solid(receiver: Collider, other: Collider, normals: Vec<Vec2>) -> Self {
        Self {
            receiver,
            other,
            kind: ContactKind::Solid,
            normals,
            relative_velocity: Vec2::ZERO,
        }
    }

    pub fn sensor(receiver: Collider, other: Collider) -> Self {
        Self {
            receiver,
            other,
            kind: ContactKind::Sensor,
            normals: Vec::new(),
            relative_velocity: Vec2::ZERO,
        }
    }

    pub fn with_relative_velocity(mut self, relative_velocity: Vec2) -> Self {
        self.relative_velocity = relative_velocity;
        self
    }
}

/// Outcome of a solid player-vs-enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Player came down on top; harmless
    TopLanding,
    /// Side or bottom hit
    Lethal,
}

/// Classify a solid player-vs-enemy contact from the player's normals.
///
/// Any normal steeper than `top_threshold` makes it a landing. No normals at
/// all is treated as lethal.
pub fn classify_enemy_contact(normals: &[Vec2], top_threshold: f32) -> EnemyContact {
    if normals.iter().any(|n| n.y > top_threshold) {
        EnemyContact::TopLanding
    } else {
        EnemyContact::Lethal
    }
}

/// True when the receiver is being pressed from above (normal pointing down).
pub fn pressed_from_above(normals: &[Vec2], threshold: f32) -> bool {
    normals.iter().any(|n| n.y < -threshold)
}

fn layer_in_mask(layer: u8, mask: u32) -> bool {
    layer < 32 && mask & (1 << layer) != 0
}

/// Ground tag or a walkable physics layer
pub fn is_ground_like(collider: &Collider, walkable_mask: u32) -> bool {
    match *collider {
        Collider::Terrain { tag, layer } => {
            tag == SurfaceTag::Ground || layer_in_mask(layer, walkable_mask)
        }
        Collider::Enemy(_) => layer_in_mask(ENEMY_LAYER, walkable_mask),
        Collider::Block(_) => layer_in_mask(BLOCK_LAYER, walkable_mask),
        Collider::Player | Collider::StompSensor => false,
    }
}
