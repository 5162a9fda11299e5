//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep for physics, separate render-rate update
//! - Stable iteration order (by entity ID)
//! - Contacts come in from the outside; no rendering or platform dependencies

pub mod block;
pub mod body;
pub mod camera;
pub mod contact;
pub mod enemy;
pub mod events;
pub mod player;
pub mod sequence;
pub mod state;
pub mod stomp;
pub mod tick;

pub use block::{BlockState, RewardBlock};
pub use body::{BodyKind, RigidBody};
pub use camera::CameraTracker;
pub use contact::{
    BLOCK_LAYER, Collider, ContactEvent, ContactKind, ENEMY_LAYER, EnemyContact, SurfaceTag,
    classify_enemy_contact, is_ground_like, pressed_from_above,
};
pub use enemy::{Enemy, EnemyState, Patrol};
pub use events::{Cue, GameEvent};
pub use player::{ContactOutcome, Facing, Player};
pub use sequence::{RewardPhase, RewardSequence, Timer};
pub use state::{EntityId, SceneSetup, Simulation};
pub use stomp::{StompOutcome, resolve_stomp};
pub use tick::TickInput;
