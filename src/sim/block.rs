//! Reward block controller
//!
//! Idle -> Locked on the first qualifying player hit. The hit pops a reward
//! token (rise then fall); when the token is gone the block is frozen for
//! good. Blocks are never reset, not even by a restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyKind, RigidBody};
use super::contact::pressed_from_above;
use super::events::{Cue, GameEvent};
use super::sequence::{RewardPhase, RewardSequence};
use super::state::EntityId;
use crate::tuning::BlockTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Idle,
    Locked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardBlock {
    pub id: EntityId,
    pub body: RigidBody,
    /// Spring anchor
    rest_position: Vec2,
    state: BlockState,
    reward: Option<RewardSequence>,
    collisions_enabled: bool,
}

impl RewardBlock {
    pub fn new(id: EntityId, position: Vec2, tuning: &BlockTuning) -> Self {
        Self {
            id,
            body: RigidBody::dynamic(position, tuning.mass),
            rest_position: position,
            state: BlockState::Idle,
            reward: None,
            collisions_enabled: true,
        }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == BlockState::Locked
    }

    pub fn is_frozen(&self) -> bool {
        self.body.kind == BodyKind::Static
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    pub fn reward(&self) -> Option<&RewardSequence> {
        self.reward.as_ref()
    }

    /// Where the reward token is drawn, if one is out
    pub fn reward_token(&self) -> Option<Vec2> {
        self.reward.as_ref().and_then(RewardSequence::token_position)
    }

    /// Player touched the block. Returns true if this hit locked it.
    ///
    /// `normals` point toward the block; a downward normal means the player
    /// came down on top, which does not count.
    pub fn on_player_contact(
        &mut self,
        normals: &[Vec2],
        tuning: &BlockTuning,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.is_locked() || !self.collisions_enabled {
            return false;
        }
        if pressed_from_above(normals, tuning.from_below_threshold) {
            log::debug!("Block {} pressed from above, ignored", self.id);
            return false;
        }

        self.state = BlockState::Locked;
        log::debug!("Block {} hit", self.id);
        events.push(GameEvent::BlockCue {
            block_id: self.id,
            cue: Cue::Used,
        });

        // Bounce on the spring
        self.body.velocity = Vec2::ZERO;
        self.body.add_impulse(Vec2::Y * tuning.bump_impulse);
        events.push(GameEvent::BlockCue {
            block_id: self.id,
            cue: Cue::BumpSound,
        });
        events.push(GameEvent::BlockCue {
            block_id: self.id,
            cue: Cue::CoinSound,
        });

        let origin = self.body.position + Vec2::Y * tuning.spawn_offset_y;
        self.reward = Some(RewardSequence::new(
            origin,
            tuning.rise_height,
            tuning.rise_time,
            tuning.fall_time,
        ));
        events.push(GameEvent::RewardTokenSpawned {
            block_id: self.id,
            position: origin,
        });
        true
    }

    /// Damped spring back toward the rest position (physics rate)
    pub fn apply_spring(&mut self, tuning: &BlockTuning) {
        if self.is_frozen() {
            return;
        }
        let offset = self.body.position - self.rest_position;
        let force = -offset * tuning.spring_stiffness - self.body.velocity * tuning.spring_damping;
        self.body.add_force(force);
    }

    /// Advance the reward token (render rate). Freezes the block once the
    /// token is gone.
    pub fn advance_reward(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let Some(reward) = self.reward.as_mut() else {
            return;
        };
        if reward.advance(dt) != RewardPhase::Done {
            return;
        }

        self.reward = None;
        events.push(GameEvent::RewardTokenRemoved { block_id: self.id });

        self.body.reset_to(self.rest_position);
        self.body.freeze();
        self.collisions_enabled = false;
        log::debug!("Block {} frozen", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> RewardBlock {
        RewardBlock::new(3, Vec2::new(2.0, 2.5), &BlockTuning::default())
    }

    fn run_reward(b: &mut RewardBlock, events: &mut Vec<GameEvent>) {
        for _ in 0..100 {
            b.advance_reward(1.0 / 60.0, events);
        }
    }

    #[test]
    fn test_hit_from_below_locks() {
        let tuning = BlockTuning::default();
        let mut b = block();
        let mut events = Vec::new();
        assert!(b.on_player_contact(&[Vec2::Y], &tuning, &mut events));
        assert!(b.is_locked());
        assert_eq!(b.body.velocity.y, tuning.bump_impulse / tuning.mass);
        assert!(b.reward_token().is_some());
        assert!(events.contains(&GameEvent::BlockCue { block_id: 3, cue: Cue::Used }));
    }

    #[test]
    fn test_landing_on_top_does_nothing() {
        let tuning = BlockTuning::default();
        let mut b = block();
        let mut events = Vec::new();
        assert!(!b.on_player_contact(&[Vec2::new(0.0, -0.8)], &tuning, &mut events));
        assert_eq!(b.state(), BlockState::Idle);
        assert!(b.reward().is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_locked_block_ignores_hits() {
        let tuning = BlockTuning::default();
        let mut b = block();
        let mut events = Vec::new();
        b.on_player_contact(&[Vec2::Y], &tuning, &mut events);
        b.advance_reward(0.1, &mut events);
        let token = b.reward_token();
        let vel = b.body.velocity;
        let count = events.len();

        assert!(!b.on_player_contact(&[Vec2::Y], &tuning, &mut events));
        assert_eq!(b.reward_token(), token);
        assert_eq!(b.body.velocity, vel);
        assert_eq!(events.len(), count);
    }

    #[test]
    fn test_reward_completes_then_freezes() {
        let tuning = BlockTuning::default();
        let mut b = block();
        let mut events = Vec::new();
        b.on_player_contact(&[Vec2::X], &tuning, &mut events);
        run_reward(&mut b, &mut events);

        assert!(b.reward().is_none());
        assert!(b.is_frozen());
        assert!(!b.collisions_enabled());
        assert_eq!(b.body.position, Vec2::new(2.0, 2.5));
        assert!(events.contains(&GameEvent::RewardTokenRemoved { block_id: 3 }));

        // Still locked, still inert
        assert!(b.is_locked());
        assert!(!b.on_player_contact(&[Vec2::Y], &tuning, &mut events));
    }

    #[test]
    fn test_spring_pulls_back() {
        let tuning = BlockTuning::default();
        let mut b = block();
        let mut events = Vec::new();
        b.on_player_contact(&[Vec2::Y], &tuning, &mut events);
        let mut peak = 0.0f32;
        for _ in 0..200 {
            b.apply_spring(&tuning);
            b.body.integrate(0.02, Vec2::ZERO);
            peak = peak.max(b.body.position.y - 2.5);
        }
        assert!(peak > 0.0);
        assert!((b.body.position.y - 2.5).abs() < 0.01);
    }
}
