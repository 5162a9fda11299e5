//! Enemy controller
//!
//! Patrolling -> Defeated -> removed. Defeat is one-way; only an external
//! restart brings an enemy back to patrolling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::events::{Cue, GameEvent};
use super::sequence::Timer;
use super::state::EntityId;
use crate::tuning::EnemyTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    Patrolling,
    /// Flattened; removed when the timer runs out
    Defeated { removal: Timer },
}

/// Back-and-forth walk around the start position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Patrol {
    pub speed: f32,
    /// Half-width of the walked span
    pub range: f32,
    direction: f32,
}

impl Patrol {
    pub fn new(speed: f32, range: f32) -> Self {
        Self {
            speed,
            range,
            direction: -1.0,
        }
    }

    /// Horizontal velocity for the next step, turning at the span edges
    fn velocity(&mut self, x: f32, origin_x: f32) -> f32 {
        if self.range <= 0.0 {
            return 0.0;
        }
        if x >= origin_x + self.range && self.direction > 0.0 {
            self.direction = -1.0;
        } else if x <= origin_x - self.range && self.direction < 0.0 {
            self.direction = 1.0;
        }
        self.direction * self.speed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub body: RigidBody,
    pub state: EnemyState,
    pub start_position: Vec2,
    pub patrol: Patrol,
    /// Awarded on stomp
    pub points: u32,
    collisions_enabled: bool,
}

impl Enemy {
    pub fn new(id: EntityId, start_position: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            body: RigidBody::kinematic(start_position),
            state: EnemyState::Patrolling,
            start_position,
            patrol: Patrol::new(tuning.patrol_speed, tuning.patrol_range),
            points: tuning.points,
            collisions_enabled: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_patrolling(&self) -> bool {
        self.state == EnemyState::Patrolling
    }

    pub fn is_defeated(&self) -> bool {
        matches!(self.state, EnemyState::Defeated { .. })
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    /// Flatten. Returns false (and does nothing) if already defeated.
    pub fn defeat(&mut self, removal_delay: f32, events: &mut Vec<GameEvent>) -> bool {
        if self.is_defeated() {
            log::debug!("Enemy {} already defeated", self.id);
            return false;
        }
        log::debug!("Enemy {} defeated", self.id);

        self.state = EnemyState::Defeated {
            removal: Timer::started(removal_delay),
        };
        self.body.velocity = Vec2::ZERO;
        self.collisions_enabled = false;
        events.push(GameEvent::EnemyCue {
            enemy_id: self.id,
            cue: Cue::Flatten,
        });
        events.push(GameEvent::EnemyCue {
            enemy_id: self.id,
            cue: Cue::SquishSound,
        });
        true
    }

    /// Per-step update. Returns true once the removal delay has elapsed.
    pub fn advance(&mut self, dt: f32) -> bool {
        match &mut self.state {
            EnemyState::Patrolling => {
                self.body.velocity.x = self
                    .patrol
                    .velocity(self.body.position.x, self.start_position.x);
                false
            }
            EnemyState::Defeated { removal } => removal.tick(dt),
        }
    }

    /// Restart: back to the start position and patrolling
    pub fn reset(&mut self) {
        self.body.reset_to(self.start_position);
        self.state = EnemyState::Patrolling;
        self.patrol = Patrol::new(self.patrol.speed, self.patrol.range);
        self.collisions_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Enemy {
        Enemy::new(1, Vec2::new(10.0, -1.0), &EnemyTuning::default())
    }

    #[test]
    fn test_defeat_is_one_way() {
        let mut e = enemy();
        let mut events = Vec::new();
        assert!(e.defeat(0.25, &mut events));
        assert!(e.is_defeated());
        assert!(!e.collisions_enabled());
        assert_eq!(events.len(), 2);

        assert!(!e.defeat(0.25, &mut events));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_removal_after_delay() {
        let mut e = enemy();
        let mut events = Vec::new();
        e.defeat(0.25, &mut events);
        assert!(!e.advance(0.1));
        assert!(!e.advance(0.1));
        assert!(e.advance(0.1));
    }

    #[test]
    fn test_defeated_enemy_stops() {
        let mut e = enemy();
        let mut events = Vec::new();
        e.advance(0.02);
        assert!(e.body.velocity.x != 0.0);
        e.defeat(0.25, &mut events);
        e.advance(0.02);
        assert_eq!(e.body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_patrol_turns_at_edges() {
        let mut e = enemy();
        let range = e.patrol.range;
        for _ in 0..2000 {
            e.advance(0.02);
            e.body.integrate(0.02, Vec2::ZERO);
            let dx = e.position().x - e.start_position.x;
            assert!(dx.abs() <= range + e.patrol.speed * 0.02 + 1e-3);
        }
    }

    #[test]
    fn test_reset_restores_start() {
        let mut e = enemy();
        let mut events = Vec::new();
        for _ in 0..20 {
            e.advance(0.02);
            e.body.integrate(0.02, Vec2::ZERO);
        }
        e.defeat(0.25, &mut events);
        e.reset();
        assert!(e.is_patrolling());
        assert!(e.collisions_enabled());
        assert_eq!(e.position(), e.start_position);
    }
}
