//! Player controller
//!
//! Locomotion, facing, jumping, ground state and the alive/dead lifecycle.
//! Only the collision classifier can kill the player or start the stomp
//! grace window.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::contact::{Collider, ContactEvent, EnemyContact, classify_enemy_contact, is_ground_like};
use super::events::{Cue, GameEvent};
use super::sequence::Timer;
use super::tick::TickInput;
use crate::tuning::{PlayerTuning, StompTuning};

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Direction for a non-zero axis value
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Facing::Right)
        } else if axis < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// What a solid contact did to the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Went from airborne to grounded
    pub landed: bool,
    pub died: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: RigidBody,
    facing: Facing,
    grounded: bool,
    alive: bool,
    /// Side contacts with enemies are harmless while this runs
    grace: Timer,
    /// Death animation window before the game-over pause
    death_sequence: Timer,
    /// Horizontal axis seen on the previous step (edge detection)
    last_axis: f32,
}

impl Player {
    pub fn new(spawn: Vec2, mass: f32) -> Self {
        Self {
            body: RigidBody::dynamic(spawn, mass),
            facing: Facing::Right,
            grounded: true,
            alive: true,
            grace: Timer::default(),
            death_sequence: Timer::default(),
            last_axis: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn grace_active(&self) -> bool {
        self.grace.is_active()
    }

    /// Drives the run animation speed
    pub fn horizontal_speed(&self) -> f32 {
        self.body.velocity.x.abs()
    }

    /// Advance step-rate timers. Returns true when the death sequence ends.
    pub fn tick_timers(&mut self, dt: f32) -> bool {
        self.grace.tick(dt);
        self.death_sequence.tick(dt)
    }

    /// Apply one physics step of input
    pub fn apply_input(
        &mut self,
        input: &TickInput,
        tuning: &PlayerTuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) {
        let axis = if input.axis.is_finite() {
            input.axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        if !self.alive {
            self.last_axis = axis;
            return;
        }

        self.update_facing(axis, tuning.skid_threshold, events);

        if axis.abs() > 0.0 && self.body.velocity.length() < tuning.max_speed {
            self.body.add_force(Vec2::new(axis * tuning.speed, 0.0));
            self.body.apply_forces(dt);

            // Cap |v| at max_speed by trimming the horizontal component only
            let vy = self.body.velocity.y;
            let cap = (tuning.max_speed * tuning.max_speed - vy * vy).max(0.0).sqrt();
            self.body.velocity.x = self.body.velocity.x.clamp(-cap, cap);
        }

        // Hard stop on release
        if self.last_axis != 0.0 && axis == 0.0 {
            self.body.velocity.x = 0.0;
        }

        if input.jump && self.grounded {
            self.body.add_impulse(Vec2::Y * tuning.up_speed);
            self.grounded = false;
            events.push(GameEvent::Cue(Cue::OnGround(false)));
            events.push(GameEvent::Cue(Cue::JumpSound));
        }

        self.last_axis = axis;
    }

    /// Flip on a fresh directional press that disagrees with the current facing
    fn update_facing(&mut self, axis: f32, skid_threshold: f32, events: &mut Vec<GameEvent>) {
        let Some(pressed) = Facing::from_axis(axis) else {
            return;
        };
        if Facing::from_axis(self.last_axis) == Some(pressed) || pressed == self.facing {
            return;
        }

        self.facing = pressed;
        // Still sliding the old way
        if self.body.velocity.x * -pressed.sign() > skid_threshold {
            events.push(GameEvent::Cue(Cue::Skid));
        }
    }

    /// React to a solid contact reported for the player's body.
    ///
    /// `enemy_hittable` is false for enemies whose collisions are off.
    pub fn on_solid_contact(
        &mut self,
        contact: &ContactEvent,
        enemy_hittable: bool,
        tuning: &PlayerTuning,
        stomp: &StompTuning,
        score: u32,
        events: &mut Vec<GameEvent>,
    ) -> ContactOutcome {
        let mut outcome = ContactOutcome::default();
        let is_enemy = matches!(contact.other, Collider::Enemy(_));
        if is_enemy && !enemy_hittable {
            return outcome;
        }

        if !self.grounded && is_ground_like(&contact.other, tuning.walkable_mask()) {
            self.grounded = true;
            outcome.landed = true;
            events.push(GameEvent::Cue(Cue::OnGround(true)));
        }

        if self.alive && is_enemy {
            if self.grace.is_active() {
                log::debug!("Enemy contact ignored (stomp grace)");
                return outcome;
            }
            if classify_enemy_contact(&contact.normals, stomp.top_normal_threshold)
                == EnemyContact::Lethal
            {
                self.die(tuning, score, events);
                outcome.died = true;
            }
        }

        outcome
    }

    /// Lethal hit. Terminal until `reset`.
    pub fn die(&mut self, tuning: &PlayerTuning, score: u32, events: &mut Vec<GameEvent>) {
        if !self.alive {
            return;
        }
        log::info!("Player hit an enemy from the side/bottom (score {})", score);

        self.alive = false;
        self.grace.cancel();
        events.push(GameEvent::PlayerDied { score });
        events.push(GameEvent::Cue(Cue::PlayerDie));
        events.push(GameEvent::Cue(Cue::DeathSound));

        self.body.velocity.x = 0.0;
        self.body.add_impulse(Vec2::Y * tuning.death_impulse);
        self.death_sequence.start(tuning.game_over_delay);
    }

    /// Start (or restart) the post-stomp grace window
    pub fn set_just_stomped_grace(&mut self, duration: f32) {
        self.grace.start(duration);
    }

    /// Kill vertical speed and pop upward (stomp bounce)
    pub fn bounce(&mut self, impulse: f32) {
        self.body.velocity.y = 0.0;
        self.body.add_impulse(Vec2::Y * impulse);
    }

    /// Back to spawn, alive, facing right
    pub fn reset(&mut self, spawn: Vec2, events: &mut Vec<GameEvent>) {
        self.body.reset_to(spawn);
        self.facing = Facing::Right;
        self.grounded = true;
        self.alive = true;
        self.grace.cancel();
        self.death_sequence.cancel();
        self.last_axis = 0.0;
        events.push(GameEvent::Cue(Cue::GameRestart));
    }
}
