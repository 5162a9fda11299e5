//! Minimal rigid body
//!
//! Stands in for the physics engine the game runs on: position/velocity
//! read-write, forces, impulses and a semi-implicit Euler step. Collision
//! detection is not done here; contacts arrive as `ContactEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a body reacts to forces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Gravity, forces and impulses all apply
    #[default]
    Dynamic,
    /// Moves only by its velocity (scripted patrols)
    Kinematic,
    /// Never moves
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub kind: BodyKind,
    /// Net force accumulated since the last integrate
    #[serde(skip)]
    force: Vec2,
}

impl RigidBody {
    pub fn new(position: Vec2, mass: f32, kind: BodyKind) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mass: mass.max(f32::EPSILON),
            kind,
            force: Vec2::ZERO,
        }
    }

    pub fn dynamic(position: Vec2, mass: f32) -> Self {
        Self::new(position, mass, BodyKind::Dynamic)
    }

    pub fn kinematic(position: Vec2) -> Self {
        Self::new(position, 1.0, BodyKind::Kinematic)
    }

    /// Continuous force, applied over the next integrate
    pub fn add_force(&mut self, force: Vec2) {
        if self.kind == BodyKind::Dynamic {
            self.force += force;
        }
    }

    /// Instant change in momentum
    pub fn add_impulse(&mut self, impulse: Vec2) {
        if self.kind == BodyKind::Dynamic {
            self.velocity += impulse / self.mass;
        }
    }

    /// Velocity change the pending force would produce over `dt`
    pub fn pending_delta_v(&self, dt: f32) -> Vec2 {
        self.force / self.mass * dt
    }

    /// Fold pending forces into velocity without moving (lets callers cap speed)
    pub fn apply_forces(&mut self, dt: f32) {
        self.velocity += self.pending_delta_v(dt);
        self.force = Vec2::ZERO;
    }

    /// Advance one step
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        match self.kind {
            BodyKind::Static => {
                self.force = Vec2::ZERO;
            }
            BodyKind::Kinematic => {
                self.force = Vec2::ZERO;
                self.position += self.velocity * dt;
            }
            BodyKind::Dynamic => {
                self.velocity += gravity * dt;
                self.apply_forces(dt);
                self.position += self.velocity * dt;
            }
        }
    }

    /// Lock in place forever
    pub fn freeze(&mut self) {
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
        self.kind = BodyKind::Static;
    }

    /// Teleport and stop
    pub fn reset_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_scales_by_mass() {
        let mut body = RigidBody::dynamic(Vec2::ZERO, 2.0);
        body.add_impulse(Vec2::new(0.0, 10.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_force_applies_over_dt() {
        let mut body = RigidBody::dynamic(Vec2::ZERO, 1.0);
        body.add_force(Vec2::new(10.0, 0.0));
        body.integrate(0.1, Vec2::ZERO);
        assert!((body.velocity.x - 1.0).abs() < 1e-6);
        assert!((body.position.x - 0.1).abs() < 1e-6);

        // Force is consumed by the step
        body.integrate(0.1, Vec2::ZERO);
        assert!((body.velocity.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_static_ignores_everything() {
        let mut body = RigidBody::dynamic(Vec2::new(1.0, 1.0), 1.0);
        body.velocity = Vec2::new(3.0, 3.0);
        body.freeze();
        body.add_impulse(Vec2::Y * 100.0);
        body.add_force(Vec2::Y * 100.0);
        body.integrate(1.0, Vec2::new(0.0, -30.0));
        assert_eq!(body.position, Vec2::new(1.0, 1.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.kind, BodyKind::Static);
    }

    #[test]
    fn test_kinematic_ignores_gravity() {
        let mut body = RigidBody::kinematic(Vec2::ZERO);
        body.velocity = Vec2::new(2.0, 0.0);
        body.integrate(0.5, Vec2::new(0.0, -30.0));
        assert_eq!(body.position, Vec2::new(1.0, 0.0));
    }
}
