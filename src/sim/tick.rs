//! Fixed timestep simulation tick
//!
//! `step` runs at physics rate, `render` at presentation rate. Within a step
//! the order is: timers, input, stomp sensors, solid contacts, integration.

use glam::Vec2;

use super::contact::{Collider, ContactEvent, ContactKind};
use super::events::GameEvent;
use super::state::{EntityId, Simulation};
use super::stomp::{StompOutcome, resolve_stomp};

/// Input commands for a single physics step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1]
    pub axis: f32,
    /// Jump pressed this step (edge, not held)
    pub jump: bool,
}

impl Simulation {
    /// Advance the world by one fixed physics step.
    ///
    /// `contacts` are the contacts the physics layer found for this step.
    pub fn step(&mut self, input: &TickInput, contacts: &[ContactEvent], dt: f32) {
        if self.paused {
            return;
        }
        self.time_steps += 1;

        // Step-rate timers
        if self.player.tick_timers(dt) {
            log::info!("Game over (score {})", self.score.total());
            self.events.push(GameEvent::GameOver);
            self.paused = true;
            return;
        }
        let mut removed: Vec<EntityId> = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.advance(dt) {
                removed.push(enemy.id);
            }
        }

        self.player
            .apply_input(input, &self.tuning.player, dt, &mut self.events);

        // Stomps first so their grace window covers this step's landing contact
        for contact in contacts.iter().filter(|c| c.kind == ContactKind::Sensor) {
            self.handle_sensor_contact(contact);
        }
        for contact in contacts.iter().filter(|c| c.kind == ContactKind::Solid) {
            self.handle_solid_contact(contact);
        }

        let gravity = self.tuning.world.gravity;
        self.player.body.integrate(dt, gravity);
        for enemy in &mut self.enemies {
            enemy.body.integrate(dt, gravity);
        }
        // Blocks hang on their springs
        for block in &mut self.blocks {
            block.apply_spring(&self.tuning.block);
            block.body.integrate(dt, Vec2::ZERO);
        }

        if !removed.is_empty() {
            self.enemies.retain(|e| !removed.contains(&e.id));
            for enemy_id in removed {
                self.events.push(GameEvent::EnemyRemoved { enemy_id });
            }
        }

        self.normalize_order();
    }

    /// Presentation-rate update: cosmetic tweens, then the camera
    pub fn render(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        for block in &mut self.blocks {
            block.advance_reward(dt, &mut self.events);
        }
        if let Some(camera) = self.camera.as_mut() {
            camera.follow(self.player.position(), dt);
        }
    }

    /// Reset player, enemies, score and camera. Blocks stay as they are.
    pub fn restart(&mut self) {
        log::info!("Restart!");
        let spawn = self.tuning.player.spawn;
        self.player.reset(spawn, &mut self.events);
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        self.score.reset();
        self.events.push(GameEvent::ScoreChanged { total: 0 });
        if let Some(camera) = self.camera.as_mut() {
            camera.reset();
        }
        self.paused = false;
        self.events.push(GameEvent::Restarted);
    }

    fn handle_sensor_contact(&mut self, contact: &ContactEvent) {
        let enemy_id = match (contact.receiver, contact.other) {
            (Collider::StompSensor, Collider::Enemy(id))
            | (Collider::Enemy(id), Collider::StompSensor) => id,
            _ => return,
        };
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == enemy_id) else {
            return;
        };

        let outcome = resolve_stomp(
            &mut self.player,
            enemy,
            &self.tuning,
            &mut self.score,
            &mut self.events,
        );
        if outcome == StompOutcome::Rising {
            log::debug!("Stomp refused on enemy {}: player rising", enemy_id);
        }
    }

    fn handle_solid_contact(&mut self, contact: &ContactEvent) {
        match (contact.receiver, contact.other) {
            (Collider::Player, other) => {
                let enemy_hittable = match other {
                    Collider::Enemy(id) => self
                        .enemies
                        .iter()
                        .find(|e| e.id == id)
                        .is_some_and(|e| e.collisions_enabled()),
                    _ => false,
                };
                let outcome = self.player.on_solid_contact(
                    contact,
                    enemy_hittable,
                    &self.tuning.player,
                    &self.tuning.stomp,
                    self.score.total(),
                    &mut self.events,
                );
                if outcome.landed && self.tuning.camera.reanchor_on_landing {
                    let ground_y = self.player.position().y;
                    self.reanchor_camera(ground_y);
                }
            }
            (Collider::Block(id), Collider::Player) => {
                if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
                    block.on_player_contact(&contact.normals, &self.tuning.block, &mut self.events);
                }
            }
            _ => {}
        }
    }
}
