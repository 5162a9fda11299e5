//! Stomp Core headless runner
//!
//! Drives the simulation with a scripted player through a toy level and logs
//! what happens. Pass a tuning JSON path as the first argument to override the
//! defaults.

use glam::Vec2;

use stomp_core::Tuning;
use stomp_core::consts::*;
use stomp_core::sim::{
    Collider, ContactEvent, Cue, GameEvent, SceneSetup, Simulation, SurfaceTag, TickInput,
};

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 60 * 20;
const FLOOR_Y: f32 = -1.0;
const FLOOR_LAYER: u8 = 3;
/// Half extents of the unit boxes everything is made of
const HALF: f32 = 0.5;

/// Build this step's contacts from simple box overlaps
fn detect_contacts(sim: &mut Simulation) -> Vec<ContactEvent> {
    let mut contacts = Vec::new();

    // Floor: snap and report ground
    let player = sim.player_mut();
    if player.body.position.y <= FLOOR_Y && player.body.velocity.y <= 0.0 {
        player.body.position.y = FLOOR_Y;
        player.body.velocity.y = 0.0;
        contacts.push(ContactEvent::solid(
            Collider::Player,
            Collider::Terrain { tag: SurfaceTag::Ground, layer: FLOOR_LAYER },
            vec![Vec2::Y],
        ));
    }

    let player_pos = sim.player().position();
    let player_vel = sim.player().velocity();

    for enemy in sim.enemies() {
        if !enemy.collisions_enabled() {
            continue;
        }
        let d = player_pos - enemy.position();
        if d.x.abs() >= 2.0 * HALF || d.y.abs() >= 2.0 * HALF {
            continue;
        }
        let other = Collider::Enemy(enemy.id);
        if d.y > HALF && player_vel.y <= 0.0 {
            contacts.push(ContactEvent::sensor(Collider::StompSensor, other));
            contacts.push(ContactEvent::solid(Collider::Player, other, vec![Vec2::Y]));
        } else {
            let side = Vec2::new(d.x.signum(), 0.0);
            contacts.push(
                ContactEvent::solid(Collider::Player, other, vec![side])
                    .with_relative_velocity(player_vel),
            );
        }
    }

    let mut head_bump = false;
    for block in sim.blocks() {
        let d = block.body.position - player_pos;
        if d.x.abs() < HALF && d.y > 0.0 && d.y < 2.0 * HALF && player_vel.y > 0.0 {
            contacts.push(ContactEvent::solid(
                Collider::Block(block.id),
                Collider::Player,
                vec![Vec2::Y],
            ));
            head_bump = true;
        }
    }
    if head_bump {
        sim.player_mut().body.velocity.y = 0.0;
    }

    contacts
}

/// Run right, hopping every second
fn scripted_input(frame: u32) -> TickInput {
    TickInput {
        axis: 1.0,
        jump: frame % 60 == 0,
    }
}

fn load_tuning() -> Option<Tuning> {
    let Some(path) = std::env::args().nth(1) else {
        return Some(Tuning::default());
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to read {}: {}", path, e);
            return None;
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            Some(tuning)
        }
        Err(e) => {
            log::error!("Bad tuning in {}: {}", path, e);
            None
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Stomp Core (headless) starting...");

    let Some(tuning) = load_tuning() else {
        return;
    };
    let scene = SceneSetup {
        camera_position: Vec2::ZERO,
        viewport_half_width: 8.0,
        level_end_x: Some(60.0),
        enemies: vec![Vec2::new(4.0, FLOOR_Y), Vec2::new(14.0, FLOOR_Y), Vec2::new(26.0, FLOOR_Y)],
        blocks: vec![Vec2::new(8.0, 1.5), Vec2::new(20.0, 1.5)],
    };
    let mut sim = match Simulation::new(tuning, &scene) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Failed to build simulation: {}", e);
            return;
        }
    };

    let mut accumulator = 0.0;
    let mut restarted = false;
    let mut best = 0;

    for frame in 0..FRAMES {
        accumulator += FRAME_DT.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while accumulator >= PHYSICS_DT && substeps < MAX_SUBSTEPS {
            let contacts = detect_contacts(&mut sim);
            sim.step(&scripted_input(frame), &contacts, PHYSICS_DT);
            accumulator -= PHYSICS_DT;
            substeps += 1;
        }
        sim.render(FRAME_DT);

        for event in sim.drain_events() {
            match event {
                GameEvent::Cue(cue) if cue.is_sound() => log::debug!("sound: {}", cue.name()),
                GameEvent::Cue(Cue::OnGround(_)) => {}
                GameEvent::ScoreChanged { total } => best = best.max(total),
                GameEvent::GameOver if !restarted => {
                    log::info!("{} at frame {}, restarting", sim.score().label(), frame);
                    sim.restart();
                    restarted = true;
                }
                other => log::info!("{:?}", other),
            }
        }
    }

    log::info!(
        "Done after {} physics steps. {} (best {})",
        sim.time_steps(),
        sim.score().label(),
        best
    );
    log::info!(
        "Player at {:?}, running at {:.2}",
        sim.player().position(),
        sim.player().horizontal_speed()
    );
    if let Some(camera) = sim.camera() {
        log::info!("Camera at {:?}", camera.position());
    }
}
