//! Stomp detection
//!
//! The sensor under the player's feet overlapping an enemy. Runs before the
//! solid-contact pass of the same step, so the grace window it opens covers
//! the landing contact that follows.

use super::enemy::Enemy;
use super::events::GameEvent;
use super::player::Player;
use crate::score::Score;
use crate::tuning::Tuning;

/// Result of a stomp-sensor overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StompOutcome {
    /// Enemy defeated, points awarded
    Stomped { points: u32 },
    /// Player moving upward, no stomp
    Rising,
    /// Enemy already defeated or player dead
    Ignored,
}

/// Resolve a stomp-sensor overlap between the player and `enemy`
pub fn resolve_stomp(
    player: &mut Player,
    enemy: &mut Enemy,
    tuning: &Tuning,
    score: &mut Score,
    events: &mut Vec<GameEvent>,
) -> StompOutcome {
    if !player.is_alive() || !enemy.is_patrolling() || !enemy.collisions_enabled() {
        return StompOutcome::Ignored;
    }
    // Can't stomp on the way up
    if player.velocity().y > tuning.stomp.stomp_velocity_cutoff {
        return StompOutcome::Rising;
    }
    if !enemy.defeat(tuning.enemy.removal_delay, events) {
        return StompOutcome::Ignored;
    }

    player.bounce(tuning.stomp.bounce_impulse);

    score.add_score(enemy.points);
    events.push(GameEvent::ScoreChanged {
        total: score.total(),
    });

    player.set_just_stomped_grace(tuning.player.grace_duration);

    StompOutcome::Stomped {
        points: enemy.points,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn setup() -> (Player, Enemy, Tuning, Score) {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(0.0, 1.0), tuning.player.mass);
        player.body.velocity = Vec2::new(0.0, -4.0);
        let enemy = Enemy::new(1, Vec2::ZERO, &tuning.enemy);
        (player, enemy, tuning, Score::new())
    }

    #[test]
    fn test_falling_player_stomps() {
        let (mut player, mut enemy, tuning, mut score) = setup();
        let mut events = Vec::new();
        let outcome = resolve_stomp(&mut player, &mut enemy, &tuning, &mut score, &mut events);

        assert_eq!(outcome, StompOutcome::Stomped { points: 100 });
        assert!(enemy.is_defeated());
        assert_eq!(score.total(), 100);
        assert_eq!(player.velocity().y, tuning.stomp.bounce_impulse / tuning.player.mass);
        assert!(player.grace_active());
        assert!(events.contains(&GameEvent::ScoreChanged { total: 100 }));
    }

    #[test]
    fn test_rising_player_cannot_stomp() {
        let (mut player, mut enemy, tuning, mut score) = setup();
        player.body.velocity.y = 0.5;
        let mut events = Vec::new();
        let outcome = resolve_stomp(&mut player, &mut enemy, &tuning, &mut score, &mut events);

        assert_eq!(outcome, StompOutcome::Rising);
        assert!(enemy.is_patrolling());
        assert_eq!(score.total(), 0);
        assert!(!player.grace_active());
    }

    #[test]
    fn test_zero_vertical_velocity_still_stomps() {
        let (mut player, mut enemy, tuning, mut score) = setup();
        player.body.velocity.y = 0.0;
        let mut events = Vec::new();
        let outcome = resolve_stomp(&mut player, &mut enemy, &tuning, &mut score, &mut events);
        assert!(matches!(outcome, StompOutcome::Stomped { .. }));
    }

    #[test]
    fn test_second_stomp_awards_nothing() {
        let (mut player, mut enemy, tuning, mut score) = setup();
        let mut events = Vec::new();
        resolve_stomp(&mut player, &mut enemy, &tuning, &mut score, &mut events);

        player.body.velocity.y = -4.0;
        let outcome = resolve_stomp(&mut player, &mut enemy, &tuning, &mut score, &mut events);
        assert_eq!(outcome, StompOutcome::Ignored);
        assert_eq!(score.total(), 100);
        assert_eq!(player.velocity().y, -4.0);
    }
}
