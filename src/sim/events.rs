//! Events emitted for the presentation layer
//!
//! The simulation never queries animation, audio or UI back. It queues
//! events and the owning loop drains them after each step/render.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Named trigger for the animation/audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Enemy flatten animation
    Flatten,
    /// Player skids after reversing direction
    Skid,
    /// Player grounded flag changed
    OnGround(bool),
    /// Player death animation
    PlayerDie,
    /// Reward block switches to its spent look
    Used,
    /// Player animator goes back to idle after a restart
    GameRestart,
    /// Sound: reward token popped out of a block
    CoinSound,
    /// Sound: enemy flattened
    SquishSound,
    /// Sound: player died
    DeathSound,
    /// Sound: player jumped
    JumpSound,
    /// Sound: reward block knocked
    BumpSound,
}

impl Cue {
    /// Symbolic name the animator/audio bank is keyed by
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Flatten => "Flatten",
            Cue::Skid => "onSkid",
            Cue::OnGround(_) => "onGround",
            Cue::PlayerDie => "mario-die",
            Cue::Used => "Used",
            Cue::GameRestart => "gameRestart",
            Cue::CoinSound => "coin",
            Cue::SquishSound => "squish",
            Cue::DeathSound => "mario-death",
            Cue::JumpSound => "jump",
            Cue::BumpSound => "bump",
        }
    }

    pub fn is_sound(&self) -> bool {
        matches!(
            self,
            Cue::CoinSound | Cue::SquishSound | Cue::DeathSound | Cue::JumpSound | Cue::BumpSound
        )
    }
}

/// Everything the outside world may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Animation or sound trigger
    Cue(Cue),
    /// Enemy-specific cue (which enemy to animate)
    EnemyCue { enemy_id: EntityId, cue: Cue },
    /// Block-specific cue
    BlockCue { block_id: EntityId, cue: Cue },
    /// Score total changed
    ScoreChanged { total: u32 },
    /// Player died; carries the score for the game-over screen
    PlayerDied { score: u32 },
    /// Death sequence finished; the simulation is now paused
    GameOver,
    /// Simulation was reset
    Restarted,
    EnemyRemoved { enemy_id: EntityId },
    RewardTokenSpawned { block_id: EntityId, position: Vec2 },
    RewardTokenRemoved { block_id: EntityId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        assert_eq!(Cue::Flatten.name(), "Flatten");
        assert_eq!(Cue::Skid.name(), "onSkid");
        assert_eq!(Cue::OnGround(true).name(), "onGround");
        assert_eq!(Cue::PlayerDie.name(), "mario-die");
        assert_eq!(Cue::Used.name(), "Used");
        assert_eq!(Cue::GameRestart.name(), "gameRestart");
    }

    #[test]
    fn test_sound_cues() {
        assert!(Cue::CoinSound.is_sound());
        assert!(!Cue::Flatten.is_sound());
    }
}
