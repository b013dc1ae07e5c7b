use crate::game_logic::actor::ActorId;
use bevy::prelude::*;

/// Notable things that happened during a simulation step, in the order they
/// happened. The presentation layer turns these into effects and HUD updates.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameEvent {
    WeaponFired {
        origin: Vec3,
        direction: Vec3,
        ammo_left: u32,
    },
    ReloadStarted,
    ReloadFinished,
    ActorDamaged {
        target: ActorId,
        amount: f32,
        remaining: f32,
    },
    ActorKilled {
        target: ActorId,
    },
    /// The actor left the world and its scene object should go
    ActorRemoved {
        target: ActorId,
    },
    PlayerDamaged {
        source: ActorId,
        amount: f32,
        remaining: f32,
    },
    VolleyFired {
        projectiles: usize,
    },
    ProjectileImpact {
        position: Vec3,
        hit_player: bool,
    },
    BossEnraged,
    GameOver,
    LevelComplete,
}

impl GameEvent {
    /// Ends the run; no further steps are simulated after this
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver | GameEvent::LevelComplete)
    }
}
