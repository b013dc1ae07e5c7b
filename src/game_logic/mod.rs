pub mod actor;
pub mod boss;
pub mod combat;
pub mod enemy;
pub mod errors;
pub mod events;
pub mod hud;
pub mod player;
pub mod projectile;
pub mod simulation;
pub mod weapon;

pub use actor::{ActorId, AiState, AttackSource, Cooldown, Damageable, Positioned};
pub use boss::Boss;
pub use enemy::Enemy;
pub use errors::{GauntletError, GauntletResult};
pub use events::GameEvent;
pub use hud::{HudSnapshot, MinimapRect, MinimapSnapshot, StatusLevel};
pub use player::{Aim, Player};
pub use simulation::{FrameReport, Outcome, Simulation};
pub use weapon::{ShotOutcome, Weapon};
