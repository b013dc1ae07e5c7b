pub mod components;
pub mod config;
pub mod game_logic;
pub mod level;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

// Plugins - main.rs needs all plugins
pub use plugins::*;

// Game logic - the headless driver runs the simulation directly
pub use game_logic::errors::{GauntletError, GauntletResult};
pub use game_logic::{GameEvent, Outcome, Simulation};

pub use level::{LevelDefinition, Wall};
