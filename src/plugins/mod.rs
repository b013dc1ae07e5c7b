pub mod hud;
pub mod input;
pub mod scene;
pub mod simulation;
pub mod ui_common;

pub use hud::*;
pub use input::*;
pub use scene::*;
pub use simulation::*;
