use crate::game_logic::actor::{Damageable, Positioned};
use crate::game_logic::boss::Boss;
use crate::game_logic::enemy::Enemy;
use crate::game_logic::player::Player;
use crate::game_logic::weapon::Weapon;
use crate::level::Wall;
use bevy::prelude::*;

/// Minimap pixels per world unit
pub const MINIMAP_SCALE: f32 = 5.0;
/// Minimap edge length in pixels
pub const MINIMAP_SIZE: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Critical,
    Warning,
    Good,
}

impl StatusLevel {
    /// Band a 0-100 percentage for display colors
    ///
    /// # Examples
    /// ```
    /// use gauntlet::game_logic::StatusLevel;
    ///
    /// assert_eq!(StatusLevel::from_percentage(10.0), StatusLevel::Critical);
    /// assert_eq!(StatusLevel::from_percentage(75.0), StatusLevel::Good);
    /// ```
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage < 25.0 {
            StatusLevel::Critical
        } else if percentage < 50.0 {
            StatusLevel::Warning
        } else {
            StatusLevel::Good
        }
    }
}

/// Everything the HUD shows, derived from player and weapon state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub health_percent: u32,
    pub health_level: StatusLevel,
    pub ammo_text: String,
    pub ammo_level: StatusLevel,
}

impl HudSnapshot {
    pub fn capture(player: &Player, weapon: &Weapon) -> Self {
        let health = player.health().percentage() * 100.0;
        let health_percent = health.floor().max(0.0) as u32;

        let ammo_text = if weapon.is_reloading() {
            "RELOADING...".to_string()
        } else {
            format!("AMMO: {}", weapon.ammo())
        };
        let ammo = weapon.ammo() as f32 / weapon.max_ammo().max(1) as f32 * 100.0;

        Self {
            health_percent,
            health_level: StatusLevel::from_percentage(health_percent as f32),
            ammo_text,
            ammo_level: StatusLevel::from_percentage(ammo),
        }
    }

    pub fn health_text(&self) -> String {
        format!("HEALTH: {}", self.health_percent)
    }
}

fn ground(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}

/// Wall footprint on the ground plane, relative to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapRect {
    pub center: Vec2,
    pub size: Vec2,
}

/// Top-down view around the player. Offsets are world XZ units relative
/// to the player; `heading` is `(sin, cos)` of the player's rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapSnapshot {
    pub walls: Vec<MinimapRect>,
    pub enemies: Vec<Vec2>,
    pub boss: Option<Vec2>,
    pub heading: Vec2,
}

impl MinimapSnapshot {
    /// Collect everything the minimap draws for the current frame.
    ///
    /// # Arguments
    /// * `player` - Viewer; everything is placed relative to its position
    /// * `walls` - Level walls, drawn as ground footprints
    /// * `enemies` - Live enemy collection; dead ones are left out
    /// * `boss` - The boss, if still present and alive
    ///
    /// # Returns
    /// * `MinimapSnapshot` - Relative XZ offsets plus the heading vector
    pub fn capture(player: &Player, walls: &[Wall], enemies: &[Enemy], boss: Option<&Boss>) -> Self {
        let origin = ground(player.position());

        Self {
            walls: walls
                .iter()
                .map(|wall| MinimapRect {
                    center: ground(wall.center) - origin,
                    size: ground(wall.size()),
                })
                .collect(),
            enemies: enemies
                .iter()
                .filter(|enemy| !enemy.is_dead())
                .map(|enemy| ground(enemy.position()) - origin)
                .collect(),
            boss: boss
                .filter(|boss| !boss.is_dead())
                .map(|boss| ground(boss.position()) - origin),
            heading: Vec2::new(player.rotation().sin(), player.rotation().cos()),
        }
    }

    /// Pixel position inside the minimap panel; the player sits at the center
    pub fn to_panel(offset: Vec2) -> Vec2 {
        Vec2::splat(MINIMAP_SIZE / 2.0) + offset * MINIMAP_SCALE
    }
}
