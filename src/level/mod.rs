use crate::game_logic::errors::{GauntletError, GauntletResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Anything the player and projectiles can collide with
pub trait CollisionGeometry {
    fn walls(&self) -> &[Wall];

    /// Distance to the nearest wall face hit by the ray within `max_distance`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        self.walls()
            .iter()
            .filter_map(|wall| wall.ray_distance(origin, direction))
            .filter(|distance| *distance <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Axis-aligned wall block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Wall {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Build a wall from its full size, the way level layouts are authored
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        let rel = (point - self.center).abs();
        rel.x <= self.half_extents.x && rel.y <= self.half_extents.y && rel.z <= self.half_extents.z
    }

    /// Slab test. Only outward faces count: a ray starting inside the block
    /// or pointing away from it never hits.
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let (min, max) = (self.min(), self.max());
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f32::EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - o) / d;
            let t2 = (max[axis] - o) / d;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
            if t_near > t_far {
                return None;
            }
        }

        (t_near >= 0.0).then_some(t_near)
    }
}

impl CollisionGeometry for Vec<Wall> {
    fn walls(&self) -> &[Wall] {
        self
    }
}

/// Level layout: static walls plus actor spawn points
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Resource)]
pub struct LevelDefinition {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 1024))]
    pub walls: Vec<Wall>,
    /// Ground point under the player's eye
    pub player_spawn: Vec3,
    #[validate(length(max = 256))]
    pub enemy_spawns: Vec<Vec3>,
    pub boss_spawn: Option<Vec3>,
}

impl CollisionGeometry for LevelDefinition {
    fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

impl LevelDefinition {
    /// The built-in maze: boundary walls, interior corridors and the boss room
    pub fn maze() -> Self {
        let wall = |x: f32, z: f32, width: f32, depth: f32| {
            Wall::from_size(Vec3::new(x, 2.0, z), Vec3::new(width, 4.0, depth))
        };

        let walls = vec![
            // Boundary
            wall(-50.0, 0.0, 1.0, 200.0),
            wall(50.0, 0.0, 1.0, 200.0),
            wall(0.0, -100.0, 100.0, 1.0),
            wall(0.0, 100.0, 100.0, 1.0),
            // Interior
            wall(-30.0, -20.0, 20.0, 1.0),
            wall(30.0, -20.0, 20.0, 1.0),
            wall(-20.0, -40.0, 1.0, 40.0),
            wall(20.0, -40.0, 1.0, 40.0),
            wall(0.0, -60.0, 40.0, 1.0),
            wall(-30.0, -70.0, 20.0, 1.0),
            wall(30.0, -70.0, 20.0, 1.0),
            // Boss room
            wall(-20.0, -90.0, 1.0, 20.0),
            wall(20.0, -90.0, 1.0, 20.0),
        ];

        let enemy_spawns = [
            (10.0, -10.0),
            (-10.0, -15.0),
            (15.0, -20.0),
            (-15.0, -25.0),
            (5.0, -30.0),
            (-5.0, -35.0),
            (0.0, -40.0),
            (12.0, -45.0),
            (-12.0, -50.0),
            (8.0, -55.0),
            (-8.0, -60.0),
            (15.0, -65.0),
            (-15.0, -70.0),
            (5.0, -75.0),
        ]
        .into_iter()
        .map(|(x, z)| Vec3::new(x, 0.0, z))
        .collect();

        Self {
            name: "maze".to_string(),
            walls,
            player_spawn: Vec3::ZERO,
            enemy_spawns,
            boss_spawn: Some(Vec3::new(0.0, 0.0, -80.0)),
        }
    }

    /// Field validation plus the geometric checks validator cannot express
    pub fn check(&self) -> GauntletResult<()> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");
            GauntletError::LevelValidationFailed {
                reason: error_details,
            }
        })?;

        if let Some(index) = self
            .walls
            .iter()
            .position(|wall| !wall.center.is_finite() || wall.half_extents.min_element() <= 0.0)
        {
            return Err(GauntletError::InvalidLevelData {
                reason: format!("Wall {index} must have a finite center and positive extents"),
            });
        }

        let spawns = std::iter::once(self.player_spawn)
            .chain(self.enemy_spawns.iter().copied())
            .chain(self.boss_spawn);
        for spawn in spawns {
            if !spawn.is_finite() {
                return Err(GauntletError::InvalidLevelData {
                    reason: format!("Spawn point {spawn:?} is not finite"),
                });
            }
        }

        // Actors ignore walls, only the player has to start in open space
        if self.walls.iter().any(|wall| wall.contains_point(self.player_spawn)) {
            return Err(GauntletError::InvalidLevelData {
                reason: format!("Player spawn {:?} lies inside a wall", self.player_spawn),
            });
        }

        Ok(())
    }

    /// Get the levels directory path
    pub fn get_levels_dir() -> GauntletResult<PathBuf> {
        Ok(std::env::current_dir()?.join("levels"))
    }

    pub fn to_bytes(&self) -> GauntletResult<Vec<u8>> {
        bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
            GauntletError::InvalidLevelData {
                reason: format!("Failed to serialize level: {e}"),
            }
        })
    }

    pub fn from_bytes(data: &[u8]) -> GauntletResult<Self> {
        let (level, _): (LevelDefinition, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::standard()).map_err(|e| {
                GauntletError::CorruptedLevelFile {
                    reason: format!("Failed to deserialize level data: {e}"),
                }
            })?;
        level.check()?;
        Ok(level)
    }

    /// Load a level from the levels directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> GauntletResult<Self> {
        let file_path = Self::get_levels_dir()?.join(filename);
        if !file_path.exists() {
            return Err(GauntletError::LevelFileNotFound { path: file_path });
        }

        let data = std::fs::read(&file_path)?;
        let level = Self::from_bytes(&data)?;
        info!(
            "Loaded level '{}' from {}: {} walls, {} enemy spawns",
            level.name,
            file_path.display(),
            level.walls.len(),
            level.enemy_spawns.len()
        );
        Ok(level)
    }

    /// Save the level to the levels directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> GauntletResult<PathBuf> {
        self.check()?;

        let file_path = Self::get_levels_dir()?.join(filename);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&file_path, self.to_bytes()?)?;
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_wall_at(x: f32, z: f32) -> Wall {
        Wall::from_size(Vec3::new(x, 2.0, z), Vec3::new(2.0, 4.0, 2.0))
    }

    #[test]
    fn test_ray_hits_front_face() {
        let wall = unit_wall_at(5.0, 0.0);
        let distance = wall.ray_distance(Vec3::new(0.0, 1.8, 0.0), Vec3::X).unwrap();
        assert!((distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let wall = unit_wall_at(5.0, 0.0);
        assert_eq!(wall.ray_distance(Vec3::new(0.0, 1.8, 0.0), Vec3::NEG_X), None);
    }

    #[test]
    fn test_ray_passing_beside_misses() {
        let wall = unit_wall_at(5.0, 0.0);
        assert_eq!(wall.ray_distance(Vec3::new(0.0, 1.8, 3.0), Vec3::X), None);
    }

    #[test]
    fn test_ray_from_inside_misses() {
        let wall = unit_wall_at(0.0, 0.0);
        assert_eq!(wall.ray_distance(Vec3::new(0.0, 1.8, 0.0), Vec3::X), None);
    }

    #[test]
    fn test_raycast_returns_nearest_within_range() {
        let walls = vec![unit_wall_at(10.0, 0.0), unit_wall_at(4.0, 0.0)];
        let origin = Vec3::new(0.0, 1.8, 0.0);

        let hit = walls.raycast(origin, Vec3::X, 100.0).unwrap();
        assert!((hit - 3.0).abs() < 1e-5);

        assert_eq!(walls.raycast(origin, Vec3::X, 2.5), None);
    }

    #[test]
    fn test_diagonal_ray() {
        let wall = unit_wall_at(5.0, 5.0);
        let direction = Vec3::new(1.0, 0.0, 1.0).normalize();
        let hit = wall.ray_distance(Vec3::new(0.0, 1.0, 0.0), direction).unwrap();
        assert!((hit - 4.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_maze_layout() {
        let maze = LevelDefinition::maze();
        assert_eq!(maze.walls.len(), 13);
        assert_eq!(maze.enemy_spawns.len(), 14);
        assert_eq!(maze.boss_spawn, Some(Vec3::new(0.0, 0.0, -80.0)));
        assert!(maze.check().is_ok());

        // Back boundary is 100 wide and 1 deep
        let back = maze.walls[2];
        assert_eq!(back.size(), Vec3::new(100.0, 4.0, 1.0));
    }

    #[test]
    fn test_spawn_inside_wall_rejected() {
        let level = LevelDefinition {
            name: "bad".to_string(),
            walls: vec![unit_wall_at(0.0, 0.0)],
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            enemy_spawns: vec![],
            boss_spawn: None,
        };
        let result = level.check();
        assert!(matches!(result, Err(GauntletError::InvalidLevelData { .. })));
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let level = LevelDefinition {
            name: String::new(),
            walls: vec![unit_wall_at(10.0, 0.0)],
            player_spawn: Vec3::ZERO,
            enemy_spawns: vec![],
            boss_spawn: None,
        };
        let result = level.check();
        assert!(matches!(result, Err(GauntletError::LevelValidationFailed { .. })));
    }

    #[test]
    fn test_level_bytes_round_trip() {
        let maze = LevelDefinition::maze();
        let bytes = maze.to_bytes().unwrap();
        let decoded = LevelDefinition::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.walls, maze.walls);
        assert_eq!(decoded.enemy_spawns, maze.enemy_spawns);
    }

    #[test]
    fn test_truncated_level_is_corrupted() {
        let bytes = LevelDefinition::maze().to_bytes().unwrap();
        let result = LevelDefinition::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(GauntletError::CorruptedLevelFile { .. })));
    }
}
