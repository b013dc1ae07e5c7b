use bevy::prelude::*;
use gauntlet::game_logic::errors::{GauntletError, GauntletResult};
use gauntlet::game_logic::{Damageable, Outcome, Positioned, Simulation};
use gauntlet::resources::PlayerIntent;

/// Generic parser for delimited strings that return fixed-size arrays
pub fn parse_delimited<T, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Result<T, std::num::ParseFloatError>,
) -> GauntletResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).collect();
    if parts.len() != N {
        return Err(GauntletError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part.trim()).map_err(|_| GauntletError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse position string "X,Y,Z"
pub fn parse_position(pos_str: &str) -> GauntletResult<Vec3> {
    let [x, y, z] = parse_delimited::<f32, 3>(pos_str, ',', "position", |s| s.parse())?;
    Ok(Vec3::new(x, y, z))
}

/// Fixed timestep must be positive and no longer than a quarter second
pub fn validate_timestep(dt: f32) -> GauntletResult<f32> {
    if !dt.is_finite() || dt <= 0.0 || dt > 0.25 {
        return Err(GauntletError::InvalidArgument {
            reason: format!("Timestep must be in (0, 0.25] seconds, got {dt}"),
        });
    }
    Ok(dt)
}

/// Level files are addressed relative to the levels directory
pub fn validate_level_path(filename: &str) -> GauntletResult<()> {
    if std::path::Path::new(filename).is_absolute() {
        return Err(GauntletError::InvalidArgument {
            reason: format!("Level path must be relative to levels/, got absolute path: {filename}"),
        });
    }
    if filename.contains("..") {
        return Err(GauntletError::InvalidArgument {
            reason: "Level path cannot contain '..'".to_string(),
        });
    }
    Ok(())
}

/// Scripted player: turns toward the nearest target in reach, shoots every
/// frame and walks forward otherwise
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    pub walk: bool,
    pub shoot: bool,
    pub look_sensitivity: f32,
    pub reach: f32,
}

impl Autopilot {
    pub fn intent(&self, simulation: &Simulation) -> PlayerIntent {
        let player = simulation.player();
        let eye = player.position();

        let target = simulation
            .enemies()
            .iter()
            .filter(|enemy| !enemy.is_dead())
            .map(|enemy| enemy.position())
            .chain(simulation.boss().filter(|boss| !boss.is_dead()).map(|boss| boss.position()))
            .filter(|position| position.distance(eye) <= self.reach)
            .min_by(|a, b| a.distance(eye).total_cmp(&b.distance(eye)));

        let mut intent = PlayerIntent {
            fire: self.shoot,
            reload: simulation.weapon().ammo() == 0,
            ..PlayerIntent::default()
        };

        match target {
            Some(position) => {
                let to_target = position - eye;
                let wanted_yaw = (-to_target.x).atan2(-to_target.z);
                let turn = wrap_angle(player.rotation() - wanted_yaw);
                if self.look_sensitivity > 0.0 {
                    intent.look = Vec2::new(turn / self.look_sensitivity, 0.0);
                }
            }
            None if self.walk => intent.forward = 1.0,
            None => {}
        }
        intent
    }
}

/// Wrap an angle into (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Running => "still running",
        Outcome::GameOver => "game over",
        Outcome::LevelComplete => "level complete",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet::level::{LevelDefinition, Wall};
    use gauntlet::resources::GameSettings;

    fn arena() -> LevelDefinition {
        LevelDefinition {
            name: "arena".to_string(),
            walls: vec![Wall::new(Vec3::new(0.0, 2.0, 60.0), Vec3::new(2.0, 2.0, 0.5))],
            player_spawn: Vec3::ZERO,
            enemy_spawns: Vec::new(),
            boss_spawn: None,
        }
    }

    fn autopilot() -> Autopilot {
        Autopilot {
            walk: true,
            shoot: true,
            look_sensitivity: 0.01,
            reach: 20.0,
        }
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            parse_position("0.0,1.0,0.0").unwrap(),
            Vec3::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            parse_position("-5.5, 2.3, 10.1").unwrap(),
            Vec3::new(-5.5, 2.3, 10.1)
        );

        assert!(parse_position("0.0,1.0").is_err());
        assert!(parse_position("abc,def,ghi").is_err());
    }

    #[test]
    fn test_validate_timestep() {
        assert!(validate_timestep(1.0 / 60.0).is_ok());
        assert!(validate_timestep(0.0).is_err());
        assert!(validate_timestep(-0.1).is_err());
        assert!(validate_timestep(1.0).is_err());
        assert!(validate_timestep(f32::NAN).is_err());
    }

    #[test]
    fn test_validate_level_path() {
        assert!(validate_level_path("maze.bin").is_ok());
        assert!(validate_level_path("sub/maze.bin").is_ok());
        assert!(validate_level_path("../maze.bin").is_err());
        assert!(validate_level_path("/tmp/maze.bin").is_err());
    }

    #[test]
    fn test_wrap_angle() {
        use std::f32::consts::PI;
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(2.0 * PI + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(-2.0 * PI - 0.5) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_autopilot_walks_without_targets() {
        let simulation = Simulation::new(arena(), &GameSettings::default());
        let intent = autopilot().intent(&simulation);
        assert_eq!(intent.forward, 1.0);
        assert!(intent.fire);
        assert_eq!(intent.look, Vec2::ZERO);
    }

    #[test]
    fn test_autopilot_turns_to_face_target() {
        let mut simulation = Simulation::new(arena(), &GameSettings::default());
        simulation.spawn_enemy(Vec3::new(10.0, 1.8, 0.0));

        let intent = autopilot().intent(&simulation);
        assert_eq!(intent.forward, 0.0);
        simulation.step(0.0, &intent);

        let aim = simulation.player().aim();
        assert!(aim.direction.x > 0.99);
    }
}
