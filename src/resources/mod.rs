use crate::config::range_types::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GameConfig {
    /// Level file relative to the levels directory; the built-in maze when unset
    pub level_file: Option<String>,
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
// NOTE: When adding new fields, update the defaults below and the round-trip test in config/mod.rs
pub struct GameSettings {
    pub player: PlayerSettings,
    pub enemy: MeleeSettings,
    pub boss: BossSettings,
    pub weapon: WeaponSettings,
    pub projectile: ProjectileSettings,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PlayerSettings {
    pub movement_speed: MovementSpeed,
    pub max_health: HealthValue,
    pub collision_margin: ReachDistance,
    pub look_sensitivity: LookSensitivity,
    pub fixed_pitch: PitchAngle,
    pub eye_height: EyeHeight,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            movement_speed: MovementSpeed::new(10.0),
            max_health: HealthValue::new(100.0),
            collision_margin: ReachDistance::new(0.5),
            look_sensitivity: LookSensitivity::new(0.01),
            fixed_pitch: PitchAngle::new(-0.1),
            eye_height: EyeHeight::new(1.8),
        }
    }
}

/// Tuning shared by every melee attacker
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MeleeSettings {
    pub max_health: HealthValue,
    pub movement_speed: MovementSpeed,
    pub damage: HitDamage,
    pub attack_range: ReachDistance,
    pub detection_range: SightDistance,
    pub attack_cooldown: CooldownSecs,
    pub death_duration: AnimationDuration,
}

impl Default for MeleeSettings {
    fn default() -> Self {
        Self {
            max_health: HealthValue::new(50.0),
            movement_speed: MovementSpeed::new(2.0),
            damage: HitDamage::new(10.0),
            attack_range: ReachDistance::new(1.5),
            detection_range: SightDistance::new(15.0),
            attack_cooldown: CooldownSecs::new(1.0),
            death_duration: AnimationDuration::new(1.0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BossSettings {
    pub max_health: HealthValue,
    pub movement_speed: MovementSpeed,
    pub damage: HitDamage,
    pub attack_range: ReachDistance,
    pub detection_range: SightDistance,
    pub attack_cooldown: CooldownSecs,
    pub death_duration: AnimationDuration,
    pub special_attack_cooldown: CooldownSecs,
    pub attack_windup: AnimationDuration,
    pub enrage_threshold: Fraction,
    pub enraged_speed: MovementSpeed,
    pub enraged_attack_cooldown: CooldownSecs,
}

impl BossSettings {
    /// Melee half of the boss tuning, in the shape the shared behavior expects
    pub fn melee(&self) -> MeleeSettings {
        MeleeSettings {
            max_health: self.max_health,
            movement_speed: self.movement_speed,
            damage: self.damage,
            attack_range: self.attack_range,
            detection_range: self.detection_range,
            attack_cooldown: self.attack_cooldown,
            death_duration: self.death_duration,
        }
    }
}

impl Default for BossSettings {
    fn default() -> Self {
        Self {
            max_health: HealthValue::new(500.0),
            movement_speed: MovementSpeed::new(1.5),
            damage: HitDamage::new(25.0),
            attack_range: ReachDistance::new(2.5),
            detection_range: SightDistance::new(30.0),
            attack_cooldown: CooldownSecs::new(2.0),
            death_duration: AnimationDuration::new(4.0),
            special_attack_cooldown: CooldownSecs::new(10.0),
            attack_windup: AnimationDuration::new(0.5),
            enrage_threshold: Fraction::new(0.3),
            enraged_speed: MovementSpeed::new(3.0),
            enraged_attack_cooldown: CooldownSecs::new(1.0),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WeaponSettings {
    pub magazine: AmmoCapacity,
    pub damage: HitDamage,
    pub reload_time: CooldownSecs,
    pub shot_cooldown: CooldownSecs,
    pub hit_distance: SightDistance,
    /// Minimum cosine between the shot direction and the direction to a target
    pub cone_cosine: Fraction,
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            magazine: AmmoCapacity::new(50),
            damage: HitDamage::new(20.0),
            reload_time: CooldownSecs::new(2.0),
            shot_cooldown: CooldownSecs::new(0.2),
            hit_distance: SightDistance::new(20.0),
            cone_cosine: Fraction::new(0.7),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSettings {
    pub speed: ProjectileSpeed,
    pub damage: HitDamage,
    pub hit_radius: ReachDistance,
    pub wall_probe_length: ReachDistance,
    pub wall_hit_distance: ReachDistance,
    pub lifetime: Lifetime,
    pub max_boss_distance: SightDistance,
    /// Added to the aim's X component per shot away from the center
    pub spread: SpreadOffset,
    pub launch_height: LaunchHeight,
    pub volley_size: u32,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            speed: ProjectileSpeed::new(10.0),
            damage: HitDamage::new(15.0),
            hit_radius: ReachDistance::new(1.2),
            wall_probe_length: ReachDistance::new(1.0),
            wall_hit_distance: ReachDistance::new(0.5),
            lifetime: Lifetime::new(5.0),
            max_boss_distance: SightDistance::new(50.0),
            spread: SpreadOffset::new(0.2),
            launch_height: LaunchHeight::new(3.0),
            volley_size: 3,
        }
    }
}

/// Player intent gathered from devices for the next simulation step
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Forward/backward input, positive is forward
    pub forward: f32,
    /// Strafe input, positive is right
    pub right: f32,
    /// Raw look delta in device units
    pub look: Vec2,
    pub fire: bool,
    pub reload: bool,
}

impl PlayerIntent {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
    LevelComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_melee_view_matches_boss_tuning() {
        let boss = BossSettings::default();
        let melee = boss.melee();
        assert_eq!(melee.attack_range.get(), 2.5);
        assert_eq!(melee.detection_range.get(), 30.0);
        assert_eq!(melee.attack_cooldown.get(), 2.0);
    }

    #[test]
    fn test_boss_carries_projectile_tuning() {
        let settings = ProjectileSettings::default();
        let boss = crate::game_logic::Boss::new(Vec3::ZERO, &BossSettings::default(), &settings);
        assert_eq!(boss.clone(), boss);
        assert_eq!(settings.launch_height.get(), 3.0);
        assert_eq!(settings.spread.get(), 0.2);
    }

    #[test]
    fn test_intent_clear() {
        let mut intent = PlayerIntent {
            forward: 1.0,
            right: -1.0,
            look: Vec2::new(3.0, 0.0),
            fire: true,
            reload: true,
        };
        intent.clear();
        assert_eq!(intent, PlayerIntent::default());
    }
}
