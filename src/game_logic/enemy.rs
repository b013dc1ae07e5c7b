use crate::components::{Damage, HealthPool};
use crate::game_logic::actor::{
    ActorId, AiState, AttackSource, Damageable, MeleeBehavior, Positioned,
};
use crate::resources::MeleeSettings;
use bevy::prelude::*;

/// Basic melee enemy: walks straight at the player once it is in sight and
/// hits on a cooldown when close enough
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    id: u32,
    melee: MeleeBehavior,
    state: AiState,
    detached: bool,
}

impl Enemy {
    pub fn new(id: u32, position: Vec3, settings: &MeleeSettings) -> Self {
        Self {
            id,
            melee: MeleeBehavior::from_settings(position, settings),
            state: AiState::Idle,
            detached: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn actor_id(&self) -> ActorId {
        ActorId::Enemy(self.id)
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    /// Advance one frame against a snapshot of the player's position
    pub fn update(&mut self, delta: f32, player_position: Vec3) -> AiState {
        self.state = if self.detached {
            AiState::Removed
        } else if !self.melee.is_alive() {
            self.melee.advance_death(delta)
        } else {
            let state = self.melee.classify(self.melee.distance_to(player_position));
            if state == AiState::Chasing {
                self.melee.step_toward(player_position, delta);
            }
            state
        };
        self.state
    }

    pub fn death_progress(&self) -> Option<f32> {
        self.melee.death_progress()
    }

    /// Detach from the world. Returns true only on the first call.
    pub fn remove(&mut self) -> bool {
        let first = !self.detached;
        self.detached = true;
        self.state = AiState::Removed;
        first
    }

    pub fn is_removed(&self) -> bool {
        self.detached
    }
}

impl Positioned for Enemy {
    fn position(&self) -> Vec3 {
        self.melee.position
    }
}

impl Damageable for Enemy {
    fn health(&self) -> HealthPool {
        self.melee.health
    }

    fn take_damage(&mut self, amount: Damage) -> bool {
        let applied = self.melee.take_damage(amount);
        if applied && self.melee.health.is_dead() {
            self.state = AiState::Dying;
        }
        applied
    }
}

impl AttackSource for Enemy {
    fn attack_damage(&self) -> Damage {
        self.melee.damage
    }

    fn is_hitting_player(&mut self, player_position: Vec3, now: f32) -> bool {
        !self.detached && self.melee.try_melee(player_position, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn enemy_at(position: Vec3) -> Enemy {
        Enemy::new(1, position, &MeleeSettings::default())
    }

    #[test]
    fn test_idle_outside_detection_range() {
        let mut enemy = enemy_at(Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(enemy.update(DT, Vec3::ZERO), AiState::Idle);
        assert_eq!(enemy.position(), Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn test_closes_to_attack_range_and_stops() {
        let player = Vec3::ZERO;
        let mut enemy = enemy_at(Vec3::new(5.0, 0.0, 0.0));
        let mut previous = enemy.position().distance(player);
        let mut arrived = false;

        for _ in 0..300 {
            enemy.update(DT, player);
            let distance = enemy.position().distance(player);

            if arrived {
                assert_eq!(distance, previous);
                assert_eq!(enemy.state(), AiState::InAttackRange);
            } else if distance <= 1.5 {
                arrived = true;
                assert!(distance > 1.5 - 2.0 * DT - 1e-5);
            } else {
                assert!(distance < previous);
            }
            previous = distance;
        }
        assert!(arrived);
    }

    #[test]
    fn test_moves_in_three_dimensions() {
        let mut enemy = enemy_at(Vec3::new(0.0, 0.0, -10.0));
        enemy.update(0.5, Vec3::new(0.0, 1.8, 0.0));
        assert!(enemy.position().y > 0.0);
    }

    #[test]
    fn test_melee_respects_cooldown() {
        let mut enemy = enemy_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(enemy.is_hitting_player(Vec3::ZERO, 0.0));
        assert!(!enemy.is_hitting_player(Vec3::ZERO, 0.5));
        assert!(!enemy.is_hitting_player(Vec3::ZERO, 1.0));
        assert!(enemy.is_hitting_player(Vec3::ZERO, 1.1));
        assert_eq!(enemy.attack_damage(), Damage::new(10.0));
    }

    #[test]
    fn test_no_melee_out_of_range() {
        let mut enemy = enemy_at(Vec3::new(3.0, 0.0, 0.0));
        assert!(!enemy.is_hitting_player(Vec3::ZERO, 0.0));
    }

    #[test]
    fn test_dying_enemy_freezes_then_expires() {
        let mut enemy = enemy_at(Vec3::new(5.0, 0.0, 0.0));
        enemy.take_damage(Damage::new(50.0));
        assert_eq!(enemy.state(), AiState::Dying);
        assert!(!enemy.is_hitting_player(Vec3::new(5.0, 0.0, 0.0), 0.0));

        let mut frames = 0;
        while enemy.update(0.1, Vec3::ZERO) == AiState::Dying {
            frames += 1;
            assert_eq!(enemy.position(), Vec3::new(5.0, 0.0, 0.0));
        }
        assert_eq!(enemy.state(), AiState::Removed);
        assert!((9..=10).contains(&frames));
    }

    #[test]
    fn test_damage_after_death_is_ignored() {
        let mut enemy = enemy_at(Vec3::ZERO);
        assert!(enemy.take_damage(Damage::new(40.0)));
        assert!(enemy.take_damage(Damage::new(40.0)));
        assert!(!enemy.take_damage(Damage::new(40.0)));
        assert_eq!(enemy.health().current, 0.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut enemy = enemy_at(Vec3::ZERO);
        assert!(enemy.remove());
        assert!(!enemy.remove());
        assert!(enemy.is_removed());
        assert_eq!(enemy.update(DT, Vec3::ZERO), AiState::Removed);
    }
}
