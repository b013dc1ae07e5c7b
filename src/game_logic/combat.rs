use crate::components::Damage;
use crate::game_logic::actor::{AttackSource, Damageable, Positioned};
use crate::game_logic::weapon::Weapon;
use bevy::prelude::*;

/// A shot in progress, live for the frame it was fired in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discharge {
    pub origin: Vec3,
    pub direction: Vec3,
    pub reach: f32,
    /// Minimum cosine between `direction` and the line to a target
    pub cone_cosine: f32,
}

impl Discharge {
    /// Cone test: the target is within reach and strictly inside the cone
    pub fn covers(&self, target: Vec3) -> bool {
        let to_target = target - self.origin;
        if to_target.length() > self.reach {
            return false;
        }
        to_target.normalize_or_zero().dot(self.direction) > self.cone_cosine
    }
}

/// Result of a weapon hit that landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponHit {
    pub amount: Damage,
    pub remaining: f32,
    pub killed: bool,
}

/// Apply the weapon's current discharge to a target, if it covers it.
/// Dead targets are never hit.
///
/// # Arguments
/// * `weapon` - Weapon whose discharge for this frame is tested
/// * `target` - Actor that takes the damage on a hit
///
/// # Returns
/// * `Option<WeaponHit>` - Damage dealt and whether it killed, or `None` on a miss
pub fn resolve_weapon_hit<T: Positioned + Damageable>(weapon: &Weapon, target: &mut T) -> Option<WeaponHit> {
    if target.is_dead() || !weapon.can_hit(target.position()) {
        return None;
    }
    let amount = weapon.damage();
    target.take_damage(amount).then(|| WeaponHit {
        amount,
        remaining: target.health().current,
        killed: target.is_dead(),
    })
}

/// Roll a melee attack against the player; yields the damage to apply
pub fn resolve_melee<T: AttackSource + Damageable>(
    attacker: &mut T,
    player_position: Vec3,
    now: f32,
) -> Option<Damage> {
    if attacker.is_dead() {
        return None;
    }
    attacker
        .is_hitting_player(player_position, now)
        .then(|| attacker.attack_damage())
}
