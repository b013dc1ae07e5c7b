//! Capabilities shared by every combatant and the melee behavior that
//! enemies and the boss both build on.

use crate::components::{Damage, HealthPool, Speed};
use crate::resources::MeleeSettings;
use bevy::prelude::*;
use std::fmt;

/// Stable handle for an actor, used in events and by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorId {
    Player,
    Enemy(u32),
    Boss,
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Player => write!(f, "player"),
            ActorId::Enemy(id) => write!(f, "enemy #{id}"),
            ActorId::Boss => write!(f, "boss"),
        }
    }
}

/// Behavior state of an AI actor for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
    Idle,
    Chasing,
    InAttackRange,
    Dying,
    Removed,
}

pub trait Positioned {
    fn position(&self) -> Vec3;
}

pub trait Damageable {
    fn health(&self) -> HealthPool;

    /// Returns false when the actor was already dead and nothing changed
    fn take_damage(&mut self, amount: Damage) -> bool;

    fn is_dead(&self) -> bool {
        self.health().is_dead()
    }
}

pub trait AttackSource: Positioned {
    fn attack_damage(&self) -> Damage;

    /// Cooldown-gated melee roll. A successful roll starts a new cooldown
    /// window, so call this at most once per frame.
    fn is_hitting_player(&mut self, player_position: Vec3, now: f32) -> bool;
}

/// Timestamp gate over simulation time. A gate that never fired is ready.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    interval: f32,
    last: Option<f32>,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            last: None,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval.max(0.0);
    }

    pub fn last(&self) -> Option<f32> {
        self.last
    }

    /// Strictly more than `interval` has passed since the last trigger
    pub fn is_ready(&self, now: f32) -> bool {
        self.last.is_none_or(|last| now - last > self.interval)
    }

    /// At least `interval` has passed since the last trigger
    pub fn has_elapsed(&self, now: f32) -> bool {
        self.last.is_none_or(|last| now - last >= self.interval)
    }

    pub fn trigger(&mut self, now: f32) {
        self.last = Some(now);
    }

    /// Trigger if `is_ready`. Melee rolls and volleys go through here.
    pub fn try_trigger(&mut self, now: f32) -> bool {
        let ready = self.is_ready(now);
        if ready {
            self.trigger(now);
        }
        ready
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vitality {
    Alive,
    Dying { elapsed: f32 },
    /// Death animation finished
    Expired,
}

/// Position, health, pursuit and melee logic common to enemies and the boss
#[derive(Debug, Clone, PartialEq)]
pub struct MeleeBehavior {
    pub position: Vec3,
    pub health: HealthPool,
    pub speed: Speed,
    pub damage: Damage,
    pub attack_range: f32,
    pub detection_range: f32,
    pub cooldown: Cooldown,
    pub vitality: Vitality,
    pub death_duration: f32,
}

impl MeleeBehavior {
    pub fn from_settings(position: Vec3, settings: &MeleeSettings) -> Self {
        Self {
            position,
            health: HealthPool::new_full(settings.max_health.get()),
            speed: Speed::new(settings.movement_speed.get()),
            damage: Damage::new(settings.damage.get()),
            attack_range: settings.attack_range.get(),
            detection_range: settings.detection_range.get(),
            cooldown: Cooldown::new(settings.attack_cooldown.get()),
            vitality: Vitality::Alive,
            death_duration: settings.death_duration.get(),
        }
    }

    pub fn distance_to(&self, target: Vec3) -> f32 {
        self.position.distance(target)
    }

    /// Range classification, recomputed from scratch every frame
    pub fn classify(&self, distance: f32) -> AiState {
        if distance <= self.attack_range {
            AiState::InAttackRange
        } else if distance < self.detection_range {
            AiState::Chasing
        } else {
            AiState::Idle
        }
    }

    /// Advance straight at the target by `speed * delta`
    pub fn step_toward(&mut self, target: Vec3, delta: f32) {
        let direction = (target - self.position).normalize_or_zero();
        self.position += direction * self.speed * delta;
    }

    pub fn try_melee(&mut self, target: Vec3, now: f32) -> bool {
        if !matches!(self.vitality, Vitality::Alive) || self.health.is_dead() {
            return false;
        }
        self.distance_to(target) <= self.attack_range && self.cooldown.try_trigger(now)
    }

    /// Apply damage to a living actor and latch the dying state on the
    /// first hit that empties its health
    pub fn take_damage(&mut self, amount: Damage) -> bool {
        if self.health.is_dead() {
            return false;
        }
        self.health.take_damage(amount);
        if self.health.is_dead() && matches!(self.vitality, Vitality::Alive) {
            self.vitality = Vitality::Dying { elapsed: 0.0 };
        }
        true
    }

    /// Progress the death animation; returns the state after this frame
    pub fn advance_death(&mut self, delta: f32) -> AiState {
        match self.vitality {
            Vitality::Alive => AiState::Dying,
            Vitality::Dying { elapsed } => {
                let elapsed = elapsed + delta;
                if elapsed >= self.death_duration {
                    self.vitality = Vitality::Expired;
                    AiState::Removed
                } else {
                    self.vitality = Vitality::Dying { elapsed };
                    AiState::Dying
                }
            }
            Vitality::Expired => AiState::Removed,
        }
    }

    /// Fraction of the death animation played so far
    pub fn death_progress(&self) -> Option<f32> {
        match self.vitality {
            Vitality::Alive => None,
            Vitality::Dying { .. } if self.death_duration <= 0.0 => Some(1.0),
            Vitality::Dying { elapsed } => Some((elapsed / self.death_duration).min(1.0)),
            Vitality::Expired => Some(1.0),
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.vitality, Vitality::Alive)
    }
}
