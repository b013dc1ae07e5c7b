use bevy::prelude::*;
use derive_more::{Add, Display, From, Mul};
use std::ops::Sub;

// Generic clamped pool for health-like quantities
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ResourcePool<T> {
    pub current: f32,
    pub max: f32,
    _marker: std::marker::PhantomData<T>,
}

// Resource type markers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Health;

pub type HealthPool = ResourcePool<Health>;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Add, Mul, Display, From)]
pub struct Damage(pub f32);

impl<T> ResourcePool<T> {
    pub fn new(current: f32, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn new_full(max: f32) -> Self {
        Self::new(max, max)
    }

    pub fn is_empty(self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(self) -> bool {
        self.current >= self.max
    }

    pub fn percentage(self) -> f32 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }
}

// Health-specific methods
impl ResourcePool<Health> {
    pub fn is_dead(self) -> bool {
        self.current <= 0.0
    }

    pub fn take_damage(&mut self, damage: Damage) {
        self.drain(damage.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.restore(amount);
    }
}

impl<T> std::fmt::Display for ResourcePool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}/{:.0}", self.current, self.max)
    }
}

impl Speed {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Speed = Speed(0.0);
}

impl Sub for Damage {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self((self.0 - rhs.0).max(0.0))
    }
}

impl Damage {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Damage = Damage(0.0);
}

impl std::ops::Mul<Speed> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Speed) -> Self::Output {
        self * rhs.0
    }
}

// Presentation-side markers. The simulation owns the real state; these only
// tie spawned scene entities back to it.

#[derive(Component)]
pub struct FirstPersonCamera;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyAvatar {
    pub id: u32,
}

#[derive(Component)]
pub struct BossAvatar;

#[derive(Component)]
pub struct ProjectileAvatar;

#[derive(Component)]
pub struct WallBlock;

#[derive(Component)]
pub struct SceneLight;
