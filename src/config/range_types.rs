use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A movement speed value constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// A health value constrained to [1.0, 1000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct HealthValue(f32);

impl HealthValue {
    const MIN: f32 = 1.0;
    const MAX: f32 = 1000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for HealthValue {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// A per-hit damage value constrained to [0.0, 500.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct HitDamage(f32);

impl HitDamage {
    const MIN: f32 = 0.0;
    const MAX: f32 = 500.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for HitDamage {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// A short contact distance constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ReachDistance(f32);

impl ReachDistance {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ReachDistance {
    fn default() -> Self {
        Self::new(1.5)
    }
}

/// A long-range distance constrained to [1.0, 200.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SightDistance(f32);

impl SightDistance {
    const MIN: f32 = 1.0;
    const MAX: f32 = 200.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SightDistance {
    fn default() -> Self {
        Self::new(15.0)
    }
}

/// A cooldown interval in seconds constrained to [0.01, 60.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct CooldownSecs(f32);

impl CooldownSecs {
    const MIN: f32 = 0.01;
    const MAX: f32 = 60.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for CooldownSecs {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// An animation duration in seconds constrained to [0.05, 30.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct AnimationDuration(f32);

impl AnimationDuration {
    const MIN: f32 = 0.05;
    const MAX: f32 = 30.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A lifetime value constrained to [0.5, 30.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Lifetime(f32);

impl Lifetime {
    const MIN: f32 = 0.5;
    const MAX: f32 = 30.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// A unit fraction constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct Fraction(f32);

impl Fraction {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::new(0.3)
    }
}

/// A look sensitivity in radians per mouse unit constrained to [0.0001, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct LookSensitivity(f32);

impl LookSensitivity {
    const MIN: f32 = 0.0001;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LookSensitivity {
    fn default() -> Self {
        Self::new(0.01)
    }
}

/// A pitch angle in radians constrained to [-1.5, 1.5]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct PitchAngle(f32);

impl PitchAngle {
    const MIN: f32 = -1.5;
    const MAX: f32 = 1.5;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for PitchAngle {
    fn default() -> Self {
        Self::new(-0.1)
    }
}

/// An eye height constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct EyeHeight(f32);

impl EyeHeight {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for EyeHeight {
    fn default() -> Self {
        Self::new(1.8)
    }
}

/// A projectile launch height above the ground constrained to [0.0, 20.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct LaunchHeight(f32);

impl LaunchHeight {
    const MIN: f32 = 0.0;
    const MAX: f32 = 20.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LaunchHeight {
    fn default() -> Self {
        Self::new(3.0)
    }
}

/// Sideways aim offset between neighbouring volley shots constrained to [0.0, 2.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SpreadOffset(f32);

impl SpreadOffset {
    const MIN: f32 = 0.0;
    const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SpreadOffset {
    fn default() -> Self {
        Self::new(0.2)
    }
}

/// A projectile speed value constrained to [1.0, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ProjectileSpeed(f32);

impl ProjectileSpeed {
    const MIN: f32 = 1.0;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ProjectileSpeed {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// A magazine capacity constrained to [1, 999]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct AmmoCapacity(u32);

impl AmmoCapacity {
    const MIN: u32 = 1;
    const MAX: u32 = 999;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for AmmoCapacity {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_speed_clamping() {
        assert_eq!(MovementSpeed::new(-1.0).get(), 0.1);
        assert_eq!(MovementSpeed::new(0.05).get(), 0.1);
        assert_eq!(MovementSpeed::new(5.0).get(), 5.0);
        assert_eq!(MovementSpeed::new(100.0).get(), 50.0);
    }

    #[test]
    fn test_health_value_clamping() {
        assert_eq!(HealthValue::new(0.5).get(), 1.0);
        assert_eq!(HealthValue::new(100.0).get(), 100.0);
        assert_eq!(HealthValue::new(2000.0).get(), 1000.0);
    }

    #[test]
    fn test_cooldown_never_zero() {
        assert_eq!(CooldownSecs::new(0.0).get(), 0.01);
        assert_eq!(CooldownSecs::new(-3.0).get(), 0.01);
    }

    #[test]
    fn test_pitch_allows_negative_angles() {
        assert_eq!(PitchAngle::new(-0.1).get(), -0.1);
        assert_eq!(PitchAngle::new(-4.0).get(), -1.5);
    }

    #[test]
    fn test_ammo_capacity_clamping() {
        assert_eq!(AmmoCapacity::new(0).get(), 1);
        assert_eq!(AmmoCapacity::new(5000).get(), 999);
    }

    #[test]
    fn test_launch_height_and_spread_clamping() {
        assert_eq!(LaunchHeight::new(-1.0).get(), 0.0);
        assert_eq!(LaunchHeight::new(3.0).get(), 3.0);
        assert_eq!(SpreadOffset::new(5.0).get(), 2.0);
        assert_eq!(SpreadOffset::default().get(), 0.2);
    }

    #[test]
    fn test_display() {
        let speed = MovementSpeed::new(5.5);
        assert_eq!(format!("{speed}"), "5.5");
        assert_eq!(format!("{}", AmmoCapacity::new(30)), "30");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MovementSpeed::default().get(), 5.0);
        assert_eq!(HealthValue::default().get(), 100.0);
        assert_eq!(ProjectileSpeed::default().get(), 10.0);
        assert_eq!(AmmoCapacity::default().get(), 50);
    }
}
