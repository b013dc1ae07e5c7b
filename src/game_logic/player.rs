use crate::components::{Damage, HealthPool, Speed};
use crate::game_logic::actor::{Damageable, Positioned};
use crate::level::CollisionGeometry;
use crate::resources::PlayerSettings;
use bevy::prelude::*;

/// Gun muzzle relative to the eye, in camera space
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(0.3, -0.15, -1.5);

/// Where a shot leaves from and where it heads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// First-person player body. `position` is the eye point.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
    pitch: f32,
    speed: Speed,
    health: HealthPool,
    collision_margin: f32,
    look_sensitivity: f32,
}

impl Player {
    /// Spawn standing on `ground`, with the eye raised to the configured height
    pub fn new(ground: Vec3, settings: &PlayerSettings) -> Self {
        Self {
            position: ground + Vec3::Y * settings.eye_height.get(),
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: settings.fixed_pitch.get(),
            speed: Speed::new(settings.movement_speed.get()),
            health: HealthPool::new_full(settings.max_health.get()),
            collision_margin: settings.collision_margin.get(),
            look_sensitivity: settings.look_sensitivity.get(),
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Heading around the vertical axis, radians
    pub fn rotation(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Queue movement along the view direction flattened onto the ground
    pub fn move_forward(&mut self, amount: f32) {
        let mut forward = self.orientation() * Vec3::NEG_Z;
        forward.y = 0.0;
        self.velocity += forward.normalize_or_zero() * amount;
    }

    pub fn move_right(&mut self, amount: f32) {
        let mut right = self.orientation() * Vec3::X;
        right.y = 0.0;
        self.velocity += right.normalize_or_zero() * amount;
    }

    /// Turn by a horizontal look delta. Vertical look stays pinned.
    pub fn look(&mut self, delta_x: f32, _delta_y: f32) {
        self.yaw -= delta_x * self.look_sensitivity;
    }

    /// Apply the queued movement for this frame and clear it.
    ///
    /// The step is resolved one axis at a time, X first, so the player slides
    /// along a wall instead of stopping dead. On each axis the step is cut
    /// short so the eye never ends up within the collision margin of a wall
    /// face.
    ///
    /// # Arguments
    /// * `delta` - Frame time in seconds
    /// * `geometry` - Walls to collide with
    ///
    /// # Returns
    /// * `Vec3` - Displacement actually applied this frame
    pub fn update(&mut self, delta: f32, geometry: &impl CollisionGeometry) -> Vec3 {
        let start = self.position;

        if self.velocity.length_squared() > 0.0 {
            let step = self.velocity.normalize() * self.speed * delta.max(0.0);

            if step.x != 0.0 {
                let allowed = self.allowed_travel(Vec3::X * step.x.signum(), step.x.abs(), geometry);
                self.position.x += step.x.signum() * allowed;
            }
            if step.z != 0.0 {
                let allowed = self.allowed_travel(Vec3::Z * step.z.signum(), step.z.abs(), geometry);
                self.position.z += step.z.signum() * allowed;
            }
        }

        self.velocity = Vec3::ZERO;
        self.position - start
    }

    fn allowed_travel(&self, direction: Vec3, wanted: f32, geometry: &impl CollisionGeometry) -> f32 {
        match geometry.raycast(self.position, direction, wanted + self.collision_margin) {
            Some(distance) => (distance - self.collision_margin).clamp(0.0, wanted),
            None => wanted,
        }
    }

    /// Muzzle position and camera forward, used for firing
    pub fn aim(&self) -> Aim {
        let orientation = self.orientation();
        Aim {
            origin: self.position + orientation * MUZZLE_OFFSET,
            direction: (orientation * Vec3::NEG_Z).normalize_or_zero(),
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health.heal(amount);
    }

    pub fn max_health(&self) -> f32 {
        self.health.max
    }
}

impl Positioned for Player {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Damageable for Player {
    fn health(&self) -> HealthPool {
        self.health
    }

    fn take_damage(&mut self, amount: Damage) -> bool {
        if self.health.is_dead() {
            return false;
        }
        self.health.take_damage(amount);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Wall;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Player {
        Player::new(Vec3::ZERO, &PlayerSettings::default())
    }

    fn no_walls() -> Vec<Wall> {
        Vec::new()
    }

    #[test]
    fn test_spawn_at_eye_height() {
        let player = player();
        assert_eq!(player.position(), Vec3::new(0.0, 1.8, 0.0));
        assert_eq!(player.health().current, 100.0);
        assert_eq!(player.pitch(), -0.1);
    }

    #[test]
    fn test_forward_ignores_pitch() {
        let mut player = player();
        player.move_forward(1.0);
        let moved = player.update(0.1, &no_walls());

        assert!(moved.y.abs() < 1e-6);
        assert!((moved.z + 1.0).abs() < 1e-4, "moved {moved:?}");
        assert!(moved.x.abs() < 1e-4);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut player = player();
        player.move_forward(0.1);
        player.move_right(0.1);
        let moved = player.update(0.1, &no_walls());
        assert!((moved.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_resets_every_frame() {
        let mut player = player();
        player.move_forward(1.0);
        assert_ne!(player.update(DT, &no_walls()), Vec3::ZERO);

        let moved = player.update(DT, &no_walls());
        assert_eq!(moved, Vec3::ZERO);
    }

    #[test]
    fn test_look_turns_and_keeps_pitch() {
        let mut player = player();
        player.look(10.0, 50.0);
        assert!((player.rotation() + 0.1).abs() < 1e-6);
        assert_eq!(player.pitch(), -0.1);

        // Turning right means forward gains +X
        player.move_forward(1.0);
        let moved = player.update(0.1, &no_walls());
        assert!(moved.x > 0.0);
    }

    #[test]
    fn test_wall_stops_player_at_margin() {
        let walls = vec![Wall::new(Vec3::new(0.0, 2.0, -5.0), Vec3::new(4.0, 2.0, 0.5))];
        let mut player = player();

        for _ in 0..120 {
            player.move_forward(1.0);
            player.update(DT, &walls);
        }

        let face = -4.5;
        assert!(player.position().z >= face + 0.5 - 1e-4);
        assert!(player.position().z < face + 0.5 + 0.2);
    }

    #[test]
    fn test_margin_holds_from_every_approach_angle() {
        let walls = vec![Wall::new(Vec3::new(0.0, 2.0, -6.0), Vec3::new(20.0, 2.0, 0.5))];
        let face = -5.5;

        for step in 0..12 {
            let mut player = player();
            player.look(-60.0 + step as f32 * 10.0, 0.0);

            for _ in 0..120 {
                player.move_forward(1.0);
                player.update(DT, &walls);
                assert!(player.position().z >= face + 0.5 - 1e-4);
            }
        }
    }

    #[test]
    fn test_blocked_axis_still_slides() {
        let walls = vec![Wall::new(Vec3::new(0.0, 2.0, -2.0), Vec3::new(20.0, 2.0, 0.5))];
        let mut player = player();
        player.look(-40.0, 0.0);

        let mut last_x = player.position().x;
        for _ in 0..60 {
            player.move_forward(1.0);
            player.update(DT, &walls);
        }
        assert!(player.position().x < last_x);
        last_x = player.position().x;

        // Pressed against the wall, X keeps moving while Z is pinned
        let z = player.position().z;
        player.move_forward(1.0);
        player.update(DT, &walls);
        assert!(player.position().x < last_x);
        assert!((player.position().z - z).abs() < 1e-5);
    }

    #[test]
    fn test_aim_starts_at_muzzle() {
        let player = player();
        let aim = player.aim();
        let expected = player.position() + player.orientation() * MUZZLE_OFFSET;

        assert!(aim.origin.distance(expected) < 1e-6);
        assert!((aim.direction.length() - 1.0).abs() < 1e-5);
        assert!(aim.direction.z < 0.0);
        assert!(aim.direction.y < 0.0);
    }

    #[test]
    fn test_damage_and_heal_stay_in_bounds() {
        let mut player = player();
        assert!(player.take_damage(Damage::new(30.0)));
        player.heal(500.0);
        assert_eq!(player.health().current, 100.0);

        player.take_damage(Damage::new(250.0));
        assert!(player.is_dead());
        assert_eq!(player.health().current, 0.0);
        assert!(!player.take_damage(Damage::new(1.0)));
    }
}
