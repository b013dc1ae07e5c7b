use crate::components::Damage;
use crate::level::CollisionGeometry;
use crate::resources::ProjectileSettings;
use bevy::prelude::*;

/// What happened to a projectile this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileFate {
    InFlight,
    HitPlayer(Damage),
    HitWall,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec3,
    direction: Vec3,
    damage: Damage,
    age: f32,
}

impl Projectile {
    pub fn launch(origin: Vec3, direction: Vec3, damage: Damage) -> Self {
        Self {
            position: origin,
            direction: direction.normalize_or_zero(),
            damage,
            age: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    /// Move one frame and resolve impacts, checked in order: player, wall,
    /// then range and lifetime limits.
    ///
    /// # Arguments
    /// * `delta` - Frame time in seconds
    /// * `player_position` - Eye point tested against the hit radius
    /// * `boss_position` - Where the boss stands now; range is measured from here
    /// * `geometry` - Walls probed along the flight direction
    /// * `settings` - Speed, radii and limits
    ///
    /// # Returns
    /// * `ProjectileFate` - `InFlight` while the projectile should be kept
    pub fn advance(
        &mut self,
        delta: f32,
        player_position: Vec3,
        boss_position: Vec3,
        geometry: &impl CollisionGeometry,
        settings: &ProjectileSettings,
    ) -> ProjectileFate {
        self.age += delta;
        self.position += self.direction * settings.speed.get() * delta;

        if self.position.distance(player_position) < settings.hit_radius.get() {
            return ProjectileFate::HitPlayer(self.damage);
        }

        let wall_hit = geometry
            .raycast(self.position, self.direction, settings.wall_probe_length.get())
            .is_some_and(|distance| distance < settings.wall_hit_distance.get());
        if wall_hit {
            return ProjectileFate::HitWall;
        }

        if self.position.distance(boss_position) > settings.max_boss_distance.get()
            || self.age > settings.lifetime.get()
        {
            return ProjectileFate::Expired;
        }

        ProjectileFate::InFlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Wall;

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> ProjectileSettings {
        ProjectileSettings::default()
    }

    #[test]
    fn test_moves_along_direction() {
        let mut projectile = Projectile::launch(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), Damage::new(15.0));
        let fate = projectile.advance(0.1, Vec3::new(50.0, 0.0, 0.0), Vec3::ZERO, &Vec::<Wall>::new(), &settings());

        assert_eq!(fate, ProjectileFate::InFlight);
        assert!((projectile.position().z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hits_player_within_radius() {
        let mut projectile = Projectile::launch(Vec3::ZERO, Vec3::Z, Damage::new(15.0));
        let player = Vec3::new(0.0, 0.0, 3.0);
        let walls: Vec<Wall> = Vec::new();

        let mut fate = ProjectileFate::InFlight;
        for _ in 0..60 {
            fate = projectile.advance(DT, player, Vec3::ZERO, &walls, &settings());
            if fate != ProjectileFate::InFlight {
                break;
            }
        }
        assert_eq!(fate, ProjectileFate::HitPlayer(Damage::new(15.0)));
        assert!(projectile.position().distance(player) < 1.2);
    }

    #[test]
    fn test_stops_at_wall() {
        let walls = vec![Wall::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(2.0, 2.0, 0.5))];
        let mut projectile = Projectile::launch(Vec3::ZERO, Vec3::Z, Damage::new(15.0));

        let mut fate = ProjectileFate::InFlight;
        while fate == ProjectileFate::InFlight {
            fate = projectile.advance(DT, Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, &walls, &settings());
        }
        assert_eq!(fate, ProjectileFate::HitWall);
        assert!(projectile.position().z >= 4.0 && projectile.position().z < 4.5);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut projectile = Projectile::launch(Vec3::ZERO, Vec3::Y, Damage::new(15.0));
        let walls: Vec<Wall> = Vec::new();

        let mut frames = 0;
        while projectile.advance(0.5, Vec3::new(100.0, 0.0, 0.0), Vec3::new(0.0, 30.0, 0.0), &walls, &settings())
            == ProjectileFate::InFlight
        {
            frames += 1;
        }
        assert_eq!(frames, 10);
        assert!(projectile.age() > 5.0);
    }

    #[test]
    fn test_expires_far_from_boss() {
        let mut projectile = Projectile::launch(Vec3::ZERO, Vec3::X, Damage::new(15.0));
        let fate = projectile.advance(DT, Vec3::new(0.0, 0.0, 90.0), Vec3::new(-60.0, 0.0, 0.0), &Vec::<Wall>::new(), &settings());
        assert_eq!(fate, ProjectileFate::Expired);
    }
}
