use crate::components::{Damage, HealthPool, Speed};
use crate::game_logic::actor::{
    AiState, AttackSource, Cooldown, Damageable, MeleeBehavior, Positioned,
};
use crate::game_logic::projectile::{Projectile, ProjectileFate};
use crate::level::CollisionGeometry;
use crate::resources::{BossSettings, ProjectileSettings};
use bevy::prelude::*;

/// Projectile impact worth showing an effect for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    Player { position: Vec3, damage: Damage },
    Wall { position: Vec3 },
}

/// Everything the boss did during one update that the caller has to apply
#[derive(Debug, Clone, PartialEq)]
pub struct BossFrame {
    pub state: AiState,
    /// Number of projectiles launched this frame
    pub volley: usize,
    pub impacts: Vec<Impact>,
}

impl BossFrame {
    fn quiet(state: AiState) -> Self {
        Self {
            state,
            volley: 0,
            impacts: Vec::new(),
        }
    }
}

/// Final enemy. A tougher melee attacker that also fires projectile volleys,
/// pauses to wind up after every attack, and enrages once at low health.
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    melee: MeleeBehavior,
    volley_cooldown: Cooldown,
    projectiles: Vec<Projectile>,
    projectile_settings: ProjectileSettings,
    windup: Option<f32>,
    windup_duration: f32,
    enraged: bool,
    enrage_threshold: f32,
    enraged_speed: f32,
    enraged_attack_cooldown: f32,
    state: AiState,
    detached: bool,
}

impl Boss {
    pub fn new(position: Vec3, settings: &BossSettings, projectile_settings: &ProjectileSettings) -> Self {
        Self {
            melee: MeleeBehavior::from_settings(position, &settings.melee()),
            volley_cooldown: Cooldown::new(settings.special_attack_cooldown.get()),
            projectiles: Vec::new(),
            projectile_settings: *projectile_settings,
            windup: None,
            windup_duration: settings.attack_windup.get(),
            enraged: false,
            enrage_threshold: settings.enrage_threshold.get(),
            enraged_speed: settings.enraged_speed.get(),
            enraged_attack_cooldown: settings.enraged_attack_cooldown.get(),
            state: AiState::Idle,
            detached: false,
        }
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    /// Mid attack animation; movement is suspended
    pub fn is_winding_up(&self) -> bool {
        self.windup.is_some()
    }

    pub fn speed(&self) -> Speed {
        self.melee.speed
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.melee.cooldown.interval()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn death_progress(&self) -> Option<f32> {
        self.melee.death_progress()
    }

    /// Advance one frame. Projectiles fly first, then the boss moves, fires
    /// its volley when ready, and plays out any windup.
    pub fn update(
        &mut self,
        delta: f32,
        now: f32,
        player_position: Vec3,
        geometry: &impl CollisionGeometry,
    ) -> BossFrame {
        if self.detached {
            self.state = AiState::Removed;
            return BossFrame::quiet(self.state);
        }
        if !self.melee.is_alive() {
            // In-flight projectiles freeze while the boss dies
            self.state = self.melee.advance_death(delta);
            return BossFrame::quiet(self.state);
        }

        let impacts = self.update_projectiles(delta, player_position, geometry);

        let distance = self.melee.distance_to(player_position);
        self.state = self.melee.classify(distance);

        let mut volley = 0;
        if distance < self.melee.detection_range {
            if self.state == AiState::Chasing && self.windup.is_none() {
                self.melee.step_toward(player_position, delta);
            }

            if self.volley_cooldown.try_trigger(now) {
                volley = self.fire_volley(player_position);
                self.windup = Some(0.0);
            }

            if let Some(elapsed) = self.windup {
                let elapsed = elapsed + delta;
                self.windup = (elapsed < self.windup_duration).then_some(elapsed);
            }
        }

        BossFrame {
            state: self.state,
            volley,
            impacts,
        }
    }

    fn update_projectiles(
        &mut self,
        delta: f32,
        player_position: Vec3,
        geometry: &impl CollisionGeometry,
    ) -> Vec<Impact> {
        let boss_position = self.melee.position;
        let settings = self.projectile_settings;
        let mut impacts = Vec::new();

        self.projectiles.retain_mut(|projectile| {
            match projectile.advance(delta, player_position, boss_position, geometry, &settings) {
                ProjectileFate::InFlight => true,
                ProjectileFate::HitPlayer(damage) => {
                    impacts.push(Impact::Player {
                        position: projectile.position(),
                        damage,
                    });
                    false
                }
                ProjectileFate::HitWall => {
                    impacts.push(Impact::Wall {
                        position: projectile.position(),
                    });
                    false
                }
                ProjectileFate::Expired => false,
            }
        });

        impacts
    }

    /// Launch a fan of projectiles from above the boss toward the player.
    /// Shots are spread symmetrically along X around the direct line.
    fn fire_volley(&mut self, player_position: Vec3) -> usize {
        let settings = self.projectile_settings;
        let origin = Vec3::new(
            self.melee.position.x,
            settings.launch_height.get(),
            self.melee.position.z,
        );
        let aim = (player_position - origin).normalize_or_zero();
        let count = settings.volley_size;
        let center = count.saturating_sub(1) as f32 / 2.0;

        for index in 0..count {
            let mut direction = aim;
            direction.x += (index as f32 - center) * settings.spread.get();
            self.projectiles.push(Projectile::launch(
                origin,
                direction,
                Damage::new(settings.damage.get()),
            ));
        }
        debug!("Boss fired a volley of {} projectiles", count);
        count as usize
    }

    fn check_enrage(&mut self) {
        if self.enraged || self.melee.health.is_dead() {
            return;
        }
        if self.melee.health.current < self.melee.health.max * self.enrage_threshold {
            self.enraged = true;
            self.melee.speed = Speed::new(self.enraged_speed);
            self.melee.cooldown.set_interval(self.enraged_attack_cooldown);
            info!(
                "Boss enraged at {} health",
                self.melee.health
            );
        }
    }

    /// Detach from the world. Returns true only on the first call.
    pub fn remove(&mut self) -> bool {
        let first = !self.detached;
        self.detached = true;
        self.state = AiState::Removed;
        self.projectiles.clear();
        first
    }

    pub fn is_removed(&self) -> bool {
        self.detached
    }
}

impl Positioned for Boss {
    fn position(&self) -> Vec3 {
        self.melee.position
    }
}

impl Damageable for Boss {
    fn health(&self) -> HealthPool {
        self.melee.health
    }

    fn take_damage(&mut self, amount: Damage) -> bool {
        let applied = self.melee.take_damage(amount);
        if applied {
            if self.melee.health.is_dead() {
                self.state = AiState::Dying;
            } else {
                self.check_enrage();
            }
        }
        applied
    }
}

impl AttackSource for Boss {
    fn attack_damage(&self) -> Damage {
        self.melee.damage
    }

    fn is_hitting_player(&mut self, player_position: Vec3, now: f32) -> bool {
        if self.detached || !self.melee.try_melee(player_position, now) {
            return false;
        }
        self.windup = Some(0.0);
        true
    }
}
