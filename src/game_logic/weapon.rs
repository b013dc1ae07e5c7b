use crate::components::Damage;
use crate::game_logic::actor::Cooldown;
use crate::game_logic::combat::Discharge;
use crate::game_logic::player::Aim;
use crate::resources::WeaponSettings;
use bevy::prelude::*;

/// Result of pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Fired(Discharge),
    Reloading,
    CoolingDown,
    /// Magazine was empty; a reload was started if one could be
    Empty { reload_started: bool },
}

/// Hitscan gun with a magazine, reload timer and per-shot cooldown
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    ammo: u32,
    magazine: u32,
    damage: Damage,
    reload_time: f32,
    reload_started: Option<f32>,
    shot_cooldown: Cooldown,
    reach: f32,
    cone_cosine: f32,
    discharge: Option<Discharge>,
}

impl Weapon {
    pub fn new(settings: &WeaponSettings) -> Self {
        let magazine = settings.magazine.get();
        Self {
            ammo: magazine,
            magazine,
            damage: Damage::new(settings.damage.get()),
            reload_time: settings.reload_time.get(),
            reload_started: None,
            shot_cooldown: Cooldown::new(settings.shot_cooldown.get()),
            reach: settings.hit_distance.get(),
            cone_cosine: settings.cone_cosine.get(),
            discharge: None,
        }
    }

    /// Fire along `aim` if the gun is ready. Firing an empty gun starts a
    /// reload instead.
    pub fn shoot(&mut self, now: f32, aim: Aim) -> ShotOutcome {
        if self.is_reloading() {
            return ShotOutcome::Reloading;
        }
        if !self.shot_cooldown.has_elapsed(now) {
            return ShotOutcome::CoolingDown;
        }
        if self.ammo == 0 {
            let reload_started = self.reload(now);
            return ShotOutcome::Empty { reload_started };
        }

        self.shot_cooldown.trigger(now);
        self.ammo -= 1;

        let discharge = Discharge {
            origin: aim.origin,
            direction: aim.direction.normalize_or_zero(),
            reach: self.reach,
            cone_cosine: self.cone_cosine,
        };
        self.discharge = Some(discharge);
        ShotOutcome::Fired(discharge)
    }

    /// Start a reload. No-op while already reloading or with a full magazine.
    pub fn reload(&mut self, now: f32) -> bool {
        if self.is_reloading() || self.ammo == self.magazine {
            return false;
        }
        self.reload_started = Some(now);
        info!("Reloading ({} rounds left)", self.ammo);
        true
    }

    /// End-of-frame housekeeping: the last discharge expires and a pending
    /// reload completes once its time is up. Returns true when a reload
    /// finished this frame.
    pub fn update(&mut self, now: f32) -> bool {
        self.discharge = None;

        match self.reload_started {
            Some(started) if now - started >= self.reload_time => {
                self.reload_started = None;
                self.ammo = self.magazine;
                true
            }
            _ => false,
        }
    }

    /// Whether a shot fired this frame reaches `target`
    pub fn can_hit(&self, target: Vec3) -> bool {
        self.discharge.is_some_and(|discharge| discharge.covers(target))
    }

    pub fn is_hitting(&self) -> bool {
        self.discharge.is_some()
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_started.is_some()
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.magazine
    }

    pub fn damage(&self) -> Damage {
        self.damage
    }
}
