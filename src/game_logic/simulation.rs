use crate::components::Damage;
use crate::game_logic::actor::{ActorId, AiState, Damageable, Positioned};
use crate::game_logic::boss::{Boss, Impact};
use crate::game_logic::combat::{resolve_melee, resolve_weapon_hit};
use crate::game_logic::enemy::Enemy;
use crate::game_logic::events::GameEvent;
use crate::game_logic::hud::{HudSnapshot, MinimapSnapshot};
use crate::game_logic::player::Player;
use crate::game_logic::weapon::{ShotOutcome, Weapon};
use crate::level::LevelDefinition;
use crate::resources::{GameSettings, PlayerIntent};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Running,
    GameOver,
    LevelComplete,
}

/// Events produced by one step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub events: Vec<GameEvent>,
    pub outcome: Outcome,
}

/// Owns every actor and runs the per-frame update in a fixed order:
/// input, player, enemies, boss, weapon.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    settings: GameSettings,
    level: LevelDefinition,
    clock: f32,
    frame: u64,
    player: Player,
    weapon: Weapon,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    boss: Option<Boss>,
    outcome: Outcome,
    input_enabled: bool,
}

impl Simulation {
    pub fn new(level: LevelDefinition, settings: &GameSettings) -> Self {
        let mut simulation = Self {
            settings: settings.clone(),
            player: Player::new(level.player_spawn, &settings.player),
            weapon: Weapon::new(&settings.weapon),
            enemies: Vec::with_capacity(level.enemy_spawns.len()),
            next_enemy_id: 0,
            boss: None,
            clock: 0.0,
            frame: 0,
            outcome: Outcome::Running,
            input_enabled: true,
            level,
        };

        let spawns = simulation.level.enemy_spawns.clone();
        for spawn in spawns {
            simulation.spawn_enemy(spawn);
        }
        if let Some(spawn) = simulation.level.boss_spawn {
            simulation.spawn_boss(spawn);
        }

        info!(
            "Level '{}' ready: {} walls, {} enemies, boss {}",
            simulation.level.name,
            simulation.level.walls.len(),
            simulation.enemies.len(),
            if simulation.boss.is_some() { "present" } else { "absent" }
        );
        simulation
    }

    /// Add an enemy at `position` and return its id
    pub fn spawn_enemy(&mut self, position: Vec3) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        self.enemies.push(Enemy::new(id, position, &self.settings.enemy));
        id
    }

    /// Place the boss, replacing any existing one
    pub fn spawn_boss(&mut self, position: Vec3) {
        self.boss = Some(Boss::new(position, &self.settings.boss, &self.settings.projectile));
    }

    /// Advance the world by `delta` seconds. Once the run has ended this is a
    /// no-op that reports the final outcome.
    pub fn step(&mut self, delta: f32, intent: &PlayerIntent) -> FrameReport {
        if self.outcome != Outcome::Running {
            return FrameReport {
                frame: self.frame,
                events: Vec::new(),
                outcome: self.outcome,
            };
        }

        let delta = delta.max(0.0);
        self.clock += delta;
        self.frame += 1;
        let now = self.clock;
        let mut events = Vec::new();

        if self.input_enabled {
            self.apply_intent(intent, now, &mut events);
        }

        self.player.update(delta, &self.level);

        self.update_enemies(delta, now, &mut events);
        self.update_boss(delta, now, &mut events);

        if self.weapon.update(now) {
            info!("Reload finished");
            events.push(GameEvent::ReloadFinished);
        }

        FrameReport {
            frame: self.frame,
            events,
            outcome: self.outcome,
        }
    }

    fn apply_intent(&mut self, intent: &PlayerIntent, now: f32, events: &mut Vec<GameEvent>) {
        if intent.look != Vec2::ZERO {
            self.player.look(intent.look.x, intent.look.y);
        }
        if intent.forward != 0.0 {
            self.player.move_forward(intent.forward);
        }
        if intent.right != 0.0 {
            self.player.move_right(intent.right);
        }
        if intent.reload && self.weapon.reload(now) {
            events.push(GameEvent::ReloadStarted);
        }
        if intent.fire {
            match self.weapon.shoot(now, self.player.aim()) {
                ShotOutcome::Fired(discharge) => events.push(GameEvent::WeaponFired {
                    origin: discharge.origin,
                    direction: discharge.direction,
                    ammo_left: self.weapon.ammo(),
                }),
                ShotOutcome::Empty {
                    reload_started: true,
                } => events.push(GameEvent::ReloadStarted),
                _ => {}
            }
        }
    }

    fn update_enemies(&mut self, delta: f32, now: f32, events: &mut Vec<GameEvent>) {
        for enemy in &mut self.enemies {
            let state = enemy.update(delta, self.player.position());
            let target = enemy.actor_id();

            if state == AiState::Removed {
                if enemy.remove() {
                    events.push(GameEvent::ActorRemoved { target });
                }
                continue;
            }

            if let Some(hit) = resolve_weapon_hit(&self.weapon, enemy) {
                events.push(GameEvent::ActorDamaged {
                    target,
                    amount: hit.amount.0,
                    remaining: hit.remaining,
                });
                if hit.killed {
                    debug!("{} killed", target);
                    events.push(GameEvent::ActorKilled { target });
                    if enemy.remove() {
                        events.push(GameEvent::ActorRemoved { target });
                    }
                    continue;
                }
            }

            if let Some(damage) = resolve_melee(enemy, self.player.position(), now) {
                damage_player(
                    &mut self.player,
                    &mut self.outcome,
                    &mut self.input_enabled,
                    events,
                    target,
                    damage,
                );
            }
        }

        self.enemies.retain(|enemy| !enemy.is_removed());
    }

    fn update_boss(&mut self, delta: f32, now: f32, events: &mut Vec<GameEvent>) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        let frame = boss.update(delta, now, self.player.position(), &self.level);

        for impact in &frame.impacts {
            match *impact {
                Impact::Player { position, damage } => {
                    events.push(GameEvent::ProjectileImpact {
                        position,
                        hit_player: true,
                    });
                    damage_player(
                        &mut self.player,
                        &mut self.outcome,
                        &mut self.input_enabled,
                        events,
                        ActorId::Boss,
                        damage,
                    );
                }
                Impact::Wall { position } => events.push(GameEvent::ProjectileImpact {
                    position,
                    hit_player: false,
                }),
            }
        }
        if frame.volley > 0 {
            events.push(GameEvent::VolleyFired {
                projectiles: frame.volley,
            });
        }

        let mut defeated = frame.state == AiState::Removed;

        if !defeated {
            let was_enraged = boss.is_enraged();
            if let Some(hit) = resolve_weapon_hit(&self.weapon, boss) {
                events.push(GameEvent::ActorDamaged {
                    target: ActorId::Boss,
                    amount: hit.amount.0,
                    remaining: hit.remaining,
                });
                if !was_enraged && boss.is_enraged() {
                    events.push(GameEvent::BossEnraged);
                }
                if hit.killed {
                    events.push(GameEvent::ActorKilled {
                        target: ActorId::Boss,
                    });
                    defeated = true;
                }
            }
        }

        if defeated {
            if boss.remove() {
                events.push(GameEvent::ActorRemoved {
                    target: ActorId::Boss,
                });
            }
            self.boss = None;
            if self.outcome == Outcome::Running {
                info!("Boss defeated, level complete after {:.1}s", now);
                self.outcome = Outcome::LevelComplete;
                self.input_enabled = false;
                events.push(GameEvent::LevelComplete);
            }
            return;
        }

        if let Some(damage) = resolve_melee(boss, self.player.position(), now) {
            damage_player(
                &mut self.player,
                &mut self.outcome,
                &mut self.input_enabled,
                events,
                ActorId::Boss,
                damage,
            );
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.player, &self.weapon)
    }

    pub fn minimap(&self) -> MinimapSnapshot {
        MinimapSnapshot::capture(&self.player, &self.level.walls, &self.enemies, self.boss.as_ref())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }
}

/// Apply damage to the player and end the run if it died
fn damage_player(
    player: &mut Player,
    outcome: &mut Outcome,
    input_enabled: &mut bool,
    events: &mut Vec<GameEvent>,
    source: ActorId,
    damage: Damage,
) {
    if !player.take_damage(damage) {
        return;
    }
    events.push(GameEvent::PlayerDamaged {
        source,
        amount: damage.0,
        remaining: player.health().current,
    });

    if player.is_dead() && *outcome == Outcome::Running {
        info!("Player killed by {}", source);
        *outcome = Outcome::GameOver;
        *input_enabled = false;
        events.push(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Wall;

    const DT: f32 = 1.0 / 60.0;

    /// Open arena with one distant wall and nothing spawned
    fn arena() -> LevelDefinition {
        LevelDefinition {
            name: "arena".to_string(),
            walls: vec![Wall::new(Vec3::new(0.0, 2.0, 60.0), Vec3::new(2.0, 2.0, 0.5))],
            player_spawn: Vec3::ZERO,
            enemy_spawns: Vec::new(),
            boss_spawn: None,
        }
    }

    fn simulation() -> Simulation {
        Simulation::new(arena(), &GameSettings::default())
    }

    fn fire() -> PlayerIntent {
        PlayerIntent {
            fire: true,
            ..PlayerIntent::default()
        }
    }

    fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
        events.iter().filter(|event| *event == wanted).count()
    }

    #[test]
    fn test_maze_populates_actors() {
        let simulation = Simulation::new(LevelDefinition::maze(), &GameSettings::default());
        assert_eq!(simulation.enemies().len(), 14);
        assert!(simulation.boss().is_some());
        assert_eq!(simulation.player().position(), Vec3::new(0.0, 1.8, 0.0));
        assert_eq!(simulation.outcome(), Outcome::Running);
    }

    #[test]
    fn test_shot_hits_enemy_only_on_firing_frame() {
        let mut simulation = simulation();
        let aim = simulation.player().aim();
        simulation.spawn_enemy(aim.origin + aim.direction * 10.0);

        let report = simulation.step(DT, &fire());
        assert!(report.events.iter().any(|event| matches!(
            event,
            GameEvent::ActorDamaged {
                target: ActorId::Enemy(0),
                remaining,
                ..
            } if *remaining == 30.0
        )));
        assert!(!simulation.weapon().is_hitting());

        let report = simulation.step(DT, &PlayerIntent::default());
        assert!(!report
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::ActorDamaged { .. })));
        assert_eq!(simulation.enemies()[0].health().current, 30.0);
    }

    #[test]
    fn test_one_shot_hits_every_enemy_in_cone() {
        let mut simulation = simulation();
        let aim = simulation.player().aim();
        simulation.spawn_enemy(aim.origin + aim.direction * 5.0);
        simulation.spawn_enemy(aim.origin + aim.direction * 12.0);

        let report = simulation.step(DT, &fire());
        let damaged = report
            .events
            .iter()
            .filter(|event| matches!(event, GameEvent::ActorDamaged { .. }))
            .count();
        assert_eq!(damaged, 2);
    }

    #[test]
    fn test_killed_enemy_is_removed_immediately() {
        let mut simulation = simulation();
        let aim = simulation.player().aim();
        simulation.spawn_enemy(aim.origin + aim.direction * 15.0);

        let mut events = Vec::new();
        for _ in 0..60 {
            events.extend(simulation.step(DT, &fire()).events);
        }

        let target = ActorId::Enemy(0);
        assert_eq!(count(&events, &GameEvent::ActorKilled { target }), 1);
        assert_eq!(count(&events, &GameEvent::ActorRemoved { target }), 1);
        assert!(simulation.enemies().is_empty());
    }

    #[test]
    fn test_enemy_melee_ends_the_run() {
        let mut simulation = simulation();
        simulation.spawn_enemy(Vec3::new(1.0, 1.8, 0.0));

        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(simulation.step(0.1, &PlayerIntent::default()).events);
        }

        assert_eq!(simulation.outcome(), Outcome::GameOver);
        assert!(simulation.player().is_dead());
        assert_eq!(count(&events, &GameEvent::GameOver), 1);
        let hits = events
            .iter()
            .filter(|event| matches!(event, GameEvent::PlayerDamaged { .. }))
            .count();
        assert_eq!(hits, 10);
    }

    #[test]
    fn test_no_steps_after_game_over() {
        let mut simulation = simulation();
        simulation.spawn_enemy(Vec3::new(1.0, 1.8, 0.0));
        while simulation.outcome() == Outcome::Running {
            simulation.step(0.1, &PlayerIntent::default());
        }
        assert!(!simulation.is_input_enabled());

        let frame = simulation.frame();
        let position = simulation.player().position();
        let walk = PlayerIntent {
            forward: 1.0,
            ..fire()
        };
        let report = simulation.step(0.1, &walk);

        assert!(report.events.is_empty());
        assert_eq!(report.outcome, Outcome::GameOver);
        assert_eq!(simulation.frame(), frame);
        assert_eq!(simulation.player().position(), position);
    }

    #[test]
    fn test_killing_the_boss_completes_the_level() {
        let mut simulation = simulation();
        let aim = simulation.player().aim();
        simulation.spawn_boss(aim.origin + aim.direction * 10.0);

        let mut events = Vec::new();
        for _ in 0..400 {
            let report = simulation.step(0.05, &fire());
            events.extend(report.events);
            if report.outcome != Outcome::Running {
                break;
            }
        }

        assert_eq!(simulation.outcome(), Outcome::LevelComplete);
        assert!(simulation.boss().is_none());
        assert!(!simulation.player().is_dead());
        assert_eq!(count(&events, &GameEvent::BossEnraged), 1);
        assert_eq!(count(&events, &GameEvent::LevelComplete), 1);
        assert_eq!(
            count(
                &events,
                &GameEvent::ActorRemoved {
                    target: ActorId::Boss
                }
            ),
            1
        );
    }

    #[test]
    fn test_walls_block_the_player() {
        let mut level = arena();
        level.walls.push(Wall::new(Vec3::new(0.0, 2.0, -5.0), Vec3::new(5.0, 2.0, 0.5)));
        let mut simulation = Simulation::new(level, &GameSettings::default());
        let walk = PlayerIntent {
            forward: 1.0,
            ..PlayerIntent::default()
        };

        for _ in 0..120 {
            simulation.step(DT, &walk);
        }
        assert!(simulation.player().position().z >= -4.5 + 0.5 - 1e-4);
    }

    #[test]
    fn test_reload_intent_reports_once() {
        let mut simulation = simulation();
        simulation.step(DT, &fire());

        let reload = PlayerIntent {
            reload: true,
            ..PlayerIntent::default()
        };
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(simulation.step(DT, &reload).events);
        }
        assert_eq!(count(&events, &GameEvent::ReloadStarted), 1);
        assert!(simulation.weapon().is_reloading());

        for _ in 0..150 {
            events.extend(simulation.step(DT, &PlayerIntent::default()).events);
        }
        assert_eq!(count(&events, &GameEvent::ReloadFinished), 1);
        assert_eq!(simulation.weapon().ammo(), 50);
    }

    #[test]
    fn test_minimap_drops_killed_enemies() {
        let mut simulation = simulation();
        let aim = simulation.player().aim();
        simulation.spawn_enemy(aim.origin + aim.direction * 15.0);
        simulation.spawn_enemy(Vec3::new(0.0, 0.0, 18.0));
        assert_eq!(simulation.minimap().enemies.len(), 2);
        assert_eq!(simulation.minimap().walls.len(), 1);

        for _ in 0..60 {
            simulation.step(DT, &fire());
        }
        let minimap = simulation.minimap();
        assert_eq!(minimap.enemies, vec![Vec2::new(0.0, 18.0)]);
        assert_eq!(minimap.boss, None);
    }

    #[test]
    fn test_hud_follows_simulation() {
        let mut simulation = simulation();
        simulation.step(DT, &fire());
        assert_eq!(simulation.hud().ammo_text, "AMMO: 49");
    }
}
