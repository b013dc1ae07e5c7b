use crate::config::load_config;
use crate::game_logic::errors::GauntletResult;
use crate::game_logic::{GameEvent, Outcome, Simulation};
use crate::level::LevelDefinition;
use crate::resources::{GameConfig, GameState, PlayerIntent};
use bevy::prelude::*;

/// Per-frame ordering: device input, simulation step, then presentation
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Step,
    Present,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_event::<GameEvent>()
            .init_resource::<PlayerIntent>()
            .insert_resource(load_config())
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Step, FrameSet::Present).chain(),
            )
            .add_systems(OnEnter(GameState::Playing), load_simulation)
            .add_systems(
                Update,
                (
                    step_simulation
                        .in_set(FrameSet::Step)
                        .run_if(in_state(GameState::Playing))
                        .run_if(resource_exists::<Simulation>),
                    log_game_events.in_set(FrameSet::Present),
                ),
            );
    }
}

/// Level named in the config, or the built-in maze
pub fn load_level(config: &GameConfig) -> GauntletResult<LevelDefinition> {
    match &config.level_file {
        Some(file) => LevelDefinition::load_from_file(file),
        None => Ok(LevelDefinition::maze()),
    }
}

pub fn load_simulation(mut commands: Commands, config: Res<GameConfig>) {
    let level = load_level(&config).unwrap_or_else(|err| {
        warn!("Failed to load level: {err}");
        warn!("Falling back to the built-in maze");
        LevelDefinition::maze()
    });

    commands.insert_resource(Simulation::new(level, &config.settings));
}

fn step_simulation(
    time: Res<Time>,
    mut simulation: ResMut<Simulation>,
    mut intent: ResMut<PlayerIntent>,
    mut events: EventWriter<GameEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let report = simulation.step(time.delta_secs(), &intent);
    intent.clear();

    events.write_batch(report.events);

    match report.outcome {
        Outcome::Running => {}
        Outcome::GameOver => next_state.set(GameState::GameOver),
        Outcome::LevelComplete => next_state.set(GameState::LevelComplete),
    }
}

fn log_game_events(mut events: EventReader<GameEvent>) {
    for event in events.read() {
        match event {
            GameEvent::ActorKilled { target } => info!("{target} killed"),
            GameEvent::BossEnraged => info!("The boss is enraged"),
            GameEvent::GameOver => info!("Game over"),
            GameEvent::LevelComplete => info!("Level complete"),
            GameEvent::PlayerDamaged {
                source,
                amount,
                remaining,
            } => debug!("Player took {amount} from {source}, {remaining} left"),
            other => debug!("{other:?}"),
        }
    }
}
