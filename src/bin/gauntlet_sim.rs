use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use gauntlet::config::{get_config_path, load_config, save_config};
use gauntlet::game_logic::errors::GauntletResult;
use gauntlet::game_logic::{Damageable, GameEvent, Outcome, Simulation};
use gauntlet::level::LevelDefinition;
use gauntlet::resources::{GameConfig, GameSettings};

mod gauntlet_sim {
    pub mod cli_utils;
}

use gauntlet_sim::cli_utils::*;

#[derive(Parser, Clone)]
#[command(name = "gauntlet-sim")]
#[command(about = "Run the Gauntlet simulation headless with a scripted player")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value = "3600")]
    frames: u64,

    /// Fixed timestep in seconds
    #[arg(long, default_value = "0.0166667")]
    dt: f32,

    /// Level file relative to levels/; the built-in maze when omitted
    #[arg(long)]
    level: Option<String>,

    /// Write the built-in maze to this file under levels/ and exit
    #[arg(long)]
    export_level: Option<String>,

    /// Extra enemy spawn (format: X,Y,Z), may be repeated
    #[arg(long = "enemy")]
    enemies: Vec<String>,

    /// Use tuning from the saved config instead of the defaults
    #[arg(long)]
    use_config: bool,

    /// Write the tuning and level used by this run to the config file
    #[arg(long)]
    save_config: bool,

    /// Keep the player in place
    #[arg(long)]
    stand_still: bool,

    /// Never pull the trigger
    #[arg(long)]
    hold_fire: bool,

    /// Print every event as it happens
    #[arg(long)]
    verbose: bool,
}

fn main() -> GauntletResult<()> {
    let args = Args::parse();

    // Only used to install the log subscriber so library logging shows up
    let mut logger = App::new();
    logger.add_plugins(LogPlugin {
        level: if args.verbose { Level::DEBUG } else { Level::INFO },
        ..default()
    });

    if let Some(filename) = &args.export_level {
        validate_level_path(filename)?;
        let path = LevelDefinition::maze().save_to_file(filename)?;
        println!("Level saved successfully to: {}", path.display());
        return Ok(());
    }

    let dt = validate_timestep(args.dt)?;
    let extra_enemies = args
        .enemies
        .iter()
        .map(|value| parse_position(value))
        .collect::<GauntletResult<Vec<_>>>()?;

    let level = match &args.level {
        Some(filename) => {
            validate_level_path(filename)?;
            LevelDefinition::load_from_file(filename)?
        }
        None => LevelDefinition::maze(),
    };
    let settings = if args.use_config {
        load_config().settings
    } else {
        GameSettings::default()
    };

    if args.save_config {
        let config = GameConfig {
            level_file: args.level.clone(),
            settings: settings.clone(),
        };
        save_config(&config)?;
        if let Some(path) = get_config_path() {
            println!("Config saved to: {}", path.display());
        }
    }

    let mut simulation = Simulation::new(level, &settings);
    for position in extra_enemies {
        simulation.spawn_enemy(position);
    }

    let autopilot = Autopilot {
        walk: !args.stand_still,
        shoot: !args.hold_fire,
        look_sensitivity: settings.player.look_sensitivity.get(),
        reach: settings.weapon.hit_distance.get(),
    };

    let mut kills = 0;
    let mut shots = 0;
    for _ in 0..args.frames {
        let intent = autopilot.intent(&simulation);
        let report = simulation.step(dt, &intent);

        for event in &report.events {
            match event {
                GameEvent::ActorKilled { .. } => kills += 1,
                GameEvent::WeaponFired { .. } => shots += 1,
                _ => {}
            }
            if args.verbose {
                println!("[{:>6} {:>7.2}s] {event:?}", report.frame, simulation.clock());
            }
        }

        if report.events.iter().any(GameEvent::is_terminal) {
            break;
        }
    }

    print_summary(&simulation, kills, shots);
    Ok(())
}

fn print_summary(simulation: &Simulation, kills: u32, shots: u32) {
    println!("Simulation finished: {}", outcome_label(simulation.outcome()));
    println!("  Level: {}", simulation.level().name);
    println!(
        "  Frames: {} ({:.2}s simulated)",
        simulation.frame(),
        simulation.clock()
    );
    println!("  Player health: {}", simulation.player().health());
    println!("  Shots fired: {shots}, kills: {kills}");
    println!("  Ammo: {}", simulation.weapon().ammo());
    println!("  Enemies left: {}", simulation.enemies().len());
    match simulation.boss() {
        Some(boss) => println!(
            "  Boss health: {}{}",
            boss.health(),
            if boss.is_enraged() { " (enraged)" } else { "" }
        ),
        None if simulation.outcome() == Outcome::LevelComplete => println!("  Boss: defeated"),
        None => println!("  Boss: none"),
    }
}
