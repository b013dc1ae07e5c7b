use crate::game_logic::hud::{MINIMAP_SCALE, MINIMAP_SIZE};
use crate::game_logic::{MinimapSnapshot, Simulation};
use crate::plugins::simulation::FrameSet;
use crate::plugins::ui_common::status_color;
use crate::resources::GameState;
use bevy::prelude::*;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                (update_hud, update_minimap)
                    .in_set(FrameSet::Present)
                    .run_if(resource_exists::<Simulation>),
            )
            .add_systems(OnEnter(GameState::GameOver), |commands: Commands| {
                show_banner(commands, "GAME OVER", Color::srgb(1.0, 0.0, 0.0))
            })
            .add_systems(OnEnter(GameState::LevelComplete), |commands: Commands| {
                show_banner(commands, "LEVEL COMPLETE!", Color::srgb(0.0, 1.0, 0.0))
            });
    }
}

#[derive(Component)]
struct HealthText;

#[derive(Component)]
struct AmmoText;

#[derive(Component)]
struct MinimapPanel;

/// Redrawn every frame
#[derive(Component)]
struct MinimapMark;

fn hud_text(label: &str, font_size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        hud_text("HEALTH: 100", 24.0, Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            ..default()
        },
        HealthText,
    ));

    commands.spawn((
        hud_text("AMMO: 50", 24.0, Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(20.0),
            bottom: Val::Px(20.0),
            ..default()
        },
        AmmoText,
    ));

    // Crosshair
    commands.spawn((
        hud_text("+", 32.0, Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            ..default()
        },
    ));

    commands.spawn((
        hud_text(
            "WASD to move, mouse to look, click to shoot, R to reload, Esc to quit",
            16.0,
            Color::srgb(0.7, 0.7, 0.7),
        ),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            ..default()
        },
    ));

    setup_minimap(&mut commands);
}

fn setup_minimap(commands: &mut Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            right: Val::Px(20.0),
            width: Val::Px(MINIMAP_SIZE),
            height: Val::Px(MINIMAP_SIZE),
            border: UiRect::all(Val::Px(2.0)),
            overflow: Overflow::clip(),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        BorderColor(Color::srgb(0.27, 0.27, 0.27)),
        BorderRadius::MAX,
        MinimapPanel,
    ));
}

/// Absolutely placed rectangle inside the minimap, centered on `center`
fn minimap_mark(center: Vec2, size: Vec2, color: Color, round: bool) -> impl Bundle {
    let corner = center - size / 2.0;
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(corner.x),
            top: Val::Px(corner.y),
            width: Val::Px(size.x),
            height: Val::Px(size.y),
            ..default()
        },
        BackgroundColor(color),
        if round { BorderRadius::MAX } else { BorderRadius::ZERO },
        MinimapMark,
    )
}

fn update_minimap(
    mut commands: Commands,
    simulation: Res<Simulation>,
    panel_query: Query<Entity, With<MinimapPanel>>,
    marks: Query<Entity, With<MinimapMark>>,
) {
    let Ok(panel) = panel_query.single() else {
        return;
    };
    for mark in &marks {
        commands.entity(mark).despawn();
    }

    let minimap = simulation.minimap();
    commands.entity(panel).with_children(|parent| {
        for wall in &minimap.walls {
            parent.spawn(minimap_mark(
                MinimapSnapshot::to_panel(wall.center),
                wall.size * MINIMAP_SCALE,
                Color::srgb(0.33, 0.33, 0.33),
                false,
            ));
        }
        for enemy in &minimap.enemies {
            parent.spawn(minimap_mark(
                MinimapSnapshot::to_panel(*enemy),
                Vec2::splat(6.0),
                Color::srgb(1.0, 0.0, 0.0),
                true,
            ));
        }
        if let Some(boss) = minimap.boss {
            parent.spawn(minimap_mark(
                MinimapSnapshot::to_panel(boss),
                Vec2::splat(10.0),
                Color::srgb(1.0, 0.0, 1.0),
                true,
            ));
        }

        let center = MinimapSnapshot::to_panel(Vec2::ZERO);
        parent.spawn(minimap_mark(center, Vec2::splat(8.0), Color::srgb(0.0, 1.0, 0.0), true));
        // Heading line, drawn as dots since UI nodes do not rotate
        for step in 1..=5 {
            parent.spawn(minimap_mark(
                center + minimap.heading * (step as f32 * 2.0),
                Vec2::splat(2.0),
                Color::srgb(0.0, 1.0, 0.0),
                true,
            ));
        }
    });
}

fn update_hud(
    simulation: Res<Simulation>,
    mut health_query: Query<(&mut Text, &mut TextColor), (With<HealthText>, Without<AmmoText>)>,
    mut ammo_query: Query<(&mut Text, &mut TextColor), (With<AmmoText>, Without<HealthText>)>,
) {
    let hud = simulation.hud();

    if let Ok((mut text, mut color)) = health_query.single_mut() {
        text.0 = hud.health_text();
        color.0 = status_color(hud.health_level);
    }
    if let Ok((mut text, mut color)) = ammo_query.single_mut() {
        text.0 = hud.ammo_text.clone();
        color.0 = status_color(hud.ammo_level);
    }
}

fn show_banner(mut commands: Commands, message: &str, color: Color) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(hud_text(message, 64.0, color));
        });
}
