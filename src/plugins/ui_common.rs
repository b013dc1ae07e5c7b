use crate::game_logic::StatusLevel;
use bevy::app::AppExit;
use bevy::prelude::*;

/// Escape quits from any state
pub fn handle_exit_events(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Exit requested");
        exit.write(AppExit::Success);
    }
}

pub fn status_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Critical => Color::srgb(1.0, 0.0, 0.0),
        StatusLevel::Warning => Color::srgb(1.0, 0.47, 0.0),
        StatusLevel::Good => Color::srgb(0.0, 1.0, 0.0),
    }
}
