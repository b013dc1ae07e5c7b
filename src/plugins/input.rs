use crate::plugins::simulation::FrameSet;
use crate::plugins::ui_common::handle_exit_events;
use crate::resources::{GameState, PlayerIntent};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), grab_cursor)
            .add_systems(OnExit(GameState::Playing), release_cursor)
            .add_systems(
                Update,
                (
                    gather_intent.run_if(in_state(GameState::Playing)),
                    handle_exit_events,
                )
                    .in_set(FrameSet::Input),
            );
    }
}

/// Keyboard movement amount per frame, as queued on the player
const MOVE_INPUT: f32 = 0.1;

fn gather_intent(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut intent: ResMut<PlayerIntent>,
) {
    let axis = |positive: KeyCode, negative: KeyCode| {
        let mut value = 0.0;
        if keys.pressed(positive) {
            value += MOVE_INPUT;
        }
        if keys.pressed(negative) {
            value -= MOVE_INPUT;
        }
        value
    };

    intent.forward = axis(KeyCode::KeyW, KeyCode::KeyS);
    intent.right = axis(KeyCode::KeyD, KeyCode::KeyA);
    intent.look = mouse_motion.read().map(|motion| motion.delta).sum();
    intent.fire = mouse_buttons.just_pressed(MouseButton::Left);
    intent.reload = keys.just_pressed(KeyCode::KeyR);
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
}
