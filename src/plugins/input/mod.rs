//! Input plugin: device schemes behind one capability interface.
//!
//! Pipeline (frame rate, before the fixed loop):
//! - build an `InputSource` for each player's `ControlScheme`
//! - snapshot it into the player's `PlayerActions`
//!
//! Controllers only ever read `PlayerActions`, so they don't know which device produced it.

use bevy::app::RunFixedMainLoop;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::schedule::FrameSystems;
use crate::plugins::camera::MainCamera;

/// Logical actions the controllers consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move,
    Aim,
    Jump,
    Grapple,
}

/// How the `Aim` axis should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimKind {
    /// Offset from the player to a pointer in world space.
    Pointer,
    /// Raw analog stick deflection.
    Stick,
}

pub trait InputSource {
    fn read_axis(&self, action: Action) -> Vec2;
    fn was_pressed(&self, action: Action) -> bool;
    fn aim_kind(&self) -> AimKind;
}

/// Device scheme, fixed when the player is spawned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    #[default]
    KeyboardMouse,
    Gamepad,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AimSample {
    pub raw: Vec2,
    pub kind: Option<AimKind>,
}

/// Per-frame action snapshot for one player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerActions {
    pub move_axis: Vec2,
    pub aim: AimSample,
    pub jump_pressed: bool,
    pub grapple_pressed: bool,
}

impl PlayerActions {
    pub fn sample(source: &impl InputSource) -> Self {
        Self {
            move_axis: source.read_axis(Action::Move),
            aim: AimSample { raw: source.read_axis(Action::Aim), kind: Some(source.aim_kind()) },
            jump_pressed: source.was_pressed(Action::Jump),
            grapple_pressed: source.was_pressed(Action::Grapple),
        }
    }
}

pub struct KeyboardMouseSource<'a> {
    pub keys: &'a ButtonInput<KeyCode>,
    pub mouse: Option<&'a ButtonInput<MouseButton>>,
    /// Cursor position minus player position, if the cursor is over the window.
    pub pointer_offset: Option<Vec2>,
}

impl InputSource for KeyboardMouseSource<'_> {
    fn read_axis(&self, action: Action) -> Vec2 {
        match action {
            Action::Move => {
                let mut axis = Vec2::ZERO;
                if self.keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
                    axis.y += 1.0;
                }
                if self.keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
                    axis.y -= 1.0;
                }
                if self.keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
                    axis.x -= 1.0;
                }
                if self.keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
                    axis.x += 1.0;
                }
                axis
            }
            Action::Aim => self.pointer_offset.unwrap_or(Vec2::ZERO),
            Action::Jump | Action::Grapple => Vec2::ZERO,
        }
    }

    fn was_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => self.keys.just_pressed(KeyCode::Space),
            Action::Grapple => {
                self.keys.just_pressed(KeyCode::KeyE)
                    || self.mouse.is_some_and(|m| m.just_pressed(MouseButton::Right))
            }
            Action::Move | Action::Aim => false,
        }
    }

    fn aim_kind(&self) -> AimKind {
        AimKind::Pointer
    }
}

pub struct GamepadSource<'a> {
    pub gamepad: &'a Gamepad,
}

impl InputSource for GamepadSource<'_> {
    fn read_axis(&self, action: Action) -> Vec2 {
        match action {
            Action::Move => self.gamepad.left_stick(),
            Action::Aim => self.gamepad.right_stick(),
            Action::Jump | Action::Grapple => Vec2::ZERO,
        }
    }

    fn was_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => self.gamepad.just_pressed(GamepadButton::South),
            Action::Grapple => self.gamepad.just_pressed(GamepadButton::RightTrigger2),
            Action::Move | Action::Aim => false,
        }
    }

    fn aim_kind(&self) -> AimKind {
        AimKind::Stick
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(RunFixedMainLoop, gather_actions.in_set(FrameSystems::Input));
}

fn cursor_world(
    windows: &Query<&Window>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let cursor = windows.single().ok()?.cursor_position()?;
    let (camera, camera_tf) = q_camera.single().ok()?;
    camera.viewport_to_world_2d(camera_tf, cursor).ok()
}

fn gather_actions(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    gamepads: Query<&Gamepad>,
    mut q_players: Query<(&Transform, &ControlScheme, &mut PlayerActions)>,
) {
    let cursor = cursor_world(&windows, &q_camera);

    for (tf, scheme, mut actions) in &mut q_players {
        let sampled = match scheme {
            ControlScheme::KeyboardMouse => match keys.as_deref() {
                Some(keys) => {
                    let origin = tf.translation.truncate();
                    PlayerActions::sample(&KeyboardMouseSource {
                        keys,
                        mouse: mouse.as_deref(),
                        pointer_offset: cursor.map(|c| c - origin),
                    })
                }
                None => PlayerActions::default(),
            },
            // First connected pad; local multi-pad assignment isn't supported yet.
            ControlScheme::Gamepad => match gamepads.iter().next() {
                Some(gamepad) => PlayerActions::sample(&GamepadSource { gamepad }),
                None => PlayerActions::default(),
            },
        };
        *actions = sampled;
    }
}
