//! Player plugin.
//!
//! Spawns the controllable body together with its pooled rope hook and registers it in the
//! shared `PlayerRegistry`. The controllers themselves live in `plugins::rope` and
//! `plugins::movement`; this module only assembles the entity.
//!
//! ```text
//! OnEnter(InGame): spawn player body -> spawn stowed hook -> attach RopeController
//!                  -> PlayerRegistry::register (flag reset to false)
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use serde::{Deserialize, Serialize};

use crate::common::attachment::{PlayerId, PlayerRegistry};
use crate::common::{layers::Layer, state::GameState};
use crate::plugins::input::{ControlScheme, PlayerActions};
use crate::plugins::momentum::Momentum;
use crate::plugins::movement::controller::MovementController;
use crate::plugins::movement::tuning::MovementTuning;
use crate::plugins::movement::ProbeAnchors;
use crate::plugins::rope::components::{hook_bundle, RopeLine};
use crate::plugins::rope::controller::RopeController;
use crate::plugins::rope::tuning::RopeTuning;

const BODY_RADIUS: f32 = 0.4;
const BODY_LENGTH: f32 = 0.8;
const HALF_HEIGHT: f32 = BODY_RADIUS + BODY_LENGTH * 0.5;

#[derive(Component, Debug, Clone, Copy)]
pub struct Player {
    pub id: PlayerId,
}

/// Spawn-time player settings.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub control_scheme: ControlScheme,
    pub spawn_point: Vec2,
    /// Scale applied to the per-step position delta published as momentum.
    pub momentum_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::KeyboardMouse,
            spawn_point: Vec2::new(0.0, 2.0),
            momentum_factor: 1.0,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerTuning>()
        .add_systems(OnEnter(GameState::InGame), spawn);
}

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::Ground, Layer::Wall, Layer::Attachable])
}

/// Foot circle just under the capsule, wall rays from chest and knee height.
pub fn probe_anchors() -> ProbeAnchors {
    ProbeAnchors {
        foot: Vec2::new(0.0, -HALF_HEIGHT),
        walls: vec![Vec2::new(0.0, BODY_LENGTH * 0.5), Vec2::new(0.0, -BODY_LENGTH * 0.5)],
    }
}

pub(crate) fn spawn(
    mut commands: Commands,
    settings: Res<PlayerTuning>,
    rope_tuning: Res<RopeTuning>,
    movement_tuning: Res<MovementTuning>,
    mut registry: ResMut<PlayerRegistry>,
) {
    let id = PlayerId(0);
    let at = settings.spawn_point;

    let player = commands
        .spawn((
            Name::new("Player"),
            Player { id },
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::new(BODY_RADIUS * 2.0, HALF_HEIGHT * 2.0)),
                ..default()
            },
            Transform::from_translation(at.extend(1.0)),
            RigidBody::Dynamic,
            Collider::capsule(BODY_RADIUS, BODY_LENGTH),
            LockedAxes::ROTATION_LOCKED,
            Friction::new(0.0),
            player_layers(),
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .insert((
            settings.control_scheme,
            PlayerActions::default(),
            MovementController::new(&movement_tuning),
            probe_anchors(),
            RopeLine::default(),
            Momentum::new(settings.momentum_factor, at),
        ))
        .id();

    let hook = commands
        .spawn((hook_bundle(player, at), DespawnOnExit(GameState::InGame)))
        .id();
    commands.entity(player).insert(RopeController::new(hook, &rope_tuning));

    registry.register(id);
    info!(
        "Player spawned: id={:?} entity={:?} hook={:?} scheme={:?}",
        id, player, hook, settings.control_scheme
    );
}
