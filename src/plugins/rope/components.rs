use avian2d::prelude::*;
use bevy::prelude::*;

use super::controller::HookState;
use crate::common::layers::Layer;

/// The pooled rope hook. One per player, never despawned during play.
#[derive(Component, Debug, Clone, Copy)]
pub struct RopeHook {
    pub owner: Entity,
    pub active: bool,
}

/// Rope line endpoints for whatever draws the rope. Purely observational.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct RopeLine {
    pub visible: bool,
    pub start: Vec2,
    pub end: Vec2,
}

impl RopeLine {
    pub fn set(&mut self, endpoints: Option<(Vec2, Vec2)>) {
        match endpoints {
            Some((start, end)) => *self = Self { visible: true, start, end },
            None => self.visible = false,
        }
    }
}

/// Anchoring is done by ray probes, so the hook body itself collides with nothing.
#[inline]
pub fn hook_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Hook, [] as [Layer; 0])
}

/// Spawn-time components for a stowed hook.
pub fn hook_bundle(owner: Entity, at: Vec2) -> impl Bundle {
    (
        Name::new("RopeHook(Pooled)"),
        RopeHook { owner, active: false },
        Sprite {
            color: Color::srgb(0.95, 0.8, 0.35),
            custom_size: Some(Vec2::splat(0.3)),
            ..default()
        },
        Transform::from_translation(at.extend(2.0)),
        Visibility::Hidden,
        RigidBody::Dynamic,
        Collider::circle(0.15),
        Mass(1.0),
        hook_layers(),
        GravityScale(0.0),
        LinearVelocity(Vec2::ZERO),
    )
}

pub(crate) fn snapshot(
    hook: &RopeHook,
    tf: &Transform,
    vel: &LinearVelocity,
    gravity: &GravityScale,
) -> HookState {
    HookState {
        active: hook.active,
        position: tf.translation.truncate(),
        velocity: vel.0,
        gravity_scale: gravity.0,
    }
}

/// Write a hook snapshot back. Position is only touched when the controller moved it.
pub(crate) fn commit(
    state: &HookState,
    hook: &mut RopeHook,
    tf: &mut Transform,
    vel: &mut LinearVelocity,
    gravity: &mut GravityScale,
    vis: &mut Visibility,
) {
    if hook.active != state.active {
        hook.active = state.active;
        *vis = if state.active { Visibility::Visible } else { Visibility::Hidden };
    }
    if tf.translation.truncate() != state.position {
        tf.translation.x = state.position.x;
        tf.translation.y = state.position.y;
    }
    vel.0 = state.velocity;
    gravity.0 = state.gravity_scale;
}
