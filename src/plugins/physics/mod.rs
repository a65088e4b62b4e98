//! Physics plugin: avian setup plus the body/probe seams the controllers work through.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub mod body;
pub mod probe;

pub fn plugin(app: &mut App) {
    let gravity = app
        .world()
        .get_resource::<Tunables>()
        .map_or(Tunables::default().gravity, |t| t.gravity);
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec2::NEG_Y * gravity));
}

#[cfg(test)]
mod tests;
