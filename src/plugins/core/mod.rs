//! Core plugin: schedule ordering, shared resources and tuning.

pub mod config;

use std::path::Path;

use bevy::prelude::*;

use crate::common::attachment::PlayerRegistry;
use crate::common::schedule;

pub fn plugin(app: &mut App) {
    schedule::configure(app);

    let config = config::load_or_default(Path::new(config::CONFIG_PATH));
    app.insert_resource(config.world)
        .insert_resource(config.rope)
        .insert_resource(config.movement)
        .insert_resource(config.player)
        .init_resource::<PlayerRegistry>()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

#[cfg(test)]
mod tests;
