//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod input;
pub mod momentum;
pub mod movement;
pub mod physics;
pub mod player;
pub mod rope;
pub mod world;

// Render-only
pub mod camera;
pub mod debug_draw;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: it sets up system-set ordering and inserts the loaded tuning, which
/// the other plugins only `init_resource` as a fallback.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    input::plugin(app);
    world::plugin(app);
    player::plugin(app);
    rope::plugin(app);
    movement::plugin(app);
    momentum::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    debug_draw::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
