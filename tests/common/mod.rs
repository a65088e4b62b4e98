//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `rope_runner::game::configure_headless` to install gameplay plugins.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

use rope_runner::common::state::GameState;

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    rope_runner::game::configure_headless(&mut app);
    // `App::run` does this; tests drive `update()` manually, so finish plugin setup here.
    app.finish();
    app.cleanup();
    app
}

/// Headless app that has already entered `InGame` and spawned its entities.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}
