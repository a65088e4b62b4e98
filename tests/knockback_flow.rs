mod common;

use bevy::prelude::*;
use rope_runner::plugins::movement::controller::MovementController;
use rope_runner::plugins::movement::KnockbackRequest;
use rope_runner::plugins::player::Player;

#[test]
fn knockback_request_opens_suppression_window() {
    let mut app = common::app_in_game();

    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player");

    app.world_mut().write_message(KnockbackRequest { target: player, force: Vec2::new(-8.0, 6.0) });
    app.update();

    let until = app
        .world()
        .get::<MovementController>(player)
        .and_then(|mc| mc.state.knockback_until);
    assert!(until.is_some(), "knockback should stamp an expiry time");
}
