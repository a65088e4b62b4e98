use std::path::Path;

use bevy::prelude::*;

use super::config::{load_config, load_or_default, parse_config, CONFIG_PATH};
use crate::common::attachment::PlayerRegistry;
use crate::common::layers::Layer;
use crate::common::tunables::Tunables;
use crate::plugins::core;
use crate::plugins::input::ControlScheme;
use crate::plugins::movement::tuning::MovementTuning;
use crate::plugins::player::PlayerTuning;
use crate::plugins::rope::tuning::RopeTuning;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    let world = app.world();
    assert!(world.get_resource::<Tunables>().is_some());
    assert!(world.get_resource::<RopeTuning>().is_some());
    assert!(world.get_resource::<MovementTuning>().is_some());
    assert!(world.get_resource::<PlayerTuning>().is_some());
    assert!(world.get_resource::<PlayerRegistry>().is_some_and(|r| r.is_empty()));
    assert!(world.get_resource::<ClearColor>().is_some());
}

#[test]
fn partial_config_keeps_defaults() {
    let config = parse_config(
        "inline",
        "(rope: (max_rope_length: 20.0, rope_length_percentage: 20.0), movement: (max_jumps: 2))",
    )
    .expect("valid config");

    assert_eq!(config.rope.max_rope_length, 20.0);
    assert_eq!(config.rope.rope_length_percentage, 20.0);
    assert_eq!(config.rope.min_rope_length, RopeTuning::default().min_rope_length);
    assert_eq!(config.movement.max_jumps, 2);
    assert_eq!(config.movement.knockback_window, 0.3);
    assert_eq!(config.world.gravity, Tunables::default().gravity);
}

#[test]
fn deceleration_is_optional_and_overridable() {
    assert_eq!(MovementTuning::default().deceleration, 10.0);

    let config = parse_config("inline", "(movement: (deceleration: 4.0))").expect("valid config");
    assert_eq!(config.movement.deceleration, 4.0);
    assert_eq!(config.movement.acceleration, MovementTuning::default().acceleration);

    let shipped = load_config(Path::new(CONFIG_PATH)).expect("shipped config is valid");
    assert_eq!(shipped.movement.deceleration, 10.0);
}

#[test]
fn layers_and_scheme_parse_by_name() {
    let config = parse_config(
        "inline",
        "(rope: (attachable_layers: [Attachable, Wall]), player: (control_scheme: Gamepad))",
    )
    .expect("valid config");

    assert_eq!(config.rope.attachable_layers, vec![Layer::Attachable, Layer::Wall]);
    assert_eq!(config.player.control_scheme, ControlScheme::Gamepad);
}

#[test]
fn malformed_config_reports_file() {
    let err = parse_config("broken.ron", "(rope: (max_rope_length: \"far\"))")
        .expect_err("type mismatch");
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron: Parse error"));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = Path::new("assets/config/does_not_exist.ron");
    assert!(load_config(path).is_err());
    let config = load_or_default(path);
    assert_eq!(config.movement.max_move_speed, MovementTuning::default().max_move_speed);
}

#[test]
fn shipped_config_parses() {
    let config = load_config(Path::new(CONFIG_PATH)).expect("shipped config is valid");
    assert!(config.rope.min_rope_length <= config.rope.max_rope_length);
    assert!(!config.rope.attachable_layers.is_empty());
}
