use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;

fn count_named(world: &mut World, prefix: &str) -> usize {
    world
        .query::<(&Name, &RigidBody)>()
        .iter(world)
        .filter(|(n, rb)| n.as_str().starts_with(prefix) && matches!(**rb, RigidBody::Static))
        .count()
}

#[test]
fn spawns_level_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_level);

    assert_eq!(count_named(&mut world, "Wall"), 3);
    assert_eq!(count_named(&mut world, "Beam"), 3);
    assert_eq!(count_named(&mut world, "Floor"), 1);
}

#[test]
fn every_layer_the_controllers_probe_is_present() {
    let blocks = super::level_blocks();
    for layer in [Layer::Ground, Layer::Wall, Layer::Attachable] {
        assert!(blocks.iter().any(|b| b.layer == layer), "{layer:?}");
    }
}

#[test]
fn slopes_straddle_the_walkable_limit() {
    let blocks = super::level_blocks();
    let angle = |name: &str| {
        blocks
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.angle.to_degrees().abs())
    };
    assert!(angle("Slope").is_some_and(|a| a < 45.0));
    assert!(angle("SteepSlope").is_some_and(|a| a > 45.0));
}
