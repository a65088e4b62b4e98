//! World plugin: spawns the demo level.
//!
//! Everything is static and sized in meters. Surfaces are sorted by what the controllers
//! probe for: `Ground` for the foot circle and slope ray, `Wall` for wall rays, and
//! `Attachable` for the rope hook.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

const HALF_W: f32 = 24.0;
const HEIGHT: f32 = 18.0;
const THICKNESS: f32 = 1.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_level);
}

/// One static block of level geometry.
#[derive(Debug, Clone, Copy)]
struct Block {
    name: &'static str,
    layer: Layer,
    center: Vec2,
    size: Vec2,
    /// Radians, counter-clockwise.
    angle: f32,
}

impl Block {
    const fn new(name: &'static str, layer: Layer, center: Vec2, size: Vec2) -> Self {
        Self { name, layer, center, size, angle: 0.0 }
    }

    fn color(&self) -> Color {
        match self.layer {
            Layer::Ground => Color::srgb(0.25, 0.27, 0.33),
            Layer::Wall => Color::srgb(0.33, 0.25, 0.27),
            Layer::Attachable => Color::srgb(0.55, 0.45, 0.2),
            _ => Color::srgb(0.2, 0.2, 0.2),
        }
    }
}

fn level_blocks() -> Vec<Block> {
    let wall_x = HALF_W + THICKNESS * 0.5;
    vec![
        Block::new(
            "Floor",
            Layer::Ground,
            Vec2::new(0.0, -THICKNESS * 0.5),
            Vec2::new(HALF_W * 2.0, THICKNESS),
        ),
        Block {
            angle: 30f32.to_radians(),
            ..Block::new("Slope", Layer::Ground, Vec2::new(12.0, 1.5), Vec2::new(8.0, THICKNESS))
        },
        Block {
            angle: -50f32.to_radians(),
            ..Block::new(
                "SteepSlope",
                Layer::Ground,
                Vec2::new(-14.0, 2.0),
                Vec2::new(6.0, THICKNESS),
            )
        },
        Block::new(
            "WallLeft",
            Layer::Wall,
            Vec2::new(-wall_x, HEIGHT * 0.5),
            Vec2::new(THICKNESS, HEIGHT),
        ),
        Block::new(
            "WallRight",
            Layer::Wall,
            Vec2::new(wall_x, HEIGHT * 0.5),
            Vec2::new(THICKNESS, HEIGHT),
        ),
        Block::new("WallPillar", Layer::Wall, Vec2::new(-4.0, 4.0), Vec2::new(THICKNESS, 8.0)),
        Block::new("BeamLeft", Layer::Attachable, Vec2::new(-10.0, 12.0), Vec2::new(6.0, 0.5)),
        Block::new("BeamCenter", Layer::Attachable, Vec2::new(2.0, 14.0), Vec2::new(6.0, 0.5)),
        Block::new("BeamRight", Layer::Attachable, Vec2::new(16.0, 11.0), Vec2::new(4.0, 0.5)),
    ]
}

fn spawn_level(mut commands: Commands) {
    for block in level_blocks() {
        commands.spawn((
            Name::new(block.name),
            Sprite {
                color: block.color(),
                custom_size: Some(block.size),
                ..default()
            },
            Transform::from_translation(block.center.extend(0.0))
                .with_rotation(Quat::from_rotation_z(block.angle)),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            CollisionLayers::new(block.layer, [Layer::Player]),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

#[cfg(test)]
mod tests;
