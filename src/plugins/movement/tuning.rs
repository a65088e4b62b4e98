//! Locomotion tuning.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::layers::{layer_mask, Layer};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_move_speed: f32,
    pub acceleration: f32,
    /// Accepted for config compatibility. Zero input on the ground stops dead, so nothing
    /// reads it.
    pub deceleration: f32,
    /// Fraction of `acceleration` available while airborne.
    pub air_control_factor: f32,
    /// Added to vertical velocity on a jump.
    pub jump_force: f32,
    pub max_jumps: u32,
    pub wall_slide_speed: f32,
    /// Vertical velocity of a wall jump.
    pub wall_jump_force: f32,
    /// Horizontal velocity of a wall jump per unit of horizontal input.
    pub wall_jump_direction_force: f32,
    pub ground_check_radius: f32,
    /// Degrees from vertical.
    pub max_slope_angle: f32,
    pub wall_check_distance: f32,
    /// Seconds of suppressed horizontal control after a knockback.
    pub knockback_window: f32,
    pub ground_layers: Vec<Layer>,
    pub wall_layers: Vec<Layer>,
}

impl MovementTuning {
    #[inline]
    pub fn ground_mask(&self) -> LayerMask {
        layer_mask(&self.ground_layers)
    }

    #[inline]
    pub fn wall_mask(&self) -> LayerMask {
        layer_mask(&self.wall_layers)
    }

    /// Reach of the downward slope probe from the foot anchor.
    #[inline]
    pub fn slope_probe_distance(&self) -> f32 {
        self.ground_check_radius * 2.0
    }
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_move_speed: 10.0,
            acceleration: 15.0,
            deceleration: 10.0,
            air_control_factor: 0.5,
            jump_force: 15.0,
            max_jumps: 1,
            wall_slide_speed: 3.0,
            wall_jump_force: 15.0,
            wall_jump_direction_force: 10.0,
            ground_check_radius: 0.2,
            max_slope_angle: 45.0,
            wall_check_distance: 0.5,
            knockback_window: 0.3,
            ground_layers: vec![Layer::Ground],
            wall_layers: vec![Layer::Wall],
        }
    }
}
