//! Rope tuning.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::layers::{layer_mask, Layer};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RopeTuning {
    pub max_rope_length: f32,
    pub min_rope_length: f32,
    /// Launch speed of the hook.
    pub rope_speed: f32,
    /// Length change per second while climbing/descending.
    pub change_rope_length_speed: f32,
    /// Radial spring factor applied past the current length.
    pub tension_force_factor: f32,
    pub horizontal_tension_force_factor: f32,
    /// Lateral force from horizontal input while anchored.
    pub movement_control_force: f32,
    /// Initial length as a percentage of the captured length, 0..=100.
    pub rope_length_percentage: f32,
    pub max_rope_pull_speed: f32,
    pub attachable_layers: Vec<Layer>,
}

impl RopeTuning {
    /// Length of the anchor probe cast ahead of the hook each step.
    pub const ANCHOR_PROBE_DISTANCE: f32 = 0.1;
    /// Past this distance a returning hook is pulled toward the player.
    pub const RETURN_PULL_DISTANCE: f32 = 5.0;
    /// Validity checks sample this far inside the anchored surface.
    pub const ANCHOR_SKIN: f32 = 0.01;

    #[inline]
    pub fn attachable_mask(&self) -> LayerMask {
        layer_mask(&self.attachable_layers)
    }

    /// Return pull magnitude applied to the hook.
    #[inline]
    pub fn return_force(&self) -> f32 {
        self.rope_speed / 4.0
    }
}

impl Default for RopeTuning {
    fn default() -> Self {
        Self {
            max_rope_length: 100.0,
            min_rope_length: 5.0,
            rope_speed: 50.0,
            change_rope_length_speed: 5.0,
            tension_force_factor: 1.0,
            horizontal_tension_force_factor: 2.0,
            movement_control_force: 1.0,
            rope_length_percentage: 15.0,
            max_rope_pull_speed: 20.0,
            attachable_layers: vec![Layer::Attachable],
        }
    }
}
