//! Tunable world constants.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Render scale only; physics runs in world units (meters).
    pub pixels_per_meter: f32,
    pub gravity: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self { pixels_per_meter: 32.0, gravity: 9.81 }
    }
}
