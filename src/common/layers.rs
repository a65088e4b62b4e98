//! Collision layers.

use avian2d::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Default,
    Ground,
    Wall,
    /// Surfaces the rope hook can anchor to.
    Attachable,
    Player,
    Hook,
}

/// Fold a layer list (as written in config) into a query mask.
#[inline]
pub fn layer_mask(layers: &[Layer]) -> LayerMask {
    LayerMask(layers.iter().fold(0, |bits, layer| bits | layer.to_bits()))
}
