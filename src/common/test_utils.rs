//! Test helpers.
//!
//! `run_system_once` executes a system against a bare `World` and flushes deferred commands
//! so spawns are visible to assertions.
//!
//! `ScriptedProbe` is an `EnvironmentProbe` double: overlap answers and ray hits are set up
//! front, and every raycast is recorded so tests can check what was asked.

use std::cell::RefCell;

use avian2d::prelude::*;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::physics::probe::{EnvironmentProbe, ProbeHit};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedRay {
    pub origin: Vec2,
    pub direction: Vec2,
    pub distance: f32,
}

#[derive(Default)]
pub struct ScriptedProbe {
    pub circle_overlaps: bool,
    pub point_overlaps: bool,
    /// Returned for any ray whose direction is non-zero and whose length reaches the hit.
    pub ray_hit: Option<ProbeHit>,
    pub rays: RefCell<Vec<RecordedRay>>,
}

impl ScriptedProbe {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_ray_hit(point: Vec2, normal: Vec2, distance: f32) -> Self {
        Self {
            ray_hit: Some(ProbeHit { entity: Entity::PLACEHOLDER, point, normal, distance }),
            ..default()
        }
    }
}

impl EnvironmentProbe for ScriptedProbe {
    fn overlap_circle(&self, _center: Vec2, _radius: f32, _mask: LayerMask) -> bool {
        self.circle_overlaps
    }

    fn overlap_point(&self, _point: Vec2, _mask: LayerMask) -> bool {
        self.point_overlaps
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        distance: f32,
        _mask: LayerMask,
    ) -> Option<ProbeHit> {
        self.rays.borrow_mut().push(RecordedRay { origin, direction, distance });
        if direction == Vec2::ZERO {
            return None;
        }
        self.ray_hit.filter(|hit| hit.distance <= distance)
    }
}
