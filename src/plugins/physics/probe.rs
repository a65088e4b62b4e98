//! Environment probe: stateless geometry queries against layer masks.
//!
//! The trait is the seam between controller logic and the physics world. `PhysicsProbe`
//! answers from avian's spatial query pipeline; tests script their own answers.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
}

pub trait EnvironmentProbe {
    /// Does any collider in `mask` overlap the circle?
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool;

    /// Does any collider in `mask` contain the point?
    fn overlap_point(&self, point: Vec2, mask: LayerMask) -> bool;

    /// First hit along the ray. A zero `direction` never hits.
    fn raycast(&self, origin: Vec2, direction: Vec2, distance: f32, mask: LayerMask)
        -> Option<ProbeHit>;
}

pub struct PhysicsProbe<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> PhysicsProbe<'a, 'w, 's> {
    pub fn new(spatial: &'a SpatialQuery<'w, 's>) -> Self {
        Self { spatial }
    }
}

impl EnvironmentProbe for PhysicsProbe<'_, '_, '_> {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let filter = SpatialQueryFilter::from_mask(mask);
        !self
            .spatial
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .is_empty()
    }

    fn overlap_point(&self, point: Vec2, mask: LayerMask) -> bool {
        let filter = SpatialQueryFilter::from_mask(mask);
        !self.spatial.point_intersections(point, &filter).is_empty()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let dir = Dir2::new(direction).ok()?;
        let filter = SpatialQueryFilter::from_mask(mask);

        self.spatial
            .cast_ray(origin, dir, distance, true, &filter)
            .map(|hit| ProbeHit {
                entity: hit.entity,
                point: origin + *dir * hit.distance,
                normal: hit.normal,
                distance: hit.distance,
            })
    }
}
