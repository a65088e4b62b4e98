//! Velocity-level view of a rigid body.
//!
//! The controllers never integrate positions. They read a snapshot, layer forces and
//! velocity edits on top of it, and the caller writes the velocity back before avian steps.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub inverse_mass: f32,
}

impl BodyState {
    pub fn new(position: Vec2, velocity: Vec2, mass: f32) -> Self {
        let inverse_mass = if mass > f32::EPSILON { mass.recip() } else { 1.0 };
        Self { position, velocity, inverse_mass }
    }

    /// Snapshot from avian components. Bodies without computed mass act as unit mass.
    pub fn from_components(
        transform: &Transform,
        velocity: &LinearVelocity,
        mass: Option<&ComputedMass>,
    ) -> Self {
        Self::new(
            transform.translation.truncate(),
            velocity.0,
            mass.map_or(1.0, |m| m.value()),
        )
    }

    /// Continuous force over one step of length `dt`.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        self.velocity += force * self.inverse_mass * dt;
    }

    /// Instantaneous change in momentum.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * self.inverse_mass;
    }

    #[inline]
    pub fn clamp_speed(&mut self, max_speed: f32) {
        self.velocity = self.velocity.clamp_length_max(max_speed);
    }
}
