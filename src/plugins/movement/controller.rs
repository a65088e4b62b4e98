//! Locomotion state machine.
//!
//! Frame half (variable dt): `sense` ground/walls, then `handle_jump` and
//! `update_wall_slide` on the fresh contact flags.
//! Fixed half: `fixed_move` pushes toward the target run speed, or does nothing at all while
//! roped or inside a knockback window.

use bevy::prelude::*;

use super::tuning::MovementTuning;
use crate::plugins::physics::body::BodyState;
use crate::plugins::physics::probe::EnvironmentProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    pub grounded: bool,
    pub touching_wall: bool,
    pub wall_sliding: bool,
    pub jumps_remaining: u32,
    /// Knockback suppression ends at this time (seconds, virtual clock).
    pub knockback_until: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Normal,
    Wall,
}

/// What the fixed step did with horizontal control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    /// Roped or knocked back; velocity untouched.
    Suppressed,
    /// Walkable slope under the feet.
    Slope,
    /// Flat ground beyond the slope probe, or airborne.
    Free,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementController {
    pub state: MovementState,
    pub facing: Facing,
}

impl MovementController {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            state: MovementState { jumps_remaining: tuning.max_jumps, ..default() },
            facing: Facing::Right,
        }
    }

    #[inline]
    fn refill_jumps(&mut self, tuning: &MovementTuning) {
        self.state.jumps_remaining = tuning.max_jumps;
    }

    /// Ground and wall checks. Wall rays follow the facing, which tracks the last
    /// non-zero horizontal input.
    pub fn sense(
        &mut self,
        foot: Vec2,
        wall_points: impl IntoIterator<Item = Vec2>,
        velocity: Vec2,
        move_x: f32,
        probe: &impl EnvironmentProbe,
        tuning: &MovementTuning,
    ) {
        if move_x > 0.0 {
            self.facing = Facing::Right;
        } else if move_x < 0.0 {
            self.facing = Facing::Left;
        }

        let touching_ground =
            probe.overlap_circle(foot, tuning.ground_check_radius, tuning.ground_mask());
        self.state.grounded = touching_ground && velocity.y <= 0.0;
        if self.state.grounded {
            self.refill_jumps(tuning);
        }

        let direction = Vec2::X * self.facing.sign();
        let mask = tuning.wall_mask();
        self.state.touching_wall = wall_points.into_iter().any(|point| {
            probe.raycast(point, direction, tuning.wall_check_distance, mask).is_some()
        });
        if self.state.touching_wall {
            self.refill_jumps(tuning);
        }
    }

    /// Rising-edge jump. Charges first, wall jump only when out of charges and sliding.
    pub fn handle_jump(
        &mut self,
        jump_pressed: bool,
        move_x: f32,
        velocity: &mut Vec2,
        tuning: &MovementTuning,
    ) -> Option<Jump> {
        if !jump_pressed {
            return None;
        }

        if self.state.grounded || self.state.jumps_remaining > 0 {
            velocity.y += tuning.jump_force;
            self.state.jumps_remaining = self.state.jumps_remaining.saturating_sub(1);
            Some(Jump::Normal)
        } else if self.state.wall_sliding {
            *velocity = Vec2::new(
                move_x * tuning.wall_jump_direction_force,
                tuning.wall_jump_force,
            );
            self.state.wall_sliding = false;
            Some(Jump::Wall)
        } else {
            None
        }
    }

    /// Airborne, on a wall and falling: cap the descent at the slide speed.
    pub fn update_wall_slide(&mut self, velocity: &mut Vec2, tuning: &MovementTuning) {
        self.state.wall_sliding =
            self.state.touching_wall && !self.state.grounded && velocity.y < 0.0;
        if self.state.wall_sliding {
            velocity.y = velocity.y.max(-tuning.wall_slide_speed);
        }
    }

    #[inline]
    pub fn is_knocked_back(&self, now: f32) -> bool {
        self.state.knockback_until.is_some_and(|until| now < until)
    }

    /// Impulse plus a suppression window. A new knockback restarts the window.
    pub fn apply_knockback(
        &mut self,
        body: &mut BodyState,
        force: Vec2,
        now: f32,
        tuning: &MovementTuning,
    ) {
        body.apply_impulse(force);
        self.state.knockback_until = Some(now + tuning.knockback_window);
    }

    /// Clear an elapsed knockback window. Returns true only on the call that clears it.
    pub fn expire_knockback(&mut self, now: f32) -> bool {
        match self.state.knockback_until {
            Some(until) if now >= until => {
                self.state.knockback_until = None;
                true
            }
            _ => false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fixed_move(
        &self,
        body: &mut BodyState,
        move_x: f32,
        foot: Vec2,
        roped: bool,
        now: f32,
        probe: &impl EnvironmentProbe,
        tuning: &MovementTuning,
        dt: f32,
    ) -> Locomotion {
        let knocked_back = self.is_knocked_back(now);
        if roped || knocked_back {
            return Locomotion::Suppressed;
        }

        let target_speed = move_x * tuning.max_move_speed;

        // A foot sunk into the ground reports no normal; that's flat ground.
        let slope_normal = probe
            .raycast(foot, Vec2::NEG_Y, tuning.slope_probe_distance(), tuning.ground_mask())
            .map(|hit| if hit.normal == Vec2::ZERO { Vec2::Y } else { hit.normal })
            .filter(|normal| slope_angle(*normal) <= tuning.max_slope_angle);
        if let Some(normal) = slope_normal {
            if move_x != 0.0 {
                let tangent = Vec2::new(normal.y, -normal.x).normalize_or_zero();
                body.apply_force(tangent * target_speed, dt);
            } else {
                body.velocity.x = 0.0;
            }
            return Locomotion::Slope;
        }

        let acceleration_rate = if self.state.grounded {
            tuning.acceleration
        } else {
            tuning.acceleration * tuning.air_control_factor
        };

        if move_x != 0.0 {
            let speed_difference = target_speed - body.velocity.x;
            let movement = (speed_difference * acceleration_rate)
                .clamp(-tuning.max_move_speed, tuning.max_move_speed);
            body.apply_force(Vec2::new(movement, 0.0), dt);
        } else if self.state.grounded && !knocked_back {
            body.velocity.x = 0.0;
        }

        Locomotion::Free
    }
}

/// Degrees between a surface normal and straight up.
#[inline]
pub fn slope_angle(normal: Vec2) -> f32 {
    normal.normalize_or_zero().y.clamp(-1.0, 1.0).acos().to_degrees()
}
