//! Rope state machine.
//!
//! ```text
//!   Idle ──fire──► Extending ──reach max length──► Retracting
//!                     │                                │
//!                     └──────── anchor probe hit ◄─────┘
//!                                     │
//!                                     ▼
//!   Idle ◄──detach (trigger / anchor gone)── Anchored
//! ```
//!
//! The controller owns no ECS data. Callers hand it snapshots (`HookState`, `BodyState`) and
//! write them back afterwards, which keeps every transition testable without a physics world.
//!
//! The shared "rope attached" flag is set only on a successful anchor and cleared on every
//! detach path. While anchored, the flag is authoritative: if anyone else clears it the
//! controller detaches on its next step.

use bevy::prelude::*;

use super::tuning::RopeTuning;
use crate::common::attachment::{AttachmentStore, PlayerId};
use crate::plugins::input::{AimKind, AimSample};
use crate::plugins::physics::body::BodyState;
use crate::plugins::physics::probe::{EnvironmentProbe, ProbeHit};

/// Stick deflection below this falls back to the last valid aim.
pub const STICK_AIM_THRESHOLD: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub point: Vec2,
    /// Surface normal at `point`, used to sample just inside the surface.
    pub normal: Vec2,
}

impl AnchorPoint {
    #[inline]
    pub fn probe_point(&self) -> Vec2 {
        self.point - self.normal * RopeTuning::ANCHOR_SKIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RopePhase {
    #[default]
    Idle,
    Extending,
    Retracting,
    Anchored(AnchorPoint),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RopeLength {
    /// Adjustable length the tension force works against.
    pub current: f32,
    /// Distance to the anchor when it was hit, never below the minimum length.
    pub captured: f32,
}

/// The pooled hook body as the controller sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookState {
    pub active: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl HookState {
    pub fn stowed(position: Vec2) -> Self {
        Self { active: false, position, velocity: Vec2::ZERO, gravity_scale: 0.0 }
    }

    /// The hook is a unit-mass body.
    #[inline]
    fn apply_force(&mut self, force: Vec2, dt: f32) {
        self.velocity += force * dt;
    }

    fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.gravity_scale = 0.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopeEvent {
    Fired,
    Retracting,
    Anchored,
    Detached,
}

#[derive(Component, Debug, Clone)]
pub struct RopeController {
    /// Pooled hook entity, spawned with the player and reused for every cast.
    pub hook: Entity,
    phase: RopePhase,
    length: RopeLength,
    last_valid_aim: Vec2,
}

impl RopeController {
    pub fn new(hook: Entity, tuning: &RopeTuning) -> Self {
        Self {
            hook,
            phase: RopePhase::Idle,
            length: RopeLength { current: tuning.max_rope_length, captured: 0.0 },
            last_valid_aim: Vec2::X,
        }
    }

    #[inline]
    pub fn phase(&self) -> RopePhase {
        self.phase
    }

    #[inline]
    pub fn length(&self) -> RopeLength {
        self.length
    }

    #[inline]
    pub fn is_shooting(&self) -> bool {
        matches!(self.phase, RopePhase::Extending | RopePhase::Retracting)
    }

    #[inline]
    pub fn anchor(&self) -> Option<AnchorPoint> {
        match self.phase {
            RopePhase::Anchored(anchor) => Some(anchor),
            _ => None,
        }
    }

    #[inline]
    pub fn last_valid_aim(&self) -> Vec2 {
        self.last_valid_aim
    }

    /// Turn an aim sample into a unit direction, or zero if there is nothing to aim with.
    pub fn resolve_aim(&mut self, aim: AimSample) -> Vec2 {
        match aim.kind {
            Some(AimKind::Pointer) => aim.raw.normalize_or_zero(),
            Some(AimKind::Stick) => {
                if aim.raw.length() < STICK_AIM_THRESHOLD {
                    self.last_valid_aim
                } else {
                    self.last_valid_aim = aim.raw.normalize();
                    self.last_valid_aim
                }
            }
            None => Vec2::ZERO,
        }
    }

    /// Grapple button: detach if a rope is out, otherwise fire along the resolved aim.
    pub fn trigger(
        &mut self,
        player: PlayerId,
        player_pos: Vec2,
        aim: AimSample,
        hook: &mut HookState,
        store: &mut impl AttachmentStore,
        tuning: &RopeTuning,
    ) -> Option<RopeEvent> {
        if store.is_rope_attached(player) || self.phase != RopePhase::Idle {
            return self.detach(player, hook, store).then_some(RopeEvent::Detached);
        }

        let direction = self.resolve_aim(aim);
        if direction == Vec2::ZERO {
            return None;
        }
        self.fire(player_pos, direction, hook, tuning);
        Some(RopeEvent::Fired)
    }

    /// Launch the hook from `player_pos`. `direction` must be a unit vector.
    pub fn fire(
        &mut self,
        player_pos: Vec2,
        direction: Vec2,
        hook: &mut HookState,
        tuning: &RopeTuning,
    ) {
        self.phase = RopePhase::Extending;
        hook.active = true;
        hook.position = player_pos;
        hook.velocity = direction * tuning.rope_speed;
        hook.gravity_scale = 0.0;
    }

    /// Stow the hook and clear the shared flag. Returns whether anything was out.
    /// Calling it again is a no-op.
    pub fn detach(
        &mut self,
        player: PlayerId,
        hook: &mut HookState,
        store: &mut impl AttachmentStore,
    ) -> bool {
        let was_out = self.phase != RopePhase::Idle || hook.active;
        store.set_rope_attached(player, false);
        self.phase = RopePhase::Idle;
        hook.active = false;
        hook.stop();
        was_out
    }

    /// Fly the hook out or back and look for a surface to anchor to.
    #[allow(clippy::too_many_arguments)]
    pub fn step_projectile(
        &mut self,
        player: PlayerId,
        player_pos: Vec2,
        hook: &mut HookState,
        probe: &impl EnvironmentProbe,
        store: &mut impl AttachmentStore,
        tuning: &RopeTuning,
        dt: f32,
    ) -> Option<RopeEvent> {
        if !self.is_shooting() || !hook.active {
            return None;
        }

        let mut event = None;
        let distance = player_pos.distance(hook.position);

        match self.phase {
            RopePhase::Extending => {
                if distance >= tuning.max_rope_length {
                    self.phase = RopePhase::Retracting;
                    hook.velocity = Vec2::ZERO;
                    hook.gravity_scale = 1.0;
                    event = Some(RopeEvent::Retracting);
                }
            }
            RopePhase::Retracting => {
                if distance >= RopeTuning::RETURN_PULL_DISTANCE {
                    let to_player = (player_pos - hook.position).normalize_or_zero();
                    hook.apply_force(to_player * tuning.return_force(), dt);
                }
            }
            RopePhase::Idle | RopePhase::Anchored(_) => {}
        }

        let hit = probe.raycast(
            hook.position,
            hook.velocity.normalize_or_zero(),
            RopeTuning::ANCHOR_PROBE_DISTANCE,
            tuning.attachable_mask(),
        );
        if let Some(hit) = hit {
            self.anchor_at(player, player_pos, hit, hook, store, tuning);
            event = Some(RopeEvent::Anchored);
        }

        event
    }

    fn anchor_at(
        &mut self,
        player: PlayerId,
        player_pos: Vec2,
        hit: ProbeHit,
        hook: &mut HookState,
        store: &mut impl AttachmentStore,
        tuning: &RopeTuning,
    ) {
        self.phase = RopePhase::Anchored(AnchorPoint { point: hit.point, normal: hit.normal });
        store.set_rope_attached(player, true);
        hook.stop();

        let captured = player_pos.distance(hit.point).max(tuning.min_rope_length);
        self.length = RopeLength {
            captured,
            current: captured * (tuning.rope_length_percentage / 100.0),
        };
    }

    /// Anchored physics: validate the anchor, pull toward it, then apply player control.
    #[allow(clippy::too_many_arguments)]
    pub fn step_anchored(
        &mut self,
        player: PlayerId,
        body: &mut BodyState,
        move_axis: Vec2,
        hook: &mut HookState,
        probe: &impl EnvironmentProbe,
        store: &mut impl AttachmentStore,
        tuning: &RopeTuning,
        dt: f32,
    ) -> Option<RopeEvent> {
        let RopePhase::Anchored(anchor) = self.phase else {
            return None;
        };

        if !store.is_rope_attached(player)
            || !probe.overlap_point(anchor.probe_point(), tuning.attachable_mask())
        {
            self.detach(player, hook, store);
            return Some(RopeEvent::Detached);
        }

        let to_anchor = anchor.point - body.position;
        let distance = to_anchor.length();
        if distance > self.length.current {
            let tension = (distance - self.length.current) * tuning.tension_force_factor;
            body.apply_force(to_anchor.normalize_or_zero() * tension, dt);
        }

        // Always pushes along -X, scaled by the signed offset. Kept as tuned; see DESIGN.md.
        let horizontal_offset = body.position.x - anchor.point.x;
        body.apply_force(
            Vec2::NEG_X * horizontal_offset * tuning.horizontal_tension_force_factor,
            dt,
        );

        body.clamp_speed(tuning.max_rope_pull_speed);

        self.adjust_length(move_axis.y, tuning, dt);

        if move_axis.x > 0.0 {
            body.apply_force(Vec2::X * tuning.movement_control_force, dt);
        } else if move_axis.x < 0.0 {
            body.apply_force(Vec2::NEG_X * tuning.movement_control_force, dt);
        }

        None
    }

    /// Positive `climb` shortens the rope, negative lengthens it.
    pub fn adjust_length(&mut self, climb: f32, tuning: &RopeTuning, dt: f32) {
        let delta = tuning.change_rope_length_speed * dt;
        if climb > 0.0 {
            self.length.current = (self.length.current - delta).max(tuning.min_rope_length);
        } else if climb < 0.0 {
            self.length.current = (self.length.current + delta).min(tuning.max_rope_length);
        }
    }

    /// Endpoints for the rope line, if any rope is out. `hook_pos` is `None` for a stowed hook.
    pub fn line(&self, player_pos: Vec2, hook_pos: Option<Vec2>) -> Option<(Vec2, Vec2)> {
        match self.phase {
            RopePhase::Idle => None,
            RopePhase::Extending | RopePhase::Retracting => hook_pos.map(|h| (player_pos, h)),
            RopePhase::Anchored(anchor) => Some((player_pos, anchor.point)),
        }
    }
}
