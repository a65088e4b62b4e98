//! Movement plugin: run, jump, wall-slide, slopes and knockback.
//!
//! ```text
//!   Frame (before fixed loop)
//!     probe_surroundings        ground circle + wall rays -> MovementState
//!     apply_knockback_requests  KnockbackRequest -> impulse + suppression window
//!     handle_jumps              jump / wall jump, then wall-slide clamp
//!   FixedUpdate (StepSystems::Locomotion)
//!     expire_knockback          clear elapsed windows
//!     apply_horizontal_movement slope or flat/air control, skipped while roped
//! ```
//!
//! Knockback windows are stamped and checked against `Time<Virtual>` in both halves, so the
//! frame and fixed sides agree on the same clock.

pub mod controller;
pub mod tuning;

use avian2d::prelude::*;
use bevy::app::RunFixedMainLoop;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::attachment::{AttachmentStore, PlayerRegistry};
use crate::common::schedule::{FrameSystems, StepSystems};
use crate::common::state::GameState;
use crate::plugins::input::PlayerActions;
use crate::plugins::physics::body::BodyState;
use crate::plugins::physics::probe::PhysicsProbe;
use crate::plugins::player::Player;

use controller::{Jump, MovementController};
use tuning::MovementTuning;

/// External knockback trigger, e.g. an explosion. `force` is applied as an impulse.
#[derive(Message, Clone, Copy, Debug)]
pub struct KnockbackRequest {
    pub target: Entity,
    pub force: Vec2,
}

/// Probe origins relative to the body's position.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ProbeAnchors {
    pub foot: Vec2,
    pub walls: Vec<Vec2>,
}

impl ProbeAnchors {
    #[inline]
    pub fn foot_at(&self, position: Vec2) -> Vec2 {
        position + self.foot
    }

    pub fn walls_at(&self, position: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        self.walls.iter().map(move |offset| position + *offset)
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<MovementTuning>()
        .add_message::<KnockbackRequest>()
        .add_systems(
            RunFixedMainLoop,
            probe_surroundings
                .in_set(FrameSystems::Probe)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            RunFixedMainLoop,
            (apply_knockback_requests, handle_jumps)
                .chain()
                .in_set(FrameSystems::Transition)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (expire_knockback, apply_horizontal_movement)
                .chain()
                .in_set(StepSystems::Locomotion)
                .run_if(in_state(GameState::InGame)),
        );
}

pub(crate) fn probe_surroundings(
    spatial: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut q_players: Query<
        (
            &Transform,
            &LinearVelocity,
            &PlayerActions,
            &ProbeAnchors,
            &mut MovementController,
        ),
        With<Player>,
    >,
) {
    let probe = PhysicsProbe::new(&spatial);

    for (tf, velocity, actions, anchors, mut controller) in &mut q_players {
        let position = tf.translation.truncate();
        controller.sense(
            anchors.foot_at(position),
            anchors.walls_at(position),
            velocity.0,
            actions.move_axis.x,
            &probe,
            &tuning,
        );
    }
}

pub(crate) fn apply_knockback_requests(
    time: Res<Time<Virtual>>,
    tuning: Res<MovementTuning>,
    mut reader: MessageReader<KnockbackRequest>,
    mut q_players: Query<(
        &Player,
        &Transform,
        &mut LinearVelocity,
        Option<&ComputedMass>,
        &mut MovementController,
    )>,
) {
    let now = time.elapsed_secs();

    for request in reader.read() {
        let Ok((player, tf, mut velocity, mass, mut controller)) =
            q_players.get_mut(request.target)
        else {
            debug!("Knockback target is not a player: {:?}", request.target);
            continue;
        };

        let mut body = BodyState::from_components(tf, &velocity, mass);
        controller.apply_knockback(&mut body, request.force, now, &tuning);
        velocity.0 = body.velocity;

        debug!(
            "Knockback: player={:?} force={:?} until={:?}",
            player.id, request.force, controller.state.knockback_until
        );
    }
}

pub(crate) fn handle_jumps(
    tuning: Res<MovementTuning>,
    mut q_players: Query<(
        &Player,
        &PlayerActions,
        &mut LinearVelocity,
        &mut MovementController,
    )>,
) {
    for (player, actions, mut velocity, mut controller) in &mut q_players {
        let mut v = velocity.0;
        let jump = controller.handle_jump(
            actions.jump_pressed,
            actions.move_axis.x,
            &mut v,
            &tuning,
        );
        controller.update_wall_slide(&mut v, &tuning);

        // Avoid spurious change detection on the avian component.
        if v != velocity.0 {
            velocity.0 = v;
        }

        match jump {
            Some(Jump::Normal) => debug!(
                "Jump: player={:?} remaining={}",
                player.id, controller.state.jumps_remaining
            ),
            Some(Jump::Wall) => debug!("Wall jump: player={:?} velocity={:?}", player.id, v),
            None => {}
        }
    }
}

pub(crate) fn expire_knockback(
    time: Res<Time<Virtual>>,
    mut q_players: Query<(&Player, &mut MovementController)>,
) {
    let now = time.elapsed_secs();
    for (player, mut controller) in &mut q_players {
        if controller.state.knockback_until.is_none() {
            continue;
        }
        if controller.expire_knockback(now) {
            debug!("Knockback window over: player={:?}", player.id);
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    clock: Res<Time<Virtual>>,
    spatial: SpatialQuery,
    tuning: Res<MovementTuning>,
    registry: Res<PlayerRegistry>,
    mut q_players: Query<(
        &Player,
        &Transform,
        &PlayerActions,
        &ProbeAnchors,
        &mut LinearVelocity,
        Option<&ComputedMass>,
        &MovementController,
    )>,
) {
    let dt = time.delta_secs();
    let now = clock.elapsed_secs();
    let probe = PhysicsProbe::new(&spatial);

    for (player, tf, actions, anchors, mut velocity, mass, controller) in &mut q_players {
        let roped = registry.is_rope_attached(player.id);
        let mut body = BodyState::from_components(tf, &velocity, mass);
        let foot = anchors.foot_at(body.position);
        controller.fixed_move(
            &mut body,
            actions.move_axis.x,
            foot,
            roped,
            now,
            &probe,
            &tuning,
            dt,
        );
        if body.velocity != velocity.0 {
            velocity.0 = body.velocity;
        }
    }
}
