//! Rope plugin: grappling hook launch, anchoring and swing tension.
//!
//! ```text
//!   Frame (before fixed loop)
//!     handle_grapple_trigger   PlayerActions.grapple_pressed -> fire / detach
//!   FixedUpdate (StepSystems::Rope)
//!     advance_hook             extend / retract / anchor probe
//!     apply_rope_tension       anchor validity, tension, pull clamp, length + swing control
//!   Update
//!     sync_rope_line           RopeLine endpoints for the renderer
//! ```
//!
//! The hook is a pooled avian body (see `components::hook_bundle`). Activation and stowing
//! are value writes; the hook entity lives as long as its player.

pub mod components;
pub mod controller;
pub mod tuning;

use avian2d::prelude::*;
use bevy::app::RunFixedMainLoop;
use bevy::prelude::*;

use crate::common::attachment::PlayerRegistry;
use crate::common::schedule::{FrameSystems, StepSystems};
use crate::common::state::GameState;
use crate::plugins::input::PlayerActions;
use crate::plugins::physics::body::BodyState;
use crate::plugins::physics::probe::PhysicsProbe;
use crate::plugins::player::Player;

use components::{commit, snapshot, RopeHook, RopeLine};
use controller::{RopeController, RopeEvent};
use tuning::RopeTuning;

type HookQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut RopeHook,
        &'static mut Transform,
        &'static mut LinearVelocity,
        &'static mut GravityScale,
        &'static mut Visibility,
    ),
    Without<Player>,
>;

pub fn plugin(app: &mut App) {
    app.init_resource::<RopeTuning>()
        .add_systems(
            RunFixedMainLoop,
            handle_grapple_trigger
                .in_set(FrameSystems::Transition)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (advance_hook, apply_rope_tension)
                .chain()
                .in_set(StepSystems::Rope)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, sync_rope_line.run_if(in_state(GameState::InGame)));
}

fn log_event(player: &Player, event: RopeEvent, controller: &RopeController) {
    match event {
        RopeEvent::Anchored => debug!(
            "Rope anchored: player={:?} anchor={:?} length={:?}",
            player.id,
            controller.anchor().map(|a| a.point),
            controller.length()
        ),
        _ => debug!("Rope {:?}: player={:?}", event, player.id),
    }
}

pub(crate) fn handle_grapple_trigger(
    tuning: Res<RopeTuning>,
    mut registry: ResMut<PlayerRegistry>,
    mut q_players: Query<(&Player, &Transform, &PlayerActions, &mut RopeController)>,
    mut q_hooks: HookQuery,
) {
    for (player, tf, actions, mut controller) in &mut q_players {
        if !actions.grapple_pressed {
            continue;
        }
        let Ok((mut hook, mut hook_tf, mut vel, mut gravity, mut vis)) =
            q_hooks.get_mut(controller.hook)
        else {
            debug!("RopeController hook missing: player={:?}", player.id);
            continue;
        };

        let mut state = snapshot(&hook, &hook_tf, &vel, &gravity);
        let event = controller.trigger(
            player.id,
            tf.translation.truncate(),
            actions.aim,
            &mut state,
            &mut *registry,
            &tuning,
        );
        commit(&state, &mut hook, &mut hook_tf, &mut vel, &mut gravity, &mut vis);

        if let Some(event) = event {
            log_event(player, event, &controller);
        }
    }
}

pub(crate) fn advance_hook(
    time: Res<Time>,
    spatial: SpatialQuery,
    tuning: Res<RopeTuning>,
    mut registry: ResMut<PlayerRegistry>,
    mut q_players: Query<(&Player, &Transform, &mut RopeController)>,
    mut q_hooks: HookQuery,
) {
    let dt = time.delta_secs();
    let probe = PhysicsProbe::new(&spatial);

    for (player, tf, mut controller) in &mut q_players {
        if !controller.is_shooting() {
            continue;
        }
        let Ok((mut hook, mut hook_tf, mut vel, mut gravity, mut vis)) =
            q_hooks.get_mut(controller.hook)
        else {
            continue;
        };

        let mut state = snapshot(&hook, &hook_tf, &vel, &gravity);
        let event = controller.step_projectile(
            player.id,
            tf.translation.truncate(),
            &mut state,
            &probe,
            &mut *registry,
            &tuning,
            dt,
        );
        commit(&state, &mut hook, &mut hook_tf, &mut vel, &mut gravity, &mut vis);

        if let Some(event) = event {
            log_event(player, event, &controller);
        }
    }
}

pub(crate) fn apply_rope_tension(
    time: Res<Time>,
    spatial: SpatialQuery,
    tuning: Res<RopeTuning>,
    mut registry: ResMut<PlayerRegistry>,
    mut q_players: Query<(
        &Player,
        &Transform,
        &PlayerActions,
        &mut LinearVelocity,
        Option<&ComputedMass>,
        &mut RopeController,
    )>,
    mut q_hooks: HookQuery,
) {
    let dt = time.delta_secs();
    let probe = PhysicsProbe::new(&spatial);

    for (player, tf, actions, mut velocity, mass, mut controller) in &mut q_players {
        if controller.anchor().is_none() {
            continue;
        }
        let Ok((mut hook, mut hook_tf, mut hook_vel, mut gravity, mut vis)) =
            q_hooks.get_mut(controller.hook)
        else {
            continue;
        };

        let mut body = BodyState::from_components(tf, &velocity, mass);
        let mut state = snapshot(&hook, &hook_tf, &hook_vel, &gravity);
        let event = controller.step_anchored(
            player.id,
            &mut body,
            actions.move_axis,
            &mut state,
            &probe,
            &mut *registry,
            &tuning,
            dt,
        );
        velocity.0 = body.velocity;
        commit(&state, &mut hook, &mut hook_tf, &mut hook_vel, &mut gravity, &mut vis);

        if let Some(event) = event {
            log_event(player, event, &controller);
        }
    }
}

fn sync_rope_line(
    mut q_players: Query<(&Transform, &RopeController, &mut RopeLine), With<Player>>,
    q_hooks: Query<(&RopeHook, &Transform), Without<Player>>,
) {
    for (tf, controller, mut line) in &mut q_players {
        let Ok((hook, hook_tf)) = q_hooks.get(controller.hook) else {
            line.set(None);
            continue;
        };
        let hook_pos = hook.active.then(|| hook_tf.translation.truncate());
        let endpoints = controller.line(tf.translation.truncate(), hook_pos);
        if line.visible != endpoints.is_some()
            || endpoints.is_some_and(|(s, e)| s != line.start || e != line.end)
        {
            line.set(endpoints);
        }
    }
}
