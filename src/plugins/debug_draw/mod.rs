//! Debug drawing (render-only): rope line, ground circle, wall rays.
//!
//! Gizmos are immediate mode, so every system here just reads controller state once per
//! frame. Nothing feeds back into gameplay.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::movement::controller::MovementController;
use crate::plugins::movement::tuning::MovementTuning;
use crate::plugins::movement::ProbeAnchors;
use crate::plugins::player::Player;
use crate::plugins::rope::components::RopeLine;

const ROPE: Color = Color::srgb(0.9, 0.85, 0.7);
const CONTACT: Color = Color::srgb(0.3, 0.9, 0.4);
const NO_CONTACT: Color = Color::srgb(0.9, 0.3, 0.3);

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (draw_rope_lines, draw_probes).run_if(in_state(GameState::InGame)),
    );
}

fn draw_rope_lines(q_lines: Query<&RopeLine>, mut gizmos: Gizmos) {
    for line in q_lines.iter().filter(|l| l.visible) {
        gizmos.line_2d(line.start, line.end, ROPE);
    }
}

fn contact_color(hit: bool) -> Color {
    if hit { CONTACT } else { NO_CONTACT }
}

fn draw_probes(
    tuning: Res<MovementTuning>,
    q_players: Query<(&Transform, &ProbeAnchors, &MovementController), With<Player>>,
    mut gizmos: Gizmos,
) {
    for (tf, anchors, controller) in &q_players {
        let position = tf.translation.truncate();

        gizmos.circle_2d(
            Isometry2d::from_translation(anchors.foot_at(position)),
            tuning.ground_check_radius,
            contact_color(controller.state.grounded),
        );

        let reach = Vec2::X * controller.facing.sign() * tuning.wall_check_distance;
        let wall_color = contact_color(controller.state.touching_wall);
        for origin in anchors.walls_at(position) {
            gizmos.line_2d(origin, origin + reach, wall_color);
        }
    }
}
