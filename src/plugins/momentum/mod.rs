//! Momentum tracking.
//!
//! Each fixed step the player's position delta, scaled by `factor`, is stored on the
//! component and published into its `PlayerRegistry` record for other gameplay to read.

use bevy::prelude::*;

use crate::common::attachment::PlayerRegistry;
use crate::common::schedule::StepSystems;
use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    pub factor: f32,
    pub value: Vec2,
    last_position: Vec2,
}

impl Momentum {
    pub fn new(factor: f32, position: Vec2) -> Self {
        Self { factor, value: Vec2::ZERO, last_position: position }
    }

    pub fn update(&mut self, position: Vec2) -> Vec2 {
        self.value = (position - self.last_position) * self.factor;
        self.last_position = position;
        self.value
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        track_momentum
            .in_set(StepSystems::Track)
            .run_if(in_state(GameState::InGame)),
    );
}

pub(crate) fn track_momentum(
    mut registry: ResMut<PlayerRegistry>,
    mut q_players: Query<(&Player, &Transform, &mut Momentum)>,
) {
    for (player, tf, mut momentum) in &mut q_players {
        let value = momentum.update(tf.translation.truncate());
        registry.set_momentum(player.id, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::attachment::PlayerId;
    use crate::common::test_utils::run_system_once;

    #[test]
    fn starts_at_rest() {
        let m = Momentum::new(2.0, Vec2::new(1.0, 1.0));
        assert_eq!(m.value, Vec2::ZERO);
    }

    #[test]
    fn scales_position_delta() {
        let mut m = Momentum::new(2.0, Vec2::ZERO);
        assert_eq!(m.update(Vec2::new(0.5, -0.25)), Vec2::new(1.0, -0.5));
        // Delta is per step, not cumulative.
        assert_eq!(m.update(Vec2::new(0.5, -0.25)), Vec2::ZERO);
    }

    #[test]
    fn publishes_into_registry() {
        let mut world = World::new();
        let mut registry = PlayerRegistry::default();
        registry.register(PlayerId(3));
        world.insert_resource(registry);
        world.spawn((
            Player { id: PlayerId(3) },
            Transform::from_xyz(4.0, 1.0, 0.0),
            Momentum::new(1.0, Vec2::new(3.0, 1.0)),
        ));

        run_system_once(&mut world, track_momentum);

        let published = world.resource::<PlayerRegistry>().status(PlayerId(3)).map(|s| s.momentum);
        assert_eq!(published, Some(Vec2::new(1.0, 0.0)));
    }
}
