use bevy::prelude::*;

use super::body::BodyState;

#[test]
fn force_scales_with_mass_and_dt() {
    let mut body = BodyState::new(Vec2::ZERO, Vec2::ZERO, 2.0);
    body.apply_force(Vec2::new(10.0, 0.0), 0.5);
    assert_eq!(body.velocity, Vec2::new(2.5, 0.0));
}

#[test]
fn impulse_ignores_dt() {
    let mut body = BodyState::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 4.0);
    body.apply_impulse(Vec2::new(0.0, 8.0));
    assert_eq!(body.velocity, Vec2::new(1.0, 2.0));
}

#[test]
fn massless_body_acts_as_unit_mass() {
    let body = BodyState::new(Vec2::ZERO, Vec2::ZERO, 0.0);
    assert_eq!(body.inverse_mass, 1.0);
}

#[test]
fn clamp_speed_keeps_direction() {
    let mut body = BodyState::new(Vec2::ZERO, Vec2::new(30.0, 40.0), 1.0);
    body.clamp_speed(10.0);
    assert!((body.velocity - Vec2::new(6.0, 8.0)).length() < 1e-5);
}
