//! Impulse toward the target hero.
//!
//! The math is kept in plain functions so it can be checked without a world;
//! the system only resolves handles and writes velocities.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::hero::{Hero, HeroLifeState};

use super::components::{Bullet, BulletState, Homing, PooledBullet, TargetHero};
use super::error::FireError;

const MIN_DISTANCE: f32 = 1e-3;

/// Unit vector from `from` to `to`, or `None` when the points coincide.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let d = to - from;
    (d.length_squared() > MIN_DISTANCE * MIN_DISTANCE).then(|| d.normalize())
}

/// Impulse of magnitude `impulse` pointing from `from` to `to`.
#[inline]
pub fn impulse_toward(from: Vec2, to: Vec2, impulse: i32) -> Option<Vec2> {
    if impulse <= 0 {
        return None;
    }
    direction_to(from, to).map(|dir| dir * impulse as f32)
}

/// Velocity after applying `impulse` to a body, capped at `max_speed`.
#[inline]
pub fn apply_impulse(velocity: Vec2, impulse: Vec2, inverse_mass: f32, max_speed: f32) -> Vec2 {
    (velocity + impulse * inverse_mass).clamp_length_max(max_speed)
}

/// Launch direction for a new bullet: at the target if there is one, else along `aim`.
pub fn launch_direction(pos: Vec2, aim: Vec2, target: Option<Vec2>) -> Result<Vec2, FireError> {
    target
        .and_then(|t| direction_to(pos, t))
        .or_else(|| aim.try_normalize())
        .ok_or(FireError::NoDirection)
}

#[inline]
pub(crate) fn inverse_mass(mass: Option<&ComputedMass>) -> f32 {
    mass.map_or(1.0, |m| m.inverse())
}

/// Resolve a target handle to the hero's position, if that hero still plays.
#[inline]
pub(crate) fn resolve_target(
    target: &TargetHero,
    q_hero: &Query<(&Transform, &HeroLifeState), (With<Hero>, Without<PooledBullet>)>,
) -> Option<Vec2> {
    let e = target.get()?;
    let (tf, life) = q_hero.get(e).ok()?;
    life.is_alive().then(|| tf.translation.truncate())
}

pub fn impulse_to_target(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    q_hero: Query<(&Transform, &HeroLifeState), (With<Hero>, Without<PooledBullet>)>,
    mut q_bullets: Query<(
        &BulletState,
        &Bullet,
        &mut TargetHero,
        &mut Homing,
        &Transform,
        &mut LinearVelocity,
        Option<&ComputedMass>,
    ), With<PooledBullet>>,
) {
    for (state, bullet, mut target, mut homing, tf, mut vel, mass) in &mut q_bullets {
        if *state != BulletState::Active || target.get().is_none() {
            continue;
        }

        homing.timer.tick(time.delta());
        if !homing.timer.just_finished() {
            continue;
        }

        let Some(hero_pos) = resolve_target(&target, &q_hero) else {
            debug!("target hero gone, bullet keeps coasting");
            target.clear();
            continue;
        };

        let from = tf.translation.truncate();
        let Some(impulse) = impulse_toward(from, hero_pos, bullet.impulse) else {
            continue;
        };

        vel.0 = apply_impulse(vel.0, impulse, inverse_mass(mass), tunables.bullet_max_speed);
    }
}
