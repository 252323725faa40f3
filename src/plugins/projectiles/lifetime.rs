//! Bullets that expire or leave the play field go back to the pool.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{BulletLifetime, BulletState, PooledBullet};

/// Slack outside the arena walls before a bullet counts as gone.
const OUT_OF_BOUNDS_MARGIN: f32 = 64.0;

#[inline]
pub fn is_out_of_bounds(pos: Vec2, arena_half_extents: Vec2) -> bool {
    let limit = arena_half_extents + Vec2::splat(OUT_OF_BOUNDS_MARGIN);
    pos.x.abs() > limit.x || pos.y.abs() > limit.y
}

pub fn expire_bullets(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut BulletState, &mut BulletLifetime, &Transform), With<PooledBullet>>,
) {
    for (mut state, mut lifetime, tf) in &mut q {
        if *state != BulletState::Active {
            continue;
        }

        lifetime.tick(time.delta());
        let escaped = is_out_of_bounds(tf.translation.truncate(), tunables.arena_half_extents);
        if lifetime.is_finished() || escaped {
            *state = BulletState::PendingReturn;
        }
    }
}
