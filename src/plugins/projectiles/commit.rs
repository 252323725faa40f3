//! Return commit: recycle bullets back into the pool.
//!
//! This system is the owner of the *Inactive invariants*.
//!
//! Invariant: Inactive bullets must be:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//! - not targeting anyone

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{BulletEntity, BulletKind, BulletState, PooledBullet, TargetHero};
use super::pool::{inactive_layers, BulletPool};

pub fn return_to_pool_commit(
    mut pool: ResMut<BulletPool>,
    mut q: Query<(
        Entity,
        &BulletKind,
        &mut BulletState,
        &mut TargetHero,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledBullet>>,
) {
    for (e, kind, mut state, mut target, mut vis, mut vel, mut layers) in &mut q {
        if *state != BulletState::PendingReturn {
            continue;
        }

        *state = BulletState::Inactive;
        target.clear();
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_layers(*kind);

        pool.push_free(BulletEntity(e));
    }
}

/// Mark every bullet still in flight for return. Used when a round ends.
pub fn retire_active_bullets(mut q: Query<&mut BulletState, With<PooledBullet>>) {
    for mut state in &mut q {
        if *state == BulletState::Active {
            *state = BulletState::PendingReturn;
        }
    }
}
