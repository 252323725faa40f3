//! Fire consumer: activate bullets from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled bullet entities.
//! - Therefore, a pooled entity must match the bullet query.
//!
//! If this is violated we `expect()` and crash loudly.
//! An empty pool is a capacity decision and only drops the request.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::draw_order::DrawingOrder;
use crate::common::tunables::Tunables;
use crate::plugins::hero::{Hero, HeroLifeState};

use super::components::{
    Bullet, BulletEntity, BulletKind, BulletLifetime, BulletState, Homing, PooledBullet,
    TargetHero,
};
use super::homing::{apply_impulse, inverse_mass, launch_direction, resolve_target};
use super::messages::FireBulletRequest;
use super::pool::{active_layers, BulletPool};

#[inline]
fn fallback_direction(kind: BulletKind) -> Vec2 {
    match kind {
        BulletKind::Hero => Vec2::Y,
        BulletKind::Enemy => Vec2::NEG_Y,
    }
}

pub fn allocate_bullets_from_pool(
    mut pool: ResMut<BulletPool>,
    mut reader: MessageReader<FireBulletRequest>,
    tunables: Res<Tunables>,
    q_hero: Query<(&Transform, &HeroLifeState), (With<Hero>, Without<PooledBullet>)>,
    mut q: Query<(
        &mut BulletState,
        &mut BulletKind,
        &mut Bullet,
        &mut TargetHero,
        &mut Homing,
        &mut BulletLifetime,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
        &mut CollisionLayers,
        Option<&ComputedMass>,
    ), With<PooledBullet>>,
) {
    for req in reader.read() {
        let BulletEntity(e) = match pool.pop_free() {
            Ok(b) => b,
            Err(err) => {
                debug!("dropping {:?} fire request: {err}", req.kind);
                continue;
            }
        };

        let (
            mut state,
            mut kind,
            mut bullet,
            mut target,
            mut homing,
            mut lifetime,
            mut tf,
            mut vel,
            mut vis,
            mut layers,
            mass,
        ) = q
            .get_mut(e)
            .expect("BulletPool contained an entity missing pooled bullet components");

        *state = BulletState::Active;
        *kind = req.kind;
        bullet.reset_for_fire(req.attack_power, req.impulse);
        *target = TargetHero(req.target);
        homing.timer = Timer::from_seconds(tunables.homing_interval, TimerMode::Repeating);
        lifetime.0 = Timer::from_seconds(tunables.bullet_lifetime, TimerMode::Once);
        tf.translation = req.pos.extend(DrawingOrder::Bullet.z());
        *vis = Visibility::Visible;
        *layers = active_layers(req.kind);

        let target_pos = resolve_target(&target, &q_hero);
        if target.get().is_some() && target_pos.is_none() {
            target.clear();
        }

        let dir = launch_direction(req.pos, req.aim, target_pos).unwrap_or_else(|err| {
            debug!("{err}, launching {:?} bullet along its default direction", req.kind);
            fallback_direction(req.kind)
        });

        let impulse = dir * req.impulse.max(0) as f32;
        vel.0 = apply_impulse(Vec2::ZERO, impulse, inverse_mass(mass), tunables.bullet_max_speed);
    }
}
