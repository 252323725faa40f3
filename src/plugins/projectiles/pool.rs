//! Pre-spawned bullets.
//!
//! Bullets are never spawned or despawned during play. An inactive bullet keeps
//! all of its physics components but has empty collision filters, so it never
//! produces contacts. Activation and return only rewrite component values and
//! never move the entity between archetypes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::draw_order::DrawingOrder;
use crate::common::layers::Layer;
use crate::common::tunables::Tunables;

use super::components::{
    Bullet, BulletEntity, BulletKind, BulletLifetime, BulletState, Homing, PooledBullet,
    TargetHero,
};
use super::error::FireError;

#[derive(Resource, Debug)]
pub struct BulletPool {
    free: Vec<BulletEntity>,
    capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Result<BulletEntity, FireError> {
        self.free.pop().ok_or(FireError::PoolExhausted)
    }

    #[inline]
    pub fn push_free(&mut self, e: BulletEntity) {
        debug_assert!(!self.free.contains(&e), "bullet returned to pool twice");
        self.free.push(e);
    }
}

pub fn active_layers(kind: BulletKind) -> CollisionLayers {
    match kind {
        BulletKind::Hero => CollisionLayers::new(Layer::HeroBullet, [Layer::World, Layer::Enemy]),
        BulletKind::Enemy => CollisionLayers::new(Layer::EnemyBullet, [Layer::World, Layer::Hero]),
    }
}

/// Empty filters: collides with nothing.
pub fn inactive_layers(kind: BulletKind) -> CollisionLayers {
    match kind {
        BulletKind::Hero => CollisionLayers::new(Layer::HeroBullet, [] as [Layer; 0]),
        BulletKind::Enemy => CollisionLayers::new(Layer::EnemyBullet, [] as [Layer; 0]),
    }
}

pub fn init_bullet_pool(
    mut commands: Commands,
    mut pool: ResMut<BulletPool>,
    tunables: Res<Tunables>,
) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    let restitution = Restitution::new(0.9).with_combine_rule(CoefficientCombine::Max);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                BulletKind::default(),
                Bullet::new(0, 0),
                TargetHero::default(),
                Homing::every(tunables.homing_interval),
                BulletLifetime::seconds(tunables.bullet_lifetime),
                Sprite {
                    color: Color::srgb(1.0, 0.85, 0.3),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, DrawingOrder::Bullet.z()),
                Visibility::Hidden,
            ))
            .insert((
                RigidBody::Dynamic,
                Collider::circle(4.0),
                // Fixed unit mass so an impulse reads directly as a velocity change.
                Mass(1.0),
                NoAutoMass,
                inactive_layers(BulletKind::default()),
                restitution,
                Friction::ZERO,
                LinearVelocity(Vec2::ZERO),
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(BulletEntity(e));
    }

    debug!("bullet pool ready with {cap} bullets");
}
