//! Collision routing for bullets.
//!
//! Avian reports raw contacts. This system decides what a contact means for
//! a bullet and hands the gameplay consequence to the hero or enemy side as a
//! message. It never touches Health.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::components::{Bullet, BulletKind, BulletState, PooledBullet};
use super::messages::{EnemyHit, HeroHit};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

pub fn route_bullet_collisions(
    mut started: MessageReader<CollisionStart>,
    q_is_bullet: Query<(), With<PooledBullet>>,
    mut q_bullets: Query<(&mut Bullet, &mut BulletState, &BulletKind), With<PooledBullet>>,
    q_layers: Query<&CollisionLayers>,
    mut hero_hits: MessageWriter<HeroHit>,
    mut enemy_hits: MessageWriter<EnemyHit>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_is_bullet.contains(t1.collider);
        let b2 = q_is_bullet.contains(t2.collider);
        if !(b1 ^ b2) {
            continue; // must be exactly one bullet
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        if !seen.insert(bullet_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        let Ok((mut bullet, mut state, kind)) = q_bullets.get_mut(bullet_side.collider) else {
            continue;
        };

        if *state != BulletState::Active {
            continue;
        }

        if is_in_layer(other_layers, Layer::World) {
            bullet.wall_bounces_left = bullet.wall_bounces_left.saturating_sub(1);
            if bullet.wall_bounces_left == 0 {
                *state = BulletState::PendingReturn;
            }
            continue;
        }

        match kind {
            BulletKind::Enemy if is_in_layer(other_layers, Layer::Hero) => {
                hero_hits.write(HeroHit {
                    hero: other_side.gameplay_owner(),
                    attack_power: bullet.attack_power,
                });
                *state = BulletState::PendingReturn;
            }
            BulletKind::Hero if is_in_layer(other_layers, Layer::Enemy) => {
                enemy_hits.write(EnemyHit {
                    enemy: other_side.gameplay_owner(),
                    attack_power: bullet.attack_power,
                });
                *state = BulletState::PendingReturn;
            }
            _ => {}
        }
    }
}
