//! Buffered bullet messages.
//!
//! Producers (hero input, enemy cadence) only write `FireBulletRequest`.
//! The allocator is the only system that touches the pool.
//!
//! The collision router turns raw contacts into `HeroHit` / `EnemyHit`, which
//! the hero and enemy plugins consume. Projectiles never write Health directly.

use bevy::prelude::*;

use super::components::BulletKind;

#[derive(Message, Clone, Copy, Debug)]
pub struct FireBulletRequest {
    pub kind: BulletKind,
    pub pos: Vec2,
    /// Launch direction used when there is no live target.
    pub aim: Vec2,
    pub target: Option<Entity>,
    pub attack_power: i32,
    pub impulse: i32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroHit {
    pub hero: Entity,
    pub attack_power: i32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyHit {
    pub enemy: Entity,
    pub attack_power: i32,
}
