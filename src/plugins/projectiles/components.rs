use bevy::prelude::*;

#[derive(Component)]
pub struct PooledBullet;

/// Which side fired the bullet. Decides collision layers and who can be hit.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BulletKind {
    Hero,
    #[default]
    Enemy,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    /// Damage dealt to whatever the bullet hits.
    pub attack_power: i32,
    /// Magnitude of each impulse pushing the bullet toward its target.
    pub impulse: i32,
    pub wall_bounces_left: u8,
}

impl Bullet {
    pub const DEFAULT_WALL_BOUNCES: u8 = 2;

    pub fn new(attack_power: i32, impulse: i32) -> Self {
        Self {
            attack_power,
            impulse,
            wall_bounces_left: Self::DEFAULT_WALL_BOUNCES,
        }
    }

    #[inline]
    pub fn reset_for_fire(&mut self, attack_power: i32, impulse: i32) {
        *self = Self::new(attack_power, impulse);
    }
}

/// Non-owning handle to the hero a bullet is chasing.
///
/// The hero's lifetime belongs to the scene. This is only ever resolved by
/// lookup, and is cleared once the hero is gone.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetHero(pub Option<Entity>);

impl TargetHero {
    #[inline]
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

/// Re-steer cadence for bullets with a target.
#[derive(Component, Debug, Clone)]
pub struct Homing {
    pub timer: Timer,
}

impl Homing {
    pub fn every(secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(secs, TimerMode::Repeating),
        }
    }
}

#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct BulletLifetime(pub Timer);

impl BulletLifetime {
    pub fn seconds(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

/// Newtype so pool storage cannot be mixed up with other entity lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletEntity(pub Entity);
