//! Projectiles plugin: pooled bullets, fired at the hero and steered by impulses.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producers (ProjectileSystems::Request)                                │
//!│      - hero input, enemy fire cadence                                      │
//!│      - writes: FireBulletRequest                                           │
//!│                                                                            │
//!│  (B) Consumer: allocate_bullets_from_pool (ProjectileSystems::Fire)        │
//!│      - pops BulletPool, resets Bullet/TargetHero/timers                    │
//!│      - launch impulse toward the target hero (or along aim)                │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!  FixedUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) impulse_to_target: re-steer toward TargetHero, clear stale handles    │
//!│  (D) expire_bullets: lifetime + out-of-field -> PendingReturn              │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!  FixedPostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) Avian emits CollisionStart                                            │
//!│  (F) route_bullet_collisions -> HeroHit / EnemyHit, PendingReturn          │
//!│  (G) hero/enemy plugins apply hits (ProjectileSystems::ApplyHits)          │
//!│  (H) return_to_pool_commit -> Inactive, back on the free list              │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `TargetHero` is a plain entity id. Bullets never own the hero; every use
//! looks it up again and tolerates it having been despawned.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod error;
pub mod homing;
pub mod lifetime;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub const POOL_CAPACITY: usize = 256;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectileSystems {
    /// Systems that write `FireBulletRequest`.
    Request,
    /// The pool allocator.
    Fire,
    /// Systems that consume `HeroHit` / `EnemyHit`.
    ApplyHits,
}

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(pool::BulletPool::new(POOL_CAPACITY))
            .add_systems(Startup, pool::init_bullet_pool);

        app.add_message::<messages::FireBulletRequest>()
            .add_message::<messages::HeroHit>()
            .add_message::<messages::EnemyHit>();

        app.configure_sets(
            Update,
            ProjectileSystems::Fire.after(ProjectileSystems::Request),
        );
        app.add_systems(
            Update,
            allocator::allocate_bullets_from_pool
                .in_set(ProjectileSystems::Fire)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedUpdate,
            (homing::impulse_to_target, lifetime::expire_bullets)
                .run_if(in_state(GameState::InGame)),
        );

        app.configure_sets(
            FixedPostUpdate,
            ProjectileSystems::ApplyHits
                .after(collision::route_bullet_collisions)
                .before(commit::return_to_pool_commit),
        );
        app.add_systems(
            FixedPostUpdate,
            (
                collision::route_bullet_collisions.after(CollisionEventSystems),
                commit::return_to_pool_commit.after(collision::route_bullet_collisions),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            OnExit(GameState::InGame),
            (commit::retire_active_bullets, commit::return_to_pool_commit).chain(),
        );
    }
}
