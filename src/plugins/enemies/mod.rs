//! Enemies plugin: a row of static shooters that fire homing bullets at the hero.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components:
//!    - `Health`, `EnemyLifeState`, `FireCadence`.
//!
//! 2) RULES mutate facts in predictable places:
//!    - `enemy_fire` only writes `FireBulletRequest`; the projectile allocator
//!      owns the pool.
//!    - `apply_enemy_hits` is the only writer of enemy `Health`. It consumes the
//!      `EnemyHit` messages produced by bullet collision routing.
//!
//! 3) STRUCTURAL CHANGES are delayed:
//!    - a finished death animation marks `PendingDespawn`
//!    - the actual despawn happens in PostUpdate, outside the fixed step.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::time::Fixed;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{
    draw_order::DrawingOrder, health::Health, layers::Layer, state::GameState, tunables::Tunables,
};
use crate::plugins::hero::{Hero, HeroLifeState};
use crate::plugins::projectiles::components::BulletKind;
use crate::plugins::projectiles::messages::{EnemyHit, FireBulletRequest};
use crate::plugins::projectiles::ProjectileSystems;
use crate::plugins::scene::{EnemyDefeated, MainScene, SceneSystems};

const ENEMY_RADIUS: f32 = 16.0;
/// Distance between the enemy row and the top wall.
const CEILING_OFFSET: f32 = 90.0;
const DEATH_SECONDS: f32 = 0.35;

#[derive(Component)]
pub struct Enemy;

/// Enemy lifecycle state machine.
///
/// - Alive: normal gameplay.
/// - Dying: short transition animation, no longer collides or fires.
/// - Dead: terminal marker to stop further state transitions.
#[derive(Component, Debug, Clone)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

impl EnemyLifeState {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// Time until the next shot.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct FireCadence(pub Timer);

/// Marker: enemy should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        spawn_initial_wave.after(SceneSystems::SpawnRoot),
    );
    app.add_systems(
        Update,
        (
            refill_wave,
            enemy_fire.in_set(ProjectileSystems::Request),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            apply_enemy_hits.in_set(ProjectileSystems::ApplyHits),
            enemy_death_progress.after(apply_enemy_hits),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}

/// Keeps membership as Enemy but clears filters, so a dying enemy stops
/// interacting without a structural change.
#[inline]
fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

/// Evenly spaced x positions across the arena for `count` enemies.
pub fn row_positions(count: usize, half_width: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let span = (half_width - ENEMY_RADIUS * 2.0).max(0.0) * 2.0;
    let step = span / count as f32;
    (0..count)
        .map(|i| -span * 0.5 + step * (i as f32 + 0.5))
        .collect()
}

fn spawn_row(commands: &mut Commands, tunables: &Tunables, scene: Entity) {
    let enemy_layers = CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Hero, Layer::HeroBullet],
    );
    let y = tunables.arena_half_extents.y - CEILING_OFFSET;
    let count = tunables.enemy_count;

    let xs = row_positions(count, tunables.arena_half_extents.x);
    for (i, x) in xs.into_iter().enumerate() {
        // Stagger the first shot so the row doesn't fire in unison.
        let mut cadence = Timer::from_seconds(tunables.enemy_fire_interval, TimerMode::Repeating);
        let offset = tunables.enemy_fire_interval * i as f32 / count as f32;
        cadence.set_elapsed(std::time::Duration::from_secs_f32(offset));

        commands.spawn((
            Name::new(format!("Enemy{i}")),
            Enemy,
            Health::full(tunables.enemy_max_hp),
            EnemyLifeState::Alive,
            FireCadence(cadence),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(ENEMY_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_xyz(x, y, DrawingOrder::Enemy.z()),
            RigidBody::Static,
            Collider::circle(ENEMY_RADIUS),
            enemy_layers,
            Occluder2d::circle(ENEMY_RADIUS),
            ChildOf(scene),
        ));
    }
}

fn spawn_initial_wave(
    mut commands: Commands,
    tunables: Res<Tunables>,
    scene: Single<Entity, With<MainScene>>,
) {
    spawn_row(&mut commands, &tunables, *scene);
    info!("spawned {} enemies", tunables.enemy_count);
}

/// Spawn the next row once no enemy is left alive.
///
/// Dying enemies don't count, so the new row appears while the last one fades.
fn refill_wave(
    mut commands: Commands,
    tunables: Res<Tunables>,
    scene: Single<Entity, With<MainScene>>,
    q: Query<&EnemyLifeState, With<Enemy>>,
) {
    if tunables.enemy_count == 0 || q.iter().any(EnemyLifeState::is_alive) {
        return;
    }
    spawn_row(&mut commands, &tunables, *scene);
    info!("new wave of {} enemies", tunables.enemy_count);
}

/// Tick each enemy's cadence; on a finished cycle, aim a bullet at the hero.
fn enemy_fire(
    time: Res<Time>,
    tunables: Res<Tunables>,
    q_hero: Query<(Entity, &HeroLifeState), With<Hero>>,
    mut q_enemies: Query<(&Transform, &EnemyLifeState, &mut FireCadence), With<Enemy>>,
    mut writer: MessageWriter<FireBulletRequest>,
) {
    let hero = q_hero
        .iter()
        .find_map(|(e, life)| life.is_alive().then_some(e));

    for (tf, life, mut cadence) in &mut q_enemies {
        if !life.is_alive() {
            continue;
        }

        cadence.tick(time.delta());
        if !cadence.just_finished() {
            continue;
        }

        let Some(hero) = hero else {
            continue;
        };

        writer.write(FireBulletRequest {
            kind: BulletKind::Enemy,
            pos: tf.translation.truncate() - Vec2::Y * (ENEMY_RADIUS + 8.0),
            aim: Vec2::NEG_Y,
            target: Some(hero),
            attack_power: tunables.enemy_bullet_attack_power,
            impulse: tunables.enemy_bullet_impulse,
        });
    }
}

/// HandleEnemy: apply routed bullet hits and start the death transition.
fn apply_enemy_hits(
    mut hits: MessageReader<EnemyHit>,
    mut q: Query<
        (&mut Health, &mut EnemyLifeState, &mut CollisionLayers, &mut Sprite),
        With<Enemy>,
    >,
    mut defeated: MessageWriter<EnemyDefeated>,
) {
    for hit in hits.read() {
        let Ok((mut hp, mut life, mut layers, mut sprite)) = q.get_mut(hit.enemy) else {
            continue;
        };
        if !life.is_alive() {
            continue;
        }

        if hp.take(hit.attack_power) {
            *life = EnemyLifeState::Dying {
                timer: Timer::from_seconds(DEATH_SECONDS, TimerMode::Once),
            };
            *layers = non_interacting_enemy_layers();
            sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);
            defeated.write(EnemyDefeated { enemy: hit.enemy });
        }
    }
}

/// Animate Dying state and mark PendingDespawn once finished.
fn enemy_death_progress(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<
        (Entity, &mut EnemyLifeState, &mut Sprite, &mut Transform),
        (With<Enemy>, Without<PendingDespawn>),
    >,
) {
    for (e, mut life, mut sprite, mut tf) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);

        tf.scale = Vec3::splat(1.0 - t);

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
