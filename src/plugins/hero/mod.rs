//! Hero plugin.
//!
//! Pipeline:
//! - Update: sample input, write HeroInput resource, request shots
//! - FixedUpdate: slide the kinematic body along the bottom of the arena
//! - FixedPostUpdate: apply `HeroHit` messages (after collision routing)
//!
//! Input resources are optional so the same systems run in headless apps.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::{
    draw_order::DrawingOrder, health::Health, layers::Layer, state::GameState, tunables::Tunables,
};
use crate::plugins::projectiles::components::BulletKind;
use crate::plugins::projectiles::messages::{FireBulletRequest, HeroHit};
use crate::plugins::projectiles::ProjectileSystems;
use crate::plugins::scene::{HeroDefeated, MainScene, SceneStats, SceneSystems};

const HERO_RADIUS: f32 = 14.0;
/// Distance between the hero's centre and its resting row near the bottom wall.
const FLOOR_OFFSET: f32 = 70.0;
/// Hero bullets start just above the hero so they don't touch it.
const MUZZLE_OFFSET: f32 = HERO_RADIUS + 8.0;

#[derive(Component)]
pub struct Hero;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroLifeState {
    #[default]
    Alive,
    Defeated,
}

impl HeroLifeState {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }
}

#[derive(Resource, Default, Debug)]
struct HeroInput {
    slide_axis: f32,
    fire_held: bool,
}

#[derive(Resource, Debug, Default)]
struct FireCooldown(Timer);

pub fn plugin(app: &mut App) {
    app.insert_resource(HeroInput::default())
        .insert_resource(FireCooldown::default())
        .add_systems(OnEnter(GameState::InGame), spawn.after(SceneSystems::SpawnRoot))
        .add_systems(
            Update,
            (
                gather_input,
                request_hero_bullets
                    .after(gather_input)
                    .in_set(ProjectileSystems::Request),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            apply_movement.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            apply_hero_hits
                .in_set(ProjectileSystems::ApplyHits)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    scene: Single<Entity, With<MainScene>>,
) {
    let layers = CollisionLayers::new(
        Layer::Hero,
        [Layer::World, Layer::Enemy, Layer::EnemyBullet],
    );
    let y = -tunables.arena_half_extents.y + FLOOR_OFFSET;

    commands.spawn((
        Name::new("Hero"),
        Hero,
        HeroLifeState::Alive,
        Health::full(tunables.hero_max_hp),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(HERO_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, y, DrawingOrder::Hero.z()),
        RigidBody::Kinematic,
        Collider::circle(HERO_RADIUS),
        layers,
        LinearVelocity::ZERO,
        TranslationInterpolation,
        ChildOf(*scene),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<HeroInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = 0.0;
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }

    input.slide_axis = axis;
    input.fire_held = keys.pressed(KeyCode::Space);
}

fn request_hero_bullets(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<HeroInput>,
    mut cooldown: ResMut<FireCooldown>,
    q_hero: Query<(&Transform, &HeroLifeState), With<Hero>>,
    mut writer: MessageWriter<FireBulletRequest>,
) {
    cooldown.0.tick(time.delta());
    if !input.fire_held || !cooldown.0.is_finished() {
        return;
    }

    let Ok((tf, life)) = q_hero.single() else {
        return;
    };
    if !life.is_alive() {
        return;
    }

    writer.write(FireBulletRequest {
        kind: BulletKind::Hero,
        pos: tf.translation.truncate() + Vec2::Y * MUZZLE_OFFSET,
        aim: Vec2::Y,
        target: None,
        attack_power: tunables.hero_bullet_attack_power,
        impulse: tunables.hero_bullet_impulse,
    });
    cooldown.0 = Timer::from_seconds(tunables.hero_fire_cooldown, TimerMode::Once);
}

/// Horizontal slide, clamped so the hero never leaves the arena.
fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<HeroInput>,
    mut q_hero: Query<(&Transform, &mut LinearVelocity), With<Hero>>,
) {
    let Ok((tf, mut vel)) = q_hero.single_mut() else {
        return;
    };

    let limit = tunables.arena_half_extents.x - HERO_RADIUS;
    let x = tf.translation.x;
    let pushing_out =
        (x <= -limit && input.slide_axis < 0.0) || (x >= limit && input.slide_axis > 0.0);
    let axis = if pushing_out {
        0.0
    } else {
        input.slide_axis
    };

    vel.0 = Vec2::new(axis * tunables.hero_speed, 0.0);
}

/// HandleHero: turn routed bullet hits into damage and defeat.
fn apply_hero_hits(
    mut commands: Commands,
    mut hits: MessageReader<HeroHit>,
    mut stats: ResMut<SceneStats>,
    mut q_hero: Query<(&mut Health, &mut HeroLifeState), With<Hero>>,
    mut defeated: MessageWriter<HeroDefeated>,
) {
    for hit in hits.read() {
        let Ok((mut hp, mut life)) = q_hero.get_mut(hit.hero) else {
            continue;
        };
        if !life.is_alive() {
            continue;
        }

        stats.hero_hits_taken += 1;
        if hp.take(hit.attack_power) {
            *life = HeroLifeState::Defeated;
            commands.entity(hit.hero).despawn();
            defeated.write(HeroDefeated { hero: hit.hero });
            info!("hero defeated");
        } else {
            debug!("hero hit for {}, {} hp left", hit.attack_power, hp.hp);
        }
    }
}

#[cfg(test)]
mod tests;
