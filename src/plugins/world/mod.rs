//! World plugin: arena walls and an asset-free floor.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::scene::{MainScene, SceneSystems};

const TILE: f32 = 64.0;
const WALL_THICKNESS: f32 = 30.0;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_floor).after(SceneSystems::SpawnRoot),
    );
}

fn spawn_arena(
    mut commands: Commands,
    tunables: Res<Tunables>,
    scene: Single<Entity, With<MainScene>>,
) {
    let scene = *scene;
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let Vec2 { x: half_w, y: half_h } = tunables.arena_half_extents;
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(
        Layer::World,
        [Layer::Hero, Layer::Enemy, Layer::HeroBullet, Layer::EnemyBullet],
    );

    let walls = [
        ("WallTop", Vec2::new(0.0, half_h + t * 0.5), Vec2::new(half_w * 2.0 + t * 2.0, t)),
        ("WallBottom", Vec2::new(0.0, -half_h - t * 0.5), Vec2::new(half_w * 2.0 + t * 2.0, t)),
        ("WallLeft", Vec2::new(-half_w - t * 0.5, 0.0), Vec2::new(t, half_h * 2.0)),
        ("WallRight", Vec2::new(half_w + t * 0.5, 0.0), Vec2::new(t, half_h * 2.0)),
    ];

    for (name, pos, size) in walls {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            ChildOf(scene),
        ));
    }
}

/// Checkerboard of solid-colour tiles under everything else.
fn spawn_floor(
    mut commands: Commands,
    tunables: Res<Tunables>,
    scene: Single<Entity, With<MainScene>>,
) {
    let scene = *scene;
    let cols = (tunables.arena_half_extents.x / TILE).floor() as i32;
    let rows = (tunables.arena_half_extents.y / TILE).floor() as i32;

    (-rows..=rows)
        .flat_map(|y| (-cols..=cols).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE)),
                Transform::from_xyz(x as f32 * TILE, y as f32 * TILE, 0.0),
                ChildOf(scene),
            ));
        });
}
