mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use sliders::common::state::GameState;
use sliders::common::tunables::Tunables;
use sliders::plugins::enemies::Enemy;
use sliders::plugins::hero::Hero;
use sliders::plugins::projectiles::pool::BulletPool;
use sliders::plugins::projectiles::POOL_CAPACITY;
use sliders::plugins::scene::MainScene;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn first_frame_populates_the_round() {
    let mut app = common::app_in_round();

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);

    let world = app.world_mut();
    assert_eq!(world.query::<&MainScene>().iter(world).count(), 1);

    let heroes = world
        .query_filtered::<(), (With<Hero>, With<TranslationInterpolation>)>()
        .iter(world)
        .count();
    assert_eq!(heroes, 1, "hero should opt in to smoothing via TranslationInterpolation");

    let enemies = world.query::<&Enemy>().iter(world).count();
    assert_eq!(enemies, world.resource::<Tunables>().enemy_count);

    assert_eq!(world.resource::<BulletPool>().capacity(), POOL_CAPACITY);
}

#[test]
fn round_entities_hang_off_the_main_scene() {
    let mut app = common::app_in_round();
    let world = app.world_mut();

    let scene = world
        .query_filtered::<Entity, With<MainScene>>()
        .single(world)
        .expect("one scene root");

    let mut owned_by_scene = |prefix: &str| {
        let parents: Vec<Entity> = world
            .query::<(&Name, &ChildOf)>()
            .iter(world)
            .filter(|(n, _)| n.as_str().starts_with(prefix))
            .map(|(_, parent)| parent.parent())
            .collect();
        assert!(!parents.is_empty(), "no {prefix} entities");
        parents.iter().all(|&p| p == scene)
    };
    assert!(owned_by_scene("Hero"));
    assert!(owned_by_scene("Enemy"));
    assert!(owned_by_scene("Wall"));
}
