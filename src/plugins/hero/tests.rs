use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::health::Health;
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::messages::{FireBulletRequest, HeroHit};
use crate::plugins::scene::{HeroDefeated, MainScene, SceneStats};

use super::{Hero, HeroInput, HeroLifeState};

fn world_with_tunables() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world
}

fn hit_world(hp: i32) -> (World, Entity) {
    let mut world = world_with_tunables();
    world.init_resource::<SceneStats>();
    ensure_messages::<HeroHit>(&mut world);
    ensure_messages::<HeroDefeated>(&mut world);
    let hero = world
        .spawn((Hero, HeroLifeState::Alive, Health::full(hp)))
        .id();
    (world, hero)
}

#[test]
fn spawn_creates_live_hero_near_bottom() {
    let mut world = world_with_tunables();
    let scene = world.spawn(MainScene).id();
    run_system_once(&mut world, super::spawn);

    let (tf, life, hp, parent) = world
        .query_filtered::<(&Transform, &HeroLifeState, &Health, &ChildOf), With<Hero>>()
        .single(&world)
        .unwrap();
    assert_eq!(parent.parent(), scene);
    assert!(life.is_alive());
    assert_eq!(hp.hp, Tunables::default().hero_max_hp);
    assert!(tf.translation.y < 0.0);
    assert_eq!(tf.translation.z, crate::common::draw_order::DrawingOrder::Hero.z());
}

fn input_after(pressed: &[KeyCode]) -> HeroInput {
    let mut world = World::new();
    let mut keys = ButtonInput::<KeyCode>::default();
    for key in pressed {
        keys.press(*key);
    }
    world.insert_resource(keys);
    world.insert_resource(HeroInput::default());

    run_system_once(&mut world, super::gather_input);

    world.remove_resource::<HeroInput>().unwrap()
}

#[test]
fn slide_keys_set_the_axis() {
    assert_eq!(input_after(&[KeyCode::KeyA]).slide_axis, -1.0);
    assert_eq!(input_after(&[KeyCode::ArrowLeft]).slide_axis, -1.0);
    assert_eq!(input_after(&[KeyCode::KeyD]).slide_axis, 1.0);
    assert_eq!(input_after(&[KeyCode::ArrowRight]).slide_axis, 1.0);
    assert_eq!(input_after(&[KeyCode::KeyA, KeyCode::KeyD]).slide_axis, 0.0);
    assert_eq!(input_after(&[]).slide_axis, 0.0);
}

#[test]
fn space_holds_fire() {
    let input = input_after(&[KeyCode::Space, KeyCode::ArrowLeft]);
    assert!(input.fire_held);
    assert_eq!(input.slide_axis, -1.0);

    assert!(!input_after(&[KeyCode::KeyD]).fire_held);
}

#[test]
fn missing_keyboard_leaves_input_untouched() {
    let mut world = World::new();
    world.insert_resource(HeroInput { slide_axis: 0.5, fire_held: true });

    run_system_once(&mut world, super::gather_input);

    let input = world.resource::<HeroInput>();
    assert_eq!(input.slide_axis, 0.5);
    assert!(input.fire_held);
}

#[test]
fn apply_movement_slides_horizontally() {
    let mut world = world_with_tunables();
    world.insert_resource(HeroInput { slide_axis: 1.0, fire_held: false });
    world.spawn((Hero, Transform::default(), LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(Tunables::default().hero_speed, 0.0));
}

#[test]
fn apply_movement_stops_at_arena_edge() {
    let mut world = world_with_tunables();
    let edge = Tunables::default().arena_half_extents.x;
    world.insert_resource(HeroInput { slide_axis: 1.0, fire_held: false });
    world.spawn((Hero, Transform::from_xyz(edge, 0.0, 0.0), LinearVelocity(Vec2::X)));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::ZERO);
}

#[test]
fn fire_held_requests_an_upward_hero_bullet() {
    let mut world = world_with_tunables();
    world.insert_resource(Time::<()>::default());
    world.insert_resource(HeroInput { slide_axis: 0.0, fire_held: true });
    world.insert_resource(super::FireCooldown::default());
    ensure_messages::<FireBulletRequest>(&mut world);
    world.spawn((Hero, HeroLifeState::Alive, Transform::from_xyz(5.0, -100.0, 0.0)));

    run_system_once(&mut world, super::request_hero_bullets);

    let reqs = drain_messages::<FireBulletRequest>(&mut world);
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].aim, Vec2::Y);
    assert_eq!(reqs[0].target, None);
    assert!(reqs[0].pos.y > -100.0);

    // Cooldown blocks the next shot on the same instant.
    run_system_once(&mut world, super::request_hero_bullets);
    assert!(drain_messages::<FireBulletRequest>(&mut world).is_empty());
}

#[test]
fn hero_hit_reduces_health() {
    let (mut world, hero) = hit_world(5);
    world.write_message(HeroHit { hero, attack_power: 2 });

    run_system_once(&mut world, super::apply_hero_hits);

    assert_eq!(world.get::<Health>(hero).unwrap().hp, 3);
    assert_eq!(world.resource::<SceneStats>().hero_hits_taken, 1);
    assert!(drain_messages::<HeroDefeated>(&mut world).is_empty());
}

#[test]
fn lethal_hit_defeats_and_despawns_hero_once() {
    let (mut world, hero) = hit_world(2);
    world.write_message(HeroHit { hero, attack_power: 2 });
    world.write_message(HeroHit { hero, attack_power: 2 });

    run_system_once(&mut world, super::apply_hero_hits);

    assert!(world.get_entity(hero).is_err());
    assert_eq!(drain_messages::<HeroDefeated>(&mut world), vec![HeroDefeated { hero }]);
    assert_eq!(world.resource::<SceneStats>().hero_hits_taken, 1);
}

#[test]
fn hit_on_missing_hero_is_ignored() {
    let (mut world, hero) = hit_world(2);
    world.despawn(hero);
    world.write_message(HeroHit { hero, attack_power: 5 });

    run_system_once(&mut world, super::apply_hero_hits);

    assert_eq!(world.resource::<SceneStats>().hero_hits_taken, 0);
    assert!(drain_messages::<HeroDefeated>(&mut world).is_empty());
}
