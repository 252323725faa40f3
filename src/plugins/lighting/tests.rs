use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::health::Health;
use crate::common::test_utils::{ensure_messages, run_system_once};
use crate::plugins::hero::Hero;
use crate::plugins::projectiles::messages::HeroHit;

use super::{FLASH_SECONDS, FULL_RANGE, HeroLight, LOW_RANGE};

fn lit_hero(world: &mut World, health: Health) -> (Entity, Entity) {
    let hero = world.spawn((Hero, health)).id();
    let light = world
        .spawn((HeroLight::default(), PointLight2d::default(), ChildOf(hero)))
        .id();
    (hero, light)
}

#[test]
fn range_follows_remaining_health() {
    assert_eq!(super::light_range(1.0), FULL_RANGE);
    assert_eq!(super::light_range(0.0), LOW_RANGE);
    assert!(super::light_range(0.5) < FULL_RANGE);
    assert!(super::light_range(0.5) > LOW_RANGE);
    assert_eq!(super::light_range(3.0), FULL_RANGE);
}

#[test]
fn flash_fades_back_to_warm() {
    assert_eq!(super::fade_flash(1.0, FLASH_SECONDS * 0.5), 0.5);
    assert_eq!(super::fade_flash(0.1, 1.0), 0.0);
    assert_ne!(super::light_color(1.0), super::light_color(0.0));
    assert_eq!(super::light_color(-1.0), super::light_color(0.0));
}

#[test]
fn new_hero_gets_a_child_light() {
    let mut world = World::new();
    let hero = world.spawn((Hero, Health::full(3))).id();

    run_system_once(&mut world, super::attach_hero_light);

    let (parent, point) = world
        .query_filtered::<(&ChildOf, &PointLight2d), With<HeroLight>>()
        .single(&world)
        .unwrap();
    assert_eq!(parent.parent(), hero);
    assert_eq!(point.radius, FULL_RANGE);

    // The light goes out with the hero.
    world.despawn(hero);
    assert_eq!(world.query::<&HeroLight>().iter(&world).count(), 0);
}

#[test]
fn hit_flashes_only_the_struck_heros_light() {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    ensure_messages::<HeroHit>(&mut world);
    let (hero, light) = lit_hero(&mut world, Health { hp: 2, max_hp: 4 });
    let (_, other_light) = lit_hero(&mut world, Health::full(4));

    world.write_message(HeroHit { hero, attack_power: 1 });
    run_system_once(&mut world, super::flash_on_hero_hit);
    run_system_once(&mut world, super::update_hero_light);

    let point = world.get::<PointLight2d>(light).unwrap();
    assert_eq!(point.color, super::light_color(1.0));
    assert_eq!(point.radius, super::light_range(0.5));

    let other = world.get::<PointLight2d>(other_light).unwrap();
    assert_eq!(other.color, super::light_color(0.0));
    assert_eq!(other.radius, FULL_RANGE);
}
