//! Lighting plugin (Firefly, render-only).
//!
//! Each hero carries a point light as a child entity. The light's reach
//! shrinks with the hero's remaining health and it flashes red when a bullet
//! lands. Enemies carry occluders, so their shadows fall away from the hero.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::{health::Health, state::GameState};
use crate::plugins::hero::Hero;
use crate::plugins::projectiles::messages::HeroHit;

/// Range at full health.
const FULL_RANGE: f32 = 600.0;
/// Range just before defeat.
const LOW_RANGE: f32 = 220.0;
const FLASH_SECONDS: f32 = 0.25;
const WARM: Vec3 = Vec3::new(1.0, 0.9, 0.75);
const HURT: Vec3 = Vec3::new(1.0, 0.25, 0.2);

#[derive(Component, Debug, Default)]
pub struct HeroLight {
    /// 1.0 right after a hit, fades to 0.0.
    flash: f32,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(
        Update,
        (attach_hero_light, flash_on_hero_hit, update_hero_light)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
fn light_range(health_fraction: f32) -> f32 {
    LOW_RANGE + (FULL_RANGE - LOW_RANGE) * health_fraction.clamp(0.0, 1.0)
}

#[inline]
fn light_color(flash: f32) -> Color {
    let c = WARM.lerp(HURT, flash.clamp(0.0, 1.0));
    Color::srgb(c.x, c.y, c.z)
}

#[inline]
fn fade_flash(flash: f32, dt: f32) -> f32 {
    (flash - dt / FLASH_SECONDS).max(0.0)
}

/// The light is parented to the hero, so it follows the hero and goes out
/// with it.
fn attach_hero_light(mut commands: Commands, q_new_heroes: Query<Entity, Added<Hero>>) {
    for hero in &q_new_heroes {
        commands.spawn((
            Name::new("HeroLight"),
            HeroLight::default(),
            PointLight2d {
                color: light_color(0.0),
                radius: light_range(1.0),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 10.0),
            ChildOf(hero),
        ));
    }
}

fn flash_on_hero_hit(
    mut hits: MessageReader<HeroHit>,
    mut q_lights: Query<(&ChildOf, &mut HeroLight)>,
) {
    for hit in hits.read() {
        for (parent, mut light) in &mut q_lights {
            if parent.parent() == hit.hero {
                light.flash = 1.0;
            }
        }
    }
}

fn update_hero_light(
    time: Res<Time>,
    q_hero: Query<&Health, With<Hero>>,
    mut q_lights: Query<(&ChildOf, &mut HeroLight, &mut PointLight2d)>,
) {
    let dt = time.delta_secs();
    for (parent, mut light, mut point) in &mut q_lights {
        let Ok(health) = q_hero.get(parent.parent()) else {
            continue;
        };

        point.radius = light_range(health.fraction());
        // Colour first so a fresh hit shows at full strength for a frame.
        point.color = light_color(light.flash);
        light.flash = fade_flash(light.flash, dt);
    }
}

#[cfg(test)]
mod tests;
