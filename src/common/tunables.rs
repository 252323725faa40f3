//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Half width/height of the playable arena, in pixels.
    pub arena_half_extents: Vec2,

    pub hero_speed: f32,
    pub hero_max_hp: i32,
    /// Seconds between hero shots while Space is held.
    pub hero_fire_cooldown: f32,
    pub hero_bullet_attack_power: i32,
    pub hero_bullet_impulse: i32,

    pub enemy_count: usize,
    pub enemy_max_hp: i32,
    /// Seconds between two shots of the same enemy.
    pub enemy_fire_interval: f32,
    pub enemy_bullet_attack_power: i32,
    pub enemy_bullet_impulse: i32,

    /// Seconds between two homing impulses of a targeted bullet.
    pub homing_interval: f32,
    pub bullet_max_speed: f32,
    pub bullet_lifetime: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            arena_half_extents: Vec2::new(360.0, 560.0),

            hero_speed: 420.0,
            hero_max_hp: 10,
            hero_fire_cooldown: 0.18,
            hero_bullet_attack_power: 1,
            hero_bullet_impulse: 500,

            enemy_count: 5,
            enemy_max_hp: 3,
            enemy_fire_interval: 1.6,
            enemy_bullet_attack_power: 1,
            enemy_bullet_impulse: 140,

            homing_interval: 0.25,
            bullet_max_speed: 520.0,
            bullet_lifetime: 4.0,
        }
    }
}
