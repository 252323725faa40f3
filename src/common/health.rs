//! Hit points shared by the hero and enemies.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn full(max_hp: i32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Subtract `amount`, never going below zero. Returns true once depleted.
    #[inline]
    pub fn take(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount.max(0)).max(0);
        self.is_depleted()
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    /// Remaining share of `max_hp`, in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}
