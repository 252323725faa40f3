//! Common, shared types.

pub mod draw_order;
pub mod health;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
