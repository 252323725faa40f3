//! Draw order between entity categories.
//!
//! Sprites are sorted by z translation, so each category gets its own band.
//! Enemies sit below the hero; bullets sit above both so they stay readable
//! when they overlap their target.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawingOrder {
    Enemy,
    Hero,
    Bullet,
}

impl DrawingOrder {
    #[inline]
    pub fn z(self) -> f32 {
        match self {
            Self::Enemy => 1.0,
            Self::Hero => 2.0,
            Self::Bullet => 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DrawingOrder;

    #[test]
    fn enemy_is_drawn_before_hero() {
        assert!(DrawingOrder::Enemy < DrawingOrder::Hero);
        assert!(DrawingOrder::Enemy.z() < DrawingOrder::Hero.z());
        assert!(DrawingOrder::Hero.z() < DrawingOrder::Bullet.z());
    }
}
