//! Axis-aligned rectangles in viewport pixels (y grows downward)

use glam::Vec2;

/// Axis-aligned rectangle stored as top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square footprint with its top-left corner at `min`
    pub fn square(min: Vec2, side: f32) -> Self {
        Self::new(min, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Grow by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            size: self.size + Vec2::splat(2.0 * amount),
        }
    }

    /// Closed-interval intersection test: touching edges count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        !(a_max.x < other.min.x
            || self.min.x > b_max.x
            || a_max.y < other.min.y
            || self.min.y > b_max.y)
    }

    /// True if `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let max = self.max();
        let other_max = other.max();
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other_max.x <= max.x
            && other_max.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_disjoint() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Rect::square(Vec2::new(20.0, 0.0), 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Separated only vertically
        let c = Rect::square(Vec2::new(0.0, 10.5), 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_touching_edges() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Rect::square(Vec2::new(10.0, 0.0), 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_overlap_contained() {
        let outer = Rect::square(Vec2::new(0.0, 0.0), 100.0);
        let inner = Rect::square(Vec2::new(40.0, 40.0), 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
        assert!(outer.contains_rect(&inner));
        assert!(!inner.contains_rect(&outer));
    }

    #[test]
    fn test_expand() {
        let r = Rect::square(Vec2::new(50.0, 60.0), 32.0).expand(40.0);
        assert_eq!(r.min, Vec2::new(10.0, 20.0));
        assert_eq!(r.size, Vec2::splat(112.0));
        assert_eq!(r.max(), Vec2::new(122.0, 132.0));
    }
}
