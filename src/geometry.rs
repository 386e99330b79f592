//! Rectangle type shared by surfaces and blits

/// Integer rectangle. Doubles as an output parameter for blits, which
/// overwrite `w`/`h` with the area actually transferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin
    #[inline]
    pub const fn with_size(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// Rectangle with only a position; the size is filled in by a blit
    #[inline]
    pub const fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, 0, 0)
    }

    /// Exclusive right edge, widened so it cannot overflow
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point lies inside (right/bottom edges exclusive)
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && i64::from(x) < self.right() && y >= self.y && i64::from(y) < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap of two rectangles. An empty overlap yields a zero-sized rect
    /// positioned at the clamped origin.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        // The overlap is never wider than either input, so it fits back in i32
        let w = (self.right().min(other.right()) - i64::from(x)).max(0);
        let h = (self.bottom().min(other.bottom()) - i64::from(y)).max(0);
        Rect::new(x, y, w as i32, h as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 4, 4);
        let r = a.intersect(&b);
        assert!(r.is_empty());
        assert_eq!((r.w, r.h), (0, 0));
    }

    #[test]
    fn test_contains() {
        let r = Rect::with_size(32, 32);
        assert!(r.contains_point(0, 0));
        assert!(!r.contains_point(32, 0));
        assert!(r.contains_rect(&Rect::new(16, 16, 16, 16)));
        assert!(!r.contains_rect(&Rect::new(16, 16, 17, 16)));
    }

    #[test]
    fn test_edges_near_i32_max() {
        let bounds = Rect::with_size(16, 16);
        let unbounded = Rect::new(10, 0, i32::MAX, 10);
        assert_eq!(unbounded.right(), 10 + i64::from(i32::MAX));
        assert_eq!(bounds.intersect(&unbounded), Rect::new(10, 0, 6, 10));
        assert!(unbounded.contains_rect(&Rect::new(i32::MAX - 1, 0, 1, 1)));
        assert!(unbounded.contains_point(i32::MAX, 9));

        let far = Rect::new(i32::MAX - 4, i32::MIN, 8, 8);
        assert!(bounds.intersect(&far).is_empty());
        assert!(!bounds.contains_rect(&far));
    }
}
