use std::ops::Add;

/// A 2-D integer offset in pixels. Used both as a position inside the
/// destination and as a sampling origin inside a source image.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.offset(rhs.x, rhs.y)
    }
}

impl From<[i32; 2]> for Point {
    fn from(value: [i32; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

/// An axis-aligned rectangle with origin in the top left corner.
/// `min` is inclusive, `max` is exclusive. A rectangle with
/// `min.x >= max.x` or `min.y >= max.y` is empty.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Get the width of the rectangle. Inverted extents count as 0.
    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    /// Get the height of the rectangle. Inverted extents count as 0.
    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn intersect(&self, other: Self) -> Self {
        Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        }
    }

}

impl From<[i32; 4]> for Rect {
    fn from(value: [i32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_extents_clamp_to_zero() {
        let r = Rect::new(10, 10, 4, 2);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 0);
        assert!(r.is_empty());
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = Rect::new(-5, -5, 20, 20);
        let b = Rect::new(0, 0, 16, 8);
        assert_eq!(a.intersect(b), Rect::new(0, 0, 16, 8));
        assert!(Rect::new(0, 0, 4, 4).intersect(Rect::new(8, 8, 12, 12)).is_empty());
    }
}
