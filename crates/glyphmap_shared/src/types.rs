//! Types and results that are shared between the glyphmap crates

use thiserror::Error;

/// Errors that are not owned by a specific crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("there was a problem: {0}")]
    Generic(String),
}

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<T: Copy> {
    pub width: T,
    pub height: T,
}

impl<T: Copy> Size<T> {
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl Size<u32> {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Number of cells covered by this size
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point<i64> {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Adds both coordinates, clamping at the bounds of `i64`
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_add() {
        let p = Point::new(3i64, -2).saturating_add(Point::new(1, 5));
        assert_eq!(p, Point::new(4, 3));
        assert_eq!(Point::ZERO.saturating_add(p), p);

        let far = Point::new(i64::MAX, i64::MIN).saturating_add(Point::new(10, -10));
        assert_eq!(far, Point::new(i64::MAX, i64::MIN));
    }

    #[test]
    fn size_area() {
        assert_eq!(Size::new(5u32, 7).area(), 35);
        assert_eq!(Size::<u32>::ZERO.area(), 0);
        assert_eq!(Size::new(u32::MAX, 2).area(), 2 * u32::MAX as usize);
    }
}
