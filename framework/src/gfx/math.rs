//! Geometry primitives shared by surfaces and input handling.
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A point in a floating-point coordinate space.
pub type Point = Point2D<f32>;

/// Types with a zero value.
pub trait Zero {
    const ZERO: Self;

    fn is_zero(&self) -> bool;
}

impl Zero for f32 {
    const ZERO: Self = 0.;

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Zero for i32 {
    const ZERO: Self = 0;

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Zero for u32 {
    const ZERO: Self = 0;

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

///////////////////////////////////////////////////////////////////////////
// Point2D
///////////////////////////////////////////////////////////////////////////

/// A 2D point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point2D<S = f32> {
    pub x: S,
    pub y: S,
}

impl<S> Point2D<S> {
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }

    pub fn map<F, T>(self, mut f: F) -> Point2D<T>
    where
        F: FnMut(S) -> T,
    {
        Point2D::new(f(self.x), f(self.y))
    }
}

impl Point2D<f32> {
    /// Snap the point to the pixel grid it falls into.
    ///
    /// ```
    /// use colorbook_framework::gfx::Point2D;
    ///
    /// assert_eq!(Point2D::new(3.9, -0.5).floor(), Point2D::new(3, -1));
    /// ```
    pub fn floor(self) -> Point2D<i32> {
        Point2D::new(self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl<T: Zero> Zero for Point2D<T> {
    const ZERO: Self = Point2D::new(T::ZERO, T::ZERO);

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl<S: fmt::Display> fmt::Display for Point2D<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl<T: Copy> From<[T; 2]> for Point2D<T> {
    fn from(p: [T; 2]) -> Self {
        Point2D::new(p[0], p[1])
    }
}

impl<T> From<(T, T)> for Point2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Point2D::new(x, y)
    }
}

impl<S: Add<Output = S>> Add<Vector2D<S>> for Point2D<S> {
    type Output = Self;

    fn add(self, other: Vector2D<S>) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl<S: Sub<Output = S>> Sub<Point2D<S>> for Point2D<S> {
    type Output = Vector2D<S>;

    fn sub(self, other: Point2D<S>) -> Vector2D<S> {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

///////////////////////////////////////////////////////////////////////////
// Vector2D
///////////////////////////////////////////////////////////////////////////

/// A 2D vector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Vector2D<S = f32> {
    pub x: S,
    pub y: S,
}

impl<S> Vector2D<S> {
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

impl<S: Mul<Output = S>> Mul<Vector2D<S>> for Vector2D<S> {
    type Output = Self;

    /// Component-wise product.
    fn mul(self, other: Vector2D<S>) -> Self {
        Vector2D::new(self.x * other.x, self.y * other.y)
    }
}

impl<S> From<Point2D<S>> for Vector2D<S> {
    fn from(p: Point2D<S>) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

impl<S> From<Vector2D<S>> for Point2D<S> {
    fn from(v: Vector2D<S>) -> Self {
        Point2D::new(v.x, v.y)
    }
}

///////////////////////////////////////////////////////////////////////////
// Size
///////////////////////////////////////////////////////////////////////////

/// Size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Size<T = f32> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub const fn new(w: T, h: T) -> Self {
        Self { w, h }
    }

    pub fn map<S>(self, f: impl Fn(T) -> S) -> Size<S> {
        Size::new(f(self.w), f(self.h))
    }
}

impl<T: Zero> Zero for Size<T> {
    const ZERO: Self = Size::new(T::ZERO, T::ZERO);

    fn is_zero(&self) -> bool {
        self.w.is_zero() && self.h.is_zero()
    }
}

impl<T: Div<Output = T>> Div<Size<T>> for Size<T> {
    type Output = Vector2D<T>;

    /// Per-axis ratio between two sizes.
    fn div(self, other: Size<T>) -> Vector2D<T> {
        Vector2D::new(self.w / other.w, self.h / other.h)
    }
}

impl<T: Copy> From<[T; 2]> for Size<T> {
    fn from(s: [T; 2]) -> Self {
        Size::new(s[0], s[1])
    }
}

impl From<Size<u32>> for Size<f32> {
    fn from(s: Size<u32>) -> Self {
        Size::new(s.w as f32, s.h as f32)
    }
}

impl<T: fmt::Display> fmt::Display for Size<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

///////////////////////////////////////////////////////////////////////////
// Rect
///////////////////////////////////////////////////////////////////////////

/// An axis-aligned rectangle, described by its top-left origin and its size.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect<T> {
    pub origin: Point2D<T>,
    pub size: Size<T>,
}

impl<T: Copy> Rect<T> {
    pub fn new(origin: impl Into<Point2D<T>>, size: impl Into<Size<T>>) -> Self {
        Self {
            origin: origin.into(),
            size: size.into(),
        }
    }

    pub fn width(&self) -> T {
        self.size.w
    }

    pub fn height(&self) -> T {
        self.size.h
    }

    pub fn min(&self) -> Point2D<T> {
        self.origin
    }
}

impl<T> Rect<T>
where
    T: Copy + PartialOrd + Add<Output = T>,
{
    pub fn max(&self) -> Point2D<T> {
        Point2D::new(self.origin.x + self.size.w, self.origin.y + self.size.h)
    }

    /// Whether the point lies inside the rectangle. The max edges are exclusive.
    pub fn contains(&self, point: impl Into<Point2D<T>>) -> bool {
        let p = point.into();
        let max = self.max();

        p.x >= self.origin.x && p.x < max.x && p.y >= self.origin.y && p.y < max.y
    }
}

impl<T: Zero + Copy> Rect<T> {
    /// A rectangle of the given size at the origin.
    pub fn origin(size: impl Into<Size<T>>) -> Self {
        Self::new(Point2D::ZERO, size)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new([2, 2], [3, 3]);

        assert!(r.contains([2, 2]));
        assert!(r.contains([4, 4]));
        assert!(!r.contains([5, 4]));
        assert!(!r.contains([1, 3]));
    }

    #[test]
    fn test_size_ratio() {
        let backing = Size::new(800., 600.);
        let display = Size::new(400., 300.);

        assert_eq!(backing / display, Vector2D::new(2., 2.));
    }
}
