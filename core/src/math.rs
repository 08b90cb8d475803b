use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Tolerance used by every collinearity and range test.
pub const EPSILON: f64 = 1e-5;

/// Resolution of [`LatticeKey`], points closer than this collapse to the same key.
const KEY_RESOLUTION: f64 = 1e6;

/// Two-dimensional point, used both for grid-local vertices and model-space vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn approx_eq(self, other: Self) -> bool {
        approx(self.x, other.x) && approx(self.y, other.y)
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn key(self) -> LatticeKey {
        LatticeKey::from(self)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x.into(), y.into())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Hashable identity of a grid-local point, rounded to a fixed resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeKey(i64, i64);

impl From<Point> for LatticeKey {
    fn from(point: Point) -> Self {
        Self(
            (point.x * KEY_RESOLUTION).round() as i64,
            (point.y * KEY_RESOLUTION).round() as i64,
        )
    }
}

/// Axis aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub const fn point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points
            .into_iter()
            .map(Self::point)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        (self.min + self.max).scale(0.5)
    }

    /// The larger of width and height.
    pub fn span(&self) -> f64 {
        self.width().max(self.height())
    }
}

pub fn to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

pub fn inverse_angle(degrees: f64) -> f64 {
    wrap_angle(degrees + 180.0)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

pub const fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Returns the value as an integer when it sits on a whole number.
pub(crate) fn as_integral(value: f64) -> Option<i64> {
    let rounded = value.round();
    // outside this range `as` saturates
    if approx(value, rounded) && rounded.abs() < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_normalizes_into_range() {
        assert_eq!(wrap_angle(-90.0), 270.0);
        assert_eq!(wrap_angle(360.0), 0.0);
        assert_eq!(wrap_angle(725.0), 5.0);
        assert_eq!(inverse_angle(270.0), 90.0);
    }

    #[test]
    fn gcd_handles_zero() {
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(0, 4), 4);
        assert_eq!(gcd(12, 18), 6);
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = Bounds::from_points([
            Point::new(1.0, -2.0),
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Point::new(-3.0, -2.0));
        assert_eq!(bounds.max, Point::new(1.0, 4.0));
        assert_eq!(bounds.span(), 6.0);
        assert_eq!(bounds.center(), Point::new(-1.0, 1.0));
        assert_eq!(Bounds::from_points(core::iter::empty()), None);
    }

    #[test]
    fn keys_tolerate_float_noise() {
        let a = Point::new(0.1 + 0.2, 1.0);
        let b = Point::new(0.3, 1.0);
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
    }
}
