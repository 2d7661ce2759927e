//! 2D vector type, used both for points and free directions.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::primitives::{Box2, Line, Segment, Shape};
use crate::tolerance::{eq, eq_0};

/// A 2D vector with tolerance-aware equality.
///
/// Represents both positions (points) and free directions; which one is
/// meant follows from context, exactly as in the pairwise algorithms that
/// consume it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates the vector from point `a` to point `b`.
    #[inline]
    pub fn from_points(a: Vector, b: Vector) -> Self {
        Self {
            x: b.x - a.x,
            y: b.y - a.y,
        }
    }

    /// Returns `true` if both coordinates are equal up to the tolerance.
    #[inline]
    pub fn equal_to(&self, other: &Vector) -> bool {
        eq(self.x, other.x) && eq(self.y, other.y)
    }

    /// Computes the dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (z-component of the 3D cross product).
    ///
    /// Positive means `other` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the length of the vector.
    #[inline]
    pub fn len(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Angle of the vector in radians, normalized into `[0, 2π)`.
    pub fn slope(&self) -> f64 {
        let mut angle = self.y.atan2(self.x);
        if angle < 0.0 {
            angle += 2.0 * PI;
        }
        angle
    }

    /// Returns a unit vector in the same direction.
    ///
    /// A vector with length comparable to zero normalizes to the zero
    /// vector rather than an error.
    pub fn normalize(&self) -> Vector {
        let len = self.len();
        if eq_0(len) {
            Vector::zero()
        } else {
            Vector::new(self.x / len, self.y / len)
        }
    }

    /// Returns the vector rotated by `angle` radians around the origin.
    ///
    /// Positive angles rotate counter-clockwise.
    #[inline]
    pub fn rotate(&self, angle: f64) -> Vector {
        self.rotate_about(angle, Vector::zero())
    }

    /// Returns the vector rotated by `angle` radians around `center`.
    pub fn rotate_about(&self, angle: f64, center: Vector) -> Vector {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Vector::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    }

    /// Returns the vector rotated 90 degrees counter-clockwise.
    #[inline]
    pub fn rotate_90_ccw(&self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Returns the vector rotated 90 degrees clockwise.
    #[inline]
    pub fn rotate_90_cw(&self) -> Vector {
        Vector::new(self.y, -self.x)
    }

    /// Returns the inverted vector.
    #[inline]
    pub fn invert(&self) -> Vector {
        Vector::new(-self.x, -self.y)
    }

    /// Returns the point translated by `v`.
    #[inline]
    pub fn translate(&self, v: Vector) -> Vector {
        *self + v
    }

    /// Angle from this vector to `other`, measured counter-clockwise in
    /// `[0, 2π)`.
    pub fn angle_to(&self, other: &Vector) -> f64 {
        let norm1 = self.normalize();
        let norm2 = other.normalize();
        let mut angle = norm1.cross(&norm2).atan2(norm1.dot(&norm2));
        if angle < 0.0 {
            angle += 2.0 * PI;
        }
        angle
    }

    /// Returns the vector projection of this vector onto `other`.
    pub fn projection_on(&self, other: &Vector) -> Vector {
        let n = other.normalize();
        let d = self.dot(&n);
        n * d
    }

    /// Returns the nearest point on `line` to this point.
    pub fn projection_on_line(&self, line: &Line) -> Vector {
        if self.equal_to(&line.pt) {
            return *self;
        }
        let vec = Vector::from_points(line.pt, *self);
        if eq_0(vec.cross(&line.norm)) {
            // point lies on the normal ray through the anchor
            return line.pt;
        }
        let dist = vec.dot(&line.norm);
        self.translate((line.norm * dist).invert())
    }

    /// Returns `true` if this point lies strictly to the left of `line`,
    /// i.e. on the side its normal points to.
    pub fn left_to(&self, line: &Line) -> bool {
        let vec = Vector::from_points(line.pt, *self);
        vec.dot(&line.norm) > 0.0
    }

    /// Degenerate bounding box of this point.
    #[inline]
    pub fn box_of(&self) -> Box2 {
        Box2::new(self.x, self.y, self.x, self.y)
    }

    /// Distance to another point together with the witness segment.
    pub fn distance_to_point(&self, other: &Vector) -> (f64, Segment) {
        (
            Vector::from_points(*self, *other).len(),
            Segment::new(*self, *other),
        )
    }

    /// Distance to any shape, dispatching on its kind.
    pub fn distance_to(&self, shape: &Shape) -> (f64, Segment) {
        crate::algorithms::distance::distance(&Shape::Point(*self), shape)
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        Vector::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        self.invert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_dot_and_cross() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, 4.0);
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.cross(&b), -2.0);
        assert_eq!(b.cross(&a), 2.0);
    }

    #[test]
    fn test_len() {
        assert_eq!(Vector::new(3.0, 4.0).len(), 5.0);
    }

    #[test]
    fn test_slope() {
        assert_relative_eq!(Vector::new(1.0, 0.0).slope(), 0.0);
        assert_relative_eq!(Vector::new(0.0, 1.0).slope(), FRAC_PI_2);
        assert_relative_eq!(Vector::new(-1.0, 0.0).slope(), PI);
        assert_relative_eq!(Vector::new(0.0, -1.0).slope(), 3.0 * FRAC_PI_2);
    }

    #[test]
    fn test_normalize() {
        let n = Vector::new(3.0, 4.0).normalize();
        assert_relative_eq!(n.len(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(n.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let n = Vector::zero().normalize();
        assert_eq!(n, Vector::zero());
    }

    #[test]
    fn test_rotate() {
        let v = Vector::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_about_center() {
        let v = Vector::new(2.0, 1.0).rotate_about(PI, Vector::new(1.0, 1.0));
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_90() {
        let v = Vector::new(1.0, 0.0);
        assert!(v.rotate_90_ccw().equal_to(&Vector::new(0.0, 1.0)));
        assert!(v.rotate_90_cw().equal_to(&Vector::new(0.0, -1.0)));
    }

    #[test]
    fn test_angle_to() {
        let a = Vector::new(1.0, 0.0);
        let b = Vector::new(0.0, 1.0);
        assert_relative_eq!(a.angle_to(&b), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(b.angle_to(&a), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_on() {
        let a = Vector::new(3.0, 4.0);
        let x_axis = Vector::new(1.0, 0.0);
        let p = a.projection_on(&x_axis);
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_to_point() {
        let (dist, witness) = Vector::new(0.0, 0.0).distance_to_point(&Vector::new(3.0, 4.0));
        assert_eq!(dist, 5.0);
        assert!(witness.start.equal_to(&Vector::zero()));
        assert!(witness.end.equal_to(&Vector::new(3.0, 4.0)));
    }

    #[test]
    fn test_distance_to_shape() {
        use crate::primitives::Circle;
        let shape = Shape::Circle(Circle::new(Vector::new(3.0, 4.0), 2.0));
        let (dist, witness) = Vector::zero().distance_to(&shape);
        assert_relative_eq!(dist, 3.0, epsilon = 1e-12);
        assert!(witness.start.equal_to(&Vector::zero()));
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, 4.0);
        assert_eq!(a + b, Vector::new(4.0, 6.0));
        assert_eq!(b - a, Vector::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
    }
}
