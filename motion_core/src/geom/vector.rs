//! Three dimensional vector

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops;

// Internal
use super::{EPSILON, STRING_ROUND_DECIMALS_MM, TO_DEGS};
use util::maths::{clamp, round_dp};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A vector in 3D euclidean space.
///
/// Used both for positions and for directions. Units are millimeters when
/// describing positions.
///
/// Equality is approximate: two vectors are equal if each of their components
/// differ by less than [`EPSILON`].
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);

    /// Unit vector along the global X axis.
    pub const X_AXIS: Vector = Vector::new(1.0, 0.0, 0.0);

    /// Unit vector along the global Y axis.
    pub const Y_AXIS: Vector = Vector::new(0.0, 1.0, 0.0);

    /// Unit vector along the global Z axis.
    pub const Z_AXIS: Vector = Vector::new(0.0, 0.0, 1.0);

    /// Create a new vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Set the components of this vector.
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f64 {
        self.sq_length().sqrt()
    }

    /// Squared length of the vector.
    pub fn sq_length(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scale this vector to unit length.
    ///
    /// # Preconditions
    ///
    /// The vector must not be zero length. Normalizing a zero vector is a bug
    /// in the caller: debug builds panic, release builds produce non-finite
    /// components.
    pub fn normalize(&mut self) {
        let len = self.length();
        debug_assert!(len > 0.0, "Cannot normalize a zero length vector");

        self.x /= len;
        self.y /= len;
        self.z /= len;
    }

    /// Return a unit length copy of this vector.
    ///
    /// Has the same preconditions as [`Vector::normalize`].
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Multiply all components by the given factor.
    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
        self.z *= factor;
    }

    /// Is this a unit length vector?
    pub fn is_unit(&self) -> bool {
        (self.sq_length() - 1.0).abs() < EPSILON
    }

    /// Is this vector equal to another one within the given tolerance on each
    /// component?
    pub fn approx_eq(&self, other: &Vector, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }

    /// Right-handed cross product `a x b`.
    pub fn cross_product(a: &Vector, b: &Vector) -> Vector {
        Vector::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }

    /// Dot product `a . b`.
    pub fn dot_product(a: &Vector, b: &Vector) -> f64 {
        a.x * b.x + a.y * b.y + a.z * b.z
    }

    /// Distance between two points.
    pub fn distance(a: &Vector, b: &Vector) -> f64 {
        Vector::sq_distance(a, b).sqrt()
    }

    /// Squared distance between two points.
    pub fn sq_distance(a: &Vector, b: &Vector) -> f64 {
        (*b - *a).sq_length()
    }

    /// Unsigned angle between two vectors.
    ///
    /// Units: degrees
    pub fn angle_between(a: &Vector, b: &Vector) -> f64 {
        let cos = Vector::dot_product(a, b) / (a.length() * b.length());

        // Round-off can push the cosine of (anti)parallel vectors past 1
        clamp(cos, -1.0, 1.0).acos() * TO_DEGS
    }

    /// Are the two vectors parallel (or anti-parallel)?
    ///
    /// The test only depends on the angle between the vectors, not on their
    /// length. A zero length vector has no direction and is considered
    /// parallel to everything.
    pub fn are_parallel(a: &Vector, b: &Vector) -> bool {
        let sq_len_prod = a.sq_length() * b.sq_length();
        if sq_len_prod == 0.0 {
            return true;
        }

        // |a x b| = |a||b|sin(theta)
        Vector::cross_product(a, b).sq_length() / sq_len_prod < EPSILON * EPSILON
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPSILON)
    }
}

impl ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl ops::SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl ops::Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{},{}]",
            round_dp(self.x, STRING_ROUND_DECIMALS_MM),
            round_dp(self.y, STRING_ROUND_DECIMALS_MM),
            round_dp(self.z, STRING_ROUND_DECIMALS_MM)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_products() {
        let x = Vector::X_AXIS;
        let y = Vector::Y_AXIS;

        assert_eq!(Vector::cross_product(&x, &y), Vector::Z_AXIS);
        assert_eq!(Vector::cross_product(&y, &x), -Vector::Z_AXIS);
        assert_eq!(Vector::dot_product(&x, &y), 0.0);
        assert_eq!(
            Vector::dot_product(&Vector::new(1.0, 2.0, 3.0), &Vector::new(4.0, -5.0, 6.0)),
            12.0
        );
    }

    #[test]
    fn test_in_place() {
        let mut v = Vector::new(3.0, 0.0, 4.0);
        assert_eq!(v.length(), 5.0);

        v.normalize();
        assert_eq!(v, Vector::new(0.6, 0.0, 0.8));
        assert!(v.is_unit());

        v.scale(10.0);
        v += Vector::new(1.0, 1.0, 1.0);
        assert_eq!(v, Vector::new(7.0, 1.0, 9.0));

        v -= Vector::new(7.0, 1.0, 9.0);
        assert_eq!(v, Vector::ZERO);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_normalize_zero() {
        let mut v = Vector::ZERO;
        v.normalize();
    }

    #[test]
    fn test_distance() {
        let a = Vector::new(1.0, 1.0, 1.0);
        let b = Vector::new(4.0, 5.0, 1.0);

        assert_eq!(Vector::sq_distance(&a, &b), 25.0);
        assert_eq!(Vector::distance(&a, &b), 5.0);
        assert!((Vector::angle_between(&Vector::X_AXIS, &Vector::Y_AXIS) - 90.0).abs() < EPSILON);
        assert!(Vector::angle_between(&a, &(a * 2.0)).abs() < EPSILON);
    }

    #[test]
    fn test_parallel() {
        let a = Vector::new(1.0, 2.0, 3.0);

        assert!(Vector::are_parallel(&a, &(a * 3.5)));
        assert!(Vector::are_parallel(&a, &-a));
        assert!(Vector::are_parallel(&a, &Vector::ZERO));
        assert!(!Vector::are_parallel(&a, &Vector::new(1.0, 2.0, 3.1)));
        assert!(!Vector::are_parallel(&Vector::X_AXIS, &Vector::Y_AXIS));

        // Short vectors are judged on their angle only
        let short_x = Vector::new(0.03, 0.0, 0.0);
        assert!(!Vector::are_parallel(&short_x, &Vector::new(0.0, 0.03, 0.0)));
        assert!(!Vector::are_parallel(&short_x, &Vector::new(1e-4, 1e-4, 0.0)));
        assert!(Vector::are_parallel(&short_x, &Vector::new(-1e-4, 0.0, 0.0)));
        assert!(Vector::are_parallel(&Vector::ZERO, &Vector::ZERO));
    }

    #[test]
    fn test_approx_eq() {
        let a = Vector::new(1.0, 2.0, 3.0);

        assert_eq!(a, Vector::new(1.0000001, 2.0, 3.0));
        assert_ne!(a, Vector::new(1.00001, 2.0, 3.0));
        assert!(a.approx_eq(&Vector::new(1.0001, 2.0, 3.0), 0.001));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new(1.0, -2.5, 0.0).to_string(), "[1,-2.5,0]");
        assert_eq!(Vector::new(0.12345, 100.0, -0.00001).to_string(), "[0.123,100,0]");
    }
}
