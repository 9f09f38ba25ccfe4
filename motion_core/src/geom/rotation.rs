//! Rotations represented as quaternions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops;

// Internal
use super::{
    CoordinateSystem, GeomError, Vector, EPSILON, EPSILON_DECIMALS, STRING_ROUND_DECIMALS_RADS,
    TO_DEGS, TO_RADS,
};
use util::maths::{clamp, round_dp};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A rotation stored as the quaternion `w + xi + yj + zk`.
///
/// The components are not constrained. Composition and extraction assume the
/// quaternion is (close to) unit length, so callers building rotations from
/// raw components should [`normalize`](Rotation::normalize) them first.
///
/// Equality is approximate, comparing each component within [`EPSILON`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Rotation {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Rotation {
    /// The orientation of the global XYZ coordinate system (identity).
    pub const GLOBAL_XY: Rotation = Rotation::from_quaternion(1.0, 0.0, 0.0, 0.0);

    /// The global XYZ coordinate system rotated 180 degrees around its X axis.
    pub const FLIPPED_AROUND_X: Rotation = Rotation::from_quaternion(0.0, 1.0, 0.0, 0.0);

    /// The global XYZ coordinate system rotated 180 degrees around its Y axis.
    ///
    /// The easiest orientation for a standard end effector to reach in the
    /// positive XY octants.
    pub const FLIPPED_AROUND_Y: Rotation = Rotation::from_quaternion(0.0, 0.0, 1.0, 0.0);

    /// The global XYZ coordinate system rotated 180 degrees around its Z axis.
    pub const FLIPPED_AROUND_Z: Rotation = Rotation::from_quaternion(0.0, 0.0, 0.0, 1.0);

    /// Create a rotation directly from its quaternion components.
    ///
    /// The components are used as given, no normalization is performed.
    pub const fn from_quaternion(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Create a unit quaternion rotating `ang_degs` around `axis`, following
    /// the right hand rule.
    ///
    /// The axis does not need to be unit length but must not be zero.
    pub fn from_axis_angle(axis: &Vector, ang_degs: f64) -> Self {
        let half_ang_rad = 0.5 * TO_RADS * ang_degs;
        let s = half_ang_rad.sin();
        let u = axis.normalized();

        Self {
            w: half_ang_rad.cos(),
            x: s * u.x,
            y: s * u.y,
            z: s * u.z,
        }
    }

    /// Create the rotation of the coordinate system defined by a main X vector
    /// and a guiding Y vector.
    ///
    /// See [`CoordinateSystem::new`] for how the vectors are interpreted.
    pub fn from_vectors(vec_x: &Vector, vec_y: &Vector) -> Result<Self, GeomError> {
        Ok(CoordinateSystem::new(vec_x, vec_y)?.quaternion())
    }

    /// Create the rotation which takes the global XYZ system onto `cs`.
    pub fn from_coordinate_system(cs: &CoordinateSystem) -> Self {
        cs.quaternion()
    }

    /// Set the quaternion components.
    pub fn set(&mut self, w: f64, x: f64, y: f64, z: f64) {
        self.w = w;
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Length (norm) of the quaternion.
    pub fn length(&self) -> f64 {
        self.sq_length().sqrt()
    }

    /// Squared length of the quaternion.
    pub fn sq_length(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Turn this quaternion into a versor (unit length quaternion).
    pub fn normalize(&mut self) {
        let len = self.length();
        debug_assert!(len > 0.0, "Cannot normalize a zero length quaternion");

        self.w /= len;
        self.x /= len;
        self.y /= len;
        self.z /= len;
    }

    /// Is this a unit length quaternion?
    pub fn is_unit(&self) -> bool {
        (self.sq_length() - 1.0).abs() < EPSILON
    }

    /// Is this a zero length quaternion?
    pub fn is_zero(&self) -> bool {
        self.sq_length() < EPSILON
    }

    /// Is this quaternion equal to another one within the given tolerance on
    /// each component?
    pub fn approx_eq(&self, other: &Rotation, tolerance: f64) -> bool {
        (self.w - other.w).abs() < tolerance
            && (self.x - other.x).abs() < tolerance
            && (self.y - other.y).abs() < tolerance
            && (self.z - other.z).abs() < tolerance
    }

    /// Hamilton product `r1 * r2`.
    ///
    /// Quaternion multiplication is not commutative.
    pub fn multiply(r1: &Rotation, r2: &Rotation) -> Rotation {
        Rotation {
            w: r1.w * r2.w - r1.x * r2.x - r1.y * r2.y - r1.z * r2.z,
            x: r1.x * r2.w + r1.w * r2.x + r1.y * r2.z - r1.z * r2.y,
            y: r1.y * r2.w + r1.w * r2.y + r1.z * r2.x - r1.x * r2.z,
            z: r1.z * r2.w + r1.w * r2.z + r1.x * r2.y - r1.y * r2.x,
        }
    }

    /// Post-multiply this quaternion, `self = self * r`.
    pub fn post_multiply(&mut self, r: &Rotation) {
        *self = Rotation::multiply(self, r);
    }

    /// Pre-multiply this quaternion, `self = r * self`.
    pub fn pre_multiply(&mut self, r: &Rotation) {
        *self = Rotation::multiply(r, self);
    }

    /// Rotate by `r` around the GLOBAL reference system.
    ///
    /// `self = r * self`
    pub fn rotate_global(&mut self, r: &Rotation) {
        self.pre_multiply(r);
    }

    /// Rotate by `r` around the LOCAL reference system, i.e. the frame
    /// described by this rotation.
    ///
    /// `self = self * r`
    pub fn rotate_local(&mut self, r: &Rotation) {
        self.post_multiply(r);
    }

    /// Divide this quaternion by `r`, i.e. post-multiply by the inverse of
    /// `r`.
    pub fn divide(&mut self, r: &Rotation) {
        self.post_multiply(&r.inverse());
    }

    /// Turn this quaternion into its conjugate.
    pub fn conjugate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// Return the conjugate of this quaternion.
    pub fn conjugated(&self) -> Rotation {
        Rotation::from_quaternion(self.w, -self.x, -self.y, -self.z)
    }

    /// Invert this quaternion.
    ///
    /// - A unit quaternion is inverted through its conjugate.
    /// - A zero length quaternion is left as it is.
    /// - Any other quaternion becomes its conjugate divided by its squared
    ///   norm.
    pub fn invert(&mut self) {
        if self.is_unit() {
            self.conjugate();
        } else if self.is_zero() {
            // Zero has no inverse, keep it to avoid dividing by zero
        } else {
            let sq_len = self.sq_length();

            self.w /= sq_len;
            self.x /= -sq_len;
            self.y /= -sq_len;
            self.z /= -sq_len;
        }
    }

    /// Return the inverse of this quaternion, see [`Rotation::invert`].
    pub fn inverse(&self) -> Rotation {
        let mut r = *self;
        r.invert();
        r
    }

    /// The coordinate system (3x3 rotation matrix) described by this rotation.
    ///
    /// Fails if the quaternion is too far from unit length to produce an
    /// orthonormal system.
    pub fn coordinate_system(&self) -> Result<CoordinateSystem, GeomError> {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;

        let xx2 = self.x * x2;
        let yx2 = self.y * x2;
        let yy2 = self.y * y2;
        let zx2 = self.z * x2;
        let zy2 = self.z * y2;
        let zz2 = self.z * z2;
        let wx2 = self.w * x2;
        let wy2 = self.w * y2;
        let wz2 = self.w * z2;

        // Each axis is a column of the rotation matrix
        CoordinateSystem::from_components(
            1.0 - yy2 - zz2, yx2 + wz2, zx2 - wy2,
            yx2 - wz2, 1.0 - xx2 - zz2, zy2 + wx2,
            zx2 + wy2, zy2 - wx2, 1.0 - xx2 - yy2,
        )
    }

    /// Rotation angle `2 acos(w)` in radians, before any zero gating.
    fn half_turns_rad(&self) -> f64 {
        2.0 * clamp(self.w, -1.0, 1.0).acos()
    }

    /// The rotation angle represented by this quaternion.
    ///
    /// Always positive, in the range `[0, 360]`. Angles below [`EPSILON`]
    /// radians are reported as exactly zero.
    ///
    /// Units: degrees
    pub fn rotation_angle(&self) -> f64 {
        let theta = self.half_turns_rad();

        if theta < EPSILON {
            0.0
        } else {
            round_dp(theta * TO_DEGS, EPSILON_DECIMALS)
        }
    }

    /// The rotation axis represented by this quaternion.
    ///
    /// The axis matches the positive angle returned by
    /// [`Rotation::rotation_angle`], so a quaternion built from a negative
    /// angle reports the flipped axis. When there is no rotation the zero
    /// vector is returned.
    pub fn rotation_axis(&self) -> Vector {
        let theta = self.half_turns_rad();

        if theta < EPSILON {
            return Vector::ZERO;
        }

        let s = (0.5 * theta).sin();

        // A full turn has no defined axis either
        if s.abs() < EPSILON {
            return Vector::ZERO;
        }

        Vector::new(self.x / s, self.y / s, self.z / s)
    }

    /// The rotation vector in axis-angle representation, the rotation axis
    /// scaled by the rotation angle.
    ///
    /// Units: radians if `radians` is set, otherwise degrees
    pub fn rotation_vector(&self, radians: bool) -> Vector {
        let mut axis_ang = self.rotation_axis() * self.rotation_angle();

        if radians {
            axis_ang.scale(TO_RADS);
        }

        axis_ang
    }

    /// Euler angles of this rotation in the Tait-Bryan Z-Y'-X'' convention
    /// (intrinsic ZYX).
    ///
    /// Each component stores the rotation about the matching axis, so the
    /// KUKA `ABC` triplet maps onto the returned vector's `ZYX`.
    ///
    /// Units: degrees
    pub fn to_euler_zyx(&self) -> Vector {
        let y2 = self.y * self.y;

        let t0 = 2.0 * (self.w * self.x + self.y * self.z);
        let t1 = 1.0 - 2.0 * (self.x * self.x + y2);

        // Overshoot near gimbal lock would make asin return NaN
        let t2 = clamp(2.0 * (self.w * self.y - self.z * self.x), -1.0, 1.0);

        let t3 = 2.0 * (self.w * self.z + self.x * self.y);
        let t4 = 1.0 - 2.0 * (y2 + self.z * self.z);

        Vector::new(
            t0.atan2(t1) * TO_DEGS,
            t2.asin() * TO_DEGS,
            t3.atan2(t4) * TO_DEGS,
        )
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::GLOBAL_XY
    }
}

impl PartialEq for Rotation {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPSILON)
    }
}

impl ops::Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_quaternion(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl ops::Sub for Rotation {
    type Output = Rotation;

    fn sub(self, rhs: Rotation) -> Rotation {
        Rotation::from_quaternion(
            self.w - rhs.w,
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
        )
    }
}

impl ops::AddAssign for Rotation {
    fn add_assign(&mut self, rhs: Rotation) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign for Rotation {
    fn sub_assign(&mut self, rhs: Rotation) {
        *self = *self - rhs;
    }
}

impl ops::Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation::multiply(&self, &rhs)
    }
}

impl ops::Div for Rotation {
    type Output = Rotation;

    fn div(self, rhs: Rotation) -> Rotation {
        Rotation::multiply(&self, &rhs.inverse())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{},{},{}]",
            round_dp(self.w, STRING_ROUND_DECIMALS_RADS),
            round_dp(self.x, STRING_ROUND_DECIMALS_RADS),
            round_dp(self.y, STRING_ROUND_DECIMALS_RADS),
            round_dp(self.z, STRING_ROUND_DECIMALS_RADS)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HALF_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_axis_angle() {
        let axis = Vector::new(1.0, 2.0, -0.5).normalized();

        for ang in [0.5, 10.0, 90.0, 179.0, 180.0, 270.0, 359.0].iter() {
            let r = Rotation::from_axis_angle(&axis, *ang);

            assert!(r.is_unit());
            assert!((r.rotation_angle() - ang).abs() < EPSILON);
            assert_eq!(r.rotation_axis(), axis);
        }

        // Axis does not need to be unit
        let r = Rotation::from_axis_angle(&Vector::new(0.0, 0.0, 10.0), 90.0);
        assert_eq!(r, Rotation::from_quaternion(HALF_SQRT_2, 0.0, 0.0, HALF_SQRT_2));
    }

    #[test]
    fn test_negative_angle() {
        let r = Rotation::from_axis_angle(&Vector::Z_AXIS, -90.0);

        assert!((r.rotation_angle() - 90.0).abs() < EPSILON);
        assert_eq!(r.rotation_axis(), -Vector::Z_AXIS);
    }

    #[test]
    fn test_zero_angle() {
        let r = Rotation::from_axis_angle(&Vector::X_AXIS, 0.0);

        assert_eq!(r.rotation_angle(), 0.0);
        assert_eq!(r.rotation_axis(), Vector::ZERO);
        assert_eq!(r.rotation_vector(false), Vector::ZERO);

        let r = Rotation::from_axis_angle(&Vector::X_AXIS, 1e-6);
        assert_eq!(r.rotation_angle(), 0.0);
        assert_eq!(r.rotation_axis(), Vector::ZERO);

        // w overshooting 1 must not produce NaN
        let r = Rotation::from_quaternion(1.0 + 1e-12, 0.0, 0.0, 0.0);
        assert_eq!(r.rotation_angle(), 0.0);
        assert_eq!(Rotation::default().rotation_axis(), Vector::ZERO);
    }

    #[test]
    fn test_rotation_vector() {
        let r = Rotation::from_axis_angle(&Vector::Y_AXIS, 90.0);

        assert!(r.rotation_vector(false).approx_eq(&Vector::new(0.0, 90.0, 0.0), 1e-9));
        assert!(r
            .rotation_vector(true)
            .approx_eq(&Vector::new(0.0, std::f64::consts::FRAC_PI_2, 0.0), 1e-9));
    }

    #[test]
    fn test_global_local_order() {
        let rx = Rotation::from_axis_angle(&Vector::X_AXIS, 90.0);
        let ry = Rotation::from_axis_angle(&Vector::Y_AXIS, 90.0);

        let mut global = Rotation::default();
        global.rotate_global(&rx);
        global.rotate_global(&ry);

        let mut local = Rotation::default();
        local.rotate_local(&rx);
        local.rotate_local(&ry);

        assert_ne!(global, local);

        // global = ry * rx, local = rx * ry
        assert_eq!(global, ry * rx);
        assert_eq!(local, rx * ry);
        assert_eq!(global, Rotation::from_quaternion(0.5, 0.5, 0.5, -0.5));
        assert_eq!(local, Rotation::from_quaternion(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_global_local_same_axis() {
        // Rotations about the same axis commute
        let r1 = Rotation::from_axis_angle(&Vector::Z_AXIS, 30.0);
        let r2 = Rotation::from_axis_angle(&Vector::Z_AXIS, 45.0);

        let mut global = r1;
        global.rotate_global(&r2);
        let mut local = r1;
        local.rotate_local(&r2);

        assert_eq!(global, local);
        assert!((global.rotation_angle() - 75.0).abs() < EPSILON);
    }

    #[test]
    fn test_unit_inverse() {
        let r = Rotation::from_axis_angle(&Vector::new(0.3, -1.0, 2.0), 123.0);

        assert_eq!(r.inverse(), r.conjugated());
        assert_eq!(r * r.inverse(), Rotation::GLOBAL_XY);
        assert_eq!(r.inverse() * r, Rotation::GLOBAL_XY);
        assert_eq!(r / r, Rotation::GLOBAL_XY);

        let mut d = r;
        d.divide(&r);
        assert_eq!(d, Rotation::GLOBAL_XY);
    }

    #[test]
    fn test_general_inverse() {
        let q = Rotation::from_quaternion(2.0, 0.0, 0.0, 0.0);
        assert_eq!(q.inverse(), Rotation::from_quaternion(0.5, 0.0, 0.0, 0.0));

        let q = Rotation::from_quaternion(1.0, 2.0, -1.0, 0.5);
        assert_eq!(q * q.inverse(), Rotation::GLOBAL_XY);
    }

    #[test]
    fn test_is_zero() {
        let zero = Rotation::from_quaternion(0.0, 0.0, 0.0, 0.0);

        assert!(zero.is_zero());
        assert!(Rotation::from_quaternion(0.0, 1e-4, 0.0, 0.0).is_zero());
        assert!(!Rotation::GLOBAL_XY.is_zero());
        assert!(!Rotation::from_quaternion(0.5, 0.0, 0.0, 0.0).is_zero());

        // The inverse of zero is zero, not NaN
        let inv = zero.inverse();
        assert_eq!(inv, zero);
        assert!(!inv.w.is_nan());
    }

    #[test]
    fn test_normalize() {
        let mut q = Rotation::from_quaternion(2.0, 0.0, 0.0, 2.0);
        assert!(!q.is_unit());

        q.normalize();
        assert!(q.is_unit());
        assert_eq!(q, Rotation::from_quaternion(HALF_SQRT_2, 0.0, 0.0, HALF_SQRT_2));
    }

    #[test]
    fn test_component_ops() {
        let mut a = Rotation::from_quaternion(1.0, 2.0, 3.0, 4.0);
        let b = Rotation::from_quaternion(0.5, 0.5, 0.5, 0.5);

        assert_eq!(a + b, Rotation::from_quaternion(1.5, 2.5, 3.5, 4.5));
        assert_eq!(a - b, Rotation::from_quaternion(0.5, 1.5, 2.5, 3.5));

        a += b;
        a -= b;
        assert_eq!(a, Rotation::from_quaternion(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_coordinate_system() {
        let cs = Rotation::FLIPPED_AROUND_Y.coordinate_system().unwrap();

        assert_eq!(cs.x_axis, -Vector::X_AXIS);
        assert_eq!(cs.y_axis, Vector::Y_AXIS);
        assert_eq!(cs.z_axis, -Vector::Z_AXIS);

        let cs = Rotation::from_axis_angle(&Vector::Z_AXIS, 90.0)
            .coordinate_system()
            .unwrap();
        assert_eq!(cs.x_axis, Vector::Y_AXIS);
        assert_eq!(cs.y_axis, -Vector::X_AXIS);
        assert_eq!(cs.z_axis, Vector::Z_AXIS);

        // Far from unit length there is no valid coordinate system
        assert_eq!(
            Rotation::from_quaternion(2.0, 0.0, 1.0, 0.0).coordinate_system(),
            Err(GeomError::InvalidCoordinateSystem)
        );
    }

    #[test]
    fn test_euler_zyx() {
        let r = Rotation::from_axis_angle(&Vector::Z_AXIS, 30.0);
        assert!(r.to_euler_zyx().approx_eq(&Vector::new(0.0, 0.0, 30.0), 1e-9));

        let r = Rotation::from_axis_angle(&Vector::X_AXIS, -45.0);
        assert!(r.to_euler_zyx().approx_eq(&Vector::new(-45.0, 0.0, 0.0), 1e-9));

        // Intrinsic ZYX: yaw then pitch about the new Y
        let mut r = Rotation::from_axis_angle(&Vector::Z_AXIS, 40.0);
        r.rotate_local(&Rotation::from_axis_angle(&Vector::Y_AXIS, 20.0));
        assert!(r.to_euler_zyx().approx_eq(&Vector::new(0.0, 20.0, 40.0), 1e-9));

        // Gimbal lock must be clamped rather than NaN
        let e = Rotation::from_axis_angle(&Vector::Y_AXIS, 90.0).to_euler_zyx();
        assert!(!e.y.is_nan());
        assert!((e.y - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rotation::GLOBAL_XY.to_string(), "[1,0,0,0]");
        assert_eq!(
            Rotation::from_axis_angle(&Vector::Z_AXIS, 90.0).to_string(),
            "[0.707107,0,0,0.707107]"
        );
    }
}
