//! Implements conversions between the geometry types and their `nalgebra`
//! equivalents.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Point3, Quaternion, UnitQuaternion, Vector3};

// Internal
use super::{Rotation, Vector};

// ---------------------------------------------------------------------------
// VECTOR
// ---------------------------------------------------------------------------

impl From<Vector> for Vector3<f64> {
    fn from(v: Vector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vector {
    fn from(v: Vector3<f64>) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for Point3<f64> {
    fn from(v: Vector) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl From<Point3<f64>> for Vector {
    fn from(p: Point3<f64>) -> Self {
        Vector::new(p.x, p.y, p.z)
    }
}

// ---------------------------------------------------------------------------
// ROTATION
// ---------------------------------------------------------------------------

impl From<Rotation> for Quaternion<f64> {
    fn from(r: Rotation) -> Self {
        Quaternion::new(r.w, r.x, r.y, r.z)
    }
}

impl From<Quaternion<f64>> for Rotation {
    fn from(q: Quaternion<f64>) -> Self {
        Rotation::from_quaternion(q.w, q.i, q.j, q.k)
    }
}

/// The rotation is normalized on the way in.
impl From<Rotation> for UnitQuaternion<f64> {
    fn from(r: Rotation) -> Self {
        UnitQuaternion::from_quaternion(r.into())
    }
}

impl From<UnitQuaternion<f64>> for Rotation {
    fn from(q: UnitQuaternion<f64>) -> Self {
        q.into_inner().into()
    }
}
