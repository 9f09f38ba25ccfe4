//! Orthonormal coordinate systems

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;

// Internal
use super::{GeomError, Rotation, Vector, EPSILON};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A coordinate system made of three orthogonal unit vectors following the
/// right hand rule.
///
/// Equivalent to a 3x3 rotation matrix whose columns are the axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub x_axis: Vector,
    pub y_axis: Vector,
    pub z_axis: Vector,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CoordinateSystem {
    /// Create the best fitting coordinate system for a main X vector and a
    /// guiding Y vector.
    ///
    /// The vectors do not need to be unit length or orthogonal: the X axis
    /// follows `vec_x`, the Z axis is normal to the plane of both vectors and
    /// the Y axis completes the right-handed system.
    ///
    /// Fails if the vectors are parallel, or either is zero length, as they
    /// do not define a plane.
    pub fn new(vec_x: &Vector, vec_y: &Vector) -> Result<Self, GeomError> {
        if Vector::are_parallel(vec_x, vec_y) {
            return Err(GeomError::ParallelVectors);
        }

        let x_axis = vec_x.normalized();
        let z_axis = Vector::cross_product(vec_x, vec_y).normalized();
        let y_axis = Vector::cross_product(&z_axis, &x_axis);

        Ok(Self {
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Create a coordinate system from the components of its three axes.
    ///
    /// Fails if the axes are not orthonormal and right-handed.
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        x0: f64,
        x1: f64,
        x2: f64,
        y0: f64,
        y1: f64,
        y2: f64,
        z0: f64,
        z1: f64,
        z2: f64,
    ) -> Result<Self, GeomError> {
        let cs = Self {
            x_axis: Vector::new(x0, x1, x2),
            y_axis: Vector::new(y0, y1, y2),
            z_axis: Vector::new(z0, z1, z2),
        };

        if cs.is_valid() {
            Ok(cs)
        } else {
            Err(GeomError::InvalidCoordinateSystem)
        }
    }

    /// Are the three axes unit vectors forming a right-handed orthonormal
    /// system?
    pub fn is_valid(&self) -> bool {
        self.x_axis.is_unit()
            && self.y_axis.is_unit()
            && self.z_axis.is_unit()
            && self.z_axis == Vector::cross_product(&self.x_axis, &self.y_axis)
    }

    /// The quaternion representation of this coordinate system.
    ///
    /// The magnitude of each component comes from the matrix diagonal and its
    /// sign from the matching off-diagonal difference, taking `w >= 0`.
    ///
    /// Close to a half turn `w` vanishes along with the differences, so the
    /// largest vector component is taken positive and the others are signed
    /// by the off-diagonal sums instead.
    pub fn quaternion(&self) -> Rotation {
        let (x, y, z) = (&self.x_axis, &self.y_axis, &self.z_axis);

        let w = 0.5 * (1.0 + x.x + y.y + z.z).max(0.0).sqrt();
        let qx = 0.5 * (1.0 + x.x - y.y - z.z).max(0.0).sqrt();
        let qy = 0.5 * (1.0 - x.x + y.y - z.z).max(0.0).sqrt();
        let qz = 0.5 * (1.0 - x.x - y.y + z.z).max(0.0).sqrt();

        if w > EPSILON {
            return Rotation::from_quaternion(
                w,
                qx * sign(y.z - z.y),
                qy * sign(z.x - x.z),
                qz * sign(x.y - y.x),
            );
        }

        let (w, qx, qy, qz) = if qx >= qy && qx >= qz {
            (
                w * sign(y.z - z.y),
                qx,
                qy * sign(x.y + y.x),
                qz * sign(z.x + x.z),
            )
        } else if qy >= qz {
            (
                w * sign(z.x - x.z),
                qx * sign(x.y + y.x),
                qy,
                qz * sign(y.z + z.y),
            )
        } else {
            (
                w * sign(x.y - y.x),
                qx * sign(z.x + x.z),
                qy * sign(y.z + z.y),
                qz,
            )
        };

        // q and -q are the same rotation, keep w >= 0
        if w < 0.0 {
            Rotation::from_quaternion(-w, -qx, -qy, -qz)
        } else {
            Rotation::from_quaternion(w, qx, qy, qz)
        }
    }
}

impl Default for CoordinateSystem {
    /// The global XYZ coordinate system.
    fn default() -> Self {
        Self {
            x_axis: Vector::X_AXIS,
            y_axis: Vector::Y_AXIS,
            z_axis: Vector::Z_AXIS,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x_axis, self.y_axis, self.z_axis)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Sign of an off-diagonal difference or sum, with zero counting as positive.
fn sign(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
