//! # Geometry
//!
//! Value types describing positions, orientations and joint configurations of
//! the manipulator, and the conversions between them.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod convert;
mod coord_sys;
mod joints;
mod rotation;
mod vector;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use coord_sys::*;
pub use joints::*;
pub use rotation::*;
pub use vector::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Precision for floating-point comparisons.
pub const EPSILON: f64 = 0.000001;

/// A more permissive precision, used when comparing values which went through
/// several conversions.
pub const EPSILON2: f64 = 0.001;

/// Number of decimals kept when reporting rotation angles.
pub const EPSILON_DECIMALS: i32 = 10;

/// Number of decimals used when printing distances.
///
/// Units: millimeters
pub const STRING_ROUND_DECIMALS_MM: i32 = 3;

/// Number of decimals used when printing angles.
///
/// Units: degrees
pub const STRING_ROUND_DECIMALS_DEGS: i32 = 3;

/// Number of decimals used when printing quaternion components.
pub const STRING_ROUND_DECIMALS_RADS: i32 = 6;

/// Multiply by this to convert radians into degrees.
pub const TO_DEGS: f64 = 180.0 / std::f64::consts::PI;

/// Multiply by this to convert degrees into radians.
pub const TO_RADS: f64 = std::f64::consts::PI / 180.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while building geometry.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeomError {
    #[error("Cannot create a CoordinateSystem with two parallel vectors")]
    ParallelVectors,

    #[error("The given axes do not form an orthonormal right-handed coordinate system")]
    InvalidCoordinateSystem,

    #[error("Joint index {0} is out of range, expected 0 to 5")]
    JointIndexOutOfRange(usize),
}
