//! # Frames
//!
//! A frame is a target pose for the tool center point: a position and an
//! orientation, along with the speed and zone used to approach it.
//!
//! Frames built without explicit tuning take theirs from the process-wide
//! [`FrameDefaults`], which are only read at construction time.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Internal
use crate::geom::{Rotation, Vector};
use util::maths::lin_map;

pub use params::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Rotational speed written in speed declarations.
///
/// Units: degrees/second
pub const SPEED_DECL_ROT_DEGS: u32 = 5000;

/// External axis speed written in speed declarations.
///
/// Units: mm/s
pub const SPEED_DECL_EXT_MMS: u32 = 1000;

/// Configuration declaration. No inverse kinematics is performed so the axis
/// configuration is always the default one.
pub const CONFIGURATION_DECL: &str = "[0,0,0,0]";

/// External axes declaration, with all six external axes unused.
pub const EXTERNAL_AXES_DECL: &str = "[9E9,9E9,9E9,9E9,9E9,9E9]";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A target pose and the motion tuning used to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Position of the tool center point.
    ///
    /// Units: millimeters
    pub position: Vector,

    /// Orientation of the tool.
    pub orientation: Rotation,

    /// Units: mm/s
    pub speed: f64,

    /// Approach radius around the target.
    ///
    /// Units: millimeters
    pub zone: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A cartesian axis of a frame's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Errors which can occur while manipulating frames.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameError {
    #[error("Invalid axis \"{0}\", expected one of 'x', 'y' or 'z'")]
    InvalidAxis(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Frame {
    /// Create a frame at `position` using the current default orientation,
    /// speed and zone.
    pub fn new(position: Vector) -> Self {
        Self::with_defaults(position, &frame_defaults())
    }

    /// Create a frame with the given pose, using the current default speed
    /// and zone.
    pub fn with_orientation(position: Vector, orientation: Rotation) -> Self {
        let defaults = frame_defaults();

        Self {
            position,
            orientation,
            speed: defaults.speed,
            zone: defaults.zone,
        }
    }

    /// Create a fully specified frame.
    pub fn with_tuning(position: Vector, orientation: Rotation, speed: f64, zone: f64) -> Self {
        Self {
            position,
            orientation,
            speed,
            zone,
        }
    }

    /// Create a frame at `position` taking everything else from `defaults`.
    pub fn with_defaults(position: Vector, defaults: &FrameDefaults) -> Self {
        Self {
            position,
            orientation: defaults.orientation,
            speed: defaults.speed,
            zone: defaults.zone,
        }
    }

    /// Distance between the positions of two frames.
    ///
    /// Units: millimeters
    pub fn distance_between(a: &Frame, b: &Frame) -> f64 {
        Vector::distance(&a.position, &b.position)
    }

    // ---- DECLARATIONS ----

    /// Position as `[x,y,z]`.
    pub fn position_declaration(&self) -> String {
        format!(
            "[{},{},{}]",
            self.position.x, self.position.y, self.position.z
        )
    }

    /// Orientation quaternion as `[w,x,y,z]`.
    pub fn orientation_declaration(&self) -> String {
        format!(
            "[{},{},{},{}]",
            self.orientation.w, self.orientation.x, self.orientation.y, self.orientation.z
        )
    }

    /// Axis configuration, always `[0,0,0,0]` as no inverse kinematics is
    /// computed.
    pub fn configuration_declaration(&self) -> String {
        String::from(CONFIGURATION_DECL)
    }

    /// External axes, all unused.
    pub fn external_axes_declaration(&self) -> String {
        String::from(EXTERNAL_AXES_DECL)
    }

    /// Speed data as `[tcp,tcp,rot,ext]`, the reorientation speed of the tool
    /// matching its linear speed.
    pub fn speed_declaration(&self) -> String {
        format!(
            "[{},{},{},{}]",
            self.speed, self.speed, SPEED_DECL_ROT_DEGS, SPEED_DECL_EXT_MMS
        )
    }

    /// Zone data with the path, orientation and external axis zones scaled
    /// from the frame's zone.
    pub fn zone_declaration(&self) -> String {
        let high = 1.5 * self.zone;
        let low = 0.15 * self.zone;

        format!(
            "[FALSE,{},{},{},{},{},{}]",
            self.zone, high, high, low, high, low
        )
    }

    /// Full target declaration as `[position,orientation,configuration,external_axes]`.
    pub fn robtarget_declaration(&self) -> String {
        format!(
            "[{},{},{},{}]",
            self.position_declaration(),
            self.orientation_declaration(),
            self.configuration_declaration(),
            self.external_axes_declaration()
        )
    }

    // ---- POSITION MANIPULATION ----

    /// Swap the X and Y coordinates.
    pub fn flip_xy(&mut self) {
        std::mem::swap(&mut self.position.x, &mut self.position.y);
    }

    /// Swap the Y and Z coordinates.
    pub fn flip_yz(&mut self) {
        std::mem::swap(&mut self.position.y, &mut self.position.z);
    }

    /// Swap the X and Z coordinates.
    pub fn flip_xz(&mut self) {
        std::mem::swap(&mut self.position.x, &mut self.position.z);
    }

    pub fn reverse_x(&mut self) {
        self.position.x = -self.position.x;
    }

    pub fn reverse_y(&mut self) {
        self.position.y = -self.position.y;
    }

    pub fn reverse_z(&mut self) {
        self.position.z = -self.position.z;
    }

    /// Linearly map one coordinate of the position from the `prev` range onto
    /// the `new` range.
    ///
    /// # Preconditions
    ///
    /// The `prev` range must not be empty. Debug builds panic, release builds
    /// produce a non-finite coordinate.
    pub fn remap(&mut self, axis: Axis, prev: (f64, f64), new: (f64, f64)) {
        debug_assert!(prev.0 != prev.1, "Cannot remap from an empty range");

        let coord = match axis {
            Axis::X => &mut self.position.x,
            Axis::Y => &mut self.position.y,
            Axis::Z => &mut self.position.z,
        };

        *coord = lin_map(prev, new, *coord);
    }

    /// Linearly map one coordinate of the position, named by `axis` (`"x"`,
    /// `"y"` or `"z"`, any case), from `[prev_min, prev_max]` onto
    /// `[new_min, new_max]`.
    ///
    /// An unknown axis name leaves the frame untouched. Has the same
    /// preconditions as [`Frame::remap`].
    pub fn remap_axis(
        &mut self,
        axis: &str,
        prev_min: f64,
        prev_max: f64,
        new_min: f64,
        new_max: f64,
    ) -> Result<(), FrameError> {
        let axis = match axis.parse::<Axis>() {
            Ok(a) => a,
            Err(e) => {
                warn!("Frame not remapped: {}", e);
                return Err(e);
            }
        };

        self.remap(axis, (prev_min, prev_max), (new_min, new_max));

        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.position, self.orientation, self.speed, self.zone
        )
    }
}

impl FromStr for Axis {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(FrameError::InvalidAxis(String::from(s))),
        }
    }
}
