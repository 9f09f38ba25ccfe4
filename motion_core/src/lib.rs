//! # Motion library.
//!
//! Device-independent description of manipulator motion: the geometry used to
//! express poses, the frames targeted by the robot, and the ordered actions
//! handed over to the program compiler.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Geometry - vectors, rotations, coordinate systems and joint configurations
pub mod geom;

/// Frames - target poses with their motion tuning
pub mod frame;

/// Actions - the commands issued to the robot, and the program which queues them
pub mod action;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use action::{Action, ActionKind, ActionType, IdAllocator, MotionType, Program, ReferenceCs};
pub use frame::{Frame, FrameDefaults, FrameError};
pub use geom::{CoordinateSystem, GeomError, Joints, Rotation, Vector};
