//! # Actions
//!
//! Actions are high level, device independent operations such as moves,
//! rotations, joint manipulations or changes to the motion settings, given
//! either relative to the current state of the robot or in absolute terms.
//! Turning them into robot instructions is left to the program compiler,
//! which reads them in id order.
//!
//! Every action gets a unique id when it is built, and its payload cannot be
//! changed afterwards.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod id;
mod program;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

// Internal
use crate::geom::{Joints, Rotation, Vector};

pub use id::*;
pub use program::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single command issued to the robot.
///
/// Deserialized actions keep the id they were serialized with, they are not
/// renumbered by any [`IdAllocator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    id: u64,
    kind: ActionKind,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The operation performed by an action, and its parameters.
///
/// Relative actions apply on top of the current state of the robot, absolute
/// ones replace it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Change the TCP speed.
    ///
    /// Units: mm/s
    Speed { speed: i32, relative: bool },

    /// Change the approach zone radius.
    ///
    /// Units: millimeters
    Zone { zone: i32, relative: bool },

    /// Switch between linear and joint interpolation.
    Motion(MotionType),

    /// Switch the coordinate system relative moves are expressed in.
    Coordinates(ReferenceCs),

    /// Move the TCP by, or to, a position.
    ///
    /// Units: millimeters
    Translation { translation: Vector, relative: bool },

    /// Rotate the tool by, or to, an orientation.
    Rotation { rotation: Rotation, relative: bool },

    /// Combined translation and rotation.
    ///
    /// For relative transformations `translation_first` selects the order in
    /// which both are applied. Absolute ones always translate first, the flag
    /// is set when the action is built.
    Transformation {
        translation: Vector,
        rotation: Rotation,
        relative: bool,
        translation_first: bool,
    },

    /// Rotate the axes by, or to, a joint configuration.
    Joints { joints: Joints, relative: bool },

    /// Pause the program.
    ///
    /// Units: milliseconds
    Wait { millis: u64 },

    /// Display a message on the robot's controller.
    Message(String),

    /// Push the current settings onto the settings stack, or pop them back.
    PushPop { push: bool },

    /// Non-functional annotation written into the compiled program.
    Comment(String),
}

/// The type of an action, with stable numbering shared with the program
/// compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionType {
    Translation = 1,
    Rotation = 2,
    Transformation = 3,
    Joints = 4,
    Message = 5,
    Wait = 6,
    Speed = 7,
    Zone = 8,
    Motion = 9,
    Coordinates = 10,
    PushPop = 11,
    Comment = 12,
}

/// How the robot interpolates between two targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionType {
    /// Straight line motion of the TCP.
    Linear,

    /// Interpolation in joint space.
    Joint,
}

/// The coordinate system relative actions are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceCs {
    /// The robot's base coordinate system.
    World,

    /// The tool's own coordinate system.
    Local,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Action {
    /// Build an action with an id taken from the global allocator.
    pub fn new(kind: ActionKind) -> Self {
        Self::with_allocator(IdAllocator::global(), kind)
    }

    /// Build an action with an id taken from the given allocator.
    pub fn with_allocator(ids: &IdAllocator, mut kind: ActionKind) -> Self {
        if let ActionKind::Transformation {
            relative: false,
            translation_first,
            ..
        } = &mut kind
        {
            *translation_first = true;
        }

        let action = Self {
            id: ids.next_id(),
            kind,
        };

        trace!("Action {}: {}", action.id, action.kind);

        action
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }

    /// Is this action applied on top of the robot's current state?
    ///
    /// Actions which do not have a relative form return `false`.
    pub fn is_relative(&self) -> bool {
        self.kind.is_relative()
    }
}

impl ActionKind {
    /// The type tag of this action.
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionKind::Speed { .. } => ActionType::Speed,
            ActionKind::Zone { .. } => ActionType::Zone,
            ActionKind::Motion(_) => ActionType::Motion,
            ActionKind::Coordinates(_) => ActionType::Coordinates,
            ActionKind::Translation { .. } => ActionType::Translation,
            ActionKind::Rotation { .. } => ActionType::Rotation,
            ActionKind::Transformation { .. } => ActionType::Transformation,
            ActionKind::Joints { .. } => ActionType::Joints,
            ActionKind::Wait { .. } => ActionType::Wait,
            ActionKind::Message(_) => ActionType::Message,
            ActionKind::PushPop { .. } => ActionType::PushPop,
            ActionKind::Comment(_) => ActionType::Comment,
        }
    }

    pub fn is_relative(&self) -> bool {
        match self {
            ActionKind::Speed { relative, .. }
            | ActionKind::Zone { relative, .. }
            | ActionKind::Translation { relative, .. }
            | ActionKind::Rotation { relative, .. }
            | ActionKind::Transformation { relative, .. }
            | ActionKind::Joints { relative, .. } => *relative,
            _ => false,
        }
    }
}

impl From<&ActionKind> for ActionType {
    fn from(kind: &ActionKind) -> Self {
        kind.action_type()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Speed { speed, relative } => {
                if *relative {
                    write!(f, "Increase speed by {} mm/s", speed)
                } else {
                    write!(f, "Set speed to {} mm/s", speed)
                }
            }
            ActionKind::Zone { zone, relative } => {
                if *relative {
                    write!(f, "Increase zone by {} mm", zone)
                } else {
                    write!(f, "Set zone to {} mm", zone)
                }
            }
            ActionKind::Motion(m) => write!(f, "Set motion type to '{}'", m),
            ActionKind::Coordinates(c) => {
                write!(f, "Set reference coordinate system to '{}'", c)
            }
            ActionKind::Translation {
                translation,
                relative,
            } => {
                if *relative {
                    write!(f, "Move {} mm", translation)
                } else {
                    write!(f, "Move to {} mm", translation)
                }
            }
            ActionKind::Rotation { rotation, relative } => {
                if *relative {
                    write!(
                        f,
                        "Rotate {}° around {}",
                        rotation.rotation_angle(),
                        rotation.rotation_axis()
                    )
                } else {
                    write!(f, "Rotate to {}", OrientationDesc(rotation))
                }
            }
            ActionKind::Transformation {
                translation,
                rotation,
                relative,
                translation_first,
            } => match (*relative, *translation_first) {
                (true, true) => write!(
                    f,
                    "Transform: move {} mm and rotate {}° around {}",
                    translation,
                    rotation.rotation_angle(),
                    rotation.rotation_axis()
                ),
                (true, false) => write!(
                    f,
                    "Transform: rotate {}° around {} and move {} mm",
                    rotation.rotation_angle(),
                    rotation.rotation_axis(),
                    translation
                ),
                (false, _) => write!(
                    f,
                    "Transform: move to {} mm and rotate to {}",
                    translation,
                    OrientationDesc(rotation)
                ),
            },
            ActionKind::Joints { joints, relative } => {
                if *relative {
                    write!(f, "Increase joint rotations by {}°", joints)
                } else {
                    write!(f, "Set joint rotations to {}°", joints)
                }
            }
            ActionKind::Wait { millis } => write!(f, "Wait {} ms", millis),
            ActionKind::Message(m) => write!(f, "Display message \"{}\"", m),
            ActionKind::PushPop { push } => {
                if *push {
                    write!(f, "Push settings to buffer")
                } else {
                    write!(f, "Pop settings")
                }
            }
            ActionKind::Comment(c) => write!(f, "Comment: \"{}\"", c),
        }
    }
}

impl fmt::Display for MotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionType::Linear => write!(f, "Linear"),
            MotionType::Joint => write!(f, "Joint"),
        }
    }
}

impl fmt::Display for ReferenceCs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceCs::World => write!(f, "World"),
            ReferenceCs::Local => write!(f, "Local"),
        }
    }
}

/// Formats an absolute orientation as its coordinate system, or as the raw
/// quaternion when it does not describe a valid one.
struct OrientationDesc<'a>(&'a Rotation);

impl fmt::Display for OrientationDesc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.coordinate_system() {
            Ok(cs) => write!(f, "{}", cs),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}
