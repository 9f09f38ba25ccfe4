//! Process-wide default tuning for frames

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;

// Internal
use crate::geom::Rotation;
use util::params::{self, LoadError};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// The defaults applied to frames constructed without explicit tuning.
static FRAME_DEFAULTS: RwLock<FrameDefaults> = RwLock::new(FrameDefaults::INITIAL);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tuning given to frames which are only built from a position.
///
/// Can be loaded from a parameter file, missing fields keep their initial
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDefaults {
    /// Tool orientation.
    pub orientation: Rotation,

    /// Units: mm/s
    pub speed: f64,

    /// Units: millimeters
    pub zone: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FrameDefaults {
    /// Defaults in effect until changed: the tool pointing down, flipped
    /// around Y, moving at 10 mm/s with a 5 mm zone.
    pub const INITIAL: FrameDefaults = FrameDefaults {
        orientation: Rotation::FLIPPED_AROUND_Y,
        speed: 10.0,
        zone: 5.0,
    };

    /// Load defaults from a TOML parameter file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        params::load(path)
    }
}

impl Default for FrameDefaults {
    fn default() -> Self {
        FrameDefaults::INITIAL
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get a copy of the current frame defaults.
pub fn frame_defaults() -> FrameDefaults {
    // The guarded value is plain data, so a poisoned lock is still usable
    match FRAME_DEFAULTS.read() {
        Ok(d) => *d,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Replace the frame defaults. Frames already constructed are not affected.
pub fn set_frame_defaults(defaults: FrameDefaults) {
    debug!(
        "Frame defaults set to orientation {}, speed {} mm/s, zone {} mm",
        defaults.orientation, defaults.speed, defaults.zone
    );

    match FRAME_DEFAULTS.write() {
        Ok(mut d) => *d = defaults,
        Err(poisoned) => *poisoned.into_inner() = defaults,
    }
}

/// Load the frame defaults from a TOML parameter file and apply them.
pub fn load_frame_defaults<P: AsRef<Path>>(path: P) -> Result<FrameDefaults, LoadError> {
    let defaults = FrameDefaults::load(path)?;
    set_frame_defaults(defaults);

    Ok(defaults)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame::Frame;
    use crate::geom::Vector;

    #[test]
    fn test_partial_params() {
        let d: FrameDefaults = params::from_toml_str("speed = 50.0").unwrap();

        assert_eq!(d.speed, 50.0);
        assert_eq!(d.zone, 5.0);
        assert_eq!(d.orientation, Rotation::FLIPPED_AROUND_Y);
    }

    #[test]
    fn test_load_params_file() {
        let d = FrameDefaults::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../params/frame_defaults.toml"
        ))
        .unwrap();

        assert_eq!(d, FrameDefaults::INITIAL);
        assert!(FrameDefaults::load("does_not_exist.toml").is_err());
    }

    /// All accesses to the global defaults are kept in this one test, as tests
    /// run in parallel.
    #[test]
    fn test_global_defaults() {
        assert_eq!(frame_defaults(), FrameDefaults::INITIAL);

        let f = Frame::new(Vector::new(1.0, 2.0, 3.0));
        assert_eq!(f.orientation, Rotation::FLIPPED_AROUND_Y);
        assert_eq!(f.speed, 10.0);
        assert_eq!(f.zone, 5.0);

        set_frame_defaults(FrameDefaults {
            orientation: Rotation::GLOBAL_XY,
            speed: 25.0,
            zone: 0.0,
        });

        // Existing frames keep their tuning
        assert_eq!(f.speed, 10.0);

        let g = Frame::new(Vector::ZERO);
        assert_eq!(g.orientation, Rotation::GLOBAL_XY);
        assert_eq!(g.speed, 25.0);
        assert_eq!(g.zone, 0.0);

        let h = Frame::with_orientation(Vector::ZERO, Rotation::FLIPPED_AROUND_X);
        assert_eq!(h.orientation, Rotation::FLIPPED_AROUND_X);
        assert_eq!(h.speed, 25.0);

        let d = load_frame_defaults(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../params/frame_defaults.toml"
        ))
        .unwrap();
        assert_eq!(d, FrameDefaults::INITIAL);
        assert_eq!(frame_defaults(), FrameDefaults::INITIAL);
    }
}
