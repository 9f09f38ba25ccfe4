//! Authoring context queueing actions for the program compiler

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{Action, ActionKind, IdAllocator, MotionType, ReferenceCs};
use crate::geom::{Joints, Rotation, Vector};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An ordered queue of actions, with its own id allocator.
///
/// Each authoring method builds one action, appends it to the queue and
/// returns its id. Ids within a program start at 1 and increase by one for
/// every action, so the queue is always in id order.
#[derive(Debug, Default)]
pub struct Program {
    ids: IdAllocator,
    actions: Vec<Action>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new action built from `kind`, returning its id.
    pub fn issue(&mut self, kind: ActionKind) -> u64 {
        let action = Action::with_allocator(&self.ids, kind);
        let id = action.id();

        self.actions.push(action);

        id
    }

    // ---- SETTINGS ----

    /// Increase the speed by `speed_inc` mm/s.
    pub fn speed(&mut self, speed_inc: i32) -> u64 {
        self.issue(ActionKind::Speed {
            speed: speed_inc,
            relative: true,
        })
    }

    /// Set the speed to `speed` mm/s.
    pub fn speed_to(&mut self, speed: i32) -> u64 {
        self.issue(ActionKind::Speed {
            speed,
            relative: false,
        })
    }

    /// Increase the approach zone by `zone_inc` mm.
    pub fn zone(&mut self, zone_inc: i32) -> u64 {
        self.issue(ActionKind::Zone {
            zone: zone_inc,
            relative: true,
        })
    }

    /// Set the approach zone to `zone` mm.
    pub fn zone_to(&mut self, zone: i32) -> u64 {
        self.issue(ActionKind::Zone {
            zone,
            relative: false,
        })
    }

    pub fn motion(&mut self, motion_type: MotionType) -> u64 {
        self.issue(ActionKind::Motion(motion_type))
    }

    pub fn coordinates(&mut self, reference_cs: ReferenceCs) -> u64 {
        self.issue(ActionKind::Coordinates(reference_cs))
    }

    pub fn push_settings(&mut self) -> u64 {
        self.issue(ActionKind::PushPop { push: true })
    }

    pub fn pop_settings(&mut self) -> u64 {
        self.issue(ActionKind::PushPop { push: false })
    }

    // ---- MOTION ----

    /// Move the TCP by `translation`.
    pub fn move_by(&mut self, translation: Vector) -> u64 {
        self.issue(ActionKind::Translation {
            translation,
            relative: true,
        })
    }

    /// Move the TCP to `position`.
    pub fn move_to(&mut self, position: Vector) -> u64 {
        self.issue(ActionKind::Translation {
            translation: position,
            relative: false,
        })
    }

    /// Rotate the tool by `rotation`.
    pub fn rotate(&mut self, rotation: Rotation) -> u64 {
        self.issue(ActionKind::Rotation {
            rotation,
            relative: true,
        })
    }

    /// Rotate the tool to `orientation`.
    pub fn rotate_to(&mut self, orientation: Rotation) -> u64 {
        self.issue(ActionKind::Rotation {
            rotation: orientation,
            relative: false,
        })
    }

    /// Translate and rotate the tool, in the order given by
    /// `translation_first`.
    pub fn transform(
        &mut self,
        translation: Vector,
        rotation: Rotation,
        translation_first: bool,
    ) -> u64 {
        self.issue(ActionKind::Transformation {
            translation,
            rotation,
            relative: true,
            translation_first,
        })
    }

    /// Move the tool to `position` and `orientation`.
    pub fn transform_to(&mut self, position: Vector, orientation: Rotation) -> u64 {
        self.issue(ActionKind::Transformation {
            translation: position,
            rotation: orientation,
            relative: false,
            translation_first: true,
        })
    }

    /// Rotate each axis by the matching angle of `joints_inc`.
    pub fn joints(&mut self, joints_inc: Joints) -> u64 {
        self.issue(ActionKind::Joints {
            joints: joints_inc,
            relative: true,
        })
    }

    /// Rotate the axes to the `joints` configuration.
    pub fn joints_to(&mut self, joints: Joints) -> u64 {
        self.issue(ActionKind::Joints {
            joints,
            relative: false,
        })
    }

    // ---- OTHER ----

    /// Pause for `millis` milliseconds.
    pub fn wait(&mut self, millis: u64) -> u64 {
        self.issue(ActionKind::Wait { millis })
    }

    /// Display `message` on the robot's controller.
    pub fn message<S: Into<String>>(&mut self, message: S) -> u64 {
        self.issue(ActionKind::Message(message.into()))
    }

    /// Annotate the program.
    pub fn comment<S: Into<String>>(&mut self, comment: S) -> u64 {
        self.issue(ActionKind::Comment(comment.into()))
    }

    // ---- QUEUE ----

    /// The queued actions, in id order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Hand the queued actions over, leaving the program empty.
    ///
    /// Ids keep increasing for actions issued afterwards.
    pub fn drain(&mut self) -> Vec<Action> {
        debug!("Draining {} actions from program", self.actions.len());

        std::mem::take(&mut self.actions)
    }

    /// Serialize the queued actions as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.actions)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::ActionType;

    #[test]
    fn test_ids() {
        let mut p = Program::new();

        assert!(p.is_empty());
        assert_eq!(p.move_by(Vector::new(10.0, 0.0, 0.0)), 1);
        assert_eq!(p.wait(500), 2);
        assert_eq!(p.comment("done"), 3);
        assert_eq!(p.len(), 3);

        // Each program numbers its own actions
        let mut other = Program::new();
        assert_eq!(other.speed(5), 1);

        let ids: Vec<u64> = p.actions().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_authoring() {
        let mut p = Program::new();
        let r = Rotation::from_axis_angle(&Vector::X_AXIS, 45.0);

        p.speed(10);
        p.speed_to(100);
        p.zone(1);
        p.zone_to(2);
        p.motion(MotionType::Joint);
        p.coordinates(ReferenceCs::World);
        p.push_settings();
        p.move_by(Vector::new(0.0, 0.0, -10.0));
        p.move_to(Vector::new(300.0, 0.0, 500.0));
        p.rotate(r);
        p.rotate_to(Rotation::FLIPPED_AROUND_Y);
        p.transform(Vector::X_AXIS, r, false);
        p.transform_to(Vector::ZERO, Rotation::GLOBAL_XY);
        p.joints(Joints::new(0.0, 0.0, 0.0, 0.0, 0.0, 90.0));
        p.joints_to(Joints::default());
        p.wait(1000);
        p.message(String::from("Hi"));
        p.pop_settings();
        p.comment("end");

        let types: Vec<ActionType> = p.actions().iter().map(|a| a.action_type()).collect();
        assert_eq!(
            types,
            vec![
                ActionType::Speed,
                ActionType::Speed,
                ActionType::Zone,
                ActionType::Zone,
                ActionType::Motion,
                ActionType::Coordinates,
                ActionType::PushPop,
                ActionType::Translation,
                ActionType::Translation,
                ActionType::Rotation,
                ActionType::Rotation,
                ActionType::Transformation,
                ActionType::Transformation,
                ActionType::Joints,
                ActionType::Joints,
                ActionType::Wait,
                ActionType::Message,
                ActionType::PushPop,
                ActionType::Comment,
            ]
        );

        let relative: Vec<bool> = p.actions().iter().map(|a| a.is_relative()).collect();
        assert_eq!(&relative[..4], &[true, false, true, false]);
        assert_eq!(&relative[7..15], &[true, false, true, false, true, false, true, false]);

        // Absolute transformations always translate first
        match p.actions()[12].kind() {
            ActionKind::Transformation {
                translation_first, ..
            } => assert!(*translation_first),
            k => panic!("Unexpected action kind {:?}", k),
        }

        assert_eq!(p.actions()[6].to_string(), "Push settings to buffer");
        assert_eq!(p.actions()[17].to_string(), "Pop settings");
    }

    #[test]
    fn test_payload_is_copied() {
        let mut p = Program::new();
        let mut j = Joints::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        p.joints_to(j);
        j[0] = -90.0;

        assert_eq!(
            p.actions()[0].kind(),
            &ActionKind::Joints {
                joints: Joints::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
                relative: false
            }
        );
    }

    #[test]
    fn test_drain() {
        let mut p = Program::new();

        p.wait(1);
        p.wait(2);

        let drained = p.drain();
        assert_eq!(drained.len(), 2);
        assert!(p.is_empty());

        assert_eq!(p.wait(3), 3);
        assert_eq!(p.actions()[0].id(), 3);
    }

    #[test]
    fn test_json() {
        let mut p = Program::new();

        p.move_to(Vector::new(1.0, 2.0, 3.0));
        p.message("Hello");

        let json = p.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["kind"]["Translation"]["translation"]["y"], 2.0);
        assert_eq!(value[0]["kind"]["Translation"]["relative"], false);
        assert_eq!(value[1]["kind"]["Message"], "Hello");

        let actions: Vec<Action> = serde_json::from_str(&json).unwrap();
        assert_eq!(actions.as_slice(), p.actions());
    }
}
