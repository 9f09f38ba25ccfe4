//! Joint configuration of a 6-axis manipulator

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops;

// Internal
use super::{GeomError, EPSILON, STRING_ROUND_DECIMALS_DEGS};
use util::maths::round_dp;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of rotational axes on the manipulator.
pub const NUM_JOINTS: usize = 6;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The angular positions of the 6 axes of a manipulator.
///
/// Units: degrees
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Joints {
    pub j1: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j5: f64,
    pub j6: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Joints {
    /// Create a joint configuration from the angle of each axis.
    pub const fn new(j1: f64, j2: f64, j3: f64, j4: f64, j5: f64, j6: f64) -> Self {
        Self {
            j1,
            j2,
            j3,
            j4,
            j5,
            j6,
        }
    }

    /// Get the angle of the axis at `index` (0 to 5).
    pub fn get(&self, index: usize) -> Result<f64, GeomError> {
        match index {
            0 => Ok(self.j1),
            1 => Ok(self.j2),
            2 => Ok(self.j3),
            3 => Ok(self.j4),
            4 => Ok(self.j5),
            5 => Ok(self.j6),
            _ => Err(GeomError::JointIndexOutOfRange(index)),
        }
    }

    /// Get a mutable reference to the angle of the axis at `index` (0 to 5).
    pub fn get_mut(&mut self, index: usize) -> Result<&mut f64, GeomError> {
        match index {
            0 => Ok(&mut self.j1),
            1 => Ok(&mut self.j2),
            2 => Ok(&mut self.j3),
            3 => Ok(&mut self.j4),
            4 => Ok(&mut self.j5),
            5 => Ok(&mut self.j6),
            _ => Err(GeomError::JointIndexOutOfRange(index)),
        }
    }

    /// Set the angle of the axis at `index` (0 to 5).
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), GeomError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// The angles as an array, in axis order.
    pub fn to_array(&self) -> [f64; NUM_JOINTS] {
        [self.j1, self.j2, self.j3, self.j4, self.j5, self.j6]
    }

    /// Multiply all angles by the given factor.
    pub fn scale(&mut self, factor: f64) {
        self.j1 *= factor;
        self.j2 *= factor;
        self.j3 *= factor;
        self.j4 *= factor;
        self.j5 *= factor;
        self.j6 *= factor;
    }

    /// Euclidean norm of the angles taken as a 6D vector.
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Squared euclidean norm of the angles taken as a 6D vector.
    pub fn norm_sq(&self) -> f64 {
        self.to_array().iter().map(|j| j * j).sum()
    }
}

impl From<[f64; NUM_JOINTS]> for Joints {
    fn from(j: [f64; NUM_JOINTS]) -> Self {
        Joints::new(j[0], j[1], j[2], j[3], j[4], j[5])
    }
}

impl PartialEq for Joints {
    fn eq(&self, other: &Self) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}

/// Panics if `index` is out of range, use [`Joints::get`] for a fallible
/// access.
impl ops::Index<usize> for Joints {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.j1,
            1 => &self.j2,
            2 => &self.j3,
            3 => &self.j4,
            4 => &self.j5,
            5 => &self.j6,
            _ => panic!("{}", GeomError::JointIndexOutOfRange(index)),
        }
    }
}

impl ops::IndexMut<usize> for Joints {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match self.get_mut(index) {
            Ok(j) => j,
            Err(e) => panic!("{}", e),
        }
    }
}

impl ops::Add for Joints {
    type Output = Joints;

    fn add(mut self, rhs: Joints) -> Joints {
        self += rhs;
        self
    }
}

impl ops::AddAssign for Joints {
    fn add_assign(&mut self, rhs: Joints) {
        self.j1 += rhs.j1;
        self.j2 += rhs.j2;
        self.j3 += rhs.j3;
        self.j4 += rhs.j4;
        self.j5 += rhs.j5;
        self.j6 += rhs.j6;
    }
}

impl fmt::Display for Joints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let j: Vec<String> = self
            .to_array()
            .iter()
            .map(|j| round_dp(*j, STRING_ROUND_DECIMALS_DEGS).to_string())
            .collect();

        write!(f, "[{}]", j.join(","))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index() {
        let mut j = Joints::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        assert_eq!(j[2], 3.0);
        assert_eq!(j.get(5), Ok(6.0));
        assert_eq!(j.get(6), Err(GeomError::JointIndexOutOfRange(6)));
        assert_eq!(
            j.get(usize::MAX),
            Err(GeomError::JointIndexOutOfRange(usize::MAX))
        );

        j[0] = 10.0;
        j.set(4, -5.0).unwrap();
        assert_eq!(j, Joints::new(10.0, 2.0, 3.0, 4.0, -5.0, 6.0));
        assert!(j.set(6, 0.0).is_err());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        let j = Joints::default();
        let _ = j[6];
    }

    #[test]
    fn test_arithmetic() {
        let mut j = Joints::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        j += Joints::from([1.0; NUM_JOINTS]);
        assert_eq!(j, Joints::new(2.0, 3.0, 4.0, 5.0, 6.0, 7.0));

        j.scale(0.5);
        assert_eq!(j, Joints::new(1.0, 1.5, 2.0, 2.5, 3.0, 3.5));

        let j = Joints::new(1.0, 1.0, 1.0, 1.0, 2.0, 2.0) + Joints::default();
        assert_eq!(j.norm_sq(), 12.0);
        assert_eq!(Joints::new(3.0, 4.0, 0.0, 0.0, 0.0, 0.0).norm(), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Joints::new(0.0, 90.0, -90.0, 0.12345, 0.0, 180.0).to_string(),
            "[0,90,-90,0.123,0,180]"
        );
    }
}
