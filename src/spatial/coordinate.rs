//! Exact integer cell coordinates in the normalized grid frame

use crate::spatial::vector::Point3;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer triple identifying one unit cell
///
/// Equality and hashing are exact over all three components, which makes
/// the type the deduplication key for occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Cell index along the base-plane x axis
    pub x: i64,
    /// Cell index along the base-plane y axis
    pub y: i64,
    /// Cell index along the base-plane normal
    pub z: i64,
}

impl GridCoordinate {
    /// Create a coordinate from integer components
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Snap a normalized point to the nearest cell
    ///
    /// Each component is rounded to the nearest integer with ties going to
    /// the even neighbour. Returns `None` if any component is not finite or
    /// does not fit in an `i64`.
    pub fn from_point(point: &Point3<f64>) -> Option<Self> {
        Some(Self::new(
            snap(point.x)?,
            snap(point.y)?,
            snap(point.z)?,
        ))
    }

    /// Cell centre in the normalized frame
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

fn snap(value: f64) -> Option<i64> {
    value.round_ties_even().to_i64()
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
