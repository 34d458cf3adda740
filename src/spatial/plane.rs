//! Base planes and the affine frame between world space and the unit grid
//!
//! The grid frame scales geometry by the inverse slot diagonal along the
//! base-plane axes, then rotates the plane onto the canonical frame. In the
//! resulting normalized frame one slot is a unit cube, cell centres sit on
//! integer coordinates and the plane origin is the centre of cell `(0, 0, 0)`.

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::vector::{
    Matrix3, Point3, Rotation3, Vector3, describe, is_finite, is_strictly_positive, unit,
};
use serde::{Deserialize, Serialize};

/// An oriented plane: origin plus an orthonormal right-handed axis triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlaneRecord", into = "PlaneRecord")]
pub struct Plane {
    origin: Point3<f64>,
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
    z_axis: Vector3<f64>,
}

impl Plane {
    /// Create a plane from an origin and two in-plane directions
    ///
    /// The x direction is normalized, the y direction is made orthogonal to
    /// it and the normal is their cross product.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the directions are zero, parallel or
    /// not finite, or if the origin is not finite
    pub fn new(
        origin: Point3<f64>,
        x_direction: Vector3<f64>,
        y_direction: Vector3<f64>,
    ) -> Result<Self> {
        if !is_finite(&origin.coords) {
            return Err(invalid_parameter(
                "plane origin",
                &describe(&origin.coords),
                &"must be finite",
            ));
        }

        let x_axis = unit(&x_direction).ok_or_else(|| {
            invalid_parameter(
                "plane x axis",
                &describe(&x_direction),
                &"must be a non-zero vector",
            )
        })?;
        let y_axis = unit(&(y_direction - x_axis * y_direction.dot(&x_axis))).ok_or_else(|| {
            invalid_parameter(
                "plane y axis",
                &describe(&y_direction),
                &"must be non-zero and not parallel to the x axis",
            )
        })?;
        let z_axis = x_axis.cross(&y_axis);

        Ok(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// The world XY plane at the origin
    pub fn world_xy() -> Self {
        Self::world_xy_at(Point3::origin())
    }

    /// World XY orientation moved to another origin
    pub fn world_xy_at(origin: Point3<f64>) -> Self {
        Self {
            origin,
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            z_axis: Vector3::z(),
        }
    }

    /// Plane origin
    pub const fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Unit axes in x, y, normal order
    pub const fn axes(&self) -> [Vector3<f64>; 3] {
        [self.x_axis, self.y_axis, self.z_axis]
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}

#[derive(Serialize, Deserialize)]
struct PlaneRecord {
    origin: Point3<f64>,
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
}

impl TryFrom<PlaneRecord> for Plane {
    type Error = crate::io::error::SlotwiseError;

    fn try_from(record: PlaneRecord) -> Result<Self> {
        Self::new(record.origin, record.x_axis, record.y_axis)
    }
}

impl From<Plane> for PlaneRecord {
    fn from(plane: Plane) -> Self {
        Self {
            origin: plane.origin,
            x_axis: plane.x_axis,
            y_axis: plane.y_axis,
        }
    }
}

/// Affine map between world space and the normalized unit grid
#[derive(Debug, Clone, Copy)]
pub struct GridFrame {
    origin: Point3<f64>,
    /// Columns are the base-plane axes, so this maps plane to world
    rotation: Rotation3<f64>,
    diagonal: Vector3<f64>,
}

impl GridFrame {
    /// Build the frame for a base plane and slot diagonal
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless every diagonal component is finite
    /// and greater than zero
    pub fn new(plane: &Plane, slot_diagonal: Vector3<f64>) -> Result<Self> {
        if !is_strictly_positive(&slot_diagonal) {
            return Err(invalid_parameter(
                "slot diagonal",
                &describe(&slot_diagonal),
                &"every component must be finite and greater than zero",
            ));
        }

        // Plane axes are orthonormal by construction
        let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&plane.axes()));

        Ok(Self {
            origin: plane.origin(),
            rotation,
            diagonal: slot_diagonal,
        })
    }

    /// Map a world point into the normalized grid frame
    pub fn to_grid(&self, point: &Point3<f64>) -> Point3<f64> {
        let local = self.rotation.inverse_transform_vector(&(*point - self.origin));
        Point3::from(local.component_div(&self.diagonal))
    }

    /// Map a normalized grid point back into world space
    pub fn to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.origin + self.rotation * point.coords.component_mul(&self.diagonal)
    }

    /// Slot diagonal the frame was built with
    pub const fn slot_diagonal(&self) -> Vector3<f64> {
        self.diagonal
    }
}
