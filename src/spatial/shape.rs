//! Input geometry kinds accepted by the discretization engine
//!
//! Every kind is closed under affine maps, so normalizing a shape into the
//! grid frame always yields a shape of the same kind.

use crate::spatial::vector::{Point3, Vector3, is_finite};
use serde::{Deserialize, Serialize};

/// A piece of input geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A single point
    Point(Point3<f64>),
    /// Connected line segments through the given vertices
    Polyline(Vec<Point3<f64>>),
    /// A parallelepiped spanned by three edge vectors from one corner
    Cuboid {
        /// Corner the edges start from
        corner: Point3<f64>,
        /// Edge vectors
        edges: [Vector3<f64>; 3],
    },
    /// A triangle mesh, expected to be closed for volume sampling
    Mesh {
        /// Vertex positions
        vertices: Vec<Point3<f64>>,
        /// Triangles as vertex index triples
        faces: Vec<[usize; 3]>,
    },
}

impl Shape {
    /// An axis-aligned box between two opposite corners
    pub fn axis_aligned_box(min: Point3<f64>, max: Point3<f64>) -> Self {
        let extent = max - min;
        Self::Cuboid {
            corner: min,
            edges: [
                Vector3::new(extent.x, 0.0, 0.0),
                Vector3::new(0.0, extent.y, 0.0),
                Vector3::new(0.0, 0.0, extent.z),
            ],
        }
    }

    /// An axis-aligned cube centred on a point
    pub fn cube(center: Point3<f64>, size: f64) -> Self {
        let half = Vector3::repeat(size / 2.0);
        Self::axis_aligned_box(center - half, center + half)
    }

    /// Apply an affine point map, producing a transformed copy
    ///
    /// Edge vectors are mapped as differences of mapped points, which is
    /// exact for affine maps.
    ///
    /// # Errors
    ///
    /// Returns a reason string if the shape is empty, references missing
    /// vertices or maps to non-finite coordinates
    pub fn transformed<F>(&self, map: F) -> Result<Self, String>
    where
        F: Fn(&Point3<f64>) -> Point3<f64>,
    {
        let shape = match self {
            Self::Point(point) => Self::Point(map(point)),
            Self::Polyline(vertices) => {
                if vertices.is_empty() {
                    return Err("polyline has no vertices".to_string());
                }
                Self::Polyline(vertices.iter().map(&map).collect())
            }
            Self::Cuboid { corner, edges } => {
                let origin = map(corner);
                Self::Cuboid {
                    corner: origin,
                    edges: edges.map(|edge| map(&(*corner + edge)) - origin),
                }
            }
            Self::Mesh { vertices, faces } => {
                if faces.is_empty() {
                    return Err("mesh has no faces".to_string());
                }
                if let Some(face) = faces
                    .iter()
                    .find(|face| face.iter().any(|&index| index >= vertices.len()))
                {
                    return Err(format!("mesh face {face:?} references a missing vertex"));
                }
                Self::Mesh {
                    vertices: vertices.iter().map(&map).collect(),
                    faces: faces.clone(),
                }
            }
        };

        if shape.is_finite() {
            Ok(shape)
        } else {
            Err("transformed coordinates are not finite".to_string())
        }
    }

    /// Check that every coordinate of the shape is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Point(point) => is_finite(&point.coords),
            Self::Polyline(vertices) | Self::Mesh { vertices, .. } => {
                vertices.iter().all(|vertex| is_finite(&vertex.coords))
            }
            Self::Cuboid { corner, edges } => {
                is_finite(&corner.coords) && edges.iter().all(is_finite)
            }
        }
    }

    /// Short name of the shape kind for diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Polyline(_) => "polyline",
            Self::Cuboid { .. } => "cuboid",
            Self::Mesh { .. } => "mesh",
        }
    }
}
