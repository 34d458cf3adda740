//! Spatial data structures and grid discretization
//!
//! This module contains spatial-related functionality including:
//! - nalgebra vector types, base planes and the unit grid frame
//! - Input shapes and their surface/volume sampling
//! - Integer grid coordinates and the discretization engine

/// Exact integer grid coordinates
pub mod coordinate;
/// Discretization of shapes into slot centres
pub mod discretize;
/// Base planes and the world to grid frame
pub mod plane;
/// Surface and volume point sampling
pub mod sampler;
/// Input geometry kinds
pub mod shape;
/// nalgebra vector types and component checks
pub mod vector;

pub use coordinate::GridCoordinate;
pub use discretize::{Discretization, Discretizer, GridSettings, SamplingMode};
pub use plane::Plane;
pub use sampler::{LatticeSampler, Sampler, VoxelSampler};
pub use shape::Shape;
pub use vector::{Point3, Vector3};
