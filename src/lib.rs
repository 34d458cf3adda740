//! Preprocessing core for 3D wave function collapse design tools
//!
//! The crate resolves user-authored adjacency rules between design modules
//! into one deduplicated rule list, and discretizes arbitrary geometry into
//! grid-aligned slot centres. Both outputs feed an external solver.

#![forbid(unsafe_code)]

/// Input/output operations and error handling
pub mod io;
/// Module, rule and rule resolution types
pub mod rules;
/// Geometry, sampling and grid discretization
pub mod spatial;

pub use io::configuration::{EMPTY_MODULE_NAME, INDIFFERENT_TAG, OUT_MODULE_NAME};
pub use io::error::{Result, SlotwiseError};
pub use rules::{Module, Resolution, Rule, RuleResolver};
pub use spatial::discretize::discretize;
pub use spatial::{Discretization, GridSettings, Plane, Point3, SamplingMode, Shape, Vector3};
