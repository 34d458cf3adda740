//! JSON documents read and written by the command-line tool

use crate::io::configuration::{DEFAULT_PRECISION, MODE_SURFACE};
use crate::io::error::{Result, SlotwiseError, file_system};
use crate::rules::module::Module;
use crate::rules::resolver::{Resolution, RuleResolver};
use crate::rules::rule::Rule;
use crate::spatial::discretize::{Discretization, GridSettings, SamplingMode};
use crate::spatial::plane::Plane;
use crate::spatial::shape::Shape;
use crate::spatial::vector::{Point3, Vector3};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resolution inputs as authored by the user
///
/// Modules and allowed rules are optional here so that their absence
/// surfaces as `MissingRequiredInput` rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesDocument {
    /// Module list
    #[serde(default)]
    pub modules: Option<Vec<Module>>,
    /// Allowed rules
    #[serde(default)]
    pub allowed: Option<Vec<Rule>>,
    /// Disallowed rules
    #[serde(default)]
    pub disallowed: Vec<Rule>,
    /// Request `OUT` boundary rules
    #[serde(default)]
    pub include_out: bool,
    /// Request `EMPTY` boundary rules
    #[serde(default)]
    pub include_empty: bool,
}

impl RulesDocument {
    /// Turn the document into a configured resolver
    pub fn into_resolver(self) -> RuleResolver {
        let mut resolver = RuleResolver::new()
            .with_disallowed(self.disallowed)
            .include_out(self.include_out)
            .include_empty(self.include_empty);
        if let Some(modules) = self.modules {
            resolver = resolver.with_modules(modules);
        }
        if let Some(allowed) = self.allowed {
            resolver = resolver.with_allowed(allowed);
        }
        resolver
    }
}

/// Resolved rules ready for the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDocument {
    /// Modules including synthesized boundary modules
    pub modules: Vec<Module>,
    /// Final rule list
    pub rules: Vec<Rule>,
}

impl From<Resolution> for ResolvedDocument {
    fn from(resolution: Resolution) -> Self {
        Self {
            modules: resolution.modules,
            rules: resolution.rules,
        }
    }
}

/// Discretization inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDocument {
    /// Base plane, world XY when omitted
    #[serde(default)]
    pub plane: Plane,
    /// Slot size along each base-plane axis
    pub slot_diagonal: Vector3<f64>,
    /// Sampling mode code
    #[serde(default = "default_mode")]
    pub mode: u8,
    /// Sampling step in unit-cell units
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// Shapes to discretize
    pub shapes: Vec<Shape>,
}

const fn default_mode() -> u8 {
    MODE_SURFACE
}

const fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

impl GeometryDocument {
    /// Grid settings described by the document
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unknown mode code
    pub fn settings(&self) -> Result<GridSettings> {
        Ok(GridSettings {
            plane: self.plane,
            slot_diagonal: self.slot_diagonal,
            mode: SamplingMode::from_code(self.mode)?,
            precision: self.precision,
        })
    }
}

/// Slot centres ready for the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotsDocument {
    /// World-space slot centres
    pub centers: Vec<Point3<f64>>,
}

impl From<Discretization> for SlotsDocument {
    fn from(discretization: Discretization) -> Self {
        Self {
            centers: discretization.centers,
        }
    }
}

/// Read and parse a JSON document
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `Document` if it is
/// not valid JSON for the expected type
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|e| file_system(path, "read", e))?;
    serde_json::from_str(&text).map_err(|e| SlotwiseError::Document {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize a document as pretty-printed JSON
///
/// # Errors
///
/// Returns `Document` if serialization fails and `FileSystem` if the file
/// cannot be written
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(document).map_err(|e| SlotwiseError::Document {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, text).map_err(|e| file_system(path, "write", e))
}
