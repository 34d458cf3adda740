//! Modules, their face connectors and the six connector directions
//!
//! A module occupies one cell of the design grid. Each face of that cell
//! carries a connector whose type tag drives generic (typed) rule matching.
//! Connector indices follow a fixed order: `+X, +Y, +Z, -X, -Y, -Z`.

use crate::io::configuration::{CONNECTOR_COUNT, EMPTY_MODULE_NAME, OUT_MODULE_NAME};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::vector::{Vector3, describe, is_strictly_positive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face direction of a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Positive X face
    PositiveX,
    /// Positive Y face
    PositiveY,
    /// Positive Z face
    PositiveZ,
    /// Negative X face
    NegativeX,
    /// Negative Y face
    NegativeY,
    /// Negative Z face
    NegativeZ,
}

impl Direction {
    /// All directions in connector index order
    pub const ALL: [Self; CONNECTOR_COUNT] = [
        Self::PositiveX,
        Self::PositiveY,
        Self::PositiveZ,
        Self::NegativeX,
        Self::NegativeY,
        Self::NegativeZ,
    ];

    /// Direction for a connector index, `None` outside `0..6`
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::PositiveX),
            1 => Some(Self::PositiveY),
            2 => Some(Self::PositiveZ),
            3 => Some(Self::NegativeX),
            4 => Some(Self::NegativeY),
            5 => Some(Self::NegativeZ),
            _ => None,
        }
    }

    /// Connector index of this direction
    pub const fn index(self) -> usize {
        match self {
            Self::PositiveX => 0,
            Self::PositiveY => 1,
            Self::PositiveZ => 2,
            Self::NegativeX => 3,
            Self::NegativeY => 4,
            Self::NegativeZ => 5,
        }
    }

    /// The direction a facing connector must point in
    pub const fn opposite(self) -> Self {
        match self {
            Self::PositiveX => Self::NegativeX,
            Self::PositiveY => Self::NegativeY,
            Self::PositiveZ => Self::NegativeZ,
            Self::NegativeX => Self::PositiveX,
            Self::NegativeY => Self::PositiveY,
            Self::NegativeZ => Self::PositiveZ,
        }
    }

    /// Check whether two connector indices can face each other
    pub fn indices_face(first: usize, second: usize) -> bool {
        match (Self::from_index(first), Self::from_index(second)) {
            (Some(a), Some(b)) => a.opposite() == b,
            _ => false,
        }
    }

    /// Unit vector pointing out of the face
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Self::PositiveX => Vector3::new(1.0, 0.0, 0.0),
            Self::PositiveY => Vector3::new(0.0, 1.0, 0.0),
            Self::PositiveZ => Vector3::new(0.0, 0.0, 1.0),
            Self::NegativeX => Vector3::new(-1.0, 0.0, 0.0),
            Self::NegativeY => Vector3::new(0.0, -1.0, 0.0),
            Self::NegativeZ => Vector3::new(0.0, 0.0, -1.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PositiveX => "+X",
            Self::PositiveY => "+Y",
            Self::PositiveZ => "+Z",
            Self::NegativeX => "-X",
            Self::NegativeY => "-Y",
            Self::NegativeZ => "-Z",
        };
        f.write_str(label)
    }
}

/// One face slot of a module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connector {
    /// Face the connector sits on
    pub direction: Direction,
    /// Abstract type tag used for typed rule matching
    pub tag: String,
}

/// A named design unit occupying one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModuleRecord", into = "ModuleRecord")]
pub struct Module {
    name: String,
    dimensions: Vector3<f64>,
    connectors: [Connector; CONNECTOR_COUNT],
}

impl Module {
    /// Create a module with one tag per connector in index order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the name is empty or contains
    /// whitespace, or if any dimension is not a finite positive number
    pub fn new(
        name: impl Into<String>,
        dimensions: Vector3<f64>,
        tags: [impl Into<String>; CONNECTOR_COUNT],
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(invalid_parameter(
                "module name",
                &name,
                &"must be non-empty and contain no whitespace",
            ));
        }

        if !is_strictly_positive(&dimensions) {
            return Err(invalid_parameter(
                "module dimensions",
                &describe(&dimensions),
                &"every component must be finite and greater than zero",
            ));
        }

        let mut tags = tags.into_iter();
        let connectors = Direction::ALL.map(|direction| Connector {
            direction,
            tag: tags.next().map(Into::into).unwrap_or_default(),
        });

        Ok(Self {
            name,
            dimensions,
            connectors,
        })
    }

    /// Create a module with the same tag on every face
    ///
    /// # Errors
    ///
    /// Same conditions as [`Module::new`]
    pub fn uniform(name: impl Into<String>, dimensions: Vector3<f64>, tag: &str) -> Result<Self> {
        Self::new(name, dimensions, [tag; CONNECTOR_COUNT])
    }

    /// Unique module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell size along the module's local axes
    pub const fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }

    /// Connectors in index order
    pub const fn connectors(&self) -> &[Connector; CONNECTOR_COUNT] {
        &self.connectors
    }

    /// Connector at an index, `None` outside `0..6`
    pub fn connector(&self, index: usize) -> Option<&Connector> {
        self.connectors.get(index)
    }

    /// Check whether this is one of the `OUT`/`EMPTY` sentinels
    pub fn is_boundary(&self) -> bool {
        is_boundary_name(&self.name)
    }
}

/// Check whether a module name is reserved for a boundary sentinel
pub fn is_boundary_name(name: &str) -> bool {
    name == OUT_MODULE_NAME || name == EMPTY_MODULE_NAME
}

/// Find a module by name, taking the first on duplicates
pub fn find_module<'a>(modules: &'a [Module], name: &str) -> Option<&'a Module> {
    modules.iter().find(|module| module.name == name)
}

// Document shape: tags are listed in connector index order
#[derive(Serialize, Deserialize)]
struct ModuleRecord {
    name: String,
    dimensions: Vector3<f64>,
    tags: [String; CONNECTOR_COUNT],
}

impl TryFrom<ModuleRecord> for Module {
    type Error = crate::io::error::SlotwiseError;

    fn try_from(record: ModuleRecord) -> Result<Self> {
        Self::new(record.name, record.dimensions, record.tags)
    }
}

impl From<Module> for ModuleRecord {
    fn from(module: Module) -> Self {
        Self {
            name: module.name,
            dimensions: module.dimensions,
            tags: module.connectors.map(|connector| connector.tag),
        }
    }
}
