//! Adjacency rules as a sum type of explicit and typed constraints
//!
//! An explicit rule names both sides of an adjacency. A typed rule names one
//! connector and a connector type tag, standing for every facing connector
//! that shares the tag. Equality, hashing and ordering are structural, so an
//! explicit rule never equals a typed rule even when both describe the same
//! adjacency.

use crate::io::error::{Result, invalid_parameter};
use crate::rules::module::{Direction, Module, find_module};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Adjacency of one concrete connector to another concrete connector
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExplicitRule {
    /// Name of the module on the source side
    pub source_module: String,
    /// Connector index on the source module
    pub source_connector: usize,
    /// Name of the module on the target side
    pub target_module: String,
    /// Connector index on the target module
    pub target_connector: usize,
}

impl ExplicitRule {
    /// Check whether the rule names `(module, connector)` on either side
    pub fn involves(&self, module: &str, connector: usize) -> bool {
        (self.source_module == module && self.source_connector == connector)
            || (self.target_module == module && self.target_connector == connector)
    }
}

/// Adjacency of one concrete connector to any facing connector with a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypedRule {
    /// Name of the module owning the connector
    pub module: String,
    /// Connector index on the module
    pub connector: usize,
    /// Connector type tag matched against other connectors
    pub connector_type: String,
}

impl TypedRule {
    /// Face direction of the connector, `None` for an out-of-range index
    pub const fn direction(&self) -> Option<Direction> {
        Direction::from_index(self.connector)
    }
}

/// A single adjacency constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Both sides named concretely
    Explicit(ExplicitRule),
    /// One side named concretely, the other matched by tag
    Typed(TypedRule),
}

impl Rule {
    /// Create an explicit rule
    pub fn explicit(
        source_module: impl Into<String>,
        source_connector: usize,
        target_module: impl Into<String>,
        target_connector: usize,
    ) -> Self {
        Self::Explicit(ExplicitRule {
            source_module: source_module.into(),
            source_connector,
            target_module: target_module.into(),
            target_connector,
        })
    }

    /// Create a typed rule
    pub fn typed(
        module: impl Into<String>,
        connector: usize,
        connector_type: impl Into<String>,
    ) -> Self {
        Self::Typed(TypedRule {
            module: module.into(),
            connector,
            connector_type: connector_type.into(),
        })
    }

    /// Check whether any side of the rule names a module
    pub fn references_module(&self, name: &str) -> bool {
        match self {
            Self::Explicit(rule) => rule.source_module == name || rule.target_module == name,
            Self::Typed(rule) => rule.module == name,
        }
    }

    /// Check the rule against a module list
    ///
    /// A valid rule names existing modules and in-range connectors, and an
    /// explicit rule connects two faces pointing in opposite directions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` describing the first problem found
    pub fn validate(&self, modules: &[Module]) -> Result<()> {
        let sides: Vec<(&str, usize)> = match self {
            Self::Explicit(rule) => vec![
                (rule.source_module.as_str(), rule.source_connector),
                (rule.target_module.as_str(), rule.target_connector),
            ],
            Self::Typed(rule) => vec![(rule.module.as_str(), rule.connector)],
        };

        for (name, connector) in sides {
            let Some(module) = find_module(modules, name) else {
                return Err(invalid_parameter(
                    "rule",
                    self,
                    &format!("module '{name}' does not exist"),
                ));
            };
            if module.connector(connector).is_none() {
                return Err(invalid_parameter(
                    "rule",
                    self,
                    &format!("module '{name}' has no connector {connector}"),
                ));
            }
        }

        if let Self::Explicit(rule) = self {
            if !Direction::indices_face(rule.source_connector, rule.target_connector) {
                return Err(invalid_parameter(
                    "rule",
                    self,
                    &"connectors do not face each other",
                ));
            }
        }

        Ok(())
    }
}

impl From<ExplicitRule> for Rule {
    fn from(rule: ExplicitRule) -> Self {
        Self::Explicit(rule)
    }
}

impl From<TypedRule> for Rule {
    fn from(rule: TypedRule) -> Self {
        Self::Typed(rule)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(rule) => write!(
                f,
                "{}:{} -> {}:{}",
                rule.source_module,
                rule.source_connector,
                rule.target_module,
                rule.target_connector
            ),
            Self::Typed(rule) => write!(
                f,
                "{}:{} = {}",
                rule.module, rule.connector, rule.connector_type
            ),
        }
    }
}
