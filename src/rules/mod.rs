//! Adjacency rule data model and resolution
//!
//! This module contains rule-related functionality including:
//! - Modules, connectors and face directions
//! - Explicit and typed rules
//! - Typed rule expansion and boundary sentinel synthesis
//! - Final allowed-minus-disallowed resolution

/// Boundary sentinel modules and their self-rules
pub mod boundary;
/// Typed to explicit rule expansion
pub mod expansion;
/// Modules, connectors and face directions
pub mod module;
/// Allowed and disallowed rule set resolution
pub mod resolver;
/// Explicit and typed rule types
pub mod rule;

pub use module::{Connector, Direction, Module};
pub use resolver::{Resolution, RuleResolver};
pub use rule::{ExplicitRule, Rule, TypedRule};
