//! Boundary sentinel modules and their self-adjacency rules
//!
//! `OUT` stands for the unbounded exterior and `EMPTY` for a deliberately
//! vacant slot. Neither has geometry; both carry the `INDIFFERENT` tag on all
//! six faces and may neighbour themselves across every face.

use crate::io::configuration::{
    BOUNDARY_MODULE_DIMENSION, EMPTY_MODULE_NAME, INDIFFERENT_TAG, OUT_MODULE_NAME,
};
use crate::io::error::Result;
use crate::rules::module::{Direction, Module};
use crate::rules::rule::Rule;
use crate::spatial::vector::Vector3;

/// One of the two boundary sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The unbounded exterior
    Out,
    /// A deliberately vacant slot
    Empty,
}

impl Boundary {
    /// Reserved module name of the sentinel
    pub const fn name(self) -> &'static str {
        match self {
            Self::Out => OUT_MODULE_NAME,
            Self::Empty => EMPTY_MODULE_NAME,
        }
    }

    /// Build the abstract sentinel module
    ///
    /// # Errors
    ///
    /// Only fails if the reserved constants themselves are malformed
    pub fn module(self) -> Result<Module> {
        Module::uniform(
            self.name(),
            Vector3::repeat(BOUNDARY_MODULE_DIMENSION),
            INDIFFERENT_TAG,
        )
    }

    /// Explicit rules letting the sentinel neighbour itself on every face
    pub fn self_rules(self) -> Vec<Rule> {
        Direction::ALL
            .iter()
            .map(|direction| {
                Rule::explicit(
                    self.name(),
                    direction.index(),
                    self.name(),
                    direction.opposite().index(),
                )
            })
            .collect()
    }

    /// Check whether any rule in the given sets names this sentinel
    pub fn is_referenced<'a>(self, rules: impl IntoIterator<Item = &'a Rule>) -> bool {
        rules
            .into_iter()
            .any(|rule| rule.references_module(self.name()))
    }
}
