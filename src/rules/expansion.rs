//! Expansion of typed rules into the explicit rules they imply
//!
//! A typed rule `(m, c, t)` matches every connector facing `c` that carries
//! the tag `t`, either because another typed rule in the matching universe
//! declares it or because a module connector is tagged with it. Matches are
//! emitted once each, universe matches first, then module matches, both in
//! input order.

use crate::rules::module::Module;
use crate::rules::rule::{ExplicitRule, TypedRule};
use std::collections::HashSet;

/// Expand one typed rule against a matching universe
///
/// Self-pairing is allowed: a connector may match a facing connector on
/// the same module, which is how boundary modules neighbour themselves.
pub fn expand_typed(
    rule: &TypedRule,
    universe: &[TypedRule],
    modules: &[Module],
) -> Vec<ExplicitRule> {
    let Some(direction) = rule.direction() else {
        return Vec::new();
    };
    let facing = direction.opposite();

    let from_universe = universe
        .iter()
        .filter(|other| {
            other.connector_type == rule.connector_type && other.direction() == Some(facing)
        })
        .map(|other| (other.module.as_str(), other.connector));

    let from_modules = modules.iter().flat_map(move |module| {
        module
            .connectors()
            .iter()
            .filter(move |connector| {
                connector.direction == facing && connector.tag == rule.connector_type
            })
            .map(move |connector| (module.name(), connector.direction.index()))
    });

    let mut seen = HashSet::new();
    from_universe
        .chain(from_modules)
        .filter(|candidate| seen.insert(*candidate))
        .map(|(module, connector)| ExplicitRule {
            source_module: rule.module.clone(),
            source_connector: rule.connector,
            target_module: module.to_string(),
            target_connector: connector,
        })
        .collect()
}

/// Expand every rule of a typed set, using the set itself as the universe
pub fn expand_all(rules: &[TypedRule], modules: &[Module]) -> Vec<ExplicitRule> {
    rules
        .iter()
        .flat_map(|rule| expand_typed(rule, rules, modules))
        .collect()
}

