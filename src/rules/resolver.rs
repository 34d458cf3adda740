//! Resolution of allowed and disallowed rule sets into one final rule list
//!
//! Resolution runs in five passes:
//! 1. Boundary detection forces `OUT`/`EMPTY` on when any rule names them
//! 2. Boundary synthesis appends sentinel modules and their self-rules
//! 3. Disallowed typed rules are expanded and merged with explicit ones
//! 4. Allowed typed rules touching a disallowed connector are expanded,
//!    the rest stay wrapped
//! 5. The merged allowed set minus the processed disallowed set is returned

use crate::io::error::{Result, missing_input};
use crate::rules::boundary::Boundary;
use crate::rules::expansion::{expand_all, expand_typed};
use crate::rules::module::{Module, find_module};
use crate::rules::rule::{ExplicitRule, Rule, TypedRule};
use std::collections::HashSet;
use std::hash::Hash;

/// Output of a resolution pass
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Deduplicated final rules in first-seen order
    pub rules: Vec<Rule>,
    /// Input modules followed by any synthesized boundary modules
    pub modules: Vec<Module>,
    /// Whether `OUT` rules were injected
    pub out_included: bool,
    /// Whether `EMPTY` rules were injected
    pub empty_included: bool,
}

/// Collects resolution inputs and runs the resolution
///
/// Modules and allowed rules are required; resolving without either fails
/// with `MissingRequiredInput` before any work is done.
#[derive(Debug, Clone, Default)]
pub struct RuleResolver {
    modules: Option<Vec<Module>>,
    allowed: Option<Vec<Rule>>,
    disallowed: Vec<Rule>,
    include_out: bool,
    include_empty: bool,
}

impl RuleResolver {
    /// Create a resolver with no inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the module list
    #[must_use]
    pub fn with_modules(mut self, modules: Vec<Module>) -> Self {
        self.modules = Some(modules);
        self
    }

    /// Supply the allowed rules
    #[must_use]
    pub fn with_allowed(mut self, allowed: Vec<Rule>) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Supply the disallowed rules
    #[must_use]
    pub fn with_disallowed(mut self, disallowed: Vec<Rule>) -> Self {
        self.disallowed = disallowed;
        self
    }

    /// Request `OUT` boundary rules
    #[must_use]
    pub const fn include_out(mut self, include: bool) -> Self {
        self.include_out = include;
        self
    }

    /// Request `EMPTY` boundary rules
    #[must_use]
    pub const fn include_empty(mut self, include: bool) -> Self {
        self.include_empty = include;
        self
    }

    /// Run the resolution
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredInput` if modules or allowed rules were not
    /// supplied
    pub fn resolve(&self) -> Result<Resolution> {
        let modules = self
            .modules
            .as_deref()
            .ok_or_else(|| missing_input("modules"))?;
        let allowed = self
            .allowed
            .as_deref()
            .ok_or_else(|| missing_input("allowed rules"))?;

        resolve_rules(
            modules,
            allowed,
            &self.disallowed,
            self.include_out,
            self.include_empty,
        )
    }
}

/// Resolve rule sets whose inputs are already known to be present
///
/// # Errors
///
/// Propagates failures to build a boundary module
pub fn resolve_rules(
    modules: &[Module],
    allowed: &[Rule],
    disallowed: &[Rule],
    include_out: bool,
    include_empty: bool,
) -> Result<Resolution> {
    let mut modules = modules.to_vec();
    let mut allowed = allowed.to_vec();

    // Rules that already depend on a sentinel force it on
    let out_included =
        include_out || Boundary::Out.is_referenced(allowed.iter().chain(disallowed));
    let empty_included =
        include_empty || Boundary::Empty.is_referenced(allowed.iter().chain(disallowed));

    let boundaries = [
        (Boundary::Out, out_included),
        (Boundary::Empty, empty_included),
    ];
    for (boundary, active) in boundaries {
        if !active {
            continue;
        }
        allowed.extend(boundary.self_rules());
        if find_module(&modules, boundary.name()).is_none() {
            modules.push(boundary.module()?);
        }
    }

    let (disallowed_explicit, disallowed_typed) = partition(disallowed);
    let disallowed_processed = deduplicate(
        disallowed_explicit
            .into_iter()
            .chain(expand_all(&disallowed_typed, &modules)),
    );

    let (allowed_explicit, allowed_typed) = partition(&allowed);
    let mut typed_unwrapped = Vec::new();
    let mut typed_wrapped = Vec::new();
    for rule in &allowed_typed {
        // Generic matching could reintroduce a forbidden pair
        let conflicts = disallowed_processed
            .iter()
            .any(|forbidden| forbidden.involves(&rule.module, rule.connector));
        if conflicts {
            typed_unwrapped.extend(expand_typed(rule, &allowed_typed, &modules));
        } else {
            typed_wrapped.push(rule.clone());
        }
    }

    tracing::debug!(
        explicit = allowed_explicit.len(),
        unwrapped = typed_unwrapped.len(),
        wrapped = typed_wrapped.len(),
        disallowed = disallowed_processed.len(),
        "merging allowed rules"
    );

    let forbidden: HashSet<&ExplicitRule> = disallowed_processed.iter().collect();
    let rules = deduplicate(
        allowed_explicit
            .into_iter()
            .chain(typed_unwrapped)
            .map(Rule::Explicit)
            .chain(typed_wrapped.into_iter().map(Rule::Typed)),
    )
    .into_iter()
    .filter(|rule| match rule {
        Rule::Explicit(explicit) => !forbidden.contains(explicit),
        Rule::Typed(_) => true,
    })
    .collect();

    Ok(Resolution {
        rules,
        modules,
        out_included,
        empty_included,
    })
}

fn partition(rules: &[Rule]) -> (Vec<ExplicitRule>, Vec<TypedRule>) {
    let mut explicit = Vec::new();
    let mut typed = Vec::new();
    for rule in rules {
        match rule {
            Rule::Explicit(rule) => explicit.push(rule.clone()),
            Rule::Typed(rule) => typed.push(rule.clone()),
        }
    }
    (explicit, typed)
}

/// Drop repeated items, keeping the first occurrence of each
pub fn deduplicate<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        if seen.insert(item.clone()) {
            unique.push(item);
        }
    }

    unique
}
