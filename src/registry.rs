use crate::context::RequestContext;
use crate::cors;
use crate::options::{RuleOptions, ValidationError};
use crate::result::CorsDecision;
use crate::rule::PolicyRule;
use std::cmp::Reverse;
use tracing::{debug, trace, warn};

/// Immutable set of CORS rules ordered most-specific-first.
///
/// Built once at startup and shared by reference (or `Arc`) with every request
/// handler. Holds no interior mutability, so concurrent evaluation needs no
/// locking.
#[derive(Clone, Debug, Default)]
pub struct PolicyRegistry {
    rules: Vec<PolicyRule>,
}

/// Collects [`RuleOptions`] in registration order and validates them all in
/// [`RegistryBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    options: Vec<RuleOptions>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, options: RuleOptions) -> Self {
        self.options.push(options);
        self
    }

    pub fn push(&mut self, options: RuleOptions) -> &mut Self {
        self.options.push(options);
        self
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Validates every rule and orders them by path specificity, then
    /// method-scoped before unscoped, then later registration first.
    pub fn build(self) -> Result<PolicyRegistry, ValidationError> {
        let mut ranked = Vec::with_capacity(self.options.len());
        for (index, options) in self.options.into_iter().enumerate() {
            let rule = PolicyRule::new(options).inspect_err(|err| {
                warn!(error = %err, "rejected CORS rule");
            })?;
            ranked.push((index, rule));
        }

        ranked.sort_by_key(|(index, rule)| {
            Reverse((rule.specificity(), rule.is_method_scoped(), *index))
        });

        let rules: Vec<PolicyRule> = ranked.into_iter().map(|(_, rule)| rule).collect();
        debug!(rules = rules.len(), "CORS policy registry built");
        for (position, rule) in rules.iter().enumerate() {
            trace!(
                position,
                pattern = rule.pattern().as_str(),
                route_methods = ?rule.route_methods(),
                credentials = rule.credentials(),
                "registered CORS rule"
            );
        }

        Ok(PolicyRegistry { rules })
    }
}

impl PolicyRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Shorthand for a builder fed with `options` in order.
    pub fn from_rules<I>(options: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = RuleOptions>,
    {
        options
            .into_iter()
            .fold(RegistryBuilder::new(), RegistryBuilder::rule)
            .build()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The effective rule for a request routed to `path` with `route_method`.
    pub fn select(&self, path: &str, route_method: &str) -> Option<&PolicyRule> {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(path, route_method))
    }

    pub fn evaluate(&self, request: &RequestContext<'_>) -> CorsDecision {
        cors::evaluate(self, request)
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
