use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::exposed_headers::ExposedHeaders;
use crate::options::{RuleOptions, ValidationError};
use crate::origin::AllowedOrigins;
use crate::path_pattern::{PathPattern, Specificity};
use crate::util::equals_ignore_case;

/// Validated, immutable CORS rule bound to a compiled path pattern.
#[derive(Clone, Debug)]
pub struct PolicyRule {
    pattern: PathPattern,
    route_methods: Option<Vec<String>>,
    origins: AllowedOrigins,
    methods: AllowedMethods,
    allowed_headers: AllowedHeaders,
    exposed_headers: ExposedHeaders,
    credentials: bool,
    max_age: Option<u64>,
}

impl PolicyRule {
    pub fn new(options: RuleOptions) -> Result<Self, ValidationError> {
        options.validate()?;

        let pattern = PathPattern::new(&options.path).map_err(|source| {
            ValidationError::InvalidPathPattern {
                path: options.path.clone(),
                source,
            }
        })?;

        let route_methods = options.route_methods.map(|values| {
            values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect()
        });

        Ok(Self {
            pattern,
            route_methods,
            origins: options.origins,
            methods: options.methods,
            allowed_headers: options.allowed_headers,
            exposed_headers: options.exposed_headers,
            credentials: options.credentials,
            max_age: options.max_age,
        })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn route_methods(&self) -> Option<&[String]> {
        self.route_methods.as_deref()
    }

    pub fn origins(&self) -> &AllowedOrigins {
        &self.origins
    }

    pub fn methods(&self) -> &AllowedMethods {
        &self.methods
    }

    pub fn allowed_headers(&self) -> &AllowedHeaders {
        &self.allowed_headers
    }

    pub fn exposed_headers(&self) -> &ExposedHeaders {
        &self.exposed_headers
    }

    pub fn credentials(&self) -> bool {
        self.credentials
    }

    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    pub fn specificity(&self) -> Specificity {
        self.pattern.specificity()
    }

    pub fn is_method_scoped(&self) -> bool {
        self.route_methods.is_some()
    }

    /// Whether the rule governs a request routed to `path` with `route_method`.
    pub fn applies_to(&self, path: &str, route_method: &str) -> bool {
        if let Some(methods) = &self.route_methods
            && !methods
                .iter()
                .any(|method| equals_ignore_case(method, route_method))
        {
            return false;
        }

        self.pattern.matches(path)
    }
}

#[cfg(test)]
#[path = "rule_test.rs"]
mod rule_test;
