use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::{MATCH_ALL_PATHS, WILDCARD};
use crate::exposed_headers::ExposedHeaders;
use crate::origin::{AllowedOrigins, OriginMatcher};
use crate::pattern::PatternError;
use crate::util::is_http_token;
use thiserror::Error;

/// Unvalidated description of a single CORS rule.
///
/// The defaults are the "permit default values" preset: every origin, the
/// simple methods `GET`, `HEAD` and `POST`, every header, no credentials and a
/// preflight cache of [`RuleOptions::DEFAULT_MAX_AGE`] seconds.
#[derive(Clone, Debug)]
pub struct RuleOptions {
    /// Ant-style route pattern the rule applies to.
    pub path: String,
    /// Restricts the rule to these route methods; `None` applies it to all.
    pub route_methods: Option<Vec<String>>,
    pub origins: AllowedOrigins,
    pub methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub credentials: bool,
    /// Seconds a preflight response may be cached; `None` omits the header.
    pub max_age: Option<u64>,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            path: MATCH_ALL_PATHS.to_string(),
            route_methods: None,
            origins: AllowedOrigins::Any,
            methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::Any,
            exposed_headers: ExposedHeaders::default(),
            credentials: false,
            max_age: Some(Self::DEFAULT_MAX_AGE),
        }
    }
}

/// Errors raised while validating [`RuleOptions`].
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("rule `{path}`: credentials require explicit origins, not `*` or a match-all")]
    CredentialsRequireSpecificOrigin { path: String },
    #[error("rule `{path}`: credentials are enabled but no origins are allowed")]
    CredentialsRequireOrigins { path: String },
    #[error("rule `{path}`: `*` cannot be mixed with other entries in {field}")]
    WildcardInList { path: String, field: &'static str },
    #[error("rule `{path}`: `{method}` is not a valid HTTP method token")]
    InvalidMethod { path: String, method: String },
    #[error("rule `{path}`: `{header}` is not a valid HTTP header name")]
    InvalidHeader { path: String, header: String },
    #[error("rule `{path}`: route methods must not be empty")]
    EmptyRouteMethods { path: String },
    #[error("rule `{path}`: invalid path pattern")]
    InvalidPathPattern {
        path: String,
        #[source]
        source: PatternError,
    },
    #[error("rule `{path}`: invalid origin pattern")]
    InvalidOriginPattern {
        path: String,
        #[source]
        source: PatternError,
    },
}

impl RuleOptions {
    pub const DEFAULT_MAX_AGE: u64 = 1800;

    /// The "permit default values" preset scoped to `path`.
    pub fn permit_defaults<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Rejects configurations that are programmer mistakes rather than
    /// runtime conditions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let path = || self.path.clone();

        match &self.origins {
            AllowedOrigins::Any if self.credentials => {
                return Err(ValidationError::CredentialsRequireSpecificOrigin { path: path() });
            }
            AllowedOrigins::List(values) if self.credentials && values.is_empty() => {
                return Err(ValidationError::CredentialsRequireOrigins { path: path() });
            }
            AllowedOrigins::List(values) if values.iter().any(|value| value.is_wildcard()) => {
                return Err(ValidationError::WildcardInList {
                    path: path(),
                    field: "allowed origins",
                });
            }
            AllowedOrigins::List(values)
                if self.credentials && values.iter().any(OriginMatcher::matches_any) =>
            {
                return Err(ValidationError::CredentialsRequireSpecificOrigin { path: path() });
            }
            _ => {}
        }

        if let AllowedMethods::List(values) = &self.methods {
            Self::validate_methods(&self.path, "allowed methods", values)?;
        }

        if let AllowedHeaders::List(values) = &self.allowed_headers {
            Self::validate_headers(&self.path, "allowed headers", values)?;
        }

        if let ExposedHeaders::List(values) = &self.exposed_headers {
            Self::validate_headers(&self.path, "exposed headers", values)?;
        }

        if let Some(values) = &self.route_methods {
            if values.iter().all(|value| value.trim().is_empty()) {
                return Err(ValidationError::EmptyRouteMethods { path: path() });
            }
            Self::validate_methods(&self.path, "route methods", values)?;
        }

        Ok(())
    }

    fn validate_methods(
        path: &str,
        field: &'static str,
        values: &[String],
    ) -> Result<(), ValidationError> {
        for value in values {
            let value = value.trim();
            if value == WILDCARD {
                return Err(ValidationError::WildcardInList {
                    path: path.to_string(),
                    field,
                });
            }
            if !is_http_token(value) {
                return Err(ValidationError::InvalidMethod {
                    path: path.to_string(),
                    method: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_headers(
        path: &str,
        field: &'static str,
        values: &[String],
    ) -> Result<(), ValidationError> {
        for value in values {
            let value = value.trim();
            if value == WILDCARD {
                return Err(ValidationError::WildcardInList {
                    path: path.to_string(),
                    field,
                });
            }
            if !is_http_token(value) {
                return Err(ValidationError::InvalidHeader {
                    path: path.to_string(),
                    header: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
