//! Static configuration loaded once at startup.
//!
//! ```yaml
//! rules:
//!   - path: /**
//!     allowed_methods: "*"
//!   - path: /api/**
//!     allowed_methods: [GET, HEAD, POST]
//!     max_age_seconds: 3600
//!   - path: /account/{id}
//!     route_methods: [GET]
//!     allowed_origins: [https://domain2.com]
//! ```
//!
//! Omitted options take the "permit default values" of [`RuleOptions`]. Every
//! list option accepts either `"*"` or a sequence of strings.

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::WILDCARD;
use crate::exposed_headers::ExposedHeaders;
use crate::options::{RuleOptions, ValidationError};
use crate::origin::{AllowedOrigins, OriginMatcher};
use crate::registry::PolicyRegistry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    #[serde(alias = "pathPattern")]
    pub path: String,
    #[serde(default, alias = "routeMethods")]
    pub route_methods: Option<Vec<String>>,
    #[serde(default, alias = "allowedOrigins")]
    pub allowed_origins: Option<ListOrWildcard>,
    #[serde(default, alias = "allowedMethods")]
    pub allowed_methods: Option<ListOrWildcard>,
    #[serde(default, alias = "allowedHeaders")]
    pub allowed_headers: Option<ListOrWildcard>,
    #[serde(default, alias = "exposedHeaders")]
    pub exposed_headers: Option<ListOrWildcard>,
    #[serde(default, alias = "allowCredentials")]
    pub allow_credentials: bool,
    #[serde(default, alias = "maxAgeSeconds", alias = "max_age")]
    pub max_age_seconds: Option<u64>,
}

/// `"*"`, a single value, or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListOrWildcard {
    One(String),
    Many(Vec<String>),
}

impl ListOrWildcard {
    fn into_values(self) -> Vec<String> {
        match self {
            ListOrWildcard::One(value) => vec![value],
            ListOrWildcard::Many(values) => values,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CORS configuration from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported CORS configuration format for {path}; expected .yaml, .yml or .toml")]
    UnsupportedFormat { path: PathBuf },
    #[error("invalid YAML CORS configuration")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML CORS configuration")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl CorsConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads a `.yaml`/`.yml` or `.toml` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&source),
            Some("toml") => Self::from_toml_str(&source),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn into_rule_options(self) -> Result<Vec<RuleOptions>, ValidationError> {
        self.rules
            .into_iter()
            .map(RuleConfig::into_rule_options)
            .collect()
    }

    /// Validates every rule and builds the registry.
    pub fn into_registry(self) -> Result<PolicyRegistry, ConfigError> {
        let options = self.into_rule_options()?;
        debug!(rules = options.len(), "loading CORS rules from configuration");
        Ok(PolicyRegistry::from_rules(options)?)
    }
}

impl RuleConfig {
    pub fn into_rule_options(self) -> Result<RuleOptions, ValidationError> {
        let defaults = RuleOptions::permit_defaults(self.path);

        let origins = match self.allowed_origins {
            Some(values) => Self::origins(&defaults.path, values)?,
            None => defaults.origins,
        };

        Ok(RuleOptions {
            route_methods: self.route_methods,
            origins,
            methods: self
                .allowed_methods
                .map(|values| AllowedMethods::list(values.into_values()))
                .unwrap_or(defaults.methods),
            allowed_headers: self
                .allowed_headers
                .map(|values| AllowedHeaders::list(values.into_values()))
                .unwrap_or(defaults.allowed_headers),
            exposed_headers: self
                .exposed_headers
                .map(|values| ExposedHeaders::list(values.into_values()))
                .unwrap_or(defaults.exposed_headers),
            credentials: self.allow_credentials,
            max_age: self.max_age_seconds.or(defaults.max_age),
            path: defaults.path,
        })
    }

    /// Entries containing `*` (other than a lone `*`) become wildcard origin patterns.
    fn origins(path: &str, values: ListOrWildcard) -> Result<AllowedOrigins, ValidationError> {
        let values = values.into_values();
        let mut matchers = Vec::with_capacity(values.len());
        for value in values {
            let value = value.trim();
            if value != WILDCARD && value.contains('*') {
                let matcher = OriginMatcher::wildcard(value).map_err(|source| {
                    ValidationError::InvalidOriginPattern {
                        path: path.to_string(),
                        source,
                    }
                })?;
                matchers.push(matcher);
            } else {
                matchers.push(OriginMatcher::exact(value));
            }
        }
        Ok(AllowedOrigins::list(matchers))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
