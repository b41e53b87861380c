mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod header_builder;
mod headers;
mod options;
mod origin;
mod path_pattern;
mod pattern;
mod registry;
mod result;
mod rule;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use config::{ConfigError, CorsConfig, ListOrWildcard, RuleConfig};
pub use context::RequestContext;
pub use cors::evaluate;
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use options::{RuleOptions, ValidationError};
pub use origin::{AllowedOrigins, OriginDecision, OriginMatcher};
pub use path_pattern::{PathPattern, Specificity};
pub use pattern::PatternError;
pub use registry::{PolicyRegistry, RegistryBuilder};
pub use result::{CorsDecision, DecisionKind, PolicyMismatch};
pub use rule::PolicyRule;
