use std::sync::Arc;

use bunner_cors_registry::{ConfigError, CorsConfig, PolicyRegistry};

pub mod middleware;

pub type SharedRegistry = Arc<PolicyRegistry>;

const DEFAULT_CONFIG: &str = include_str!("../../cors.yaml");

#[derive(Clone)]
pub struct AppState {
    pub registry: SharedRegistry,
    pub greeting: &'static str,
}

/// Loads the rules from `CORS_CONFIG` when set, otherwise from the bundled
/// `demos/cors.yaml`.
pub fn build_state() -> Result<AppState, ConfigError> {
    let config = match std::env::var_os("CORS_CONFIG") {
        Some(path) => CorsConfig::from_path(path)?,
        None => CorsConfig::from_yaml_str(DEFAULT_CONFIG)?,
    };

    Ok(state_from(config.into_registry()?))
}

pub fn state_from(registry: PolicyRegistry) -> AppState {
    AppState {
        registry: Arc::new(registry),
        greeting: "Welcome to the Axum CORS example!",
    }
}
