use axum::{Router, routing::get};

use crate::cors::{AppState, middleware::cors_middleware};
use crate::routes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cors", get(routes::index))
        .route("/cors/", get(routes::index))
        .route("/cors/index", get(routes::index))
        .route("/cors/json", get(routes::json))
        .route("/account/{id}", get(routes::retrieve).delete(routes::remove))
        .route("/api/greet", get(routes::greet).post(routes::greet))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            cors_middleware,
        ))
        .with_state(state)
}
