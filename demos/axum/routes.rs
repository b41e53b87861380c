use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::cors::AppState;

pub async fn index() -> impl IntoResponse {
    Html("<h1>CORS demo</h1><p>Call /cors/json from another origin.</p>")
}

pub async fn json() -> Json<HashMap<&'static str, &'static str>> {
    Json(HashMap::from([("objective", "test cors")]))
}

pub async fn retrieve(Path(id): Path<u64>) -> Json<HashMap<&'static str, u64>> {
    Json(HashMap::from([("id", id)]))
}

pub async fn remove(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn greet(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!("<h1>{}</h1>", state.greeting))
}
