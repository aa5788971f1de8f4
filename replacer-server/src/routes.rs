//! API route definitions

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{FILES_PATH, add_file, list_files, replace_file, report},
    state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(FILES_PATH, get(list_files))
        .route("/files/add/:name", post(add_file))
        .route("/files/replace/:old_file/:new_file", put(replace_file))
        .route("/report", get(report))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
