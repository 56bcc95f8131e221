pub mod assets;
pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub static_dir: PathBuf,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index).fallback(routes::not_found))
        .route("/index.html", get(routes::index).fallback(routes::not_found))
        .route(
            "/api/movies",
            get(routes::list_movies).post(routes::create_movie).fallback(routes::not_found),
        )
        .route("/api/user", get(routes::get_user).fallback(routes::not_found))
        .fallback(routes::fallback)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
