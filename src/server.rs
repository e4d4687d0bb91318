use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::Repository;
use crate::error::ApiError;
use crate::movie::{add_movie, delete_movie, list_movies, method_not_allowed};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn Repository>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn Repository>) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route(
            "/movie/list",
            get(list_movies).fallback(method_not_allowed),
        )
        .route(
            "/movie/add",
            post(add_movie).fallback(method_not_allowed),
        )
        .route(
            "/movie/delete/:id",
            delete(delete_movie).fallback(method_not_allowed),
        );

    Router::new()
        .merge(movie_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler() -> ApiError {
    ApiError::NotFound
}
