use axum::{routing::any, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub mod handlers;
pub mod schema;
pub mod state;

pub use schema::{build_schema, HeadlineSchema};
pub use state::AppState;

/// Path of the GraphQL endpoint.
pub const QUERY_PATH: &str = "/query";

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let static_files = ServeDir::new(&state.static_root);

    Router::new()
        .route(QUERY_PATH, any(handlers::graphql))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nq_core::{Article, Error, HeadlineQuery, HeadlineSource, Result};
    pub use crate::{create_app, AppState};
}
