//! HTTP API server for fauna.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod response_types;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fauna_service::AnimalService;

pub use response_types::{
    AnimalBody, AnimalsBody, CountBody, DeletedBody, ErrorsBody, Payload, VersionResponse,
};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub animal_service: Arc<AnimalService>,
}

impl AppState {
    #[must_use]
    pub fn new(animal_service: Arc<AnimalService>) -> Self {
        Self { animal_service }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/animals/get-animals/{page}", get(handlers::animals::get_animals))
        .route("/api/animals/get-animal-details/{id}", get(handlers::animals::get_animal_details))
        .route(
            "/api/animals/get-animal-by-name/{common_name}",
            get(handlers::animals::get_animal_by_name),
        )
        .route("/api/animals/get-count", get(handlers::animals::get_count))
        .route(
            "/api/animals",
            post(handlers::animals::create_animal).patch(handlers::animals::update_animal),
        )
        .route("/api/animals/{id}", delete(handlers::animals::delete_animal))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
