//! PDF Genie Server Library
//!
//! Upload a PDF, get back a long, meme-style explanation of it.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `extract`: PDF text extraction via MuPDF
//! - `genie`: prompt composition and the generative-language client
//! - `routes`: HTTP handlers (upload, frontend, health)

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod extract;
pub mod genie;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let config = state.config();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", routes::health::router())
        .nest("/api/v1/health", routes::health::router())
        .nest("/upload", routes::upload::router(&config.upload))
        .merge(routes::frontend::router(&config.frontend))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
