//! Frontend routes
//!
//! Serves the single-page UI and its static assets from local disk.

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use crate::config::FrontendConfig;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the frontend router (`/` and `/static/*`)
pub fn router(config: &FrontendConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(serve_index))
        .nest_service("/static", ServeDir::new(&config.static_dir))
}

/// GET /
async fn serve_index(State(state): State<AppState>) -> Result<Html<String>> {
    let path = &state.config().frontend.index_path;

    match tokio::fs::read_to_string(path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound("Frontend not found".to_string()))
        }
        Err(e) => Err(AppError::Internal(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}
