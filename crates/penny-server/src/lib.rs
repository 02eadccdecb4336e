//! Penny Web Server
//!
//! Axum-based HTTP API for the Penny expense assistant:
//! - `POST /api/chat` answers spending questions
//! - `POST /api/upload-receipt` extracts a total and store from a receipt image
//! - `GET /api/health` reports liveness and OCR availability

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use penny_core::db::Database;
use penny_core::ReceiptExtractor;

mod handlers;

/// Maximum receipt upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub extractor: ReceiptExtractor,
}

/// Create the application router
pub fn create_router(db: Database, extractor: ReceiptExtractor, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { db, extractor });

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat))
        .route("/upload-receipt", post(handlers::upload_receipt))
        .route("/health", get(handlers::health));

    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    db: Database,
    extractor: ReceiptExtractor,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if extractor.ocr_available() {
        info!(engine = extractor.ocr_name(), "OCR engine available");
    } else {
        warn!(
            engine = extractor.ocr_name(),
            "OCR engine not found, receipt uploads will come back empty"
        );
    }

    let app = create_router(db, extractor, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
