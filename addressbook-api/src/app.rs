/// Application state and router builder
///
/// # Example
///
/// ```
/// use addressbook_api::{app::{build_router, AppState}, config::Config};
/// use addressbook_shared::store::memory::MemoryStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = build_router(state);
/// ```

use crate::{config::Config, error::ApiError};
use addressbook_shared::{ids::RecordKind, store::AddressStore};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Datastore holding users and addresses
    pub store: Arc<dyn AddressStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn AddressStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Error for a well-formed id that matches no record
    ///
    /// Answers 400 for compatibility with existing clients, 404 in strict
    /// not-found mode. The message is the same either way.
    pub fn record_missing(&self, kind: RecordKind) -> ApiError {
        let message = kind.invalid_id_message().to_string();
        if self.config.api.strict_not_found {
            ApiError::NotFound(message)
        } else {
            ApiError::BadRequest(message)
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check
/// └── /api/addresses
///     ├── GET    /?user_id=         # List a user's addresses
///     ├── POST   /                  # Create address for a user
///     ├── GET    /:address_id       # Fetch address
///     ├── PUT    /:address_id       # Edit address
///     └── DELETE /:address_id       # Delete address
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/addresses",
            get(routes::addresses::list_addresses).post(routes::addresses::create_address),
        )
        .route(
            "/api/addresses/:address_id",
            get(routes::addresses::get_address)
                .put(routes::addresses::edit_address)
                .delete(routes::addresses::delete_address),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
