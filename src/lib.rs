//! Note-sharing server library.
//!
//! Users upload files with course/subject/topic metadata, browse and search
//! them, and toggle like/dislike reactions. Metadata lives in one JSON
//! document; uploaded files live in a local directory.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notes;
pub mod reactions;
pub mod store;
pub mod templates;
pub mod uploads;

use config::{Config, MAX_FILES, MAX_FILE_SIZE};
use store::{NoteStore, StoreError};
use uploads::{UploadDir, UPLOADS_ROUTE};

/// Headroom for the text fields and multipart framing around the files.
const FORM_OVERHEAD: usize = 1024 * 1024;

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub store: NoteStore,
    pub uploads: UploadDir,
}

impl AppState {
    /// Create the data and upload directories and open the store.
    pub async fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = NoteStore::open(config.notes_file()).await?;
        let uploads = UploadDir::open(&config.uploads_dir).await?;

        Ok(Arc::new(Self {
            config,
            store,
            uploads,
        }))
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn app(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.uploads.root());

    Router::new()
        // Pages
        .route("/", get(handlers::root))
        .route("/home", get(handlers::home))
        .route("/browse", get(handlers::browse))
        .route("/upload", get(handlers::upload_page))
        .route("/login", get(handlers::login_page))
        .route("/signup", get(handlers::signup_page))
        // Notes API
        .route(
            "/api/notes",
            get(handlers::list_notes)
                .post(handlers::create_notes)
                .layer(DefaultBodyLimit::max(MAX_FILES * MAX_FILE_SIZE + FORM_OVERHEAD)),
        )
        .route("/api/notes/{id}", axum::routing::delete(handlers::delete_note))
        .route("/api/notes/{id}/like", post(handlers::like_note))
        .route("/api/notes/{id}/dislike", post(handlers::dislike_note))
        // Authentication is not part of this server
        .route("/api/login", post(handlers::auth_not_implemented))
        .route("/api/signup", post(handlers::auth_not_implemented))
        .route("/api/google-signin", post(handlers::auth_not_implemented))
        // Stored files
        .nest_service(UPLOADS_ROUTE, uploads)
        .fallback(handlers::not_found)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!(origin = %origin, error = %e, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

pub use error::AppError;
pub use models::{Note, NoteMeta};
pub use notes::{html_escape, search_notes};
pub use reactions::{toggle, Reaction};
