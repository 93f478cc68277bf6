//! Note-sharing web server.
//!
//! Serves the JSON API under `/api/notes`, the page views, and uploaded files
//! under `/uploads`. Configuration comes from `NOTES_*` environment
//! variables; logging is controlled by `RUST_LOG`.

use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use notes_share::{app, config::Config, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_share=info,tower_http=info")),
        )
        .init();

    let config = Config::load();
    info!(
        data_dir = %config.data_dir.display(),
        uploads_dir = %config.uploads_dir.display(),
        "Initializing state..."
    );
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize storage");

    let address = state.config.address();
    let router = app(state);

    let listener = TcpListener::bind(&address)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {address}: {e}"));
    info!("Server is running on http://{address}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
