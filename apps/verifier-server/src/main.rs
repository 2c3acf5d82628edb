//! Document compliance verifier server
//!
//! Accepts uploaded Word, PDF and Excel files, checks them against the
//! corporate document rules and returns a localized per-rule report.
//!
//! ## Endpoints
//!
//! - `GET /health`
//! - `POST /api/verify` (multipart upload)
//! - `POST /api/evaluate` (already-extracted document as JSON)
//! - `GET /api/rules`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use compliance_engine::ComplianceEngine;
use shared_types::Extractor;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod upload;
#[cfg(test)]
mod tests;

use api::{handle_evaluate, handle_health, handle_list_rules, handle_verify_upload};

/// Command-line arguments for the verifier server
#[derive(Parser, Debug)]
#[command(name = "verifier-server")]
#[command(about = "Checks uploaded documents against corporate compliance rules")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory holding uploads while they are verified
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "16")]
    max_upload_mb: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ComplianceEngine>,
    pub extractors: Arc<Vec<Box<dyn Extractor>>>,
    /// Uploads are written here and removed after verification
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self {
            engine: Arc::new(ComplianceEngine::new()),
            extractors: Arc::new(document_extract::default_extractors()),
            upload_dir,
        }
    }
}

/// Build the router with all endpoints and middleware
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/verify", post(handle_verify_upload))
        .route("/api/evaluate", post(handle_evaluate))
        .route("/api/rules", get(handle_list_rules))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting verifier server on {}:{}", args.host, args.port);

    tokio::fs::create_dir_all(&args.upload_dir).await?;

    let state = AppState::new(args.upload_dir.clone());
    let app = app(state, args.max_upload_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Upload directory: {}", args.upload_dir.display());
    info!("Upload limit: {} MB", args.max_upload_mb);

    axum::serve(listener, app).await?;

    Ok(())
}
