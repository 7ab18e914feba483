//! CreditWise Prediction Service
//!
//! Serves the loan approval form and the prediction API.
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   CREDITWISE_HOST         - Server host (default: 0.0.0.0)
//!   PORT / CREDITWISE_PORT  - Server port (default: 8080)
//!   CREDITWISE_ARTIFACT_DIR - Artifact directory (default: artifacts)
//!   RUST_LOG                - Log level (default: info)

use creditwise::api::{create_router, handlers::AppState, start_cleanup_task};
use creditwise::{ServiceConfig, TelemetryCollector};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ServiceConfig::default();

    // Initialize telemetry
    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), telemetry));

    // Warm up the artifact bundle. A failure leaves the service up:
    // requests retry the lazy load and surface the generic error.
    match state.artifacts.get_or_load(&config.artifact_dir) {
        Ok(artifacts) => info!(
            "✅ Model ready: {} feature columns",
            artifacts.schema.len()
        ),
        Err(e) => warn!("⚠️ Artifact warm-up failed ({}), will retry per request", e),
    }

    // Start background cleanup task for rate limiter
    start_cleanup_task();
    info!("🧹 Background cleanup task started");

    // Create router
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🚀 CreditWise API starting on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  GET  /                - Loan approval form");
    info!("  POST /v1/predict      - Approval prediction");
    info!("  GET  /v1/schema       - Feature columns & defaults");
    info!("  GET  /v1/stats        - Service statistics");
    info!("  GET  /v1/health       - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");
    info!("");

    // Start server with graceful shutdown
    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // Graceful shutdown sequence
    info!("");
    info!("🛑 Shutdown signal received, cleaning up...");

    let stats = telemetry_for_shutdown.get_stats();
    info!("   Predictions served: {}", stats.total_predictions);
    info!("   Approved: {}, Rejected: {}", stats.approved, stats.rejected);

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("   ✅ Stats exported to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to export stats: {}", e),
    }

    info!("👋 CreditWise shutdown complete");

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════════════════╗
    ║                                                          ║
    ║    C R E D I T W I S E                                   ║
    ║                                                          ║
    ║    Loan Approval Prediction Service v0.1.0               ║
    ║    Fast approval checks from high-impact inputs          ║
    ║                                                          ║
    ╚══════════════════════════════════════════════════════════╝
    "#
    );
}
