//! Soft Timer - countdown/stopwatch timer with an HTTP control surface
//!
//! This is the main entry point for the soft-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use soft_timer::{
    api::create_router,
    config::Config,
    driver::run_demo,
    state::AppState,
    tasks::timer_tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("soft_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting soft-timer v{}", env!("CARGO_PKG_VERSION"));

    if config.demo {
        let summary = run_demo(config.profile(), config.timer);
        if !summary.configured {
            warn!("Demo countdown of {} was rejected", config.timer);
        }
        return Ok(());
    }

    info!(
        "Configuration: host={}, port={}, profile={:?}, tick={}ms",
        config.host, config.port, config.profile(), config.tick_ms
    );

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.profile(),
        config.tick_period(),
    ));

    // Start the periodic tick background task
    let tick_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        timer_tick_task(tick_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /countdown/:duration - Start a countdown");
    info!("  POST /stopwatch           - Start the stopwatch");
    info!("  POST /tick                - Advance the timer once");
    info!("  POST /reset               - Reset the timer");
    info!("  GET  /status              - Current timer state");
    info!("  GET  /health              - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    ticker.abort();
    info!("Server shutdown complete");
    Ok(())
}
