//! Countdown Widget - A single countdown timer served over HTTP
//!
//! This is the main entry point for the countdown-widget application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use countdown_widget::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::spawn_timer_loop,
    timer::SetDurationOutcome,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_widget={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-widget v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Mount the timer and its event loop
    let timer_loop = spawn_timer_loop(config.tick_period());
    let state = Arc::new(AppState::from_loop(&timer_loop, config.port, config.host.clone()));

    if let Some(input) = config.duration.clone() {
        match state.set_duration(input).await {
            Ok((SetDurationOutcome::Accepted { duration }, _)) => {
                info!("Initial duration set to {}s", duration);
            }
            Ok((SetDurationOutcome::Rejected(reason), _)) => {
                warn!("Ignoring initial duration: {}", reason);
            }
            Err(e) => anyhow::bail!("Timer failed to mount: {}", e),
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer          - Current timer state");
    info!("  POST /timer/duration - Set the duration from raw input");
    info!("  POST /timer/start    - Start or resume");
    info!("  POST /timer/pause    - Pause");
    info!("  POST /timer/reset    - Reset to the configured duration");
    info!("  GET  /status         - Timer state and server info");
    info!("  GET  /health         - Health check");

    // Serve until a shutdown signal arrives
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Unmount: release the ticker before exiting
    if let Err(e) = state.unmount() {
        warn!("{}", e);
    }
    timer_loop.task.await?;

    info!("Server shutdown complete");
    Ok(())
}
