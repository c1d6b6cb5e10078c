//! WOD Timer - interval timer with a local control server
//! 
//! This is the main entry point for the wod-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use wod_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::cue_player_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("wod_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting wod-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, default countdown={}s, bell={}",
          config.host, config.port, config.duration, config.bell);

    // Create application state with the default countdown configured
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.default_timer(),
        config.tick_period(),
    )?);

    // Start the cue player background task
    let notifications = state.notifier.subscribe();
    let bell = config.bell;
    tokio::spawn(async move {
        cue_player_task(notifications, bell).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timer               - Current timer snapshot");
    info!("  PUT    /timer/settings      - Configure a free-standing timer");
    info!("  POST   /timer/start         - Start or resume");
    info!("  POST   /timer/pause         - Pause");
    info!("  POST   /timer/reset         - Reset to initial values");
    info!("  POST   /timer/finish        - Log the session to the diary");
    info!("  DELETE /timer               - Discard the session");
    info!("  GET    /workouts            - List workouts");
    info!("  POST   /workouts/:id/timer  - Configure the timer for a workout");
    info!("  GET    /diary               - Recorded sessions");
    info!("  GET    /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
