pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::controllers::{
    arena::ArenaController,
    health::{self, HealthState},
    leaderboard::LeaderboardController,
};
use crate::infrastructure::audio::AUDIO_ROUTE;
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    health_state: HealthState,
    arena_controller: Arc<ArenaController>,
    leaderboard_controller: Arc<LeaderboardController>,
    audio_dir: &Path,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state);

    let arena_routes = Router::new()
        .route("/api/text", post(ArenaController::generate_text))
        .route("/api/synthesize", post(ArenaController::synthesize))
        .route("/api/votes", post(ArenaController::vote))
        .with_state(arena_controller);

    let leaderboard_routes = Router::new()
        .route("/api/leaderboard", get(LeaderboardController::get_leaderboard))
        .with_state(leaderboard_controller);

    Router::new()
        .merge(health_routes)
        .merge(arena_routes)
        .merge(leaderboard_routes)
        .nest_service(AUDIO_ROUTE, ServeDir::new(audio_dir))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
