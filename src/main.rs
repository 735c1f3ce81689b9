use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_arena_backend::controllers::{
    arena::ArenaController, health::HealthState, leaderboard::LeaderboardController,
};
use tts_arena_backend::domain::leaderboard::LeaderboardService;
use tts_arena_backend::domain::provider::{ProviderIdentity, ProviderSelector};
use tts_arena_backend::domain::synthesis::{ProviderRegistry, SynthesisService};
use tts_arena_backend::domain::text::TextService;
use tts_arena_backend::domain::voting::VotingService;
use tts_arena_backend::infrastructure::audio::AudioStore;
use tts_arena_backend::infrastructure::config::{Config, LogFormat};
use tts_arena_backend::infrastructure::db::{
    check_connection, create_pool, run_migrations, SessionFactory,
};
use tts_arena_backend::infrastructure::http::{build_router, start_http_server};
use tts_arena_backend::infrastructure::repositories::{
    openai_tts_repository::OPENAI_TTS_MODEL, AnthropicTextRepository, ElevenLabsTtsRepository,
    HumeTtsRepository, OpenAiTtsRepository, PgVoteRepository, TextGenerationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TTS Arena Backend on {}:{}",
        config.host,
        config.port
    );

    // Storage: a real pool when DATABASE_URL is set, otherwise null mode (development only)
    let pool = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            check_connection(&pool).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connection verified and migrations applied");
            Some(Arc::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, votes will be logged but not persisted");
            None
        }
    };

    let sessions = match &pool {
        Some(pool) => SessionFactory::real(Arc::new(PgVoteRepository::new(pool.clone()))),
        None => SessionFactory::null(),
    };

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Audio storage and HTTP clients
    let audio_store = Arc::new(AudioStore::new(&config.audio_dir));
    audio_store.ensure_dir().await?;
    let http_client = reqwest::Client::new();

    // 2. Provider repositories, registered only when credentials are present
    tracing::info!("Instantiating provider repositories...");
    let mut registry = ProviderRegistry::new();
    if let Some(api_key) = &config.hume_api_key {
        registry = registry.register(
            ProviderIdentity::HumeAi,
            Arc::new(HumeTtsRepository::new(
                http_client.clone(),
                api_key.clone(),
                audio_store.clone(),
            )),
        );
    }
    if let Some(api_key) = &config.openai_api_key {
        registry = registry.register(
            ProviderIdentity::OpenAi,
            Arc::new(OpenAiTtsRepository::new(
                http_client.clone(),
                api_key.clone(),
                OPENAI_TTS_MODEL.to_string(),
                audio_store.clone(),
            )),
        );
    }
    if let Some(api_key) = &config.elevenlabs_api_key {
        registry = registry.register(
            ProviderIdentity::ElevenLabs,
            Arc::new(ElevenLabsTtsRepository::new(
                http_client.clone(),
                api_key.clone(),
                audio_store.clone(),
            )),
        );
    }

    for provider in ProviderIdentity::ALL {
        if !registry.is_registered(provider) {
            tracing::warn!(provider = %provider, "No API key configured, provider unavailable");
        }
    }

    let text_generator: Option<Arc<dyn TextGenerationRepository>> =
        config.anthropic_api_key.as_ref().map(|api_key| {
            Arc::new(AnthropicTextRepository::new(http_client.clone(), api_key.clone()))
                as Arc<dyn TextGenerationRepository>
        });

    let registry = Arc::new(registry);

    // 3. Instantiate services
    tracing::info!("Instantiating services...");
    let text_service = Arc::new(TextService::new(text_generator));
    let synthesis_service = Arc::new(SynthesisService::new(
        Arc::new(ProviderSelector::standard()),
        registry.clone(),
    ));
    let voting_service = Arc::new(VotingService::new(sessions.clone()));
    let leaderboard_service = Arc::new(LeaderboardService::new(
        sessions,
        Duration::from_secs(config.leaderboard_refresh_secs),
    ));

    // 4. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let arena_controller = Arc::new(ArenaController::new(
        text_service,
        synthesis_service,
        voting_service,
    ));
    let leaderboard_controller = Arc::new(LeaderboardController::new(leaderboard_service));

    let health_state = HealthState {
        pool,
        providers: registry.registered(),
    };

    let app = build_router(
        health_state,
        arena_controller,
        leaderboard_controller,
        audio_store.dir(),
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tts_arena_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
