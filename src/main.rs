use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use nexus::application::ports::SessionRepository;
use nexus::application::services::{AssistantService, ContentFormatter};
use nexus::infrastructure::language::WhatlangIdentifier;
use nexus::infrastructure::llm::LlmClientFactory;
use nexus::infrastructure::observability::{TracingConfig, init_tracing};
use nexus::infrastructure::persistence::{PgSessionRepository, create_pool, run_migrations};
use nexus::infrastructure::text_processing::FileParserFactory;
use nexus::presentation::{AppState, Environment, Settings, StateLimits, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging))?;

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    if settings.database.run_migrations {
        run_migrations(&pool).await?;
    }
    let repository: Arc<dyn SessionRepository> = Arc::new(PgSessionRepository::new(pool));

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    let file_parser = Arc::new(FileParserFactory::create(&settings.upload));
    let formatter = ContentFormatter::load(&settings.formatter.formats_path);

    let state = AppState::new(
        repository,
        llm_client,
        Arc::new(WhatlangIdentifier::new()),
        file_parser,
        formatter,
        StateLimits {
            max_sessions: settings.sessions.max_sessions,
            idle_ttl: Duration::from_secs(settings.sessions.idle_ttl_seconds),
            max_file_size_bytes: settings.upload.max_file_size_bytes,
        },
    );

    spawn_session_sweeper(
        Arc::clone(&state.assistant),
        Duration::from_secs(settings.sessions.sweep_interval_seconds.max(1)),
    );

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn spawn_session_sweeper(assistant: Arc<AssistantService>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let evicted = assistant.evict_idle_sessions();
            tracing::debug!(evicted, active = assistant.session_count(), "Session sweep complete");
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
