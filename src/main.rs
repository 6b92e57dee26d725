use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use literexia::{
    SqliteAssessmentStore, SqliteIdentityStore,
    api::{AppState, create_router},
    auth::JwtVerifier,
    config::{Config, LoggingConfig},
    result_service::ResultService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logging first so the rest of startup is traced
    let logging_config = LoggingConfig::from_env()?;
    let _guard = setup_logging(&logging_config)?;

    let config = Config::from_env()?;
    config.validate()?;

    info!("Starting Literexia assessment server...");

    // Identity and assessment data live in two independent stores
    let identity_store = SqliteIdentityStore::new(&config.identity_database.url).await?;
    info!("Identity store initialized successfully");

    let assessment_store = SqliteAssessmentStore::new(&config.assessment_database.url).await?;
    info!("Assessment store initialized successfully");

    let result_service = ResultService::new(
        Arc::new(identity_store),
        Arc::new(assessment_store),
        config.assessment.default_assessment_id.clone(),
    );

    let state = AppState {
        result_service,
        token_verifier: Arc::new(JwtVerifier::new(&config.auth.jwt_secret)),
    };

    let app = create_router(state).layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn setup_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::fmt;

    // Configure log level from environment variable
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    // Set up file appender with daily rotation
    let mut guard = None;
    let file_layer = if config.file_enabled {
        std::fs::create_dir_all(&config.log_directory).unwrap_or_else(|e| {
            eprintln!("Warning: Could not create logs directory: {}", e);
        });

        let file_appender = tracing_appender::rolling::daily(&config.log_directory, "literexia.log");
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        // No ANSI colors for files
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking_file),
        )
    } else {
        None
    };

    let console_layer = if config.console_enabled {
        Some(fmt::layer().with_target(true).with_ansi(true))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!(
        "Logging initialized - file output: {}, console output: {}",
        config.file_enabled, config.console_enabled
    );

    Ok(guard)
}
