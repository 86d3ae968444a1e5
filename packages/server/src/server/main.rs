// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use eventos_core::domains::auth::JwtService;
use eventos_core::kernel::{
    HttpObjectStorage, OpenAIAssistant, ServerDeps, SiteSettings, StripeAdapter,
};
use eventos_core::server::{build_app, build_unconfigured_app, wait_for_shutdown};
use eventos_core::{Config, ConfigStatus};
use sqlx::postgres::PgPoolOptions;
use stripe_client::StripeClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const JWT_ISSUER: &str = "eventos360";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eventos_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Eventos 360 API");

    let (port, app) = match Config::from_env().context("Failed to load configuration")? {
        ConfigStatus::Ready(config) => (config.port, configured_app(*config).await?),
        ConfigStatus::NotConfigured { port, missing } => {
            tracing::error!(
                missing = ?missing,
                "Required configuration is missing; serving 503 on every route"
            );
            (port, build_unconfigured_app(missing))
        }
    };

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn configured_app(config: Config) -> Result<Router> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, JWT_ISSUER.to_string()));
    let mut deps = ServerDeps::new(pool, jwt_service, SiteSettings::from_config(&config));

    match &config.openai_api_key {
        Some(key) => {
            let assistant = OpenAIAssistant::new(key.clone(), config.openai_model.clone())?;
            tracing::info!(model = %assistant.model(), "Assistant enabled");
            deps = deps.with_ai(Arc::new(assistant));
        }
        None => tracing::warn!("OPENAI_API_KEY not set; assistant answers with a fallback"),
    }

    match &config.stripe_secret_key {
        Some(key) => {
            let client = Arc::new(StripeClient::new(key.clone()));
            deps = deps.with_payments(Arc::new(StripeAdapter::new(client)));
            tracing::info!("Checkout enabled");
        }
        None => tracing::warn!("STRIPE_SECRET_KEY not set; checkout is disabled"),
    }

    match (&config.storage_url, &config.storage_service_key) {
        (Some(url), Some(key)) => {
            deps = deps.with_storage(Arc::new(HttpObjectStorage::new(url.clone(), key.clone())));
            tracing::info!("Image uploads enabled");
        }
        _ => tracing::warn!("STORAGE_URL/STORAGE_SERVICE_KEY not set; image uploads are disabled"),
    }

    if config.admin_email.is_none() || config.admin_password_sha256.is_none() {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD_SHA256 not set; admin login is disabled");
    }

    Ok(build_app(deps, &config.allowed_origins))
}
