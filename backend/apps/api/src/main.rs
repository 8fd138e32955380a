//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use auth::{AuthAppState, PgUserRepository, auth_router, profile_router};
use axum::{
    Router, http,
    http::{Method, StatusCode, header},
};
use platform::cache::{KeyValueCache, MemoryCache, RedisCache};
use platform::mail::{Mailer, OutboxMailer, SmtpMailer};
use recruitment::{
    PgRecruitmentRepository, RecruitmentAppState, admin_router, application_status_router,
    recruitment_router,
};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,recruitment=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let connect_options = PgConnectOptions::from_str(&config.database_url)?.options([(
        "statement_timeout",
        format!("{}ms", config.database_statement_timeout.as_millis()),
    )]);

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_acquire_timeout)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Verification code store and mail transport; each falls back to an
    // in-process implementation when not configured.
    let app = match (config.redis_url.as_deref(), config.smtp.as_ref()) {
        (Some(url), Some(smtp)) => build_app(
            &config,
            pool,
            RedisCache::connect(url, config.cache_timeout).await?,
            SmtpMailer::new(smtp)?,
        ),
        (Some(url), None) => build_app(
            &config,
            pool,
            RedisCache::connect(url, config.cache_timeout).await?,
            OutboxMailer::new(),
        ),
        (None, Some(smtp)) => build_app(&config, pool, MemoryCache::new(), SmtpMailer::new(smtp)?),
        (None, None) => build_app(&config, pool, MemoryCache::new(), OutboxMailer::new()),
    };

    if config.redis_url.is_none() {
        tracing::warn!("REDIS_URL not set, verification codes are kept in memory");
    }
    if config.smtp.is_none() {
        tracing::warn!("SMTP_HOST not set, outgoing mail is only logged");
    }

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn build_app<C, M>(config: &AppConfig, pool: PgPool, cache: C, mailer: M) -> Router
where
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let users = PgUserRepository::new(pool.clone());

    let auth_state = AuthAppState::new(users.clone(), cache, mailer, config.auth.clone());
    let tokens = auth_state.tokens.clone();
    let recruitment_state = RecruitmentAppState::new(PgRecruitmentRepository::new(pool), users);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    Router::new()
        .nest("/auth", auth_router(auth_state.clone()))
        .nest(
            "/profile",
            profile_router(auth_state)
                .merge(application_status_router(recruitment_state.clone(), tokens.clone())),
        )
        .nest(
            "/recruitment",
            recruitment_router(recruitment_state.clone(), tokens.clone()),
        )
        .nest("/admin", admin_router(recruitment_state, tokens))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
