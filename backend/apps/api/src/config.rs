//! Server Configuration
//!
//! Everything is read from environment variables (a `.env` file is loaded
//! first). Only `DATABASE_URL` is always required; `JWT_SECRET` is required
//! in release builds.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::mail::SmtpConfig;

/// Minimum HS256 key length in bytes
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
    /// Server-side `statement_timeout` for every pooled connection
    pub database_statement_timeout: Duration,
    /// Verification code store; in-memory when unset
    pub redis_url: Option<String>,
    pub cache_timeout: Duration,
    /// Outgoing mail; codes go to the log outbox when unset
    pub smtp: Option<SmtpConfig>,
    pub auth: AuthConfig,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let env = Env(&lookup);

        let database_url = env.required("DATABASE_URL")?;
        let auth = AuthConfig {
            jwt_secret: jwt_secret(env.get("JWT_SECRET"))?,
            jwt_issuer: env.get("JWT_ISSUER").unwrap_or_else(|| "recruitment-portal".into()),
            token_ttl: Duration::from_secs(env.parse("TOKEN_TTL_SECS", 24 * 3600)?),
            code_ttl: Duration::from_secs(env.parse("VERIFICATION_CODE_TTL_SECS", 10 * 60)?),
            password_pepper: env.get("PASSWORD_PEPPER").map(String::into_bytes),
            admin_emails: list(env.get("ADMIN_EMAILS")),
            signup_requires_code: env.parse("SIGNUP_REQUIRES_CODE", false)?,
        };

        let smtp = match env.get("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: env.parse("SMTP_PORT", 587)?,
                username: env.get("SMTP_USERNAME"),
                password: env.get("SMTP_PASSWORD"),
                from: env.required("MAIL_FROM")?,
                timeout: Duration::from_secs(10),
            }),
            None => None,
        };

        Ok(Self {
            database_url,
            database_max_connections: env.parse("DATABASE_MAX_CONNECTIONS", 5)?,
            database_acquire_timeout: Duration::from_secs(
                env.parse("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?,
            ),
            database_statement_timeout: Duration::from_secs(
                env.parse("DATABASE_STATEMENT_TIMEOUT_SECS", 10)?,
            ),
            redis_url: env.get("REDIS_URL"),
            cache_timeout: Duration::from_millis(env.parse("CACHE_TIMEOUT_MS", 2000)?),
            smtp,
            auth,
            bind_addr: env.parse("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            frontend_origins: match env.get("FRONTEND_ORIGINS") {
                Some(origins) => list(Some(origins)),
                None => vec!["http://localhost:5173".to_string()],
            },
            request_timeout: Duration::from_secs(env.parse("REQUEST_TIMEOUT_SECS", 30)?),
        })
    }
}

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Unset and blank are the same
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> anyhow::Result<String> {
        self.get(key)
            .with_context(|| format!("{key} must be set in environment"))
    }

    fn parse<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("{key} has an invalid value: {raw}")),
            None => Ok(default),
        }
    }
}

fn list(raw: Option<String>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn jwt_secret(raw: Option<String>) -> anyhow::Result<Vec<u8>> {
    match raw {
        Some(secret) if secret.len() >= MIN_JWT_SECRET_LEN => Ok(secret.into_bytes()),
        Some(_) => bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes"),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random key; tokens will not survive restarts");
            Ok(platform::crypto::random_bytes(MIN_JWT_SECRET_LEN))
        }
        None => bail!("JWT_SECRET must be set in production"),
    }
}
