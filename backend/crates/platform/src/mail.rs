//! Outgoing mail
//!
//! [`SmtpMailer`] talks to a real relay. [`OutboxMailer`] keeps messages in
//! memory and logs them, which is what local development and tests use.

use std::sync::Arc;
use std::time::Duration;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::sync::Mutex;

pub type MailResult<T> = Result<T, MailError>;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: MailMessage) -> MailResult<()>;
}

/// SMTP relay settings
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from", &self.from)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// STARTTLS SMTP mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> MailResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .timeout(Some(config.timeout));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> MailResult<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(message.to.parse()?)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)?;

        self.transport.send(email).await?;
        Ok(())
    }
}

/// In-memory mailer
///
/// Clones share the same outbox.
#[derive(Clone, Default)]
pub struct OutboxMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, oldest first
    pub async fn messages(&self) -> Vec<MailMessage> {
        self.sent.lock().await.clone()
    }

    /// Most recent message addressed to `to`
    pub async fn last_to(&self, to: &str) -> Option<MailMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

impl Mailer for OutboxMailer {
    async fn send(&self, message: MailMessage) -> MailResult<()> {
        tracing::info!(to = %message.to, subject = %message.subject, "Mail queued in outbox");
        self.sent.lock().await.push(message);
        Ok(())
    }
}
