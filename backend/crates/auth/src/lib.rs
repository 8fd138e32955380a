//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Signup with name, gender, email, phone and password
//! - Login by email, answered with a stateless HS256 bearer token
//! - Password reset through a mailed one-time code
//! - Profile read/update and account deletion behind the bearer middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Verification codes are single use and consumed atomically
//! - Tokens carry the role; admin routes check it in middleware

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{AuthenticatedUser, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::AuthAppState;
pub use presentation::router::{auth_router, profile_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
