//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::AuthResult;

/// Credential Store
///
/// Email and phone are unique across users. Implementations enforce this
/// atomically and report a collision as `AuthError::DuplicateUser`, so a
/// check-then-insert race still yields exactly one account.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    async fn exists_by_phone(&self, phone: &Phone) -> AuthResult<bool>;

    /// Persist every mutable field; `UserNotFound` if the row is gone
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
