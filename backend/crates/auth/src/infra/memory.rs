//! In-memory Credential Store
//!
//! Same contract as the PostgreSQL store, including atomic email/phone
//! uniqueness. Used by local runs without a database and by tests.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn collides(existing: &User, candidate: &User) -> bool {
    existing.user_id != candidate.user_id
        && (existing.email == candidate.email || existing.phone == candidate.phone)
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.user_id) || users.values().any(|u| collides(u, user)) {
            return Err(AuthError::DuplicateUser);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.phone == phone)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }

    async fn exists_by_phone(&self, phone: &Phone) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.phone == phone))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if users.values().any(|u| collides(u, user)) {
            return Err(AuthError::DuplicateUser);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.users.write().await.remove(user_id).is_some())
    }
}
