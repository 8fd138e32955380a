//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, gender::Gender, person_name::PersonName, phone::Phone,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USERS_EMAIL_KEY: &str = "users_email_key";
const USERS_PHONE_KEY: &str = "users_phone_key";

const SELECT_USER: &str = r#"
    SELECT
        user_id,
        name,
        gender,
        email,
        phone,
        password_hash,
        user_role,
        created_at,
        updated_at
    FROM users
"#;

/// PostgreSQL-backed Credential Store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err, USERS_EMAIL_KEY) || is_unique_violation(&err, USERS_PHONE_KEY) {
        AuthError::DuplicateUser
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                gender,
                email,
                phone,
                password_hash,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.gender.code())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email", email.as_str()).await
    }

    async fn find_by_phone(&self, phone: &Phone) -> AuthResult<Option<User>> {
        self.find_one("phone", phone.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_phone(&self, phone: &Phone) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
                .bind(phone.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                gender = $3,
                email = $4,
                phone = $5,
                password_hash = $6,
                user_role = $7,
                updated_at = $8
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.gender.code())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.id())
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    gender: String,
    email: String,
    phone: String,
    password_hash: String,
    user_role: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.user_role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_role: {}", self.user_role)))?;

        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: PersonName::from_db(self.name),
            gender: Gender::from_code(&self.gender).unwrap_or_default(),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            password,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
