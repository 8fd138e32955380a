//! Token Service
//!
//! Issues and validates stateless HS256 session tokens. Nothing is stored
//! server-side; a token is valid while its signature checks out and `exp`
//! has not passed. There is no revocation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    /// Unique token id
    pub jti: Uuid,
}

/// Caller identity established from a valid token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

pub struct TokenService {
    keys: Option<Keys>,
    validation: Validation,
    issuer: String,
    ttl: ChronoDuration,
}

impl TokenService {
    /// Build from config. An empty secret leaves the service unable to sign.
    pub fn new(config: &AuthConfig) -> Self {
        let keys = (!config.jwt_secret.is_empty()).then(|| Keys {
            encoding: EncodingKey::from_secret(&config.jwt_secret),
            decoding: DecodingKey::from_secret(&config.jwt_secret),
        });

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let ttl = ChronoDuration::from_std(config.token_ttl).unwrap_or(ChronoDuration::hours(24));

        Self {
            keys,
            validation,
            issuer: config.jwt_issuer.clone(),
            ttl,
        }
    }

    /// Sign a token for `user_id` carrying `role`
    pub fn issue(&self, user_id: UserId, role: UserRole) -> AuthResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: user_id.into_uuid(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4(),
        };

        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }

    /// Check signature, issuer and expiry, then return the caller identity
    pub fn validate(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let claims = self.decode(token)?;
        Ok(AuthenticatedUser {
            user_id: UserId::from_uuid(claims.sub),
            role: claims.role,
        })
    }

    pub fn decode(&self, token: &str) -> AuthResult<Claims> {
        let keys = self.keys.as_ref().ok_or(AuthError::InvalidToken)?;

        decode::<Claims>(token, &keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                JwtErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::InvalidToken,
            })
    }

    fn sign(&self, claims: &Claims) -> AuthResult<String> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| AuthError::SigningError("no signing key configured".to_string()))?;

        encode(&Header::new(Algorithm::HS256), claims, &keys.encoding)
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }
}
