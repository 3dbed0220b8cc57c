//! Access token handling.
//!
//! Users sign in with the identity provider, which issues an HS256 JWT. The server shares the signing secret and only
//! ever validates these tokens. [`TokenIssuer`] exists so that tests and local development can mint tokens of their
//! own.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::HeaderMap, FromRequest, HttpMessage, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use pcl_engine::db_types::{UserId, UserRole};
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

pub const ACCESS_TOKEN_HEADER: &str = "pcl_access_token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: UserId,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    pub exp: i64,
}

impl JwtClaims {
    /// Admins pass every role check.
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.role == UserRole::Admin || roles.contains(&self.role)
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned();
        ready(claims.ok_or_else(|| {
            warn!("🔐️ No access token claims were found for {}", req.path());
            ServerError::AuthenticationError(AuthError::Unauthorized)
        }))
    }
}

/// Reads the access token from `Authorization: Bearer <token>`, falling back to the `pcl_access_token` header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    bearer
        .or_else(|| headers.get(ACCESS_TOKEN_HEADER).and_then(|v| v.to_str().ok()).map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
}

#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        // The identity provider sets `aud` to its own project, which means nothing to this server
        validation.validate_aud = false;
        Self { key, validation }
    }

    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;
        trace!("🔐️ Access token validated for {}", data.claims.sub);
        Ok(data.claims)
    }
}

pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { key: EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes()) }
    }

    /// Issues an access token for the given user. Tokens are valid for a day unless `duration` says otherwise.
    pub fn issue_token(
        &self,
        user_id: &UserId,
        email: Option<String>,
        role: UserRole,
        duration: Option<Duration>,
    ) -> Result<String, AuthError> {
        let expiry = Utc::now() + duration.unwrap_or_else(|| Duration::hours(24));
        let claims = JwtClaims { sub: user_id.clone(), email, role, exp: expiry.timestamp() };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}
