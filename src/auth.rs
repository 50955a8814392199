// ABOUTME: JWT-based tenant authentication and session management
// ABOUTME: Issues and verifies signed tokens binding a request to one business
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Bookline Contributors

//! # Authentication and Session Management
//!
//! Every protected request carries `Authorization: Bearer <token>`. The token
//! is an HS256 JWT embedding the business (tenant) id and an expiry. The
//! three verification failure kinds (expired, invalid signature, malformed)
//! stay distinguishable all the way to the HTTP response so callers and tests
//! can tell them apart. A missing header is a fourth, separate outcome.

use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: Option<DateTime<Utc>>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not proper JWT format
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => match expired_at {
                Some(at) => write!(
                    f,
                    "JWT token expired at {}",
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => write!(f, "JWT token expired"),
            },
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(err: JwtValidationError) -> Self {
        match &err {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { .. } => Self::auth_invalid(err.to_string()),
            JwtValidationError::TokenMalformed { .. } => Self::auth_malformed(err.to_string()),
        }
    }
}

/// JWT claims binding a session to exactly one business tenant
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Business (tenant) id
    pub sub: String,
    /// Business account email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Resolved identity attached to a request after token verification
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated business (tenant) id
    pub business_id: i64,
    /// Email carried in the token
    pub email: String,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct AuthManager {
    secret: Vec<u8>,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a new auth manager with the given signing secret and token
    /// lifetime in hours.
    #[must_use]
    pub fn new(secret: Vec<u8>, expiry_hours: i64) -> Self {
        Self {
            secret,
            expiry_hours,
        }
    }

    /// Generate a signed session token for a business.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn generate_token(&self, business_id: i64, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: business_id.to_string(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims, distinguishing expiry,
    /// bad signature, and malformation.
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing which check failed.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                JwtValidationError::TokenExpired { expired_at: None }
            }
            jsonwebtoken::errors::ErrorKind::InvalidToken
            | jsonwebtoken::errors::ErrorKind::Base64(_)
            | jsonwebtoken::errors::ErrorKind::Json(_)
            | jsonwebtoken::errors::ErrorKind::Utf8(_) => JwtValidationError::TokenMalformed {
                details: e.to_string(),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: e.to_string(),
            },
        })
    }

    /// Resolve the tenant behind a request from its headers.
    ///
    /// # Errors
    ///
    /// - `AuthRequired` when no `Authorization: Bearer` header is present
    /// - `AuthExpired` / `AuthInvalid` / `AuthMalformed` per token state
    pub fn resolve_context(&self, headers: &HeaderMap) -> AppResult<AuthContext> {
        let header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::auth_required)?;
        let token = extract_bearer_token(header)?;
        let claims = self.validate_token(token)?;
        let business_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::auth_malformed("Invalid business id in token"))?;
        Ok(AuthContext {
            business_id,
            email: claims.email,
        })
    }
}

/// Extract the token portion of a `Bearer <token>` header value.
///
/// # Errors
///
/// Returns `AuthRequired` if the header is not a non-empty Bearer credential.
pub fn extract_bearer_token(header: &str) -> AppResult<&str> {
    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::auth_required)?;
    Ok(token)
}

/// Hash a plaintext password with bcrypt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is unreadable.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
}
