use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Token kind, carried in the claims so a refresh token cannot be used as an
/// access token and vice versa
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, sent as `Authorization: Bearer`
    Access,
    /// Long-lived, only accepted by `POST /auth/token`
    Refresh,
}

/// JWT claims. The user id is the only identity carried.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub token_type: TokenType,
    /// Issued at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, token_type: TokenType, expiration_hours: i64) -> Self {
        let now = Timestamp::now();
        let exp = now.as_second() + SignedDuration::from_hours(expiration_hours).as_secs();

        Self {
            sub: user_id.to_string(),
            token_type,
            iat: now.as_second(),
            exp,
        }
    }

    /// Parse the subject back into a user id
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs a token of the given kind for `user_id`.
pub fn generate_token(
    user_id: Uuid,
    token_type: TokenType,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, token_type, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Issues both tokens for `user_id`.
///
/// Earlier refresh tokens stay valid until they expire; there is no
/// revocation list.
pub fn generate_token_pair(
    user_id: Uuid,
    secret: &str,
    access_expiration_hours: i64,
    refresh_expiration_hours: i64,
) -> AppResult<TokenPair> {
    Ok(TokenPair {
        access_token: generate_token(user_id, TokenType::Access, secret, access_expiration_hours)?,
        refresh_token: generate_token(
            user_id,
            TokenType::Refresh,
            secret,
            refresh_expiration_hours,
        )?,
    })
}

/// Validates and decodes a JWT token.
///
/// Every failure (bad signature, malformed token, expiry, wrong kind) maps
/// to `AppError::Unauthorized`.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    use jsonwebtoken::errors::ErrorKind;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
        ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
        ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

pub fn validate_refresh_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Refresh))
}
