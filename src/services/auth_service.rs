//! Registration, login and token rotation.

use std::sync::Arc;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;
use crate::utils::jwt::{TokenPair, generate_token_pair, validate_refresh_token};
use crate::utils::password::{hash_password, verify_password};

/// Sign-up data, password still in clear text
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
}

/// An authenticated user with freshly issued tokens
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    fn issue_tokens(&self, user: &User) -> AppResult<TokenPair> {
        generate_token_pair(
            user.id,
            &self.jwt.secret,
            self.jwt.access_token_expiration,
            self.jwt.refresh_token_expiration,
        )
    }

    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request("Email already exist"));
        }

        let password = hash_password(&registration.password)?;
        let user = self
            .users
            .create(NewUser {
                email: registration.email,
                password,
                first_name: registration.first_name,
                last_name: registration.last_name,
                nickname: registration.nickname,
            })
            .await?;
        tracing::info!(user_id = %user.id, "User registered");

        let tokens = self.issue_tokens(&user)?;
        Ok(AuthSession { user, tokens })
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::bad_request("Email is not exist"))?;

        if !verify_password(password, &user.password)? {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AppError::unauthorized("Password is wrong"));
        }

        let tokens = self.issue_tokens(&user)?;
        Ok(AuthSession { user, tokens })
    }

    /// Trades a refresh token for a new pair. The presented token stays valid
    /// until it expires.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let user_id = validate_refresh_token(refresh_token, &self.jwt.secret)
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected refresh token");
                AppError::unauthorized("Invalid refresh token")
            })?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", "id", user_id))?;

        self.issue_tokens(&user)
    }
}
