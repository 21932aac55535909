use crate::auth::session::{SessionCredential, SessionStore};
use crate::config::AuthConfig;
use crate::db::{User, UserDirectory};
use crate::error::{AppError, AuthError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// The verified caller, attached to a request once the gate lets it through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

pub struct AuthService {
    users: UserDirectory,
    sessions: SessionStore,
    jwt_secret: String,
    token_lifetime: Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: UserDirectory,
        sessions: SessionStore,
        jwt_secret: String,
        token_lifetime: Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            sessions,
            jwt_secret,
            token_lifetime,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &AuthConfig, users: UserDirectory, sessions: SessionStore) -> Self {
        Self::new(
            users,
            sessions,
            config.jwt_secret.clone(),
            Duration::hours(config.token_expiry_hours),
            config.bcrypt_cost,
        )
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required".into(),
            ));
        }

        if self.users.exists(username).await {
            return Err(AuthError::UserExists(username.to_string()).into());
        }

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        self.users
            .insert(User::new(username.to_string(), password_hash))
            .await?;

        info!("Registered user {}", username);
        Ok(())
    }

    /// Checks the password, issues a token and stores it as the active session.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionCredential, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Username and password are required for login".into(),
            ));
        }

        let user = self
            .users
            .get(username)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        if !valid {
            warn!("Failed login attempt for user: {}", username);
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued_at = Utc::now();
        let token = self.issue_token_at(&user.username, issued_at)?;
        let session = SessionCredential::new(
            user.username,
            token,
            issued_at,
            issued_at + self.token_lifetime,
        );
        self.sessions.insert(session.clone()).await;

        Ok(session)
    }

    pub async fn logout(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).await.is_some()
    }

    /// Resolves the caller from the session first and the bearer token second.
    /// A credential that fails verification also drops the session it came from.
    pub async fn authorize(
        &self,
        session_id: Option<&str>,
        bearer: Option<&str>,
    ) -> Result<Identity, AppError> {
        let session = match session_id {
            Some(id) => self.sessions.get(id).await,
            None => None,
        };

        let token = match (&session, bearer) {
            (Some(session), _) => session.token.clone(),
            (None, Some(token)) => token.to_string(),
            (None, None) => return Err(AuthError::NotAuthenticated.into()),
        };

        match self.verify_token(&token) {
            Ok(claims) => Ok(Identity { username: claims.username }),
            Err(e) => {
                warn!("Rejected credential: {}", e);
                if let Some(session) = session {
                    self.sessions.remove(&session.session_id).await;
                }
                Err(e)
            }
        }
    }

    /// Signs a token as if it had been issued at `issued_at`.
    pub fn issue_token_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            username: username.to_string(),
            exp: (issued_at + self.token_lifetime).timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired.into(),
            _ => AuthError::InvalidToken.into(),
        })
    }
}
