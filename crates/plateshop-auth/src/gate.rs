//! Credential login and bearer-token checks.

use std::sync::Arc;

use crate::{
    AuthConfig, AuthError, AuthenticatedUser, JwtTokens, StaticToken, TokenMode, TokenProvider,
};

/// The admin gate: one username/password pair and a token provider.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
    provider: Arc<dyn TokenProvider>,
}

impl AuthGate {
    /// Create a gate from explicit credentials and a token provider.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            provider,
        }
    }

    /// Build a gate from configuration.
    ///
    /// JWT mode requires a non-empty `jwt_secret`.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let provider: Arc<dyn TokenProvider> = match config.mode {
            TokenMode::Static => {
                if config.token.is_empty() {
                    return Err(AuthError::Misconfigured(
                        "static token must not be empty".to_string(),
                    ));
                }
                Arc::new(StaticToken::new(&config.token, &config.username))
            }
            TokenMode::Jwt => {
                let secret = config
                    .jwt_secret
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        AuthError::Misconfigured("jwt mode requires jwt_secret".to_string())
                    })?;
                Arc::new(JwtTokens::new(secret.as_bytes(), config.token_ttl_secs))
            }
        };
        Ok(Self::new(&config.username, &config.password, provider))
    }

    /// Exchange credentials for a token.
    ///
    /// Both values must match exactly; a mismatch in either reports
    /// [`AuthError::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if username == self.username && password == self.password {
            self.provider.issue(username)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Check an `Authorization` header value of the form `Bearer <token>`.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;
        self.provider.validate(token)
    }
}
