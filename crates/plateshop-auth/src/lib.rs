//! Admin authentication for Plateshop.
//!
//! Provides:
//! - [`AuthGate`]: Credential login and bearer token checks
//! - [`TokenProvider`]: Trait for issuing/validating tokens, with
//!   [`StaticToken`] and [`JwtTokens`] implementations
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware guarding admin routes
//! - [`AuthenticatedUser`]: Identity inserted into request extensions
//! - [`AuthConfig`]: Credentials and token settings
//! - [`AuthError`]: Auth-specific error types

use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod error;
mod gate;
mod middleware;
mod token;
mod user;

pub use error::AuthError;
pub use gate::AuthGate;
pub use middleware::{AuthLayer, AuthService, FORBIDDEN_MESSAGE};
pub use token::{JwtTokens, StaticToken, TokenProvider};
pub use user::AuthenticatedUser;

/// Default admin username.
pub const DEFAULT_USERNAME: &str = "bajaj_elites";
/// Default admin password.
pub const DEFAULT_PASSWORD: &str = "bajaj0987";
/// Default static admin token.
pub const DEFAULT_TOKEN: &str = "supersecretadmintoken123";

/// How tokens handed out at login are produced and checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    /// One fixed token for the lifetime of the process.
    #[default]
    Static,
    /// HS256-signed, expiring JWTs.
    Jwt,
}

impl FromStr for TokenMode {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(TokenMode::Static),
            "jwt" => Ok(TokenMode::Jwt),
            other => Err(AuthError::Misconfigured(format!(
                "unknown token mode '{other}' (expected 'static' or 'jwt')"
            ))),
        }
    }
}

/// Credentials and token settings for the admin gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
    /// Token returned by login in [`TokenMode::Static`].
    pub token: String,
    /// Token strategy.
    pub mode: TokenMode,
    /// HMAC secret for [`TokenMode::Jwt`].
    pub jwt_secret: Option<String>,
    /// Lifetime of issued JWTs, in seconds.
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            token: DEFAULT_TOKEN.to_string(),
            mode: TokenMode::Static,
            jwt_secret: None,
            token_ttl_secs: 8 * 60 * 60,
        }
    }
}
