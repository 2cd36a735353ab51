//! Token issuance and validation.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{AuthError, AuthenticatedUser};

/// Issuer claim stamped on every JWT.
const ISSUER: &str = "plateshop";

/// Issues tokens at login and validates them on protected requests.
pub trait TokenProvider: Send + Sync + 'static {
    /// Produce a token for a freshly authenticated subject.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Validate a bearer token and return the identity it represents.
    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// A single process-lifetime token shared by every login.
pub struct StaticToken {
    token: String,
    subject: String,
}

impl StaticToken {
    /// Accept exactly `token`, attributing requests to `subject`.
    pub fn new(token: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            subject: subject.into(),
        }
    }
}

impl TokenProvider for StaticToken {
    fn issue(&self, _subject: &str) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token == self.token {
            Ok(AuthenticatedUser {
                subject: self.subject.clone(),
            })
        } else {
            Err(AuthError::InvalidToken("token does not match".to_string()))
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// HS256-signed tokens that expire after a fixed lifetime.
pub struct JwtTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtTokens {
    /// Sign with `secret`; tokens stay valid for `ttl_secs` seconds.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    fn issue_at(&self, subject: &str, issued_at: i64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            iss: ISSUER.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

impl TokenProvider for JwtTokens {
    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;
        Ok(AuthenticatedUser {
            subject: data.claims.sub,
        })
    }
}
