//! Auth-specific error types.

/// Errors that can occur during login or token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header or no `Bearer ` prefix.
    #[error("missing authentication token")]
    MissingToken,

    /// Token did not match or failed verification.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Username/password pair rejected. Does not say which field was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token could not be produced.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Auth settings are unusable.
    #[error("auth misconfigured: {0}")]
    Misconfigured(String),
}

impl AuthError {
    /// Whether this error is the caller's fault (vs. a server-side problem).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::Expired
                | AuthError::InvalidCredentials
        )
    }
}
