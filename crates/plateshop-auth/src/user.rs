//! Authenticated admin identity.

/// The admin identity behind a validated token.
///
/// Stored in HTTP request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Who the token was issued to.
    pub subject: String,
}
