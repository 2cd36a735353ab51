//! Tower middleware guarding the admin routes.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with an
//! [`AuthGate`] check. Rejected requests never reach the inner service.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::AuthGate;

/// Body message of every 403 produced by the middleware.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Invalid or missing authentication token";

/// Tower `Layer` that wraps services with bearer token authentication.
#[derive(Clone)]
pub struct AuthLayer {
    gate: Arc<AuthGate>,
}

impl AuthLayer {
    /// Create a new auth layer backed by `gate`.
    pub fn new(gate: Arc<AuthGate>) -> Self {
        Self { gate }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            gate: self.gate.clone(),
        }
    }
}

/// Tower `Service` that validates tokens before forwarding requests.
///
/// On success, inserts [`AuthenticatedUser`](crate::AuthenticatedUser) into
/// request extensions where it's available to downstream handlers.
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    gate: Arc<AuthGate>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let outcome = self.gate.authenticate(authorization_header(&req));

        Box::pin(async move {
            match outcome {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Err(auth_err) => {
                    log::warn!(
                        "Rejected {} {}: {auth_err}",
                        req.method(),
                        req.uri().path()
                    );
                    Ok(forbidden_response())
                }
            }
        })
    }
}

/// Raw `Authorization` header value, if present and valid UTF-8.
fn authorization_header(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Build the 403 JSON response.
fn forbidden_response() -> axum::response::Response {
    let body = serde_json::json!({ "message": FORBIDDEN_MESSAGE });
    (StatusCode::FORBIDDEN, axum::Json(body)).into_response()
}
