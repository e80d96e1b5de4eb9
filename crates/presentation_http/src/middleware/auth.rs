//! Admin API key authentication middleware
//!
//! Validates the `X-API-Key` header against the configured shared secret
//! using constant-time comparison to prevent timing attacks. With no key
//! configured the layer rejects every request rather than failing open.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::warn;

use crate::error::ApiError;

const API_KEY_HEADER: &str = "x-api-key";

/// Layer that applies admin API key authentication
#[derive(Clone)]
pub struct AdminKeyLayer {
    expected_key: Arc<Option<String>>,
}

impl std::fmt::Debug for AdminKeyLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminKeyLayer")
            .field("configured", &self.expected_key.is_some())
            .finish()
    }
}

impl AdminKeyLayer {
    /// Create the layer from the configured admin key.
    ///
    /// `None` or an empty string means no key is configured.
    #[must_use]
    pub fn new(expected_key: Option<String>) -> Self {
        let expected_key = expected_key.filter(|k| !k.is_empty());
        Self {
            expected_key: Arc::new(expected_key),
        }
    }
}

impl<S> Layer<S> for AdminKeyLayer {
    type Service = AdminKeyAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminKeyAuth {
            inner,
            expected_key: Arc::clone(&self.expected_key),
        }
    }
}

/// Middleware service for admin API key authentication
#[derive(Clone, Debug)]
pub struct AdminKeyAuth<S> {
    inner: S,
    expected_key: Arc<Option<String>>,
}

impl<S> Service<Request> for AdminKeyAuth<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let expected_key = Arc::clone(&self.expected_key);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(expected) = expected_key.as_deref() else {
                warn!("Admin request rejected: no admin key configured");
                return Ok(unauthorized("Admin access is not configured"));
            };

            let presented = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");

            let matches: bool = expected.as_bytes().ct_eq(presented.as_bytes()).into();
            if matches {
                inner.call(req).await
            } else {
                warn!("Failed admin authentication attempt");
                Ok(unauthorized("Invalid or missing API key"))
            }
        })
    }
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
