//! Typed handoff of verified claims to gRPC handlers
//!
//! The interceptor stores an [`AuthContext`] in the request extensions, which
//! are keyed by type rather than by string. Only this crate can construct one,
//! so a handler that finds an `AuthContext` knows it came from validation.

use std::sync::Arc;

use tonic::{Request, Status};

use crate::claims::Claims;
use crate::error::UNAUTHENTICATED_MESSAGE;

/// Verified identity for one in-flight call
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Arc<Claims>,
}

impl AuthContext {
    pub(crate) fn new(claims: Claims) -> Self {
        Self {
            claims: Arc::new(claims),
        }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

/// Extension trait for accessing verified claims from gRPC requests
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_auth::ClaimsExt;
/// use tonic::{Request, Response, Status};
///
/// async fn who_am_i(request: Request<()>) -> Result<Response<String>, Status> {
///     let subject = request.subject()?.to_string();
///     Ok(Response::new(subject))
/// }
/// ```
pub trait ClaimsExt {
    /// The context stored by `JwtAuthInterceptor`
    ///
    /// ## Errors
    ///
    /// `Status::unauthenticated` if the interceptor was not attached to the
    /// service (the handler was reached without validation).
    fn auth_context(&self) -> Result<&AuthContext, Status>;

    fn claims(&self) -> Result<&Claims, Status> {
        self.auth_context().map(AuthContext::claims)
    }

    fn subject(&self) -> Result<&str, Status> {
        self.auth_context().map(AuthContext::subject)
    }
}

impl<T> ClaimsExt for Request<T> {
    fn auth_context(&self) -> Result<&AuthContext, Status> {
        self.extensions().get::<AuthContext>().ok_or_else(|| {
            tracing::error!("handler reached without AuthContext; is JwtAuthInterceptor attached?");
            Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
        })
    }
}
