//! Server-side JWT Interceptor
//!
//! Extracts the bearer token from incoming gRPC metadata, validates it and
//! stores the verified claims in request extensions.

use std::sync::Arc;

use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::debug;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::extensions::AuthContext;
use crate::validator::TokenValidator;

/// Metadata key carrying the credential
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Expected authorization scheme, matched case-insensitively
pub const BEARER_SCHEME: &str = "bearer";

/// Extract the token from `authorization: bearer <token>`
///
/// Absent, repeated, non-ASCII, wrong-scheme and empty-token headers all fail
/// with `CredentialMissing`.
pub fn extract_bearer(metadata: &MetadataMap) -> Result<&str, AuthError> {
    if metadata.get_all(AUTHORIZATION_HEADER).iter().count() > 1 {
        return Err(AuthError::CredentialMissing);
    }
    let value = metadata
        .get(AUTHORIZATION_HEADER)
        .ok_or(AuthError::CredentialMissing)?;

    let header = value.to_str().map_err(|_| AuthError::CredentialMissing)?;
    let (scheme, token) = header
        .split_once(' ')
        .ok_or(AuthError::CredentialMissing)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::CredentialMissing);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::CredentialMissing);
    }

    Ok(token)
}

/// Server-side interceptor that validates bearer JWTs
///
/// Per call:
/// 1. Extracts the `authorization` header from gRPC metadata
/// 2. Validates the token with the shared [`TokenValidator`]
/// 3. Stores an [`AuthContext`] in request extensions for handler access
///
/// Every failure returns the same `Status::unauthenticated`; the reason is
/// only logged. Cloning is cheap, the validator is shared.
///
/// ## Usage
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use grpc_jwt_auth::{JwtAuthInterceptor, JwtSecret, TokenValidator};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = JwtSecret::new(std::env::var("JWT_SECRET")?)?;
/// let interceptor = JwtAuthInterceptor::new(Arc::new(TokenValidator::new(&secret)));
///
/// // let service = InterviewServiceServer::with_interceptor(service, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuthInterceptor {
    validator: Arc<TokenValidator>,
}

impl JwtAuthInterceptor {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }

    /// Credential extraction followed by validation
    pub fn authenticate(&self, metadata: &MetadataMap) -> Result<Claims, AuthError> {
        let token = extract_bearer(metadata)?;
        self.validator.validate(token)
    }
}

impl Interceptor for JwtAuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let claims = self.authenticate(request.metadata()).map_err(|err| {
            err.log();
            err.to_status()
        })?;

        debug!(sub = %claims.sub, "JWT validated successfully");

        // insert replaces any earlier value, so exactly one context reaches the handler
        request.extensions_mut().insert(AuthContext::new(claims));

        Ok(request)
    }
}
