//! Client-side bearer injection
//!
//! Attaches an already-issued token to every outgoing request. This crate never
//! mints tokens; callers bring their own.

use tonic::metadata::errors::InvalidMetadataValue;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::server::AUTHORIZATION_HEADER;

/// Adds `authorization: Bearer <token>` to every outgoing request
#[derive(Clone)]
pub struct BearerClientInterceptor {
    /// Pre-formatted header value, parsed once at construction
    auth_header: AsciiMetadataValue,
}

impl BearerClientInterceptor {
    /// ## Errors
    ///
    /// Fails if the token contains characters not allowed in metadata.
    /// Valid JWTs (base64url and dots) never do.
    pub fn new(token: impl AsRef<str>) -> Result<Self, InvalidMetadataValue> {
        let auth_header = format!("Bearer {}", token.as_ref()).parse()?;
        Ok(Self { auth_header })
    }
}

impl std::fmt::Debug for BearerClientInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerClientInterceptor").finish_non_exhaustive()
    }
}

impl Interceptor for BearerClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION_HEADER, self.auth_header.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interceptor_injects_header() {
        let mut interceptor = BearerClientInterceptor::new("test-token-123").unwrap();

        let request = interceptor.call(Request::new(())).unwrap();

        let auth = request.metadata().get(AUTHORIZATION_HEADER).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer test-token-123");
    }

    #[test]
    fn test_interceptor_overwrites_existing_header() {
        let mut interceptor = BearerClientInterceptor::new("fresh").unwrap();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(AUTHORIZATION_HEADER, "Bearer stale".parse().unwrap());

        let request = interceptor.call(request).unwrap();

        assert_eq!(
            request.metadata().get_all(AUTHORIZATION_HEADER).iter().count(),
            1
        );
        assert_eq!(
            request
                .metadata()
                .get(AUTHORIZATION_HEADER)
                .unwrap()
                .to_str()
                .unwrap(),
            "Bearer fresh"
        );
    }

    #[test]
    fn test_invalid_token_characters() {
        assert!(BearerClientInterceptor::new("line\nbreak").is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let interceptor = BearerClientInterceptor::new("secret-token").unwrap();
        assert!(!format!("{:?}", interceptor).contains("secret-token"));
    }
}
