//! Authentication failure taxonomy
//!
//! Every variant collapses to the same `UNAUTHENTICATED` status on the wire.
//! The specific kind only ever reaches the server log.

use thiserror::Error;
use tonic::Status;
use tracing::{debug, warn};

/// Message returned to callers for every authentication failure.
pub const UNAUTHENTICATED_MESSAGE: &str = "invalid auth token";

/// Reason a call was denied by the interceptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No usable `authorization: bearer <token>` entry in the metadata
    #[error("credential missing")]
    CredentialMissing,

    /// Token segments, header or claims could not be decoded
    #[error("malformed token")]
    MalformedToken,

    /// HMAC mismatch, or a header declaring an algorithm other than the pinned one
    #[error("signature invalid")]
    SignatureInvalid,

    /// Signature valid but `exp` has passed
    #[error("token expired")]
    TokenExpired,

    /// A configured claim constraint (`iss`, `aud`, `nbf`) did not hold
    #[error("claim rejected: {0}")]
    ClaimRejected(&'static str),
}

impl AuthError {
    /// Stable, low-cardinality label used as the `reason` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::CredentialMissing => "credential_missing",
            AuthError::MalformedToken => "malformed_token",
            AuthError::SignatureInvalid => "signature_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::ClaimRejected(_) => "claim_rejected",
        }
    }

    /// Convert to gRPC Status for wire protocol
    ///
    /// Uniform across all variants so callers cannot probe which check failed.
    pub fn to_status(&self) -> Status {
        Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
    }

    /// Emit the server-side diagnostic for this failure.
    ///
    /// Signature failures are a potential forgery attempt and go out at WARN;
    /// everything else is ordinary bad input and stays at DEBUG.
    pub fn log(&self) {
        match self {
            AuthError::SignatureInvalid => {
                warn!(reason = self.kind(), "JWT signature verification failed");
            }
            AuthError::ClaimRejected(claim) => {
                debug!(reason = self.kind(), claim = *claim, "JWT validation failed");
            }
            _ => debug!(reason = self.kind(), "JWT validation failed"),
        }
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        err.to_status()
    }
}

/// Errors building a validator from configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("JWT secret must not be empty")]
    Empty,
}
