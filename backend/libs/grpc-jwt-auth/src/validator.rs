//! HS256 token validation
//!
//! The verification algorithm is pinned server-side. The `alg` a token declares
//! is only ever compared against the pinned value, never used to pick a
//! verifier, so `none`/RS256/HS512 headers cannot downgrade or confuse the check.
//!
//! Validation order matters: structure, then algorithm, then signature, and
//! only then are claims decoded and inspected. No payload field is trusted
//! before the signature has passed.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::secret::JwtSecret;

/// JWT algorithm accepted by this service. Not configurable.
pub const PINNED_ALGORITHM: Algorithm = Algorithm::HS256;

const PINNED_ALGORITHM_NAME: &str = "HS256";

/// Only the part of the JOSE header we need before handing off to jsonwebtoken
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Verifies bearer tokens against the process-wide secret.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    audience: Option<String>,
    leeway_secs: i64,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenValidator")
            .field("algorithm", &PINNED_ALGORITHM)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(secret: &JwtSecret) -> Self {
        let mut validation = Validation::new(PINNED_ALGORITHM);
        // jsonwebtoken only checks structure and signature here; registered
        // claims are checked in `check_claims` against an explicit clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: None,
            audience: None,
            leeway_secs: 0,
        }
    }

    /// Require `iss` to equal `issuer`
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Require `aud` to contain `audience`
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Clock skew tolerated on `exp` and `nbf`
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = i64::try_from(leeway_secs).unwrap_or(i64::MAX);
        self
    }

    /// Validate against the current wall clock
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate as of `now` (Unix seconds)
    ///
    /// Deterministic for a given `(token, now)`.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        check_header(token)?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(classify)?;

        self.check_claims(&token_data.claims, now)?;

        Ok(token_data.claims)
    }

    fn check_claims(&self, claims: &Claims, now: i64) -> Result<(), AuthError> {
        if claims.is_expired_at(now.saturating_sub(self.leeway_secs)) {
            return Err(AuthError::TokenExpired);
        }

        if let Some(nbf) = claims.nbf {
            if nbf > now.saturating_add(self.leeway_secs) {
                return Err(AuthError::ClaimRejected("nbf"));
            }
        }

        if let Some(expected) = self.issuer.as_deref() {
            if claims.iss.as_deref() != Some(expected) {
                return Err(AuthError::ClaimRejected("iss"));
            }
        }

        if let Some(expected) = self.audience.as_deref() {
            let matches = claims.aud.as_ref().is_some_and(|aud| aud.contains(expected));
            if !matches {
                return Err(AuthError::ClaimRejected("aud"));
            }
        }

        Ok(())
    }
}

/// Structural check plus algorithm pinning, before any cryptography runs.
fn check_header(token: &str) -> Result<(), AuthError> {
    let mut segments = token.split('.');
    let header_segment = segments.next().ok_or(AuthError::MalformedToken)?;
    if segments.count() != 2 {
        return Err(AuthError::MalformedToken);
    }

    let raw = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| AuthError::MalformedToken)?;
    let header: RawHeader =
        serde_json::from_slice(&raw).map_err(|_| AuthError::MalformedToken)?;

    if header.alg != PINNED_ALGORITHM_NAME {
        return Err(AuthError::SignatureInvalid);
    }

    Ok(())
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::MalformedToken,
    }
}
