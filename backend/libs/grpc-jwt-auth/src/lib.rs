//! Bearer JWT Authentication for gRPC Services
//!
//! Every unary call is authenticated before it reaches a handler: the bearer
//! token is pulled from metadata, verified against the shared HMAC secret, and
//! the resulting claims are attached to the request as a typed [`AuthContext`].
//!
//! ## Core Components
//!
//! - **TokenValidator**: HS256-pinned signature and claims verification
//! - **JwtAuthInterceptor**: `tonic` interceptor, validate-or-abort per call
//! - **ClaimsExt**: request extension trait for reading verified claims
//! - **BearerClientInterceptor**: attaches an existing token to outgoing calls
//!
//! ## Server Side
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grpc_jwt_auth::{ClaimsExt, JwtAuthInterceptor, JwtSecret, TokenValidator};
//! use tonic::{Request, Response, Status};
//!
//! # fn setup() -> Result<(), Box<dyn std::error::Error>> {
//! let secret = JwtSecret::new("s3cr3t")?;
//! let interceptor = JwtAuthInterceptor::new(Arc::new(TokenValidator::new(&secret)));
//! // let service = InterviewServiceServer::with_interceptor(service, interceptor);
//! # Ok(())
//! # }
//!
//! async fn handler(request: Request<()>) -> Result<Response<()>, Status> {
//!     let claims = request.claims()?;
//!     tracing::info!(sub = %claims.sub, "handling call");
//!     Ok(Response::new(()))
//! }
//! ```
//!
//! ## Security Guarantees
//!
//! - HS256 only; the token header cannot select the algorithm
//! - Claims are decoded only after the signature checks out
//! - `exp` at or before now = rejected
//! - Every failure = `Status::unauthenticated("invalid auth token")`, reason logged server-side only

mod claims;
mod client;
mod error;
mod extensions;
mod secret;
mod server;
mod validator;

pub use claims::{Audience, Claims};
pub use client::BearerClientInterceptor;
pub use error::{AuthError, SecretError, UNAUTHENTICATED_MESSAGE};
pub use extensions::{AuthContext, ClaimsExt};
pub use secret::JwtSecret;
pub use server::{extract_bearer, JwtAuthInterceptor, AUTHORIZATION_HEADER, BEARER_SCHEME};
pub use validator::{TokenValidator, PINNED_ALGORITHM};

// Re-export tonic Status for convenience
pub use tonic::Status;
