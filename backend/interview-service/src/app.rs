//! Service wiring shared by the binary and the integration tests

use std::sync::Arc;

use anyhow::{Context, Result};
use grpc_jwt_auth::JwtAuthInterceptor;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tracing::info;

use crate::config::JwtSettings;
use crate::grpc::interview::v1::interview_service_server::InterviewServiceServer;
use crate::grpc::interview::v1::FILE_DESCRIPTOR_SET;
use crate::grpc::InterviewServiceImpl;
use crate::store::InterviewStore;

/// Build the gRPC router
///
/// The interview service sits behind `JwtAuthInterceptor`. Health and
/// reflection stay unauthenticated so probes and tooling keep working.
pub async fn build_router(jwt: &JwtSettings, store: InterviewStore) -> Result<Router> {
    let validator = Arc::new(jwt.build_validator());
    info!(validator = ?validator, "JWT validator configured");
    let interceptor = JwtAuthInterceptor::new(validator);

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<InterviewServiceServer<InterviewServiceImpl>>()
        .await;

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()
        .context("Failed to build gRPC reflection service")?;

    let interview_service =
        InterviewServiceServer::with_interceptor(InterviewServiceImpl::new(store), interceptor);

    Ok(Server::builder()
        .add_service(health_service)
        .add_service(reflection_service)
        .add_service(interview_service))
}
