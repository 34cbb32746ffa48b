/// Interview Service Library
///
/// gRPC interview scheduling API. Every RPC is authenticated by
/// `grpc_jwt_auth::JwtAuthInterceptor` before it reaches a handler.
///
/// ## Modules
///
/// - `app`: Service wiring (auth interceptor, health, reflection)
/// - `config`: Service configuration
/// - `grpc`: gRPC server implementation
/// - `store`: In-memory interview storage
/// - `telemetry`: Tracing subscriber setup
pub mod app;
pub mod config;
pub mod grpc;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use app::build_router;
pub use grpc::InterviewServiceImpl;
