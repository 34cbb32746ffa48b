/// gRPC server module for interview-service
///
/// Exports:
/// - InterviewServiceImpl: Main gRPC service implementation
/// - interview: Generated protobuf types from interview_service.proto
pub mod server;

pub use server::interview;
pub use server::InterviewServiceImpl;
