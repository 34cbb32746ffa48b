/// gRPC server implementation for interview-service
///
/// Implements all RPCs from interview_service.proto:
/// - Identity: WhoAmI
/// - Interviews: CreateInterview, GetInterview, ListInterviews
///
/// Every handler runs behind `JwtAuthInterceptor` and reads the caller from
/// the request's `AuthContext`; none of them look at raw metadata.
use grpc_jwt_auth::ClaimsExt;
use tonic::{Request, Response, Status};
use tracing::info;
use uuid::Uuid;

use crate::store::{InterviewRecord, InterviewStore};

// Import generated protobuf types
pub mod interview {
    pub mod v1 {
        tonic::include_proto!("interview.v1");

        pub const FILE_DESCRIPTOR_SET: &[u8] =
            tonic::include_file_descriptor_set!("interview_descriptor");
    }
}

use interview::v1::interview_service_server::InterviewService;
use interview::v1::*;

impl From<InterviewRecord> for Interview {
    fn from(record: InterviewRecord) -> Self {
        Self {
            id: record.id.to_string(),
            owner: record.owner,
            candidate_name: record.candidate_name,
            position: record.position,
            scheduled_at: record.scheduled_at,
            created_at: record.created_at,
        }
    }
}

/// Interview service gRPC server
#[derive(Debug, Clone, Default)]
pub struct InterviewServiceImpl {
    store: InterviewStore,
}

impl InterviewServiceImpl {
    pub fn new(store: InterviewStore) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl InterviewService for InterviewServiceImpl {
    async fn who_am_i(
        &self,
        request: Request<WhoAmIRequest>,
    ) -> Result<Response<WhoAmIResponse>, Status> {
        let claims = request.claims()?;

        Ok(Response::new(WhoAmIResponse {
            subject: claims.sub.clone(),
            issued_at: claims.iat.unwrap_or_default(),
            expires_at: claims.exp.unwrap_or_default(),
        }))
    }

    async fn create_interview(
        &self,
        request: Request<CreateInterviewRequest>,
    ) -> Result<Response<Interview>, Status> {
        let owner = request.subject()?.to_string();
        let req = request.into_inner();

        if req.candidate_name.trim().is_empty() {
            return Err(Status::invalid_argument("candidate_name is required"));
        }
        if req.position.trim().is_empty() {
            return Err(Status::invalid_argument("position is required"));
        }

        let record = self
            .store
            .create(&owner, req.candidate_name, req.position, req.scheduled_at);

        info!(interview_id = %record.id, owner = %owner, "Interview created");

        Ok(Response::new(record.into()))
    }

    async fn get_interview(
        &self,
        request: Request<GetInterviewRequest>,
    ) -> Result<Response<Interview>, Status> {
        request.auth_context()?;
        let req = request.into_inner();

        let id = Uuid::parse_str(&req.id)
            .map_err(|_| Status::invalid_argument("id must be a UUID"))?;

        self.store
            .get(&id)
            .map(|record| Response::new(record.into()))
            .ok_or_else(|| Status::not_found("Interview not found"))
    }

    async fn list_interviews(
        &self,
        request: Request<ListInterviewsRequest>,
    ) -> Result<Response<ListInterviewsResponse>, Status> {
        let owner = request.subject()?;

        let interviews = self
            .store
            .list_for_owner(owner)
            .into_iter()
            .map(Interview::from)
            .collect();

        Ok(Response::new(ListInterviewsResponse { interviews }))
    }
}
