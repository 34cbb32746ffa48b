// Integration tests for Interview Service gRPC API
//
// Each test starts the real router (auth interceptor, health, reflection) on an
// ephemeral port and talks to it through the generated client.

use std::net::SocketAddr;

use chrono::Utc;
use grpc_jwt_auth::{BearerClientInterceptor, JwtSecret, UNAUTHENTICATED_MESSAGE};
use interview_service::build_router;
use interview_service::config::JwtSettings;
use interview_service::grpc::interview::v1::interview_service_client::InterviewServiceClient;
use interview_service::grpc::interview::v1::{
    CreateInterviewRequest, GetInterviewRequest, ListInterviewsRequest, WhoAmIRequest,
};
use interview_service::store::InterviewStore;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::{Code, Request};

const SECRET: &str = "s3cr3t";

async fn start_server() -> SocketAddr {
    let jwt = JwtSettings {
        secret: JwtSecret::new(SECRET).unwrap(),
        issuer: None,
        audience: None,
        leeway_secs: 0,
    };
    let router = build_router(&jwt, InterviewStore::new())
        .await
        .expect("build router");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind gRPC port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        router
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("start interview-service");
    });

    addr
}

async fn channel(addr: SocketAddr) -> Channel {
    Channel::from_shared(format!("http://{}", addr))
        .unwrap()
        .connect()
        .await
        .expect("connect to interview-service")
}

fn token(sub: &str, exp_offset: i64) -> String {
    let now = Utc::now().timestamp();
    encode(
        &Header::new(Algorithm::HS256),
        &json!({ "sub": sub, "iat": now, "exp": now + exp_offset }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn authed_client(
    addr: SocketAddr,
    sub: &str,
) -> InterviewServiceClient<
    tonic::service::interceptor::InterceptedService<Channel, BearerClientInterceptor>,
> {
    let interceptor = BearerClientInterceptor::new(token(sub, 3600)).unwrap();
    InterviewServiceClient::with_interceptor(channel(addr).await, interceptor)
}

#[tokio::test]
async fn test_who_am_i_returns_token_subject() {
    let addr = start_server().await;
    let mut client = authed_client(addr, "alice").await;

    let response = client.who_am_i(WhoAmIRequest {}).await.unwrap().into_inner();

    assert_eq!(response.subject, "alice");
    assert!(response.expires_at > Utc::now().timestamp());
    assert!(response.issued_at > 0);
}

#[tokio::test]
async fn test_missing_credential_is_unauthenticated() {
    let addr = start_server().await;
    let mut client = InterviewServiceClient::new(channel(addr).await);

    let status = client.who_am_i(WhoAmIRequest {}).await.unwrap_err();

    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), UNAUTHENTICATED_MESSAGE);
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthenticated() {
    let addr = start_server().await;
    let mut client = InterviewServiceClient::new(channel(addr).await);

    let mut request = Request::new(WhoAmIRequest {});
    request
        .metadata_mut()
        .insert("authorization", "Basic xyz".parse().unwrap());

    let status = client.who_am_i(request).await.unwrap_err();
    assert_eq!(status.code(), Code::Unauthenticated);
}

#[tokio::test]
async fn test_expired_and_forged_tokens_get_identical_errors() {
    let addr = start_server().await;

    let expired = BearerClientInterceptor::new(token("alice", -10)).unwrap();
    let forged = BearerClientInterceptor::new(
        encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "alice" }),
            &EncodingKey::from_secret(b"guessed"),
        )
        .unwrap(),
    )
    .unwrap();

    let mut expired_client = InterviewServiceClient::with_interceptor(channel(addr).await, expired);
    let mut forged_client = InterviewServiceClient::with_interceptor(channel(addr).await, forged);

    let a = expired_client.who_am_i(WhoAmIRequest {}).await.unwrap_err();
    let b = forged_client.who_am_i(WhoAmIRequest {}).await.unwrap_err();

    assert_eq!(a.code(), Code::Unauthenticated);
    assert_eq!(a.code(), b.code());
    assert_eq!(a.message(), b.message());
}

#[tokio::test]
async fn test_create_get_and_list_interviews() {
    let addr = start_server().await;
    let mut alice = authed_client(addr, "alice").await;
    let mut bob = authed_client(addr, "bob").await;

    let later = alice
        .create_interview(CreateInterviewRequest {
            candidate_name: "Grace".into(),
            position: "SRE".into(),
            scheduled_at: 2_000,
        })
        .await
        .unwrap()
        .into_inner();
    let sooner = alice
        .create_interview(CreateInterviewRequest {
            candidate_name: "Linus".into(),
            position: "Kernel".into(),
            scheduled_at: 1_000,
        })
        .await
        .unwrap()
        .into_inner();
    bob.create_interview(CreateInterviewRequest {
        candidate_name: "Ada".into(),
        position: "Compilers".into(),
        scheduled_at: 1_500,
    })
    .await
    .unwrap();

    assert_eq!(later.owner, "alice");

    let fetched = bob
        .get_interview(GetInterviewRequest {
            id: later.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched, later);

    let listed = alice
        .list_interviews(ListInterviewsRequest {})
        .await
        .unwrap()
        .into_inner()
        .interviews;
    let ids: Vec<&str> = listed.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![sooner.id.as_str(), later.id.as_str()]);
}

#[tokio::test]
async fn test_create_interview_validation() {
    let addr = start_server().await;
    let mut client = authed_client(addr, "alice").await;

    let status = client
        .create_interview(CreateInterviewRequest {
            candidate_name: "  ".into(),
            position: "SRE".into(),
            scheduled_at: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .get_interview(GetInterviewRequest {
            id: "not-a-uuid".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = client
        .get_interview(GetInterviewRequest {
            id: uuid::Uuid::new_v4().to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_see_only_their_own_identity() {
    let addr = start_server().await;
    let channel = channel(addr).await;

    let mut handles = Vec::new();
    for i in 0..100 {
        let channel = channel.clone();
        handles.push(tokio::spawn(async move {
            let subject = format!("user-{}", i);
            let interceptor = BearerClientInterceptor::new(token(&subject, 3600)).unwrap();
            let mut client = InterviewServiceClient::with_interceptor(channel, interceptor);

            let seen = client
                .who_am_i(WhoAmIRequest {})
                .await
                .expect("call denied")
                .into_inner()
                .subject;
            (subject, seen)
        }));
    }

    for handle in handles {
        let (expected, seen) = handle.await.unwrap();
        assert_eq!(expected, seen);
    }
}

#[tokio::test]
async fn test_health_check_needs_no_token() {
    use tonic_health::pb::health_check_response::ServingStatus;
    use tonic_health::pb::health_client::HealthClient;
    use tonic_health::pb::HealthCheckRequest;

    let addr = start_server().await;
    let mut client = HealthClient::new(channel(addr).await);

    let response = client
        .check(HealthCheckRequest {
            service: "interview.v1.InterviewService".into(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.status, ServingStatus::Serving as i32);
}
