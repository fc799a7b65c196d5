//! Tests for the Helpernote client against a mock server.
//!
//! These cover the token refresh interceptor, retry behavior and the
//! decoding of each resource's response shape.

use std::sync::Arc;
use std::time::Duration;

use helpernote_client::{
    ClientConfig, ClientError, HelpernoteClient, MemoryTokenStore, RetryPolicy, SessionEvent,
    TokenPair, TokenStore,
};
use helpernote_core::{
    CustomerQuery, CustomerType, JobPostingQuery, MatchingQuery, MatchingStatus, PostingType,
    SettlementStatus, UpdateSettlement,
};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(5))
}

fn client_for(server: &MockServer) -> HelpernoteClient {
    let config = ClientConfig::with_tokens(server.uri(), "old_access", Some("refresh_1".into()))
        .retry(RetryPolicy::none());
    HelpernoteClient::new(config).unwrap()
}

fn auth_response(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "user": { "id": 1, "username": "manager" }
    })
}

fn customer_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 1,
        "name": name,
        "birth_date": null,
        "phone": "010-1234-5678",
        "address": "서울시 강남구",
        "profile_photo_id": null,
        "customer_type": "Employer",
        "created_at": "2024-03-01T09:00:00",
        "updated_at": "2024-03-01T09:00:00"
    })
}

fn job_posting_json(id: i64, customer_id: i64, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customer_id": customer_id,
        "salary": 3000000,
        "description": "주 5일 가사도우미 구합니다",
        "employer_fee_rate": 10,
        "settlement_status": "Unsettled",
        "settlement_amount": null,
        "settlement_memo": null,
        "posting_status": "Published",
        "is_favorite": false,
        "created_at": created_at,
        "updated_at": created_at
    })
}

fn job_seeking_json(id: i64, customer_id: i64, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customer_id": customer_id,
        "desired_salary": 2500000,
        "description": "입주 가능한 간병 일자리 찾습니다",
        "preferred_location": "서울",
        "employee_fee_rate": 5,
        "settlement_status": "Settled",
        "settlement_amount": 120000,
        "settlement_memo": "현금 수령",
        "posting_status": "InProgress",
        "is_favorite": true,
        "created_at": created_at,
        "updated_at": created_at
    })
}

fn matching_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "job_posting_id": 10,
        "job_seeking_posting_id": 20,
        "matched_at": "2024-03-02T10:00:00",
        "agreed_salary": 2800000,
        "employer_fee_rate": 10,
        "employee_fee_rate": 5,
        "employer_fee_amount": null,
        "employee_fee_amount": null,
        "matching_status": status,
        "cancellation_reason": null,
        "cancelled_at": null,
        "cancelled_by": null,
        "completed_at": null,
        "created_at": "2024-03-02T10:00:00",
        "updated_at": "2024-03-02T10:00:00"
    })
}

fn memo_json(id: i64, customer_id: Option<i64>, matching_id: Option<i64>) -> serde_json::Value {
    let content = if matching_id.is_some() {
        "면접 일정 조율"
    } else {
        "메모 내용"
    };
    json!({
        "id": id,
        "customer_id": customer_id,
        "matching_id": matching_id,
        "memo_content": content,
        "created_by": 1,
        "created_at": "2024-03-03T11:00:00",
        "updated_at": "2024-03-03T11:00:00"
    })
}

// =============================================================================
// Client Config Tests
// =============================================================================

mod client_config {
    use super::*;

    #[test]
    fn test_new_with_url() {
        let config = ClientConfig::new("https://api.example.com");
        assert_eq!(config.url, "https://api.example.com");
        assert!(config.tokens.is_none());
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_with_tokens() {
        let config =
            ClientConfig::with_tokens("https://api.example.com", "access", Some("refresh".into()));
        let tokens = config.tokens.unwrap();
        assert_eq!(tokens.access_token, "access");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh"));
    }

    #[test]
    fn test_empty_url_rejected() {
        match HelpernoteClient::new(ClientConfig::new("")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_scheme_required() {
        match HelpernoteClient::new(ClientConfig::new("api.example.com")) {
            Err(ClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://"));
                assert!(msg.contains("https://"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[tokio::test]
    async fn test_session_restored_from_store() {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save(&TokenPair {
                access_token: "saved".into(),
                refresh_token: Some("saved_refresh".into()),
            })
            .await
            .unwrap();

        let client = HelpernoteClient::with_store(ClientConfig::new("http://localhost"), store)
            .await
            .unwrap();
        assert!(client.is_authenticated().await);
        assert_eq!(
            client.session().tokens().await.unwrap().access_token,
            "saved"
        );
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_login_stores_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "manager", "password": "password1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_response("a1", "r1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = HelpernoteClient::new(ClientConfig::new(server.uri())).unwrap();
        assert!(!client.is_authenticated().await);

        let user = client.login("manager", "password1").await.unwrap();
        assert_eq!(user.username, "manager");
        assert!(client.is_authenticated().await);

        let tokens = client.session().tokens().await.unwrap();
        assert_eq!(tokens.access_token, "a1");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));
        assert_eq!(*client.subscribe().borrow(), SessionEvent::Active);
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": "Invalid username or password" })),
            )
            .mount(&server)
            .await;

        let client = HelpernoteClient::new(ClientConfig::new(server.uri())).unwrap();
        let err = client.login("manager", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_request_without_token_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "customers": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let client = HelpernoteClient::new(ClientConfig::new(server.uri())).unwrap();
        let err = client
            .customers()
            .list(&CustomerQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AuthRequired));
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.logout().await;

        assert!(!client.is_authenticated().await);
        assert_eq!(*client.subscribe().borrow(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_logout_does_not_refresh_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("Authorization", "Bearer old_access"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(auth_response("new_access", "refresh_2")),
            )
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.logout().await;

        assert!(!client.is_authenticated().await);
        assert_eq!(*client.subscribe().borrow(), SessionEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_me_accepts_keyed_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("Authorization", "Bearer old_access"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "user": { "id": 7, "username": "manager" } })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let user = client.me().await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "manager");
    }
}

// =============================================================================
// Token Refresh Tests
// =============================================================================

mod token_refresh {
    use super::*;

    #[tokio::test]
    async fn test_refresh_on_401_then_retry_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/customers/1"))
            .and(header("Authorization", "Bearer old_access"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expired" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(body_json(json!({ "refresh_token": "refresh_1" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(auth_response("new_access", "refresh_2")),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/customers/1"))
            .and(header("Authorization", "Bearer new_access"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "customer": customer_json(1, "김영희") })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let customer = client.customers().get(1).await.unwrap();
        assert_eq!(customer.name, "김영희");

        let tokens = client.session().tokens().await.unwrap();
        assert_eq!(tokens.access_token, "new_access");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh_2"));
    }

    #[tokio::test]
    async fn test_refresh_failure_returns_original_error_and_expires() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/customers/1"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expired" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": "Invalid refresh token" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let events = client.subscribe();

        let err = client.customers().get(1).await.unwrap_err();
        match err {
            ClientError::Unauthorized(msg) => assert_eq!(msg, "Token expired"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
        assert!(!client.is_authenticated().await);
        assert_eq!(*events.borrow(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_second_401_is_not_refreshed_again() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "nope" })))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(auth_response("new_access", "refresh_2")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.tags().list().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
        // The refresh itself succeeded, so the session stays usable.
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer old_access"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(auth_response("new_access", "refresh_2"))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .and(header("Authorization", "Bearer new_access"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "tags": [], "total": 0 })),
            )
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tags = client.tags();
        let (a, b, c) = tokio::join!(tags.list(), tags.list(), tags.list());

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert!(c.is_ok());
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_expires_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::with_tokens(server.uri(), "old_access", None)
            .retry(RetryPolicy::none());
        let client = HelpernoteClient::new(config).unwrap();

        let err = client.tags().list().await.unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(*client.subscribe().borrow(), SessionEvent::Expired);
    }
}

// =============================================================================
// Retry Tests
// =============================================================================

mod retry {
    use super::*;

    #[tokio::test]
    async fn test_get_retried_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tags": [{
                    "id": 1,
                    "user_id": 1,
                    "tag_name": "VIP",
                    "tag_color": "#ef4444",
                    "description": null,
                    "created_at": "2024-03-01T09:00:00",
                    "updated_at": "2024-03-01T09:00:00"
                }],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::with_tokens(server.uri(), "old_access", None).retry(fast_retry());
        let client = HelpernoteClient::new(config).unwrap();

        let tags = client.tags().list().await.unwrap();
        assert_eq!(tags.total, 1);
        assert_eq!(tags.items[0].tag_name, "VIP");
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/customers/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "error": "고객을 찾을 수 없습니다" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::with_tokens(server.uri(), "old_access", None).retry(fast_retry());
        let client = HelpernoteClient::new(config).unwrap();

        let err = client.customers().get(99).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(err.user_message(), "고객을 찾을 수 없습니다");
    }

    #[tokio::test]
    async fn test_mutations_are_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/matchings/5/complete"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::with_tokens(server.uri(), "old_access", None).retry(fast_retry());
        let client = HelpernoteClient::new(config).unwrap();

        let err = client.matchings().complete(5).await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 502, .. }));
    }
}

// =============================================================================
// Resource Tests
// =============================================================================

mod resources {
    use super::*;

    #[tokio::test]
    async fn test_list_customers_with_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .and(query_param("customer_type", "Employer"))
            .and(query_param("tag_ids", "1,2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "customers": [customer_json(1, "김영희"), customer_json(2, "이철수")],
                "total": 12
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = CustomerQuery {
            customer_type: Some(CustomerType::Employer),
            tag_ids: vec![1, 2],
            ..Default::default()
        };
        let page = client.customers().list(&query).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[1].name, "이철수");
        assert_eq!(page.items[0].customer_type, CustomerType::Employer);
    }

    #[tokio::test]
    async fn test_list_job_postings_decodes_money() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/job-postings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_postings": [job_posting_json(10, 1, "2024-03-01T09:00:00")],
                "total": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .job_postings()
            .list(&JobPostingQuery::default())
            .await
            .unwrap();

        let posting = &page.items[0];
        assert_eq!(posting.salary, Decimal::from(3_000_000));
        assert_eq!(posting.calculated_fee().unwrap(), Decimal::from(300_000));
    }

    #[tokio::test]
    async fn test_matching_fees() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/matchings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matchings": [matching_json(3, "InProgress")],
                "total": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .matchings()
            .list(&MatchingQuery::default())
            .await
            .unwrap();

        let matching = &page.items[0];
        assert_eq!(matching.matching_status, MatchingStatus::InProgress);
        let fees = matching.fees().unwrap();
        assert_eq!(fees.employer_fee, Decimal::from(280_000));
        assert_eq!(fees.employee_fee, Decimal::from(140_000));
        assert_eq!(fees.total(), Decimal::from(420_000));
    }

    #[tokio::test]
    async fn test_cancel_matching_sends_reason() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/matchings/3/cancel"))
            .and(body_json(json!({ "cancellation_reason": "고객 변심" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "matching": matching_json(3, "Cancelled") })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let matching = client
            .matchings()
            .cancel(3, Some("고객 변심".into()))
            .await
            .unwrap();
        assert_eq!(matching.matching_status, MatchingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_add_customer_memo_sends_owner_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/customers/5/memos"))
            .and(body_json(json!({ "customer_id": 5, "memo_content": "메모 내용" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "memo": memo_json(7, Some(5), None) })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let memo = client.customers().add_memo(5, "메모 내용").await.unwrap();

        assert_eq!(memo.id, 7);
        assert_eq!(memo.customer_id, Some(5));
        assert_eq!(memo.memo_content, "메모 내용");
    }

    #[tokio::test]
    async fn test_list_customer_memos() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/customers/5/memos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memos": [memo_json(7, Some(5), None), memo_json(8, Some(5), None)],
                "total": 2
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let memos = client.customers().memos(5).await.unwrap();

        assert_eq!(memos.total, 2);
        assert_eq!(memos.items[1].id, 8);
    }

    #[tokio::test]
    async fn test_matching_memos() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/matchings/3/memos"))
            .and(body_json(json!({ "matching_id": 3, "memo_content": "면접 일정 조율" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "memo": memo_json(9, None, Some(3)) })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/matchings/3/memos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memos": [memo_json(9, None, Some(3))],
                "total": 1
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let memo = client
            .matchings()
            .add_memo(3, "면접 일정 조율")
            .await
            .unwrap();
        assert_eq!(memo.matching_id, Some(3));

        let memos = client.matchings().memos(3).await.unwrap();
        assert_eq!(memos.total, 1);
        assert_eq!(memos.items[0].memo_content, "면접 일정 조율");
    }

    #[tokio::test]
    async fn test_upload_file_multipart() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/customers/1/files"))
            .and(header("Authorization", "Bearer old_access"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("contract.pdf"))
            .and(body_string_contains("application/pdf"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "file_id": 42,
                "file_path": "customers/1/contract.pdf",
                "file_url": "/files/customers/1/contract.pdf"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contract.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();

        let client = client_for(&server);
        let uploaded = client.files().upload(1, &file).await.unwrap();
        assert_eq!(uploaded.file_id, 42);
        assert_eq!(uploaded.file_path, "customers/1/contract.pdf");
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let err = client
            .files()
            .upload(1, std::path::Path::new("/nonexistent/file.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_profile_photo_rejects_non_images() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, b"hello").unwrap();

        let err = client
            .files()
            .upload_profile_photo(1, &file)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

// =============================================================================
// Settlement Tests
// =============================================================================

mod settlements {
    use super::*;

    async fn mount_settlement_sources(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/job-postings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_postings": [job_posting_json(10, 1, "2024-03-01T09:00:00")],
                "total": 1
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/job-seekings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_seekings": [job_seeking_json(20, 2, "2024-03-05T09:00:00")],
                "total": 1
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "customers": [customer_json(1, "김영희")],
                "total": 1
            })))
            .mount(server)
            .await;

        // Customer 2 is not on the first page of the list.
        Mock::given(method("GET"))
            .and(path("/api/customers/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "customer": customer_json(2, "박민수") })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_merges_and_sorts_newest_first() {
        let server = MockServer::start().await;
        mount_settlement_sources(&server).await;

        let client = client_for(&server);
        let items = client.settlements().list(None).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].posting_type, PostingType::JobSeeking);
        assert_eq!(items[0].customer_name, "박민수");
        assert_eq!(items[0].calculated_fee, Decimal::from(125_000));
        assert_eq!(items[1].posting_type, PostingType::JobPosting);
        assert_eq!(items[1].customer_name, "김영희");
        assert_eq!(items[1].calculated_fee, Decimal::from(300_000));
    }

    #[tokio::test]
    async fn test_filter_by_status() {
        let server = MockServer::start().await;
        mount_settlement_sources(&server).await;

        let client = client_for(&server);
        let items = client
            .settlements()
            .list(Some(SettlementStatus::Unsettled))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 10);
    }

    #[tokio::test]
    async fn test_filter_is_sent_to_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/job-postings"))
            .and(query_param("settlement_status", "Settled"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_postings": [],
                "total": 0
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/job-seekings"))
            .and(query_param("settlement_status", "Settled"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_seekings": [job_seeking_json(20, 1, "2024-03-05T09:00:00")],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "customers": [customer_json(1, "김영희")],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let items = client
            .settlements()
            .list(Some(SettlementStatus::Settled))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].customer_name, "김영희");
        assert_eq!(items[0].settlement_status, SettlementStatus::Settled);
    }

    #[tokio::test]
    async fn test_summary_uses_settled_amount() {
        let server = MockServer::start().await;
        mount_settlement_sources(&server).await;

        let client = client_for(&server);
        let summary = client.settlements().summary().await.unwrap();

        assert_eq!(summary.total_unsettled, 1);
        assert_eq!(summary.total_settled, 1);
        assert_eq!(summary.total_unsettled_amount, Decimal::from(300_000));
        assert_eq!(summary.total_settled_amount, Decimal::from(120_000));
    }

    #[tokio::test]
    async fn test_update_job_seeking_settlement() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/job-seekings/20/settlement"))
            .and(body_json(json!({
                "settlement_status": "Settled",
                "settlement_amount": "120000",
                "settlement_memo": "계좌이체"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let update = UpdateSettlement::settle(Decimal::from(120_000), Some("계좌이체".into()));
        client
            .settlements()
            .update(PostingType::JobSeeking, 20, &update)
            .await
            .unwrap();
    }
}
