//! `KakaoClient` collaborators against a local `wiremock` server.

mod common;

use std::fs;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{temp_dir, test_config};
use somoim_watch::config::RecipientSource;
use somoim_watch::credentials::{Credential, CredentialStore, Credentials, FileStore};
use somoim_watch::decide::OpenSchedule;
use somoim_watch::error::AppError;
use somoim_watch::fetch::build_client;
use somoim_watch::kakao::KakaoClient;
use somoim_watch::models::{Capacity, Schedule};

fn client_for(server: &MockServer) -> (KakaoClient, FileStore) {
    let dir = temp_dir();
    let config = test_config(&server.uri(), &dir, RecipientSource::List);
    let http = build_client(config.http_timeout).expect("failed to build test client");
    (KakaoClient::new(http, config.kakao), FileStore::new(dir))
}

fn schedule() -> Schedule {
    Schedule {
        title: "정기모임 #3".into(),
        date: "6월 15일".into(),
        place: "Place A".into(),
        cost: "10,000원".into(),
        people: Capacity { current: 8, max: 10 },
    }
}

// ---------------------------------------------------------------------------
// Token refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_without_refresh_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    assert!(!kakao.refresh(&store).await.unwrap());
}

#[tokio::test]
async fn refresh_writes_only_returned_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("client_id=test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "token_type": "bearer",
            "expires_in": 21599
        })))
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    store.set(Credential::RefreshToken, "refresh-1").unwrap();

    assert!(kakao.refresh(&store).await.unwrap());
    let creds = Credentials::load(&store);
    assert_eq!(creds.access_token.as_deref(), Some("access-2"));
    assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn refresh_rotates_refresh_token_when_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "refresh_token": "refresh-2"
        })))
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    store.set(Credential::RefreshToken, "refresh-1").unwrap();
    kakao.refresh(&store).await.unwrap();

    assert_eq!(store.get(Credential::RefreshToken).as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn repeated_refresh_with_same_answer_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "same"})))
        .expect(2)
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    store.set(Credential::RefreshToken, "refresh-1").unwrap();

    kakao.refresh(&store).await.unwrap();
    let first = (
        fs::read_to_string(store.dir().join("access_token")).unwrap(),
        fs::read_to_string(store.dir().join("refresh_token")).unwrap(),
    );
    kakao.refresh(&store).await.unwrap();
    let second = (
        fs::read_to_string(store.dir().join("access_token")).unwrap(),
        fs::read_to_string(store.dir().join("refresh_token")).unwrap(),
    );

    assert_eq!(first, second);
}

#[tokio::test]
async fn rejected_refresh_is_a_token_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    store.set(Credential::RefreshToken, "revoked").unwrap();
    store.set(Credential::AccessToken, "old").unwrap();

    let err = kakao.refresh(&store).await.unwrap_err();
    assert!(matches!(err, AppError::TokenError(_)), "got {err:?}");
    assert_eq!(store.get(Credential::AccessToken).as_deref(), Some("old"));
}

// ---------------------------------------------------------------------------
// Authorization code exchange
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authorize_requires_code_file() {
    let server = MockServer::start().await;
    let (kakao, store) = client_for(&server);

    let err = kakao.authorize(&store).await.unwrap_err();
    assert!(matches!(err, AppError::MissingCredential("code")), "got {err:?}");
}

#[tokio::test]
async fn authorize_exchanges_code_and_saves_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc123"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Fexample.com%2Foauth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (kakao, store) = client_for(&server);
    store.set(Credential::Code, "abc123").unwrap();

    let tokens = kakao.authorize(&store).await.unwrap();
    assert_eq!(tokens.access_token.as_deref(), Some("access-1"));
    assert_eq!(store.get(Credential::RefreshToken).as_deref(), Some("refresh-1"));
}

// ---------------------------------------------------------------------------
// Address lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_prefers_road_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "road_address_name": "서울 마포구 월드컵로 1", "address_name": "서울 마포구 망원동 1" },
                { "road_address_name": "other", "address_name": "other" }
            ]
        })))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    assert_eq!(kakao.lookup_address("Place A").await.unwrap(), "서울 마포구 월드컵로 1");
}

#[tokio::test]
async fn lookup_falls_back_to_lot_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{ "road_address_name": "", "address_name": "서울 마포구 망원동 1" }]
        })))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    assert_eq!(kakao.lookup_address("Place A").await.unwrap(), "서울 마포구 망원동 1");
}

#[tokio::test]
async fn lookup_without_documents_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    assert!(matches!(kakao.lookup_address("nowhere").await, Err(AppError::LookupError(_))));
    assert_eq!(kakao.resolve_address("nowhere").await, None);
}

// ---------------------------------------------------------------------------
// Notify
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notify_without_access_token_is_missing_credential() {
    let server = MockServer::start().await;
    let (kakao, _) = client_for(&server);
    let schedule = schedule();
    let open = OpenSchedule { schedule: &schedule, remaining: 2 };

    let err = kakao.notify(&open, &Credentials::default(), None).await.unwrap_err();
    assert!(matches!(err, AppError::MissingCredential("access_token")), "got {err:?}");
}

#[tokio::test]
async fn notify_reports_non_200_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/api/talk/memo/default/send"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    let schedule = schedule();
    let open = OpenSchedule { schedule: &schedule, remaining: 2 };
    let creds = Credentials {
        access_token: Some("token".into()),
        refresh_token: None,
    };

    let err = kakao.notify(&open, &creds, None).await.unwrap_err();
    assert!(
        matches!(err, AppError::NotifyError { status: Some(201), .. }),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Friends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn friends_lists_elements() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/talk/friends"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [
                { "uuid": "uuid-a", "profile_nickname": "민수", "favorite": true, "id": 1 },
                { "uuid": "uuid-b" }
            ],
            "total_count": 2
        })))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    let friends = kakao.friends("token").await.unwrap();

    assert_eq!(friends.len(), 2);
    assert_eq!(friends[0].profile_nickname.as_deref(), Some("민수"));
    assert!(friends[0].favorite);
    assert_eq!(friends[1].uuid, "uuid-b");
    assert!(!friends[1].favorite);
}

#[tokio::test]
async fn friends_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/api/talk/friends"))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"code\":-402}"))
        .mount(&server)
        .await;

    let (kakao, _) = client_for(&server);
    let err = kakao.friends("token").await.unwrap_err();
    assert!(matches!(err, AppError::ApiError { status: 403, .. }), "got {err:?}");
}
