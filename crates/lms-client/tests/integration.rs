//! Integration tests for lms-client
//!
//! Runs the real reqwest transport against an in-process LMS emulator:
//! - Registration, login and session reuse
//! - Multipart upload and static URL reconstruction
//! - Error payloads returned as data
//! - Observability hooks

mod common;

use common::MockLms;
use fake::{Fake, Faker};
use lms_client::assertions;
use lms_client::schema::{
    CreateFileRequest, CreateUserRequest, InternalErrorResponse, ValidationErrorResponse,
};
use lms_client::{
    CoverageTracker, Credential, CurlRecorder, LmsClients, LmsConfig, LmsError, Transport,
    TransportConfig,
};
use reqwest::StatusCode;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

fn clients_for(server: &MockLms) -> LmsClients {
    let config = LmsConfig::new(&server.base_url, Some(Duration::from_secs(5)), None, None).unwrap();
    LmsClients::new(config.transport_config().with_logging()).unwrap()
}

fn png_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\x89PNG\r\n\x1a\n").unwrap();
    file
}

async fn register(clients: &LmsClients) -> (CreateUserRequest, Credential) {
    let request: CreateUserRequest = Faker.fake();
    let response = clients.public_users().create_user(&request).await.unwrap();
    assertions::assert_create_user_response(&request, &response).unwrap();
    let credential = Credential::from(&request);
    (request, credential)
}

// ==================== Authentication ====================

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;

    let response = clients
        .authentication()
        .login(&credential.login_request())
        .await
        .unwrap();

    assertions::assert_login_response(&response).unwrap();
    let body = serde_json::to_value(&response).unwrap();
    assertions::validate_json_schema::<lms_client::schema::LoginResponse>(&body).unwrap();
    assertions::assert_alias_round_trip::<lms_client::schema::LoginResponse>(&body).unwrap();
}

#[tokio::test]
async fn test_private_clients_share_one_login() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (request, credential) = register(&clients).await;

    let users = clients.private_users(&credential).await.unwrap();
    let files = clients
        .files(&Credential::new(&request.email, &request.password))
        .await
        .unwrap();
    let me = users.get_user_me().await.unwrap();
    files.get_file_api(&uuid::Uuid::new_v4().to_string()).await.unwrap();

    assert_eq!(me.user.email, request.email);
    assert_eq!(server.login_count(), 1);
    assert_eq!(clients.sessions().len(), 1);
}

#[tokio::test]
async fn test_wrong_password_is_authentication_error() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (request, _) = register(&clients).await;

    let err = clients
        .private_users(&Credential::new(&request.email, "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, LmsError::Authentication { status, .. } if status == StatusCode::UNAUTHORIZED));
    assert!(clients.sessions().is_empty());
}

#[tokio::test]
async fn test_stale_session_surfaces_401_until_invalidated() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;

    let users = clients.private_users(&credential).await.unwrap();
    users.get_user_me().await.unwrap();

    // Anonymous access is rejected and surfaced, not retried
    let anonymous = lms_client::PrivateUsersClient::new(Arc::new(
        lms_client::HttpTransport::new(TransportConfig::new(
            server.base_url.clone(),
            Duration::from_secs(5),
        ))
        .unwrap(),
    ));
    let response = anonymous.get_user_me_api().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(clients.sessions().invalidate(&credential));
    clients.private_users(&credential).await.unwrap();
    assert_eq!(server.login_count(), 2);
}

// ==================== Files ====================

#[tokio::test]
async fn test_create_get_delete_file() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;
    let files = clients.files(&credential).await.unwrap();
    let image = png_fixture();

    let request = CreateFileRequest {
        filename: "image.png".into(),
        directory: "courses".into(),
        upload_file: image.path().to_path_buf(),
    };
    let created = files.create_file(&request).await.unwrap();
    assertions::assert_create_file_response(&request, &created, clients.base_url()).unwrap();
    assert_eq!(
        created.file.url,
        format!("{}/static/courses/image.png", server.base_url)
    );

    let fetched = files.get_file(&created.file.id).await.unwrap();
    assertions::assert_get_file_response(&fetched, &created).unwrap();

    let deleted = files.delete_file_api(&created.file.id).await.unwrap();
    assertions::assert_status_code(deleted.status(), StatusCode::OK).unwrap();

    let missing = files.get_file_api(&created.file.id).await.unwrap();
    assertions::assert_status_code(missing.status(), StatusCode::NOT_FOUND).unwrap();
    let body: InternalErrorResponse = missing.json().unwrap();
    assertions::assert_file_not_found_response(&body).unwrap();
}

#[tokio::test]
async fn test_empty_filename_is_validation_error() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;
    let files = clients.files(&credential).await.unwrap();
    let image = png_fixture();

    let request = CreateFileRequest {
        filename: String::new(),
        ..Faker.fake::<CreateFileRequest>().with_upload_file(image.path())
    };
    let response = files.create_file_api(&request).await.unwrap();

    assertions::assert_status_code(response.status(), StatusCode::UNPROCESSABLE_ENTITY).unwrap();
    let body: ValidationErrorResponse = response.json().unwrap();
    assertions::assert_create_file_with_empty_filename_response(&body).unwrap();

    let typed = files.create_file(&request).await.unwrap_err();
    assert_eq!(typed.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn test_incorrect_file_id_is_validation_error() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;
    let files = clients.files(&credential).await.unwrap();

    let response = files.get_file_api("incorrect-file-id").await.unwrap();

    assertions::assert_status_code(response.status(), StatusCode::UNPROCESSABLE_ENTITY).unwrap();
    let body: ValidationErrorResponse = response.json().unwrap();
    assertions::assert_get_file_with_incorrect_file_id_response(&body).unwrap();
}

// ==================== Transport ====================

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let config = TransportConfig::new(format!("http://{}", address), Duration::from_secs(2));
    let clients = LmsClients::new(config).unwrap();

    let err = clients
        .public_users()
        .create_user_api(&Faker.fake())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_hooks_record_curl_and_coverage() {
    let server = MockLms::start().await;
    let recorder = CurlRecorder::new(8);
    let coverage = CoverageTracker::new();
    let config = TransportConfig::new(server.base_url.clone(), Duration::from_secs(5))
        .on_request(recorder.hook())
        .on_response(coverage.hook());
    let clients = LmsClients::new(config).unwrap();
    let (_, credential) = register(&clients).await;

    let files = clients.files(&credential).await.unwrap();
    files
        .get_file_api(&uuid::Uuid::new_v4().to_string())
        .await
        .unwrap();

    let commands = recorder.recent();
    assert!(commands[0].starts_with("curl -X 'POST'"));
    assert!(commands[0].contains("/api/v1/users"));
    assert!(
        commands
            .last()
            .unwrap()
            .contains("-H 'authorization: Bearer ")
    );

    let report = coverage.report();
    assert!(report.iter().any(|hit| hit.method == "GET"
        && hit.path == "/api/v1/files/{id}"
        && hit.status == 404));
    assert!(report
        .iter()
        .any(|hit| hit.path == "/api/v1/authentication/login" && hit.status == 200));
}

#[tokio::test]
async fn test_transport_base_url_is_shared() {
    let server = MockLms::start().await;
    let clients = clients_for(&server);
    let (_, credential) = register(&clients).await;

    let session = clients
        .sessions()
        .get_private_transport(&credential)
        .await
        .unwrap();
    assert_eq!(session.base_url(), clients.base_url());
}
