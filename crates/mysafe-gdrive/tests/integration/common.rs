//! Shared test helpers for Drive API integration tests
//!
//! Provides token source fakes, wiremock response builders for the Drive
//! wire shapes, and a parser that takes a captured upload request apart
//! into its metadata and content parts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use mysafe_core::domain::DriveError;
use mysafe_core::ports::{Credential, TokenSource};
use mysafe_gdrive::auth::DRIVE_FILE_SCOPE;
use mysafe_gdrive::client::DriveFileStore;

// ============================================================================
// Token source fakes
// ============================================================================

/// Token source that always hands out the same token and counts refreshes
pub struct StaticTokenSource {
    token: String,
    refreshes: AtomicUsize,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            refreshes: AtomicUsize::new(0),
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn current_credential(&self) -> Result<Credential, DriveError> {
        Ok(Credential::new(self.token.clone()))
    }

    async fn refreshed_credential(&self) -> Result<Credential, DriveError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(Credential::new(self.token.clone()))
    }

    async fn granted_scopes(&self) -> Vec<String> {
        vec![DRIVE_FILE_SCOPE.to_string()]
    }
}

/// Token source whose refresh always fails, as after a revoked grant
pub struct FailingTokenSource;

#[async_trait]
impl TokenSource for FailingTokenSource {
    async fn current_credential(&self) -> Result<Credential, DriveError> {
        Ok(Credential::new("stale-token"))
    }

    async fn refreshed_credential(&self) -> Result<Credential, DriveError> {
        Err(DriveError::RefreshFailed(
            "invalid_grant: Token has been expired or revoked.".to_string(),
        ))
    }

    async fn granted_scopes(&self) -> Vec<String> {
        Vec::new()
    }
}

// ============================================================================
// Server setup and response builders
// ============================================================================

/// Starts a mock server and returns a store pointed at it
///
/// The store authenticates with a [`StaticTokenSource`] holding the token
/// `test-access-token`.
pub async fn setup_store() -> (MockServer, DriveFileStore) {
    let server = MockServer::start().await;
    let source = Arc::new(StaticTokenSource::new("test-access-token"));
    let store = DriveFileStore::with_base_url(source, server.uri());
    (server, store)
}

/// Builds a file resource in the Drive wire shape
pub fn file_json(id: &str, name: &str, mime_type: &str) -> serde_json::Value {
    json!({
        "kind": "drive#file",
        "id": id,
        "name": name,
        "mimeType": mime_type
    })
}

/// Builds a folder resource in the Drive wire shape
pub fn folder_json(id: &str, name: &str) -> serde_json::Value {
    file_json(id, name, "application/vnd.google-apps.folder")
}

/// Builds a listing envelope holding the given files array
pub fn listing_json(files: serde_json::Value) -> serde_json::Value {
    json!({
        "kind": "drive#fileList",
        "incompleteSearch": false,
        "files": files
    })
}

/// The exact query the store sends when searching for a folder by name
pub fn folder_query(name: &str) -> String {
    format!(
        "mimeType='application/vnd.google-apps.folder' and name='{name}' and trashed=false"
    )
}

/// Mounts the listing endpoint with a fixed response
pub async fn mount_list(server: &MockServer, listing: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(server)
        .await;
}

// ============================================================================
// Captured-request helpers
// ============================================================================

/// Returns every request the server saw on the multipart upload path
pub async fn upload_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|request| request.url.path() == "/upload/drive/v3/files")
        .collect()
}

/// Splits a captured multipart upload request into its two parts
///
/// Asserts the body structure on the way: exactly two parts under the
/// boundary advertised in the Content-Type header, the first JSON and the
/// second an octet stream.
pub fn parse_upload_body(request: &Request) -> (serde_json::Value, Vec<u8>) {
    let content_type = request
        .headers
        .get("content-type")
        .expect("upload request missing content-type")
        .to_str()
        .expect("content-type not ASCII");
    let boundary = content_type
        .strip_prefix("multipart/related; boundary=")
        .expect("content-type is not multipart/related");

    let body = String::from_utf8(request.body.clone()).expect("upload body not UTF-8");
    let segments: Vec<&str> = body.split(&format!("--{boundary}")).collect();
    assert_eq!(segments.len(), 4, "expected exactly two multipart parts");
    assert_eq!(segments[0], "", "body must start with the boundary");
    assert_eq!(segments[3], "--\r\n", "body must end with the terminator");

    let metadata_part = segments[1];
    let content_part = segments[2];
    assert!(
        metadata_part.contains("Content-Type: application/json; charset=UTF-8"),
        "first part must be the JSON metadata"
    );
    assert!(
        content_part.contains("Content-Type: application/octet-stream"),
        "second part must be the octet stream"
    );

    let metadata_body = part_body(metadata_part);
    let content_body = part_body(content_part);

    (
        serde_json::from_str(&metadata_body).expect("metadata part is not valid JSON"),
        content_body.into_bytes(),
    )
}

fn part_body(part: &str) -> String {
    part.split_once("\r\n\r\n")
        .expect("part has no header/body separator")
        .1
        .strip_suffix("\r\n")
        .expect("part body must end with CRLF")
        .to_string()
}
