//! Integration tests for OAuth token refresh
//!
//! Runs the refresh flow against a wiremock-based token endpoint and
//! verifies credential supply, refresh-token carry-over, scope updates,
//! and refresh coalescing under concurrency.

use std::sync::Arc;

use chrono::{Duration, Utc};
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mysafe_gdrive::auth::{OAuthConfig, OAuthTokenSource, Tokens, DRIVE_FILE_SCOPE};
use mysafe_gdrive::{DriveError, TokenSource};

fn stale_tokens() -> Tokens {
    Tokens {
        access_token: "stale-access".to_string(),
        refresh_token: Some("refresh-token".to_string()),
        expires_at: Utc::now() - Duration::minutes(5),
        scopes: vec![DRIVE_FILE_SCOPE.to_string()],
    }
}

fn fresh_tokens() -> Tokens {
    Tokens {
        access_token: "fresh-access".to_string(),
        refresh_token: Some("refresh-token".to_string()),
        expires_at: Utc::now() + Duration::hours(1),
        scopes: vec![DRIVE_FILE_SCOPE.to_string()],
    }
}

fn source_against(server: &MockServer, tokens: Tokens) -> OAuthTokenSource {
    let config =
        OAuthConfig::new("client-123").with_token_url(format!("{}/token", server.uri()));
    OAuthTokenSource::with_tokens(&config, tokens).expect("failed to build token source")
}

#[tokio::test]
async fn test_refresh_obtains_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-token"))
        .and(body_string_contains("client_id=client-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": DRIVE_FILE_SCOPE
        })))
        .mount(&server)
        .await;

    let source = source_against(&server, stale_tokens());

    let credential = source.refreshed_credential().await.expect("refresh failed");
    assert_eq!(credential.token, "new-access");

    let tokens = source.current_tokens().await.expect("tokens installed");
    assert_eq!(tokens.access_token, "new-access");
    assert!(!tokens.is_expired());
    // The endpoint omitted the refresh token, so the old one stays
    assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-token"));
}

#[tokio::test]
async fn test_refresh_rotates_refresh_token_when_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rotated-refresh"
        })))
        .mount(&server)
        .await;

    let source = source_against(&server, stale_tokens());
    source.refreshed_credential().await.expect("refresh failed");

    let tokens = source.current_tokens().await.expect("tokens installed");
    assert_eq!(tokens.refresh_token.as_deref(), Some("rotated-refresh"));
}

#[tokio::test]
async fn test_refresh_updates_granted_scopes() {
    let server = MockServer::start().await;
    let narrower = "https://www.googleapis.com/auth/drive.appdata";
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": format!("{DRIVE_FILE_SCOPE} {narrower}")
        })))
        .mount(&server)
        .await;

    let source = source_against(&server, stale_tokens());
    source.refreshed_credential().await.expect("refresh failed");

    assert_eq!(
        source.granted_scopes().await,
        vec![DRIVE_FILE_SCOPE.to_string(), narrower.to_string()]
    );
}

#[tokio::test]
async fn test_refresh_keeps_scopes_when_response_omits_them() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    let source = source_against(&server, stale_tokens());
    source.refreshed_credential().await.expect("refresh failed");

    assert_eq!(
        source.granted_scopes().await,
        vec![DRIVE_FILE_SCOPE.to_string()]
    );
}

#[tokio::test]
async fn test_refresh_failure_surfaces_invalid_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Token has been expired or revoked."
        })))
        .mount(&server)
        .await;

    let source = source_against(&server, stale_tokens());

    match source.refreshed_credential().await {
        Err(DriveError::RefreshFailed(message)) => {
            assert!(message.contains("invalid_grant"), "message: {message}");
        }
        other => panic!("expected RefreshFailed, got {:?}", other),
    }

    // A failed refresh leaves the installed tokens untouched
    let tokens = source.current_tokens().await.expect("tokens installed");
    assert_eq!(tokens.access_token, "stale-access");
}

#[tokio::test]
async fn test_fresh_token_skips_endpoint() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let source = source_against(&server, fresh_tokens());

    let credential = source.refreshed_credential().await.expect("refresh failed");
    assert_eq!(credential.token, "fresh-access");
}

#[tokio::test]
async fn test_concurrent_refresh_makes_one_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(50))
                .set_body_json(serde_json::json!({
                    "access_token": "new-access",
                    "token_type": "bearer",
                    "expires_in": 3600
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = Arc::new(source_against(&server, stale_tokens()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let source = source.clone();
        handles.push(tokio::spawn(
            async move { source.refreshed_credential().await },
        ));
    }

    for handle in handles {
        let credential = handle.await.unwrap().expect("refresh failed");
        assert_eq!(credential.token, "new-access");
    }
}
