//! OAuth2 token management for the Google Drive API
//!
//! Implements refresh-token based credential supply for an application that
//! completed the interactive consent flow elsewhere. The library never runs
//! a browser flow itself; it is handed a token set and keeps it usable.
//!
//! ## Components
//!
//! - [`OAuthConfig`] - Client identity, endpoint URLs, and requested scopes
//! - [`Tokens`] - An access/refresh token pair with expiry and granted scopes
//! - [`OAuthTokenSource`] - Thread-safe [`TokenSource`] backed by the token endpoint
//!
//! ## Design Notes
//!
//! - Tokens are held in memory only; this library never persists them.
//! - Refresh is coalesced: concurrent callers that find a stale token
//!   serialize on a write lock and at most one of them performs the
//!   round trip to the token endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mysafe_core::config::AuthConfig;
use mysafe_core::domain::DriveError;
use mysafe_core::ports::{Credential, TokenSource};
use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    RefreshToken, TokenResponse, TokenUrl,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Google OAuth2 authorization endpoint
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth2 token endpoint
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Scope granting access to files created or opened by this application
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// Tokens expiring within this window are treated as stale and refreshed
const EXPIRY_BUFFER_SECS: i64 = 300;

// ============================================================================
// OAuthConfig
// ============================================================================

/// Configuration for the OAuth2 refresh flow
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// OAuth client ID from the Google Cloud console
    pub client_id: String,
    /// OAuth client secret, if the registration has one
    ///
    /// Desktop and installed-app registrations frequently ship without a
    /// usable secret; the token endpoint accepts refresh requests either way.
    pub client_secret: Option<String>,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// OAuth scopes the application requests at consent time
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Creates a config for the given client ID with Google's endpoints
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            scopes: vec![DRIVE_FILE_SCOPE.to_string()],
        }
    }

    /// Creates a config with a client secret
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Creates a config with a custom token endpoint
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Creates a config with custom scopes
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Builds a config from the application's `[auth]` section
    ///
    /// # Errors
    /// Fails when no client ID is configured.
    pub fn from_config(auth: &AuthConfig) -> Result<Self> {
        let client_id = auth
            .client_id
            .clone()
            .context("auth.client_id is required to build an OAuth token source")?;

        let mut config = Self::new(client_id);
        if let Some(secret) = &auth.client_secret {
            config = config.with_client_secret(secret.clone());
        }
        Ok(config)
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// An OAuth token set obtained from the consent flow or a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    /// Bearer token presented to the Drive API
    pub access_token: String,
    /// Long-lived token used to obtain new access tokens, when granted
    pub refresh_token: Option<String>,
    /// Instant at which the access token stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Scopes the user actually granted
    pub scopes: Vec<String>,
}

impl Tokens {
    /// Returns true if the access token's expiry has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the access token expires within the given duration
    pub fn expires_within(&self, duration: Duration) -> bool {
        Utc::now() + duration >= self.expires_at
    }
}

// ============================================================================
// OAuthTokenSource
// ============================================================================

/// [`TokenSource`] implementation backed by the OAuth2 token endpoint
///
/// Holds the current token set behind an async `RwLock`. Reads take the
/// fast path; a stale token escalates to the write lock, re-checks, and
/// refreshes at most once per staleness episode.
pub struct OAuthTokenSource {
    client: BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>,
    http: reqwest::Client,
    tokens: RwLock<Option<Tokens>>,
}

impl OAuthTokenSource {
    /// Creates a token source with no tokens installed
    ///
    /// Credential methods return [`DriveError::NoUserSignedIn`] until
    /// [`install_tokens`](Self::install_tokens) is called.
    pub fn new(config: &OAuthConfig) -> Result<Self> {
        let mut client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone()).context("Invalid authorization URL")?,
            )
            .set_token_uri(TokenUrl::new(config.token_url.clone()).context("Invalid token URL")?);

        if let Some(secret) = &config.client_secret {
            client = client.set_client_secret(ClientSecret::new(secret.clone()));
        }

        Ok(Self {
            client,
            http: reqwest::Client::new(),
            tokens: RwLock::new(None),
        })
    }

    /// Creates a token source with an initial token set installed
    pub fn with_tokens(config: &OAuthConfig, tokens: Tokens) -> Result<Self> {
        let source = Self::new(config)?;
        Ok(Self {
            tokens: RwLock::new(Some(tokens)),
            ..source
        })
    }

    /// Installs a token set, replacing any existing one
    pub async fn install_tokens(&self, tokens: Tokens) {
        debug!("Installing tokens, valid until {}", tokens.expires_at);
        *self.tokens.write().await = Some(tokens);
    }

    /// Removes the installed token set
    pub async fn clear_tokens(&self) {
        info!("Clearing installed tokens");
        *self.tokens.write().await = None;
    }

    /// Returns a copy of the currently installed token set
    pub async fn current_tokens(&self) -> Option<Tokens> {
        self.tokens.read().await.clone()
    }

    /// Returns true if the user granted the given scope
    ///
    /// Advisory only: the service still answers 403 when a token lacks the
    /// scope a request needs.
    pub async fn has_granted(&self, scope: &str) -> bool {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|tokens| tokens.scopes.iter().any(|granted| granted == scope))
            .unwrap_or(false)
    }

    /// Refreshes the token set and stores the result
    ///
    /// Re-checks staleness under the write lock so that concurrent callers
    /// trigger a single round trip.
    async fn refresh_and_store(&self) -> Result<Credential, DriveError> {
        let mut guard = self.tokens.write().await;

        let (refresh_token, previous_scopes) = match guard.as_ref() {
            None => return Err(DriveError::NoUserSignedIn),
            Some(tokens) if !tokens.expires_within(Duration::seconds(EXPIRY_BUFFER_SECS)) => {
                // Another task refreshed while we waited for the lock
                return Ok(Credential::new(tokens.access_token.clone()));
            }
            Some(tokens) => {
                let refresh_token = tokens.refresh_token.clone().ok_or_else(|| {
                    DriveError::RefreshFailed("no refresh token available".to_string())
                })?;
                (refresh_token, tokens.scopes.clone())
            }
        };

        debug!("Access token stale, refreshing");

        let token_result = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
            .request_async(&self.http)
            .await
            .map_err(|e| {
                let message = match &e {
                    oauth2::RequestTokenError::ServerResponse(response) => response.to_string(),
                    other => other.to_string(),
                };
                warn!("Token refresh failed: {}", message);
                DriveError::RefreshFailed(message)
            })?;

        let expires_at = token_result
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64))
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        let scopes = token_result
            .scopes()
            .map(|granted| granted.iter().map(|scope| scope.to_string()).collect())
            .unwrap_or(previous_scopes);

        let tokens = Tokens {
            access_token: token_result.access_token().secret().to_string(),
            // The endpoint may omit the refresh token on refresh; keep the old one
            refresh_token: token_result
                .refresh_token()
                .map(|t| t.secret().to_string())
                .or(Some(refresh_token)),
            expires_at,
            scopes,
        };

        info!("Access token refreshed, valid until {}", tokens.expires_at);
        let credential = Credential::new(tokens.access_token.clone());
        *guard = Some(tokens);
        Ok(credential)
    }
}

#[async_trait]
impl TokenSource for OAuthTokenSource {
    async fn current_credential(&self) -> Result<Credential, DriveError> {
        match self.tokens.read().await.as_ref() {
            Some(tokens) => Ok(Credential::new(tokens.access_token.clone())),
            None => Err(DriveError::NoUserSignedIn),
        }
    }

    async fn refreshed_credential(&self) -> Result<Credential, DriveError> {
        {
            let guard = self.tokens.read().await;
            match guard.as_ref() {
                None => return Err(DriveError::NoUserSignedIn),
                Some(tokens) if !tokens.expires_within(Duration::seconds(EXPIRY_BUFFER_SECS)) => {
                    return Ok(Credential::new(tokens.access_token.clone()));
                }
                Some(_) => {}
            }
        }
        self.refresh_and_store().await
    }

    async fn granted_scopes(&self) -> Vec<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|tokens| tokens.scopes.clone())
            .unwrap_or_default()
    }
}
