//! Google Drive API file store
//!
//! Provides a typed HTTP client for the Drive v3 `files` endpoints. Handles
//! authentication headers, query escaping, multipart upload bodies, and JSON
//! decoding. Every operation obtains a fresh credential from the injected
//! [`TokenSource`] before touching the network.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mysafe_core::ports::FileStore;
//! use mysafe_gdrive::auth::{OAuthConfig, OAuthTokenSource};
//! use mysafe_gdrive::client::DriveFileStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source = Arc::new(OAuthTokenSource::new(&OAuthConfig::new("client-id"))?);
//! let store = DriveFileStore::new(source);
//! let listing = store.list().await?;
//! println!("{} files visible", listing.files.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use mysafe_core::config::NetworkConfig;
use mysafe_core::domain::{DriveError, FileListing, RemoteFile, UploadMetadata, FOLDER_MIME_TYPE};
use mysafe_core::ports::{FileStore, TokenSource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::multipart;

/// Base URL serving both the metadata and upload endpoints
const DRIVE_BASE_URL: &str = "https://www.googleapis.com";

/// Path of the files metadata endpoint
const FILES_PATH: &str = "/drive/v3/files";

/// Path of the multipart upload endpoint
const UPLOAD_PATH: &str = "/upload/drive/v3/files";

// ============================================================================
// Drive API request types
// ============================================================================

/// Body of a folder-creation request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderRequest<'a> {
    name: &'a str,
    mime_type: &'a str,
}

// ============================================================================
// DriveFileStore
// ============================================================================

/// HTTP client for Drive v3 file operations
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction. Holds no auth state of its own; each call asks the
/// [`TokenSource`] for a fresh credential, so a refresh failure surfaces
/// before any Drive request is sent.
pub struct DriveFileStore {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Supplier of bearer credentials
    token_source: Arc<dyn TokenSource>,
}

impl DriveFileStore {
    /// Creates a store talking to the production Drive endpoints
    pub fn new(token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            client: Client::new(),
            base_url: DRIVE_BASE_URL.to_string(),
            token_source,
        }
    }

    /// Creates a store with a custom base URL (useful for testing)
    pub fn with_base_url(token_source: Arc<dyn TokenSource>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token_source,
        }
    }

    /// Creates a store from the application's `[network]` section
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be constructed.
    pub fn from_config(network: &NetworkConfig, token_source: Arc<dyn TokenSource>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(network.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: network.base_url.clone(),
            token_source,
        })
    }

    /// Returns the base URL this store talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn files_url(&self) -> String {
        format!("{}{}", self.base_url, FILES_PATH)
    }

    fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }
}

#[async_trait]
impl FileStore for DriveFileStore {
    async fn list(&self) -> Result<FileListing, DriveError> {
        let credential = self.token_source.refreshed_credential().await?;
        let url = self.files_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&credential.token)
            .send()
            .await
            .map_err(|e| DriveError::Transport(e.to_string()))?;

        decode_response(response).await
    }

    async fn find_by_name_and_type(
        &self,
        name: &str,
        mime_type: &str,
    ) -> Result<Option<RemoteFile>, DriveError> {
        let credential = self.token_source.refreshed_credential().await?;
        let url = self.files_url();
        let query = search_query(name, mime_type);
        debug!("GET {} q={}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str())])
            .bearer_auth(&credential.token)
            .send()
            .await
            .map_err(|e| DriveError::Transport(e.to_string()))?;

        let listing: FileListing = decode_response(response).await?;

        // The query already filters server-side; re-check name and type so a
        // looser-than-expected match never leaks through.
        Ok(listing
            .files
            .into_iter()
            .find(|file| file.name == name && file.mime_type.as_deref() == Some(mime_type)))
    }

    async fn create_folder(&self, name: &str) -> Result<RemoteFile, DriveError> {
        let credential = self.token_source.refreshed_credential().await?;
        let url = self.files_url();
        info!("Creating folder '{}'", name);

        let body = CreateFolderRequest {
            name,
            mime_type: FOLDER_MIME_TYPE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&credential.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveError::Transport(e.to_string()))?;

        decode_response(response).await
    }

    async fn upload_content(
        &self,
        metadata: UploadMetadata,
        content: Vec<u8>,
    ) -> Result<RemoteFile, DriveError> {
        let credential = self.token_source.refreshed_credential().await?;
        let url = self.upload_url();
        info!("Uploading '{}' ({} bytes)", metadata.name, content.len());

        let metadata_json = serde_json::to_vec(&metadata)
            .map_err(|e| DriveError::Transport(format!("failed to encode upload metadata: {e}")))?;
        let body = multipart::build(&metadata_json, &content);

        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "multipart")])
            .bearer_auth(&credential.token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", body.boundary),
            )
            .body(body.bytes)
            .send()
            .await
            .map_err(|e| DriveError::Transport(e.to_string()))?;

        decode_response(response).await
    }
}

/// Builds the Drive search query for an exact name and MIME type
fn search_query(name: &str, mime_type: &str) -> String {
    format!(
        "mimeType='{}' and name='{}' and trashed=false",
        escape_query_value(mime_type),
        escape_query_value(name)
    )
}

/// Escapes a value for embedding in a single-quoted Drive query literal
///
/// Backslashes must be escaped before quotes so the quote escape survives.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Checks the status code and decodes a JSON response body
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DriveError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DriveError::UnexpectedStatus(status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| DriveError::Transport(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| DriveError::Decode(e.to_string()))
}
