//! File store port (driven/secondary port)
//!
//! This module defines the interface for the remote file resource.
//! The primary implementation targets the Google Drive v3 REST API, but
//! the trait speaks only domain types so orchestration and tests do not
//! depend on any HTTP machinery.
//!
//! ## Design Notes
//!
//! - All four operations are idempotent by intent and return [`DriveError`]
//!   kinds the caller can branch on.
//! - `find_by_name_and_type` is deliberately tri-state:
//!   `Ok(Some(..))` found, `Ok(None)` confirmed absent, `Err(..)` the search
//!   itself failed. Callers must be able to distinguish "no folder yet,
//!   will create" from "search failed, will not attempt create".
//! - Implementations must obtain a freshly refreshed credential before each
//!   operation and abort without issuing any request when refresh fails.

use crate::domain::errors::DriveError;
use crate::domain::remote_file::{FileListing, RemoteFile, UploadMetadata};

/// Port trait for remote file operations
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Lists files visible to this client
    ///
    /// # Returns
    /// The full listing envelope, including `incomplete_search` and any
    /// pagination token, propagated unchanged
    async fn list(&self) -> Result<FileListing, DriveError>;

    /// Searches for a non-trashed file by exact name and MIME type
    ///
    /// Implementations filter server-side and must re-check the name for
    /// exact equality client-side; the returned file's `name` always equals
    /// the query name.
    ///
    /// # Returns
    /// `Ok(Some(file))` if found, `Ok(None)` if confirmed absent
    async fn find_by_name_and_type(
        &self,
        name: &str,
        mime_type: &str,
    ) -> Result<Option<RemoteFile>, DriveError>;

    /// Creates a metadata-only folder with the given name
    ///
    /// # Returns
    /// The created folder; its `id` is server-assigned and non-empty
    async fn create_folder(&self, name: &str) -> Result<RemoteFile, DriveError>;

    /// Creates a file with content via a multipart upload
    ///
    /// # Arguments
    /// * `metadata` - Name and parent placement for the created file
    /// * `content` - The raw file bytes
    ///
    /// # Returns
    /// The created file; its `id` is server-assigned and non-empty
    async fn upload_content(
        &self,
        metadata: UploadMetadata,
        content: Vec<u8>,
    ) -> Result<RemoteFile, DriveError>;
}
