//! High-level sync client
//!
//! [`DriveSyncClient`] answers the two questions the application actually
//! asks: "what is in the drive?" and "put this local file in the safe". It
//! owns resolution of the root sync folder and caches the resolved handle
//! for the lifetime of the client.
//!
//! ## Design Notes
//!
//! - Root resolution is single-flight: the cached handle sits behind an
//!   async mutex that stays locked across the find and create round trips,
//!   so concurrent first calls cannot race each other into creating
//!   duplicate folders.
//! - Resolution failures leave the cache empty; the next call retries from
//!   scratch. A successful resolution is terminal for this client instance.

use std::path::Path;
use std::sync::Arc;

use mysafe_core::domain::{
    DriveError, RemoteFile, UploadMetadata, DEFAULT_ROOT_FOLDER_NAME, FOLDER_MIME_TYPE,
};
use mysafe_core::ports::FileStore;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Get-or-create sync facade over a [`FileStore`]
///
/// All uploads land in a single root folder (by default
/// [`DEFAULT_ROOT_FOLDER_NAME`]) which is found or created on first use.
pub struct DriveSyncClient {
    store: Arc<dyn FileStore>,
    root_folder_name: String,
    /// Resolved root folder; `None` until the first successful resolution
    root: Mutex<Option<RemoteFile>>,
}

impl DriveSyncClient {
    /// Creates a client using the default root folder name
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self::with_root_folder_name(store, DEFAULT_ROOT_FOLDER_NAME)
    }

    /// Creates a client rooted at a custom folder name
    pub fn with_root_folder_name(store: Arc<dyn FileStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            root_folder_name: name.into(),
            root: Mutex::new(None),
        }
    }

    /// Returns the root folder name this client resolves against
    pub fn root_folder_name(&self) -> &str {
        &self.root_folder_name
    }

    /// Returns the resolved root folder, if resolution already happened
    pub async fn cached_root_folder(&self) -> Option<RemoteFile> {
        self.root.lock().await.clone()
    }

    /// Returns the root folder, finding or creating it on first use
    ///
    /// The lock is held across the find and create round trips; concurrent
    /// callers wait and then reuse the winner's result, so at most one
    /// folder is ever created per client.
    ///
    /// # Errors
    /// Propagates any [`DriveError`] from the underlying store. On error
    /// the cache stays empty and the next call retries.
    pub async fn ensure_root_folder(&self) -> Result<RemoteFile, DriveError> {
        let mut slot = self.root.lock().await;

        if let Some(root) = slot.as_ref() {
            debug!("Using cached root folder '{}'", self.root_folder_name);
            return Ok(root.clone());
        }

        let root = match self
            .store
            .find_by_name_and_type(&self.root_folder_name, FOLDER_MIME_TYPE)
            .await?
        {
            Some(existing) => {
                debug!(
                    "Found existing root folder '{}' ({})",
                    self.root_folder_name,
                    existing.id.as_deref().unwrap_or("no id")
                );
                existing
            }
            None => {
                info!(
                    "Root folder '{}' not found, creating it",
                    self.root_folder_name
                );
                self.store.create_folder(&self.root_folder_name).await?
            }
        };

        *slot = Some(root.clone());
        Ok(root)
    }

    /// Lists the files visible to this application, in service order
    ///
    /// Returns the listing's files only; this client does not paginate, and
    /// callers that need the partial-result marker or continuation token
    /// use the store directly. Does not resolve the root folder.
    pub async fn list_files(&self) -> Result<Vec<RemoteFile>, DriveError> {
        Ok(self.store.list().await?.files)
    }

    /// Uploads a local file into the root folder
    ///
    /// The remote name is `display_name` when given, otherwise the path's
    /// file name. The root folder is resolved first, so the very first
    /// upload may perform the find/create round trips.
    ///
    /// # Errors
    /// `LocalFileUnreadable` when the path cannot be read or has no usable
    /// file name; `RootFolderUnavailable` when the resolved root carries no
    /// id; otherwise whatever the store operations return.
    pub async fn upload_file(
        &self,
        path: &Path,
        display_name: Option<&str>,
    ) -> Result<RemoteFile, DriveError> {
        let root = self.ensure_root_folder().await?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| DriveError::LocalFileUnreadable {
                path: path.to_path_buf(),
                cause: e.to_string(),
            })?;

        let name = match display_name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.to_string())
                .ok_or_else(|| DriveError::LocalFileUnreadable {
                    path: path.to_path_buf(),
                    cause: "path has no usable file name".to_string(),
                })?,
        };

        let parent_id = root
            .id
            .clone()
            .ok_or_else(|| DriveError::RootFolderUnavailable(self.root_folder_name.clone()))?;

        debug!(
            "Uploading {} as '{}' into folder {}",
            path.display(),
            name,
            parent_id
        );

        self.store
            .upload_content(UploadMetadata::new(name, parent_id), content)
            .await
    }
}
