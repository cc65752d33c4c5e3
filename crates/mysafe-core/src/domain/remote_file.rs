//! Remote file model
//!
//! Typed representations of the drive service's file resource and listing
//! envelope. The structs are byte-faithful to the JSON wire shapes
//! (camelCase field names) so adapters can deserialize responses directly
//! into domain values.

use serde::{Deserialize, Serialize};

/// Reserved MIME type the service uses to mark folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Name of the well-known sync root folder
pub const DEFAULT_ROOT_FOLDER_NAME: &str = "MySafe";

// ============================================================================
// RemoteFile
// ============================================================================

/// A remote object (file or folder) as returned by the drive service
///
/// Folders are ordinary files carrying the reserved [`FOLDER_MIME_TYPE`].
/// `id` is absent only for not-yet-created representations; once the service
/// returns a file, `id` is always present. Values are immutable once
/// received; a new upload produces a new `RemoteFile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Resource kind discriminator (e.g., "drive#file")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Server-assigned object identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object name (client-assigned on create)
    pub name: String,
    /// MIME type; [`FOLDER_MIME_TYPE`] for folders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl RemoteFile {
    /// Returns true if this object is a folder
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }
}

// ============================================================================
// FileListing
// ============================================================================

/// The listing envelope returned by the files collection
///
/// `incomplete_search == true` marks the result set as best-effort; it must
/// not be treated as exhaustive. A present `next_page_token` means more
/// pages exist. Both fields are carried through unchanged; this library
/// does not consume pagination itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListing {
    /// Resource kind discriminator (e.g., "drive#fileList")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Whether the result set is partial/best-effort
    pub incomplete_search: bool,
    /// Continuation token when more pages exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// The files in this page, in service order
    pub files: Vec<RemoteFile>,
}

// ============================================================================
// UploadMetadata
// ============================================================================

/// The metadata part of a multipart upload
///
/// Serialized as the JSON part of the multipart body:
/// `{"name": .., "parents": [..]}`, plus `"mimeType"` only when explicitly
/// set. The sync client never sets it, leaving MIME inference to the
/// service; callers that know better can use [`UploadMetadata::with_mime_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    /// Name the created file should carry
    pub name: String,
    /// Parent folder ids (a single root-folder id in this library)
    pub parents: Vec<String>,
    /// Explicit MIME type, omitted from the JSON when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl UploadMetadata {
    /// Creates metadata placing `name` under the given parent folder
    pub fn new(name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: vec![parent_id.into()],
            mime_type: None,
        }
    }

    /// Sets an explicit MIME type for the created file
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}
