//! Domain entities and business logic
//!
//! This module contains the core domain types for MySafe:
//! - Remote file and listing models mirroring the drive wire shapes
//! - Upload metadata for multipart create-with-content requests
//! - The typed drive error taxonomy

pub mod errors;
pub mod remote_file;

// Re-export commonly used types
pub use errors::DriveError;
pub use remote_file::{
    FileListing, RemoteFile, UploadMetadata, DEFAULT_ROOT_FOLDER_NAME, FOLDER_MIME_TYPE,
};
