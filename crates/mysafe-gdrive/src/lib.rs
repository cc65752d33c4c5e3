//! MySafe Google Drive adapter
//!
//! Async client for:
//! - OAuth2 token refresh against Google's token endpoint
//! - Drive v3 file operations (list, search, folder create, multipart upload)
//! - The get-or-create sync folder workflow
//!
//! ## Modules
//!
//! - [`auth`] - OAuth token management and the [`TokenSource`] implementation
//! - [`client`] - Drive v3 HTTP client implementing [`FileStore`]
//! - [`mime`] - MIME type lookup by file extension
//! - [`multipart`] - Multipart/related body encoding for uploads
//! - [`sync`] - High-level sync client rooted at a single drive folder

pub mod auth;
pub mod client;
pub mod mime;
pub mod multipart;
pub mod sync;

pub use auth::{OAuthConfig, OAuthTokenSource, Tokens, DRIVE_FILE_SCOPE};
pub use client::DriveFileStore;
pub use sync::DriveSyncClient;

pub use mysafe_core::domain::DriveError;
pub use mysafe_core::ports::{Credential, FileStore, TokenSource};
