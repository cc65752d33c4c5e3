//! Drive error taxonomy
//!
//! This module defines the typed failures surfaced by every credential,
//! store, and sync operation. Causes are carried as strings so the core
//! stays free of transport-crate types; adapters map their own error
//! values into these kinds at the boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the drive service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriveError {
    /// No credential is available because no user session was installed
    #[error("No user is signed in")]
    NoUserSignedIn,

    /// The token refresh round trip failed or was denied
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Network-level failure (DNS, connection, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status
    #[error("Unexpected status code {0}")]
    UnexpectedStatus(u16),

    /// The response body did not match the expected schema
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The local source file is missing or unreadable
    #[error("Cannot read local file {path}: {cause}")]
    LocalFileUnreadable {
        /// Path of the file that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        cause: String,
    },

    /// No usable root folder handle exists
    #[error("Root folder '{0}' is unavailable")]
    RootFolderUnavailable(String),
}
