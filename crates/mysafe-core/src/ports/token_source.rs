//! Token source port (driven/secondary port)
//!
//! This module defines the interface through which the core obtains bearer
//! credentials. The sign-in and consent flow lives entirely outside this
//! library; implementations wrap whatever session the embedding application
//! established and expose only credential supply and refresh.
//!
//! ## Design Notes
//!
//! - Returns [`DriveError`] rather than `anyhow::Error`: credential failures
//!   (`NoUserSignedIn`, `RefreshFailed`) are part of the domain taxonomy and
//!   callers branch on them.
//! - `refreshed_credential` guarantees freshness, not an unconditional round
//!   trip: implementations refresh only when the cached token is stale or
//!   absent.

use crate::domain::errors::DriveError;

/// A bearer token valid for exactly one request
///
/// Not retained beyond the current call and never persisted to disk by this
/// library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Opaque bearer token sent in the `Authorization` header
    pub token: String,
}

impl Credential {
    /// Creates a credential from an opaque bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Port trait for supplying bearer credentials
///
/// Every drive operation obtains its credential through this trait; the
/// store never reads auth state from anywhere else. Injected as an
/// `Arc<dyn TokenSource>` so tests can substitute fakes.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns the cached credential as-is, possibly stale
    ///
    /// # Errors
    /// `NoUserSignedIn` when no token has been installed
    async fn current_credential(&self) -> Result<Credential, DriveError>;

    /// Returns a credential guaranteed fresh, refreshing if needed
    ///
    /// May suspend for an identity-provider round trip when the cached
    /// token is stale or about to expire.
    ///
    /// # Errors
    /// `NoUserSignedIn` when no token has been installed;
    /// `RefreshFailed` when the refresh round trip fails or is denied
    async fn refreshed_credential(&self) -> Result<Credential, DriveError>;

    /// Returns the OAuth scopes currently granted (empty when signed out)
    async fn granted_scopes(&self) -> Vec<String>;
}
