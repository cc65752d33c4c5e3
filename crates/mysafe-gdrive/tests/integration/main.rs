//! Integration tests for mysafe-gdrive
//!
//! Uses wiremock to simulate the Drive API and the OAuth token endpoint,
//! and verifies end-to-end behavior of the file store, the sync client,
//! and token refresh.

mod common;

mod test_auth;
