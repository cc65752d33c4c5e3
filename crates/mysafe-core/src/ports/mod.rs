//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`TokenSource`] - Bearer credential supply and refresh
//! - [`FileStore`] - Remote file operations (list, search, create, upload)

pub mod file_store;
pub mod token_source;

pub use file_store::FileStore;
pub use token_source::{Credential, TokenSource};
