//! MySafe Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `RemoteFile`, `FileListing`, `UploadMetadata`
//! - **Error taxonomy** - `DriveError`, the typed failures every operation surfaces
//! - **Port definitions** - Traits for adapters: `TokenSource`, `FileStore`
//! - **Configuration** - YAML-backed settings with validation and a builder
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no transport
//! dependencies. Ports define trait interfaces that adapter crates implement;
//! the Google Drive adapter lives in `mysafe-gdrive`.

pub mod config;
pub mod domain;
pub mod ports;
