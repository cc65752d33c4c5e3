//! Multipart/related body encoding for drive uploads
//!
//! The upload endpoint takes a single `multipart/related` body bundling a
//! JSON metadata part and a binary content part under one boundary:
//!
//! ```text
//! --{boundary}\r\n
//! Content-Type: application/json; charset=UTF-8\r\n\r\n
//! {metadata}\r\n
//! --{boundary}\r\n
//! Content-Type: application/octet-stream\r\n\r\n
//! {content}\r\n
//! --{boundary}--\r\n
//! ```
//!
//! Everything here is pure: no I/O, no shared state. Boundaries are random
//! 128-bit identifiers generated fresh per body and re-rolled until the
//! candidate occurs in neither part.

use uuid::Uuid;

/// Content-Type header line of the JSON metadata part
const METADATA_PART_HEADER: &[u8] = b"Content-Type: application/json; charset=UTF-8\r\n\r\n";

/// Content-Type header line of the binary content part
const CONTENT_PART_HEADER: &[u8] = b"Content-Type: application/octet-stream\r\n\r\n";

/// A fully encoded multipart/related body and the boundary it uses
#[derive(Debug, Clone)]
pub struct MultipartBody {
    /// The boundary to advertise in the `Content-Type` request header
    pub boundary: String,
    /// The encoded request body
    pub bytes: Vec<u8>,
}

/// Encodes a (metadata, content) pair under the given boundary
///
/// The caller is responsible for the boundary not occurring inside either
/// part; [`build`] takes care of that.
pub fn encode(metadata: &[u8], content: &[u8], boundary: &str) -> Vec<u8> {
    let mut body =
        Vec::with_capacity(metadata.len() + content.len() + 3 * boundary.len() + 128);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(METADATA_PART_HEADER);
    body.extend_from_slice(metadata);

    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(CONTENT_PART_HEADER);
    body.extend_from_slice(content);

    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Generates a random boundary that occurs in neither part
pub fn fresh_boundary(metadata: &[u8], content: &[u8]) -> String {
    boundary_avoiding(metadata, content, || Uuid::new_v4().to_string())
}

/// Builds a complete body with a fresh, collision-checked boundary
pub fn build(metadata: &[u8], content: &[u8]) -> MultipartBody {
    let boundary = fresh_boundary(metadata, content);
    let bytes = encode(metadata, content, &boundary);
    MultipartBody { boundary, bytes }
}

/// Draws candidates from `next` until one occurs in neither part
fn boundary_avoiding(
    metadata: &[u8],
    content: &[u8],
    mut next: impl FnMut() -> String,
) -> String {
    loop {
        let candidate = next();
        if !contains(metadata, candidate.as_bytes()) && !contains(content, candidate.as_bytes()) {
            return candidate;
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
