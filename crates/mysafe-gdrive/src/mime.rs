//! MIME type lookup by file extension
//!
//! Uploads default to `application/octet-stream`; this table is for callers
//! that want to stamp metadata with a more specific content type.

use std::path::Path;

/// Fallback MIME type when the extension is missing or unknown
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Returns the MIME type matching the path's extension
///
/// Matching is case-insensitive on the extension. Paths without an
/// extension, and extensions not in the table, map to [`OCTET_STREAM`].
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return OCTET_STREAM;
    };
    match extension.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => OCTET_STREAM,
    }
}
