//! MIME hints by file extension.
//!
//! The hint travels with the upload as the part's content type; nothing is
//! rejected because of it.

use std::path::Path;

/// Guess a MIME type from the file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "avif"         => "image/avif",
        "heic"         => "image/heic",
        "svg"          => "image/svg+xml",
        "ico"          => "image/x-icon",

        "pdf"          => "application/pdf",

        _              => "application/octet-stream",
    }
}
