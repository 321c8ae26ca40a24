//! Upload validation: image MIME guess by extension and the 10MB cap.
//!
//! No dimension/format/DICOM parsing happens anywhere; a bad extension or
//! an oversized file aborts the operation with a user-facing message.

use std::path::Path;

use crate::error::FractureError;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME type guessed from the file extension, image types only.
pub fn image_mime_for(name: &str) -> Option<&'static str> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// Validate an upload before it goes anywhere.
pub fn validate_upload(name: &str, size: u64) -> Result<&'static str, FractureError> {
    let mime = image_mime_for(name).ok_or_else(|| {
        FractureError::Validation("Please upload a valid image file".to_string())
    })?;
    if size > MAX_UPLOAD_BYTES {
        return Err(FractureError::Validation(
            "File size too large. Please upload an image smaller than 10MB".to_string(),
        ));
    }
    Ok(mime)
}
