//! MIME type detection module
//!
//! Returns the image Content-Type for a file extension.

/// Content-Type used when the extension is missing or not an image format
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Get image Content-Type based on file extension
///
/// # Examples
/// ```ignore
/// assert_eq!(get_image_type(Some("png")), "image/png");
/// assert_eq!(get_image_type(Some("bin")), "image/jpeg");
/// assert_eq!(get_image_type(None), "image/jpeg");
/// ```
pub fn get_image_type(extension: Option<&str>) -> &'static str {
    let lower = extension.map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("jpg" | "jpeg" | "jpe") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",

        // Default
        _ => DEFAULT_IMAGE_TYPE,
    }
}
