//! Product image resolution.

/// Prefix of a base64-encoded JPEG (the encoding of the `FF D8 FF` marker).
const BASE64_JPEG_MAGIC: &str = "/9j/";

/// Turn a stored image reference into something a client can load.
///
/// Images are stored as absolute URLs, backend-relative paths, or raw base64
/// JPEG bodies. Relative paths are resolved against `asset_origin`.
pub fn resolve_image_url(image: Option<&str>, asset_origin: &str) -> Option<String> {
    let image = image?.trim();
    if image.is_empty() {
        return None;
    }
    if image.starts_with(BASE64_JPEG_MAGIC) {
        return Some(format!("data:image/jpeg;base64,{}", image));
    }
    if image.starts_with("http") {
        return Some(image.to_string());
    }
    if image.starts_with('/') {
        return Some(format!("{}{}", asset_origin.trim_end_matches('/'), image));
    }
    Some(image.to_string())
}
