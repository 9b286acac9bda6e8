//! Content-type sniffing for uploaded artifacts.

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Detects the MIME type of `content` from its leading bytes.
///
/// Recognised image formats map to their image MIME type. Anything else is
/// `text/plain` when it is valid UTF-8 and `application/octet-stream`
/// otherwise.
pub fn detect_content_type(content: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(content) {
        return format.to_mime_type();
    }
    if !content.is_empty() && std::str::from_utf8(content).is_ok() {
        return TEXT_PLAIN;
    }
    OCTET_STREAM
}
