//! JPEG format checks applied before an upload is accepted.

use crate::error::{GalleryError, GalleryResult};

/// Extensions recognised as JPEG images (compared case-insensitively).
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// MIME type stored alongside image objects.
pub const JPEG_MIME: &str = "image/jpeg";

/// Return the extension of the final path segment of an object name.
pub(crate) fn extension(name: &str) -> Option<&str> {
    let file = name.rsplit('/').next().unwrap_or(name);
    match file.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => Some(ext),
        _ => None,
    }
}

/// The JPEG extension the final path segment ends with, as written.
///
/// Unlike [`extension`], a bare `.jpg` segment still counts.
pub(crate) fn jpeg_extension(name: &str) -> Option<&str> {
    let file = name.rsplit('/').next().unwrap_or(name);
    let (_, ext) = file.rsplit_once('.')?;
    JPEG_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        .then_some(ext)
}

/// Whether an object name ends in `.jpg` or `.jpeg` (case-insensitive).
pub fn is_jpeg_name(name: &str) -> bool {
    jpeg_extension(name).is_some()
}

/// Whether the bytes start with the JPEG SOI marker.
pub fn has_jpeg_magic(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF
}

/// Reject uploads that are not JPEG by name or by content.
pub fn ensure_jpeg(name: &str, bytes: &[u8]) -> GalleryResult<()> {
    if name.trim().is_empty() {
        return Err(GalleryError::UnsupportedFormat {
            name: name.to_string(),
            reason: "empty file name".to_string(),
        });
    }
    if !is_jpeg_name(name) {
        return Err(GalleryError::UnsupportedFormat {
            name: name.to_string(),
            reason: "expected a .jpg or .jpeg file".to_string(),
        });
    }
    if !has_jpeg_magic(bytes) {
        return Err(GalleryError::UnsupportedFormat {
            name: name.to_string(),
            reason: "content is not JPEG (invalid magic bytes)".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00];

    #[test]
    fn test_is_jpeg_name_case_insensitive() {
        assert!(is_jpeg_name("cat.jpg"));
        assert!(is_jpeg_name("cat.JPG"));
        assert!(is_jpeg_name("holiday/beach.JpEg"));
        assert!(!is_jpeg_name("cat.json"));
        assert!(!is_jpeg_name("cat.png"));
        assert!(!is_jpeg_name("jpg"));
        assert!(!is_jpeg_name("dir.jpg/readme"));
        assert!(!is_jpeg_name("cat.jpg.txt"));
    }

    #[test]
    fn test_is_jpeg_name_without_base() {
        assert!(is_jpeg_name(".jpg"));
        assert!(is_jpeg_name("album/.JPEG"));
    }

    #[test]
    fn test_has_jpeg_magic() {
        assert!(has_jpeg_magic(JPEG));
        assert!(!has_jpeg_magic(&[0x89, b'P', b'N', b'G']));
        assert!(!has_jpeg_magic(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_ensure_jpeg_rejects_wrong_extension() {
        let err = ensure_jpeg("cat.png", JPEG).unwrap_err();
        assert!(matches!(err, GalleryError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_ensure_jpeg_rejects_wrong_content() {
        let err = ensure_jpeg("cat.jpg", b"GIF89a").unwrap_err();
        assert!(err.to_string().contains("magic bytes"));
    }

    #[test]
    fn test_ensure_jpeg_accepts_jpeg() {
        assert!(ensure_jpeg("cat.jpeg", JPEG).is_ok());
    }
}
