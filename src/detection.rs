//! MIME type and file extension detection.
//!
//! Browsers report an empty type for files the OS does not recognise, so a
//! candidate file's MIME type is filled in from, in priority order:
//! 1. the type announced by the platform,
//! 2. `infer` magic byte detection when contents are in memory,
//! 3. `mime_guess` from the file name.

/// A MIME type and extension, either of which may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub mime_type: Option<String>,
    /// Without the dot.
    pub extension: Option<String>,
}

/// Sniff `bytes` with `infer`; unknown signatures fall back to `filename`.
pub fn detect_from_bytes(bytes: &[u8], filename: Option<&str>) -> Detection {
    infer::get(bytes)
        .map(|kind| Detection {
            mime_type: Some(kind.mime_type().to_string()),
            extension: Some(kind.extension().to_string()),
        })
        .or_else(|| filename.map(detect_from_filename))
        .unwrap_or_default()
}

/// Guess from a file name with `mime_guess`. The extension is kept even when
/// no type is registered for it.
pub fn detect_from_filename(filename: &str) -> Detection {
    Detection {
        mime_type: mime_guess::from_path(filename)
            .first()
            .map(|m| m.essence_str().to_string()),
        extension: extension_of(filename),
    }
}

/// The extension of a file name without the dot, as written.
///
/// Dotfiles such as `.DS_Store` have no extension.
pub fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_string())
}

/// Detect an extension from a known MIME type string.
pub fn extension_from_mime(mime: &str) -> Option<String> {
    mime_guess::get_mime_extensions_str(mime)
        .and_then(|exts| exts.first().copied())
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let png_bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let result = detect_from_bytes(&png_bytes, None);
        assert_eq!(result.mime_type.as_deref(), Some("image/png"));
        assert_eq!(result.extension.as_deref(), Some("png"));
    }

    #[test]
    fn test_magic_bytes_win_over_filename() {
        let gif_bytes = b"GIF89a\x01\x00\x01\x00\x80\x00\x00";
        let result = detect_from_bytes(gif_bytes, Some("dogs.jpg"));
        assert_eq!(result.mime_type.as_deref(), Some("image/gif"));
    }

    #[test]
    fn test_unknown_bytes_fall_back_to_filename() {
        let result = detect_from_bytes(b"plain words", Some("notes.txt"));
        assert_eq!(result.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(result.extension.as_deref(), Some("txt"));
    }

    #[test]
    fn test_unknown_bytes_no_filename() {
        let result = detect_from_bytes(b"plain words", None);
        assert!(result.mime_type.is_none());
        assert!(result.extension.is_none());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("cats.GIF").as_deref(), Some("GIF"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of(".DS_Store"), None);
        assert_eq!(extension_of("README"), None);
    }

    #[test]
    fn test_extension_from_mime() {
        assert_eq!(extension_from_mime("application/pdf").as_deref(), Some("pdf"));
        assert!(extension_from_mime("application/x-totally-unknown-thing").is_none());
    }
}
