//! Integration tests for MIME type and extension detection.

use bytes::Bytes;
use dropzone::detection::{
    detect_from_bytes, detect_from_filename, extension_from_mime, extension_of,
};
use dropzone::{File, Metadata};

#[test]
fn test_detect_jpeg_magic_bytes() {
    let mut jpeg_header = vec![0xFF, 0xD8, 0xFF, 0xE0];
    jpeg_header.extend_from_slice(&[0; 64]);
    let result = detect_from_bytes(&jpeg_header, None);
    assert_eq!(result.mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(result.extension.as_deref(), Some("jpg"));
}

#[test]
fn test_detect_pdf_magic_bytes() {
    let result = detect_from_bytes(b"%PDF-1.7 trailing content", Some("scan.bin"));
    assert_eq!(result.mime_type.as_deref(), Some("application/pdf"));
}

#[test]
fn test_unknown_bytes_fall_back_to_name() {
    let result = detect_from_bytes(b"just some words", Some("notes.md"));
    assert_eq!(result.mime_type.as_deref(), Some("text/markdown"));
    assert_eq!(result.extension.as_deref(), Some("md"));
}

#[test]
fn test_unknown_bytes_without_name() {
    let result = detect_from_bytes(b"just some words", None);
    assert!(result.mime_type.is_none());
    assert!(result.extension.is_none());
}

#[test]
fn test_detect_from_filename_common_types() {
    let cases = [
        ("cats.gif", "image/gif"),
        ("dogs.jpg", "image/jpeg"),
        ("file1.pdf", "application/pdf"),
        ("data.json", "application/json"),
        ("clip.mp4", "video/mp4"),
    ];
    for (name, mime) in cases {
        assert_eq!(
            detect_from_filename(name).mime_type.as_deref(),
            Some(mime),
            "for {name}"
        );
    }
}

#[test]
fn test_detect_from_filename_unknown() {
    let result = detect_from_filename("archive.zzz-unknown");
    assert!(result.mime_type.is_none());
    assert_eq!(result.extension.as_deref(), Some("zzz-unknown"));
}

#[test]
fn test_extension_keeps_case() {
    assert_eq!(extension_of("PHOTO.JPG").as_deref(), Some("JPG"));
    assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
}

#[test]
fn test_dotfiles_have_no_extension() {
    assert!(extension_of(".DS_Store").is_none());
    assert!(extension_of("Makefile").is_none());
}

#[test]
fn test_extension_from_mime() {
    assert_eq!(extension_from_mime("application/pdf").as_deref(), Some("pdf"));
    assert!(extension_from_mime("application/x-not-a-real-type").is_none());
}

#[test]
fn test_file_with_empty_type_is_guessed() {
    // Platforms report "" for types they do not know.
    let file = File::new("report.pdf", 10, "");
    assert_eq!(file.mime_type(), Some("application/pdf"));
}

#[test]
fn test_file_from_bytes_sniffs_contents() {
    let hint = Metadata {
        name: Some("upload".to_string()),
        ..Default::default()
    };
    let file = File::from_bytes(Bytes::from_static(b"%PDF-1.4 body"), Some(hint));
    assert_eq!(file.name(), Some("upload"));
    assert_eq!(file.mime_type(), Some("application/pdf"));
    assert_eq!(file.extension(), Some("pdf"));
}
