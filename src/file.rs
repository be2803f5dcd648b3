//! The `File` struct: a candidate file offered to the drop zone.
//!
//! A `File` is a handle to what the platform told us about a file (name,
//! MIME type, size) plus, optionally, its contents when they were built in
//! memory. The drop zone never reads or transforms contents; they only help
//! detection when a file is created from bytes.

use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::detection::{detect_from_bytes, detect_from_filename, extension_from_mime, extension_of};
use crate::error::Result;
use crate::metadata::{Metadata, MetadataHint};
use crate::source::FileSource;

/// A candidate file from a drop, a drag item, a picker selection or a path.
///
/// # Examples
///
/// ```
/// # use dropzone::File;
/// let file = File::new("dogs.jpg", 2345, "image/jpeg");
/// assert_eq!(file.name(), Some("dogs.jpg"));
/// assert_eq!(file.size(), Some(2345));
///
/// // Missing types are guessed from the name.
/// let file = File::new("report.pdf", 10, "");
/// assert_eq!(file.mime_type(), Some("application/pdf"));
/// ```
#[derive(Clone, PartialEq)]
pub struct File {
    source: FileSource,
    metadata: Metadata,
    data: Option<Bytes>,
}

impl File {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a `File` the way the platform describes one: a name, a size in
    /// bytes and a MIME type, which may be empty.
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        let metadata = Metadata {
            name: Some(name.into()),
            mime_type: non_empty(mime_type.into()),
            size: Some(size),
            ..Default::default()
        };
        Self::with_metadata(FileSource::DataTransfer, metadata)
    }

    /// Create a placeholder for a `dataTransfer.items` entry seen during a
    /// drag. Only the MIME type is known at that point.
    pub fn from_item(mime_type: impl Into<String>) -> Self {
        let metadata = Metadata {
            mime_type: non_empty(mime_type.into()),
            ..Default::default()
        };
        Self::with_metadata(FileSource::DataTransferItem, metadata)
    }

    /// Create a `File` from metadata, completing the MIME type and extension
    /// from the name where they are missing.
    pub fn with_metadata(source: FileSource, mut metadata: Metadata) -> Self {
        complete_metadata(&mut metadata);
        Self {
            source,
            metadata,
            data: None,
        }
    }

    /// Create a `File` from raw bytes.
    pub fn from_bytes(data: Bytes, hint: Option<MetadataHint>) -> Self {
        let mut metadata = Metadata::new();

        if let Some(h) = &hint {
            metadata.merge_hints(h);
        }

        metadata.size = Some(data.len() as u64);

        let detection = detect_from_bytes(&data, metadata.name.as_deref());
        if metadata.mime_type.is_none() {
            metadata.mime_type = detection.mime_type;
        }
        if metadata.extension.is_none() {
            metadata.extension = detection.extension;
        }
        complete_metadata(&mut metadata);

        tracing::info!(?metadata, "File created from bytes");

        Self {
            source: FileSource::Bytes,
            data: Some(data),
            metadata,
        }
    }

    /// Create a `File` from a local filesystem path, as delivered by desktop
    /// shells that drop paths rather than browser `File` objects.
    ///
    /// Only filesystem metadata is read; contents stay on disk.
    pub fn from_path<P: AsRef<Path>>(path: P, hint: Option<MetadataHint>) -> Result<Self> {
        let path = path.as_ref();
        let fs_meta = std::fs::metadata(path)?;

        let mut metadata = Metadata::new();
        if let Some(h) = &hint {
            metadata.merge_hints(h);
        }

        metadata.path = Some(path.to_string_lossy().to_string());
        if metadata.name.is_none() {
            metadata.name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|s| s.to_string());
        }
        metadata.size = Some(fs_meta.len());
        if let Ok(modified) = fs_meta.modified() {
            metadata.last_modified = Some(DateTime::<Utc>::from(modified));
        }
        complete_metadata(&mut metadata);

        tracing::info!(?metadata, "File created from path");

        Ok(Self {
            source: FileSource::Path,
            metadata,
            data: None,
        })
    }

    /// Re-tag the file with the source it was extracted from.
    pub fn with_source(mut self, source: FileSource) -> Self {
        self.source = source;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Where this file came from.
    pub fn source(&self) -> FileSource {
        self.source
    }

    /// All known metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The file name, unknown for drag-time items.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// The MIME type, announced or guessed.
    pub fn mime_type(&self) -> Option<&str> {
        self.metadata.mime_type.as_deref()
    }

    /// The size in bytes, unknown for drag-time items.
    pub fn size(&self) -> Option<u64> {
        self.metadata.size
    }

    /// The extension without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.metadata.extension.as_deref()
    }

    /// The filesystem or relative path.
    pub fn path(&self) -> Option<&str> {
        self.metadata.path.as_deref()
    }

    /// When the file was last modified, if the platform said.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.metadata.last_modified
    }

    /// In-memory contents, only present for files built from bytes.
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// Returns a JSON string representation of the file metadata and source.
    pub fn to_string_pretty(&self) -> String {
        #[derive(serde::Serialize)]
        struct FileRepr<'a> {
            source: &'a FileSource,
            #[serde(flatten)]
            metadata: &'a Metadata,
        }
        let repr = FileRepr {
            source: &self.source,
            metadata: &self.metadata,
        };
        serde_json::to_string(&repr).unwrap_or_default()
    }
}

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_pretty())
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("source", &self.source)
            .field("metadata", &self.metadata)
            .field("data_len", &self.data.as_ref().map(|d| d.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Fill the MIME type from the name and the extension from the name or MIME.
fn complete_metadata(metadata: &mut Metadata) {
    if let Some(name) = &metadata.name {
        if metadata.mime_type.is_none() {
            metadata.mime_type = detect_from_filename(name).mime_type;
        }
        if metadata.extension.is_none() {
            metadata.extension = extension_of(name);
        }
    }
    if metadata.extension.is_none() {
        if let Some(mime) = &metadata.mime_type {
            metadata.extension = extension_from_mime(mime);
        }
    }
}
