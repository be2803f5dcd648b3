//! What is known about a candidate file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Properties of a dropped or selected file.
///
/// Every field is optional: a drag-time item only announces a MIME type,
/// a picked file knows its name and size, and a desktop drop also knows
/// its path and modification time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Announced by the platform or guessed; may carry parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Without the dot, as written in the name (e.g. "JPG").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Filesystem path, or the path inside a dropped folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take values from `hint` for the fields this metadata does not know.
    pub fn merge_hints(&mut self, hint: &MetadataHint) {
        let Metadata {
            name,
            mime_type,
            size,
            extension,
            path,
            last_modified,
        } = hint;
        fill(&mut self.name, name);
        fill(&mut self.mime_type, mime_type);
        fill(&mut self.size, size);
        fill(&mut self.extension, extension);
        fill(&mut self.path, path);
        fill(&mut self.last_modified, last_modified);
    }
}

/// Caller-supplied values for a file being built. Same shape as
/// [`Metadata`].
pub type MetadataHint = Metadata;

fn fill<T: Clone>(slot: &mut Option<T>, hint: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(hint);
    }
}
