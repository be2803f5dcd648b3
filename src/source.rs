//! File source enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents where a candidate file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileSource {
    /// Taken from `dataTransfer.files` of a drop.
    DataTransfer,
    /// Built from a `dataTransfer.items` entry. During a drag only the
    /// MIME type is known for these.
    DataTransferItem,
    /// Selected through the file input's picker.
    Input,
    /// Read from a local filesystem path (desktop drops).
    Path,
    /// Created from raw bytes in memory.
    Bytes,
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::DataTransfer => write!(f, "DataTransfer"),
            FileSource::DataTransferItem => write!(f, "DataTransferItem"),
            FileSource::Input => write!(f, "Input"),
            FileSource::Path => write!(f, "Path"),
            FileSource::Bytes => write!(f, "Bytes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FileSource::DataTransfer.to_string(), "DataTransfer");
        assert_eq!(FileSource::DataTransferItem.to_string(), "DataTransferItem");
        assert_eq!(FileSource::Input.to_string(), "Input");
        assert_eq!(FileSource::Path.to_string(), "Path");
        assert_eq!(FileSource::Bytes.to_string(), "Bytes");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&FileSource::Input).unwrap();
        assert_eq!(json, "\"Input\"");
    }

    #[test]
    fn test_deserialize() {
        let source: FileSource = serde_json::from_str("\"DataTransfer\"").unwrap();
        assert_eq!(source, FileSource::DataTransfer);
    }
}
