//! The file validation pipeline.
//!
//! [`validate_files`] partitions a batch of candidate files into accepted
//! files and rejections. It is pure and order preserving: both output lists
//! keep the order the files had in the event.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::accept::{is_file_accepted, AcceptRule};
use crate::file::File;
use crate::options::DropzoneConfig;

/// A custom per-file check. Returned errors are appended after the built-in
/// ones; an empty list means the file passes.
pub type Validator = Rc<dyn Fn(&File) -> Vec<RejectionError>>;

/// Why a file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// `file-invalid-type`
    FileInvalidType,
    /// `file-too-large`
    FileTooLarge,
    /// `file-too-small`
    FileTooSmall,
    /// `too-many-files`
    TooManyFiles,
    /// A code produced by a custom validator.
    Custom(String),
}

impl ErrorCode {
    /// The wire form of the code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::FileInvalidType => "file-invalid-type",
            ErrorCode::FileTooLarge => "file-too-large",
            ErrorCode::FileTooSmall => "file-too-small",
            ErrorCode::TooManyFiles => "too-many-files",
            ErrorCode::Custom(code) => code.as_str(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "file-invalid-type" => ErrorCode::FileInvalidType,
            "file-too-large" => ErrorCode::FileTooLarge,
            "file-too-small" => ErrorCode::FileTooSmall,
            "too-many-files" => ErrorCode::TooManyFiles,
            _ => ErrorCode::Custom(code),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

/// One reason a file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionError {
    /// Machine readable code.
    pub code: ErrorCode,
    /// Human readable message.
    pub message: String,
}

impl RejectionError {
    /// Build an error from a code and a message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The file's type matches none of the accept entries.
    pub fn invalid_type(entries: &[String]) -> Self {
        let suffix = match entries {
            [single] => single.clone(),
            _ => format!("one of {}", entries.join(", ")),
        };
        Self::new(ErrorCode::FileInvalidType, format!("File type must be {suffix}"))
    }

    /// The file is bigger than `max_size`.
    pub fn too_large(max_size: u64) -> Self {
        Self::new(
            ErrorCode::FileTooLarge,
            format!("File is larger than {max_size} {}", bytes_unit(max_size)),
        )
    }

    /// The file is smaller than `min_size`.
    pub fn too_small(min_size: u64) -> Self {
        Self::new(
            ErrorCode::FileTooSmall,
            format!("File is smaller than {min_size} {}", bytes_unit(min_size)),
        )
    }

    /// The batch holds more accepted files than `max_files`.
    pub fn too_many_files() -> Self {
        Self::new(ErrorCode::TooManyFiles, "Too many files")
    }
}

fn bytes_unit(n: u64) -> &'static str {
    if n == 1 {
        "byte"
    } else {
        "bytes"
    }
}

/// A file excluded from the accepted set.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRejection {
    /// The rejected file.
    pub file: File,
    /// Every reason, in check order.
    pub errors: Vec<RejectionError>,
}

impl FileRejection {
    /// Whether one of the errors carries `code`.
    pub fn has_code(&self, code: &ErrorCode) -> bool {
        self.errors.iter().any(|e| &e.code == code)
    }
}

/// The outcome of validating one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    /// Files that passed every check.
    pub accepted: Vec<File>,
    /// Files that failed at least one check.
    pub rejections: Vec<FileRejection>,
}

/// Check a single file against the type, size and custom checks.
pub fn file_errors(
    file: &File,
    rules: &[(String, AcceptRule)],
    config: &DropzoneConfig,
    validator: Option<&Validator>,
) -> Vec<RejectionError> {
    let mut errors = Vec::new();

    if !is_file_accepted(file, rules) {
        let entries: Vec<String> = rules.iter().map(|(entry, _)| entry.clone()).collect();
        errors.push(RejectionError::invalid_type(&entries));
    }

    // Drag-time items have no size yet; the check waits for the drop.
    if let Some(size) = file.size() {
        if let Some(max_size) = config.max_size {
            if size > max_size {
                errors.push(RejectionError::too_large(max_size));
            }
        }
        if size < config.min_size {
            errors.push(RejectionError::too_small(config.min_size));
        }
    }

    if let Some(validator) = validator {
        errors.extend(validator(file));
    }

    errors
}

/// Partition `files` into accepted files and rejections.
///
/// Without `multiple` only the first file is considered. With `multiple`
/// and a non-zero `max_files`, a batch whose accepted count exceeds the
/// limit has every accepted file rejected with `too-many-files`.
pub fn validate_files(
    files: Vec<File>,
    config: &DropzoneConfig,
    validator: Option<&Validator>,
) -> Validated {
    let mut files = files;
    if !config.multiple && files.len() > 1 {
        tracing::debug!(ignored = files.len() - 1, "Ignoring extra files without multiple");
        files.truncate(1);
    }

    let rules = config
        .accept
        .as_ref()
        .map(|accept| accept.rules())
        .unwrap_or_default();

    let checked: Vec<(File, Vec<RejectionError>)> = files
        .into_iter()
        .map(|file| {
            let errors = file_errors(&file, &rules, config, validator);
            (file, errors)
        })
        .collect();

    let accepted_count = checked.iter().filter(|(_, errors)| errors.is_empty()).count();
    let too_many = config.multiple && config.max_files > 0 && accepted_count > config.max_files;
    if too_many {
        tracing::debug!(
            accepted_count,
            max_files = config.max_files,
            "Rejecting batch over max_files"
        );
    }

    let mut validated = Validated::default();
    for (file, errors) in checked {
        if errors.is_empty() && !too_many {
            validated.accepted.push(file);
        } else if errors.is_empty() {
            validated.rejections.push(FileRejection {
                file,
                errors: vec![RejectionError::too_many_files()],
            });
        } else {
            validated.rejections.push(FileRejection { file, errors });
        }
    }
    validated
}

/// Whether a batch being dragged would be accepted if dropped now.
pub fn is_drag_acceptable(
    files: &[File],
    config: &DropzoneConfig,
    validator: Option<&Validator>,
) -> bool {
    let validated = validate_files(files.to_vec(), config, validator);
    !validated.accepted.is_empty() && validated.rejections.is_empty()
}
