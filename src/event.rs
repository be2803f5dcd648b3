//! The native event shapes the drop zone consumes.
//!
//! These mirror the platform's drag-and-drop, pointer, keyboard, focus and
//! file-input `change` events closely enough for a host adapter to translate
//! real events one to one. Only the parts the drop zone reads are modelled.

use std::cell::Cell;

use crate::error::{DropzoneError, Result};
use crate::file::File;
use crate::source::FileSource;

/// The `types` entry announcing that a drag payload carries files.
pub const FILES_TYPE: &str = "Files";

/// OS metadata files that are never offered as dropped files.
const FILES_TO_IGNORE: &[&str] = &[".DS_Store", "Thumbs.db"];

/// The element an event was dispatched to, relative to the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// The root element itself.
    #[default]
    Root,
    /// The hidden file input.
    Input,
    /// A descendant of the root. Interactive descendants (buttons, links,
    /// form controls) keep their own click and key behavior.
    Child {
        /// Whether the descendant is a control of its own.
        interactive: bool,
    },
    /// Somewhere in the document outside the root.
    Outside,
}

impl EventTarget {
    /// Whether the target lies within the root's subtree.
    pub fn is_within_root(self) -> bool {
        !matches!(self, EventTarget::Outside)
    }
}

/// The `prevent_default` and `stop_propagation` flags every event carries.
#[derive(Debug, Default)]
pub struct EventFlags {
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

/// Behavior shared by all native events.
pub trait Event {
    /// The element the event was dispatched to.
    fn target(&self) -> EventTarget;

    /// The event's flags.
    fn flags(&self) -> &EventFlags;

    /// Cancel the platform's default action.
    fn prevent_default(&self) {
        self.flags().default_prevented.set(true);
    }

    /// Stop the event from reaching ancestors.
    fn stop_propagation(&self) {
        self.flags().propagation_stopped.set(true);
    }

    /// Whether `prevent_default` was called.
    fn is_default_prevented(&self) -> bool {
        self.flags().default_prevented.get()
    }

    /// Whether `stop_propagation` was called.
    fn is_propagation_stopped(&self) -> bool {
        self.flags().propagation_stopped.get()
    }
}

/// A pointer click.
#[derive(Debug, Default)]
pub struct MouseEvent {
    target: EventTarget,
    flags: EventFlags,
}

impl MouseEvent {
    /// A click dispatched to `target`.
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            flags: EventFlags::default(),
        }
    }
}

/// A key press or release.
#[derive(Debug, Default)]
pub struct KeyboardEvent {
    target: EventTarget,
    flags: EventFlags,
    key: String,
}

impl KeyboardEvent {
    /// A keyboard event for `key` (the platform's `key` value) on `target`.
    pub fn new(target: EventTarget, key: impl Into<String>) -> Self {
        Self {
            target,
            flags: EventFlags::default(),
            key: key.into(),
        }
    }

    /// The platform `key` value, e.g. `"Enter"` or `" "`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the key activates a button: Enter or Space.
    pub fn is_activation(&self) -> bool {
        matches!(self.key.as_str(), "Enter" | " " | "Spacebar")
    }
}

/// A focus or blur.
#[derive(Debug, Default)]
pub struct FocusEvent {
    target: EventTarget,
    flags: EventFlags,
}

impl FocusEvent {
    /// A focus change on `target`.
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            flags: EventFlags::default(),
        }
    }
}

/// The operation a drop target advertises during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    /// Not set by the drop zone.
    #[default]
    None,
    /// Copy the dragged files.
    Copy,
}

/// The kind of a `dataTransfer.items` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A file.
    File,
    /// A string payload (text, URL, HTML).
    String,
}

/// An entry of `dataTransfer.items`.
#[derive(Debug, Clone)]
pub struct DataTransferItem {
    /// What the entry holds.
    pub kind: ItemKind,
    /// The announced MIME type.
    pub mime_type: String,
    file: Option<File>,
}

impl DataTransferItem {
    /// A file entry.
    pub fn file(file: File) -> Self {
        Self {
            kind: ItemKind::File,
            mime_type: file.mime_type().unwrap_or_default().to_string(),
            file: Some(file),
        }
    }

    /// A file entry whose file is not reachable (`getAsFile()` yields null).
    pub fn unreadable(mime_type: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::File,
            mime_type: mime_type.into(),
            file: None,
        }
    }

    /// A string entry.
    pub fn string(mime_type: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::String,
            mime_type: mime_type.into(),
            file: None,
        }
    }

    /// The entry's file, as `getAsFile()` would return it.
    pub fn get_as_file(&self) -> Option<&File> {
        self.file.as_ref()
    }
}

/// The payload of a drag.
#[derive(Debug, Default)]
pub struct DataTransfer {
    /// `dataTransfer.files`; empty until the drop on most platforms.
    pub files: Vec<File>,
    /// `dataTransfer.items`.
    pub items: Vec<DataTransferItem>,
    /// `dataTransfer.types`.
    pub types: Vec<String>,
    drop_effect: Cell<DropEffect>,
}

impl DataTransfer {
    /// A payload carrying `files`, with matching items and the `Files` type.
    pub fn with_files(files: Vec<File>) -> Self {
        let items = files.iter().cloned().map(DataTransferItem::file).collect();
        Self {
            files,
            items,
            types: vec![FILES_TYPE.to_string()],
            drop_effect: Cell::new(DropEffect::None),
        }
    }

    /// A payload as seen during a drag: items with types but no file list.
    pub fn with_items(items: Vec<DataTransferItem>) -> Self {
        let carries_files = items.iter().any(|i| i.kind == ItemKind::File);
        Self {
            files: Vec::new(),
            items,
            types: if carries_files {
                vec![FILES_TYPE.to_string()]
            } else {
                vec!["text/plain".to_string()]
            },
            drop_effect: Cell::new(DropEffect::None),
        }
    }

    /// Whether `types` announces files.
    pub fn has_files(&self) -> bool {
        self.types.iter().any(|t| t == FILES_TYPE)
    }

    /// The drop effect set during drag over.
    pub fn drop_effect(&self) -> DropEffect {
        self.drop_effect.get()
    }

    /// Advertise a drop effect.
    pub fn set_drop_effect(&self, effect: DropEffect) {
        self.drop_effect.set(effect);
    }
}

/// The phase of a drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// `dragenter`
    Enter,
    /// `dragover`
    Over,
    /// `dragleave`
    Leave,
    /// `drop`
    Drop,
}

/// A drag-and-drop event.
#[derive(Debug)]
pub struct DragEvent {
    kind: DragKind,
    target: EventTarget,
    flags: EventFlags,
    data_transfer: Option<DataTransfer>,
}

impl DragEvent {
    /// A drag event of `kind` on the root.
    pub fn new(kind: DragKind, data_transfer: Option<DataTransfer>) -> Self {
        Self {
            kind,
            target: EventTarget::Root,
            flags: EventFlags::default(),
            data_transfer,
        }
    }

    /// `dragenter` on the root.
    pub fn enter(data_transfer: DataTransfer) -> Self {
        Self::new(DragKind::Enter, Some(data_transfer))
    }

    /// `dragover` on the root.
    pub fn over(data_transfer: DataTransfer) -> Self {
        Self::new(DragKind::Over, Some(data_transfer))
    }

    /// `dragleave` on the root.
    pub fn leave(data_transfer: DataTransfer) -> Self {
        Self::new(DragKind::Leave, Some(data_transfer))
    }

    /// `drop` on the root.
    pub fn drop(data_transfer: DataTransfer) -> Self {
        Self::new(DragKind::Drop, Some(data_transfer))
    }

    /// Dispatch the event to another target.
    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// The drag phase.
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// The payload, absent for synthetic events.
    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    /// Whether the payload announces files.
    pub fn has_files(&self) -> bool {
        self.data_transfer.as_ref().is_some_and(DataTransfer::has_files)
    }
}

/// A `change` event from the file input.
#[derive(Debug, Default)]
pub struct ChangeEvent {
    target: EventTarget,
    flags: EventFlags,
    files: Option<Vec<File>>,
}

impl ChangeEvent {
    /// A selection of `files` on the input.
    pub fn new(files: Vec<File>) -> Self {
        Self {
            target: EventTarget::Input,
            flags: EventFlags::default(),
            files: Some(files),
        }
    }

    /// A change event whose target exposes no file list.
    pub fn without_files() -> Self {
        Self {
            target: EventTarget::Input,
            flags: EventFlags::default(),
            files: None,
        }
    }

    /// `target.files`.
    pub fn files(&self) -> Option<&[File]> {
        self.files.as_deref()
    }
}

macro_rules! impl_event {
    ($($ty:ty),*) => {
        $(
            impl Event for $ty {
                fn target(&self) -> EventTarget {
                    self.target
                }

                fn flags(&self) -> &EventFlags {
                    &self.flags
                }
            }
        )*
    };
}

impl_event!(MouseEvent, KeyboardEvent, FocusEvent, DragEvent, ChangeEvent);

/// An event files can be extracted from.
#[derive(Debug, Clone, Copy)]
pub enum FileEvent<'a> {
    /// A drag event; items during the drag, files on drop.
    Drag(&'a DragEvent),
    /// The input's `change` event.
    Change(&'a ChangeEvent),
}

/// The default file extraction.
///
/// During a drag only items are available, so each file item becomes a
/// placeholder carrying its MIME type. On drop the file list is used,
/// falling back to the items' files. A `change` event yields the input's
/// selection. OS metadata files are dropped.
pub fn files_from_event(event: FileEvent<'_>) -> Result<Vec<File>> {
    match event {
        FileEvent::Drag(drag) => {
            let Some(dt) = drag.data_transfer() else {
                return Ok(Vec::new());
            };
            if drag.kind() != DragKind::Drop {
                return Ok(dt
                    .items
                    .iter()
                    .filter(|item| item.kind == ItemKind::File)
                    .map(|item| File::from_item(item.mime_type.clone()))
                    .collect());
            }
            let files = if !dt.files.is_empty() {
                dt.files.clone()
            } else {
                dt.items
                    .iter()
                    .filter(|item| item.kind == ItemKind::File)
                    .map(|item| {
                        item.get_as_file().cloned().ok_or_else(|| {
                            DropzoneError::Extraction(format!(
                                "item of type {:?} is not a file",
                                item.mime_type
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?
            };
            Ok(without_ignored(files, FileSource::DataTransfer))
        }
        FileEvent::Change(change) => Ok(without_ignored(
            change.files().map(<[File]>::to_vec).unwrap_or_default(),
            FileSource::Input,
        )),
    }
}

fn without_ignored(files: Vec<File>, source: FileSource) -> Vec<File> {
    files
        .into_iter()
        .filter(|f| !f.name().is_some_and(|n| FILES_TO_IGNORE.contains(&n)))
        .map(|f| match f.source() {
            FileSource::Path | FileSource::Bytes => f,
            _ => f.with_source(source),
        })
        .collect()
}
