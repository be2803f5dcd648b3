//! Drop zone configuration and callbacks.
//!
//! [`DropzoneConfig`] is plain data and can be loaded from JSON.
//! [`DropzoneOptions`] pairs it with the lifecycle callbacks; its builder
//! methods set either side.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::accept::Accept;
use crate::error::{DropzoneError, Result};
use crate::event::{ChangeEvent, DragEvent, FileEvent, FocusEvent, KeyboardEvent, MouseEvent};
use crate::file::File;
use crate::validation::{FileRejection, RejectionError, Validator};

/// The data half of the options. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropzoneConfig {
    /// MIME types and extensions to accept; `None` accepts everything.
    pub accept: Option<Accept>,
    /// Allow more than one file per drop or selection.
    pub multiple: bool,
    /// Turn every handler into a no-op.
    pub disabled: bool,
    /// Largest accepted size in bytes.
    pub max_size: Option<u64>,
    /// Smallest accepted size in bytes.
    pub min_size: u64,
    /// Most files accepted per batch; 0 means unlimited.
    pub max_files: usize,
    /// Do not open the file dialog when the root is clicked.
    pub no_click: bool,
    /// Do not make the root focusable or react to Enter/Space.
    pub no_keyboard: bool,
    /// Ignore drag events on the root.
    pub no_drag: bool,
    /// Stop drag events from bubbling past the root.
    pub no_drag_events_bubbling: bool,
    /// Keep the browser from opening files dropped outside the root.
    pub prevent_drop_on_document: bool,
}

impl Default for DropzoneConfig {
    fn default() -> Self {
        Self {
            accept: None,
            multiple: false,
            disabled: false,
            max_size: None,
            min_size: 0,
            max_files: 0,
            no_click: false,
            no_keyboard: false,
            no_drag: false,
            no_drag_events_bubbling: false,
            prevent_drop_on_document: true,
        }
    }
}

impl DropzoneConfig {
    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).map_err(DropzoneError::Config)?;
        tracing::debug!(?config, "Loaded dropzone config");
        Ok(config)
    }

    /// The `accept` attribute for the file input.
    pub fn accept_attribute(&self) -> Option<String> {
        self.accept.as_ref().and_then(Accept::attribute)
    }
}

/// Called for a drag transition.
pub type DragCallback = Rc<dyn Fn(&DragEvent)>;
/// Called with the outcome of a drop or selection. The event is absent when
/// the batch did not come from a drag event.
pub type DropCallback = Rc<dyn Fn(&[File], &[FileRejection], Option<&DragEvent>)>;
/// Called with the accepted files of a batch.
pub type AcceptedCallback = Rc<dyn Fn(&[File])>;
/// Called with the rejections of a batch.
pub type RejectedCallback = Rc<dyn Fn(&[FileRejection])>;
/// Called when the file dialog opens or is cancelled.
pub type DialogCallback = Rc<dyn Fn()>;
/// Called with an unexpected failure.
pub type ErrorCallback = Rc<dyn Fn(&DropzoneError)>;
/// Replaces the default file extraction.
pub type ExtractFn = Rc<dyn Fn(FileEvent<'_>) -> Result<Vec<File>>>;
/// Called for a plain DOM event.
pub type EventCallback<E> = Rc<dyn Fn(&E)>;

/// Configuration plus lifecycle callbacks.
///
/// ```
/// # use dropzone::DropzoneOptions;
/// let options = DropzoneOptions::new()
///     .multiple(true)
///     .accept("image/*")
///     .max_size(5 * 1024 * 1024)
///     .on_drop_accepted(|files| println!("{} files", files.len()));
/// assert!(options.config.multiple);
/// ```
#[derive(Clone, Default)]
pub struct DropzoneOptions {
    /// The data half.
    pub config: DropzoneConfig,
    /// Replaces [`files_from_event`](crate::event::files_from_event).
    pub get_files_from_event: Option<ExtractFn>,
    /// Extra per-file checks.
    pub validator: Option<Validator>,
    pub(crate) on_drag_enter: Option<DragCallback>,
    pub(crate) on_drag_over: Option<DragCallback>,
    pub(crate) on_drag_leave: Option<DragCallback>,
    pub(crate) on_drop: Option<DropCallback>,
    pub(crate) on_drop_accepted: Option<AcceptedCallback>,
    pub(crate) on_drop_rejected: Option<RejectedCallback>,
    pub(crate) on_file_dialog_open: Option<DialogCallback>,
    pub(crate) on_file_dialog_cancel: Option<DialogCallback>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) on_click: Option<EventCallback<MouseEvent>>,
    pub(crate) on_key_down: Option<EventCallback<KeyboardEvent>>,
    pub(crate) on_key_up: Option<EventCallback<KeyboardEvent>>,
    pub(crate) on_focus: Option<EventCallback<FocusEvent>>,
    pub(crate) on_blur: Option<EventCallback<FocusEvent>>,
    pub(crate) on_change: Option<EventCallback<ChangeEvent>>,
}

impl DropzoneOptions {
    /// Default options: single file, everything accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options around an existing config.
    pub fn with_config(config: DropzoneConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    // -----------------------------------------------------------------------
    // Config
    // -----------------------------------------------------------------------

    pub fn accept(mut self, accept: impl Into<Accept>) -> Self {
        self.config.accept = Some(accept.into());
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.config.max_size = Some(bytes);
        self
    }

    pub fn min_size(mut self, bytes: u64) -> Self {
        self.config.min_size = bytes;
        self
    }

    pub fn max_files(mut self, count: usize) -> Self {
        self.config.max_files = count;
        self
    }

    pub fn no_click(mut self, no_click: bool) -> Self {
        self.config.no_click = no_click;
        self
    }

    pub fn no_keyboard(mut self, no_keyboard: bool) -> Self {
        self.config.no_keyboard = no_keyboard;
        self
    }

    pub fn no_drag(mut self, no_drag: bool) -> Self {
        self.config.no_drag = no_drag;
        self
    }

    pub fn no_drag_events_bubbling(mut self, stop: bool) -> Self {
        self.config.no_drag_events_bubbling = stop;
        self
    }

    pub fn prevent_drop_on_document(mut self, prevent: bool) -> Self {
        self.config.prevent_drop_on_document = prevent;
        self
    }

    /// Override how files are read from events.
    pub fn get_files_from_event(
        mut self,
        f: impl Fn(FileEvent<'_>) -> Result<Vec<File>> + 'static,
    ) -> Self {
        self.get_files_from_event = Some(Rc::new(f));
        self
    }

    /// Add a custom per-file check.
    pub fn validator(mut self, f: impl Fn(&File) -> Vec<RejectionError> + 'static) -> Self {
        self.validator = Some(Rc::new(f));
        self
    }

    // -----------------------------------------------------------------------
    // Callbacks
    // -----------------------------------------------------------------------

    pub fn on_drag_enter(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_enter = Some(Rc::new(f));
        self
    }

    pub fn on_drag_over(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_over = Some(Rc::new(f));
        self
    }

    pub fn on_drag_leave(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_leave = Some(Rc::new(f));
        self
    }

    /// Called after every drop or selection with both lists.
    pub fn on_drop(
        mut self,
        f: impl Fn(&[File], &[FileRejection], Option<&DragEvent>) + 'static,
    ) -> Self {
        self.on_drop = Some(Rc::new(f));
        self
    }

    /// Called when a batch has at least one accepted file.
    pub fn on_drop_accepted(mut self, f: impl Fn(&[File]) + 'static) -> Self {
        self.on_drop_accepted = Some(Rc::new(f));
        self
    }

    /// Called when a batch has at least one rejection.
    pub fn on_drop_rejected(mut self, f: impl Fn(&[FileRejection]) + 'static) -> Self {
        self.on_drop_rejected = Some(Rc::new(f));
        self
    }

    pub fn on_file_dialog_open(mut self, f: impl Fn() + 'static) -> Self {
        self.on_file_dialog_open = Some(Rc::new(f));
        self
    }

    pub fn on_file_dialog_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_file_dialog_cancel = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&DropzoneError) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub fn on_click(mut self, f: impl Fn(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn on_key_down(mut self, f: impl Fn(&KeyboardEvent) + 'static) -> Self {
        self.on_key_down = Some(Rc::new(f));
        self
    }

    pub fn on_key_up(mut self, f: impl Fn(&KeyboardEvent) + 'static) -> Self {
        self.on_key_up = Some(Rc::new(f));
        self
    }

    pub fn on_focus(mut self, f: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Rc::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_blur = Some(Rc::new(f));
        self
    }

    pub fn on_change(mut self, f: impl Fn(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for DropzoneOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropzoneOptions")
            .field("config", &self.config)
            .field("get_files_from_event", &self.get_files_from_event.is_some())
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DropzoneConfig::default();
        assert!(!config.multiple);
        assert!(!config.disabled);
        assert_eq!(config.max_files, 0);
        assert_eq!(config.min_size, 0);
        assert!(config.max_size.is_none());
        assert!(config.prevent_drop_on_document);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            DropzoneConfig::from_json(r#"{"multiple":true,"accept":{"image/*":[".png"]},"max_files":3}"#)
                .unwrap();
        assert!(config.multiple);
        assert_eq!(config.max_files, 3);
        assert!(config.prevent_drop_on_document);
        assert_eq!(config.accept_attribute().as_deref(), Some("image/*,.png"));
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = DropzoneConfig::from_json(r#"{"multipel":true}"#).unwrap_err();
        assert!(matches!(err, DropzoneError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let options = DropzoneOptions::new()
            .accept("image/jpeg")
            .multiple(true)
            .min_size(1)
            .max_size(10)
            .on_drop(|_, _, _| {});
        assert_eq!(options.config.accept, Some(Accept::from("image/jpeg")));
        assert_eq!(options.config.min_size, 1);
        assert_eq!(options.config.max_size, Some(10));
        assert!(options.on_drop.is_some());
        assert!(options.on_drop_accepted.is_none());
    }
}
