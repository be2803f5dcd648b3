//! Dropzone: a framework-agnostic file drop zone controller.
//!
//! # Overview
//!
//! A [`Dropzone`] turns native drag-and-drop, pointer, keyboard, focus and
//! file-input events into validated file lists and a handful of state flags.
//! A template binds two prop bundles:
//!
//! - [`RootProps`] on the drop zone element (`role="button"`, `tabindex`,
//!   click/key/focus/drag handlers),
//! - [`InputProps`] on a hidden `<input type="file">`.
//!
//! Dropped or selected files go through the validation pipeline in
//! [`validation`]: an accept list of MIME types and extensions, size bounds,
//! `multiple` and `max_files`. Accepted files and [`FileRejection`]s are
//! published together, and state changes reach observers registered with
//! [`Dropzone::subscribe`].
//!
//! Nothing here uploads, reads or renders anything.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use dropzone::{ChangeEvent, Dropzone, DropzoneOptions, File, InputPropsExtra};
//!
//! let accepted = Rc::new(RefCell::new(Vec::new()));
//! let sink = accepted.clone();
//! let dropzone = Dropzone::new(
//!     DropzoneOptions::new()
//!         .accept("application/pdf")
//!         .on_drop_accepted(move |files| sink.borrow_mut().extend(files.iter().cloned())),
//! );
//!
//! let input = dropzone.get_input_props(InputPropsExtra::new());
//! assert_eq!(input.attributes()["accept"], "application/pdf");
//!
//! (input.on_change)(&ChangeEvent::new(vec![File::new("file1.pdf", 1111, "application/pdf")]));
//! assert_eq!(accepted.borrow().len(), 1);
//! ```

pub mod accept;
pub mod detection;
pub mod dropzone;
pub mod error;
pub mod event;
pub mod file;
pub mod metadata;
pub mod options;
pub mod props;
pub mod source;
pub mod state;
pub mod validation;

// Re-export primary types at the crate root for convenience.
pub use crate::accept::Accept;
pub use crate::dropzone::{Dropzone, GlobalListener, Host};
pub use crate::error::DropzoneError;
pub use crate::event::{
    ChangeEvent, DataTransfer, DataTransferItem, DragEvent, DropEffect, Event, EventTarget,
    FileEvent, FocusEvent, KeyboardEvent, MouseEvent,
};
pub use crate::file::File;
pub use crate::metadata::{Metadata, MetadataHint};
pub use crate::options::{DropzoneConfig, DropzoneOptions};
pub use crate::props::{InputProps, InputPropsExtra, RootProps, RootPropsExtra};
pub use crate::source::FileSource;
pub use crate::state::{DropzoneState, Subscription};
pub use crate::validation::{ErrorCode, FileRejection, RejectionError};

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
