//! Drop zone state and its observers.
//!
//! State is not tied to any UI framework. Readers take a snapshot with
//! [`Dropzone::state`](crate::Dropzone::state) or register an observer that
//! is called after every change.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::file::File;
use crate::validation::FileRejection;

/// Everything a template needs to render the drop zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropzoneState {
    /// The root has keyboard focus.
    pub is_focused: bool,
    /// The native file dialog was opened and has not reported back yet.
    pub is_file_dialog_active: bool,
    /// Files are being dragged over the root.
    pub is_drag_active: bool,
    /// The dragged files would all be accepted.
    pub is_drag_accept: bool,
    /// Some dragged file would be rejected.
    pub is_drag_reject: bool,
    /// What is being dragged; only MIME types are known.
    pub dragged_files: Vec<File>,
    /// Accepted files of the last drop or selection.
    pub accepted_files: Vec<File>,
    /// Rejections of the last drop or selection.
    pub file_rejections: Vec<FileRejection>,
}

impl DropzoneState {
    /// Enter the dragging state. Accept and reject are derived together so
    /// they can never both be set.
    pub(crate) fn start_drag(&mut self, dragged_files: Vec<File>, acceptable: bool) {
        let has_files = !dragged_files.is_empty();
        self.is_drag_active = true;
        self.is_drag_accept = has_files && acceptable;
        self.is_drag_reject = has_files && !acceptable;
        self.dragged_files = dragged_files;
    }

    /// Leave the dragging state.
    pub(crate) fn end_drag(&mut self) {
        self.is_drag_active = false;
        self.is_drag_accept = false;
        self.is_drag_reject = false;
        self.dragged_files.clear();
    }
}

type Observer = Rc<dyn Fn(&DropzoneState)>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

impl Observers {
    pub(crate) fn insert(&mut self, observer: Observer) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// A copy of the current observers, so none is borrowed while they run.
    pub(crate) fn snapshot(&self) -> Vec<Observer> {
        self.entries.iter().map(|(_, o)| o.clone()).collect()
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    observers: Weak<RefCell<Observers>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, observers: &Rc<RefCell<Observers>>) -> Self {
        Self {
            id,
            observers: Rc::downgrade(observers),
        }
    }

    /// Stop receiving updates.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            if let Ok(mut observers) = observers.try_borrow_mut() {
                observers.remove(self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
