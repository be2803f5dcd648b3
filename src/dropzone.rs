//! The drop zone controller.
//!
//! [`Dropzone`] turns native drag, pointer, keyboard, focus and `change`
//! events into validated file lists and a few state flags. It hands out
//! two prop bundles, one for the root element and one for a hidden file
//! input, and an [`open`](Dropzone::open) action.
//!
//! Every generated handler follows the same order: the internal step runs
//! first so state is current, then the option callback, then the caller's
//! own handler. While `disabled` is set nothing runs at all.
//!
//! Platform interop lives behind [`Host`]: clicking the hidden input and
//! registering document and window listeners. The host forwards those
//! listeners' events to [`Dropzone::handle_document_drag_over`],
//! [`Dropzone::handle_document_drop`] and [`Dropzone::handle_window_focus`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::event::{
    files_from_event, ChangeEvent, DragEvent, DropEffect, Event, EventTarget, FileEvent,
    FocusEvent, KeyboardEvent, MouseEvent,
};
use crate::file::File;
use crate::options::{DropzoneConfig, DropzoneOptions};
use crate::props::{call, Handler, InputProps, InputPropsExtra, RootProps, RootPropsExtra, HIDDEN_STYLE};
use crate::state::{DropzoneState, Observers, Subscription};
use crate::validation::{is_drag_acceptable, validate_files, Validated};

/// A global listener the drop zone needs while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalListener {
    /// `dragover` on the document, routed to
    /// [`Dropzone::handle_document_drag_over`].
    DocumentDragOver,
    /// `drop` on the document, routed to [`Dropzone::handle_document_drop`].
    DocumentDrop,
    /// `focus` on the window, routed to [`Dropzone::handle_window_focus`].
    /// Hosts should deliver it after a short delay so that a pending
    /// `change` from the file input arrives first.
    WindowFocus,
}

/// The platform side of a mounted drop zone.
pub trait Host {
    /// Open the native file picker, typically by clicking the hidden input.
    fn open_file_dialog(&self);

    /// Start forwarding a global listener's events.
    fn attach(&self, listener: GlobalListener);

    /// Stop forwarding a global listener's events.
    fn detach(&self, listener: GlobalListener);
}

struct Inner {
    options: RefCell<DropzoneOptions>,
    state: RefCell<DropzoneState>,
    drag_depth: Cell<usize>,
    host: RefCell<Option<Rc<dyn Host>>>,
    attached: RefCell<Vec<GlobalListener>>,
    observers: Rc<RefCell<Observers>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(host) = self.host.get_mut().take() {
            for listener in self.attached.get_mut().drain(..) {
                host.detach(listener);
            }
        }
    }
}

/// A drop zone controller.
///
/// Cloning is cheap and every clone drives the same drop zone.
///
/// ```
/// use dropzone::{DataTransfer, DragEvent, Dropzone, DropzoneOptions, File, RootPropsExtra};
///
/// let dropzone = Dropzone::new(DropzoneOptions::new().multiple(true).accept("image/jpeg"));
/// let root = dropzone.get_root_props(RootPropsExtra::new());
///
/// let files = vec![
///     File::new("cats.gif", 1234, "image/gif"),
///     File::new("dogs.jpg", 2345, "image/jpeg"),
/// ];
/// (root.on_drop)(&DragEvent::drop(DataTransfer::with_files(files)));
///
/// let state = dropzone.state();
/// assert_eq!(state.accepted_files[0].name(), Some("dogs.jpg"));
/// assert_eq!(state.file_rejections[0].file.name(), Some("cats.gif"));
/// ```
#[derive(Clone)]
pub struct Dropzone {
    inner: Rc<Inner>,
}

impl Dropzone {
    /// Create a drop zone. It handles events right away; [`mount`](Self::mount)
    /// it to enable the file dialog and document listeners.
    pub fn new(options: DropzoneOptions) -> Self {
        Self {
            inner: Rc::new(Inner {
                options: RefCell::new(options),
                state: RefCell::new(DropzoneState::default()),
                drag_depth: Cell::new(0),
                host: RefCell::new(None),
                attached: RefCell::new(Vec::new()),
                observers: Rc::new(RefCell::new(Observers::default())),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Options and state
    // -----------------------------------------------------------------------

    /// The current options.
    pub fn options(&self) -> DropzoneOptions {
        self.inner.options.borrow().clone()
    }

    /// The current config.
    pub fn config(&self) -> DropzoneConfig {
        self.inner.options.borrow().config.clone()
    }

    /// Replace the options. Prop bundles fetched afterwards reflect them, and
    /// handlers already handed out read them at event time.
    pub fn set_options(&self, options: DropzoneOptions) {
        *self.inner.options.borrow_mut() = options;
        self.sync_listeners();
    }

    /// Change the config in place.
    pub fn update_config(&self, f: impl FnOnce(&mut DropzoneConfig)) {
        f(&mut self.inner.options.borrow_mut().config);
        self.sync_listeners();
    }

    /// A snapshot of the state.
    pub fn state(&self) -> DropzoneState {
        self.inner.state.borrow().clone()
    }

    /// Call `observer` with the new state after every change.
    pub fn subscribe(&self, observer: impl Fn(&DropzoneState) + 'static) -> Subscription {
        let id = self.inner.observers.borrow_mut().insert(Rc::new(observer));
        Subscription::new(id, &self.inner.observers)
    }

    fn update_state(&self, f: impl FnOnce(&mut DropzoneState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.clone();
            f(&mut *state);
            if *state == before {
                return;
            }
            state.clone()
        };
        let observers = self.inner.observers.borrow().snapshot();
        for observer in observers {
            observer(&snapshot);
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Attach to a host and register the global listeners the config asks for.
    pub fn mount(&self, host: Rc<dyn Host>) {
        self.detach_all();
        *self.inner.host.borrow_mut() = Some(host);
        self.sync_listeners();
        tracing::debug!("Dropzone mounted");
    }

    /// Detach every listener, drop the host and forget all state and
    /// observers.
    pub fn unmount(&self) {
        self.detach_all();
        self.inner.drag_depth.set(0);
        *self.inner.state.borrow_mut() = DropzoneState::default();
        self.inner.observers.borrow_mut().clear();
        tracing::debug!("Dropzone unmounted");
    }

    /// Whether a host is attached.
    pub fn is_mounted(&self) -> bool {
        self.inner.host.borrow().is_some()
    }

    fn detach_all(&self) {
        let host = self.inner.host.borrow_mut().take();
        let attached: Vec<GlobalListener> = self.inner.attached.borrow_mut().drain(..).collect();
        if let Some(host) = host {
            for listener in attached {
                host.detach(listener);
            }
        }
    }

    fn sync_listeners(&self) {
        let Some(host) = self.inner.host.borrow().clone() else {
            return;
        };
        let mut wanted = vec![GlobalListener::WindowFocus];
        if self.inner.options.borrow().config.prevent_drop_on_document {
            wanted.push(GlobalListener::DocumentDragOver);
            wanted.push(GlobalListener::DocumentDrop);
        }

        let (to_detach, to_attach) = {
            let mut attached = self.inner.attached.borrow_mut();
            let to_detach: Vec<GlobalListener> =
                attached.iter().copied().filter(|l| !wanted.contains(l)).collect();
            let to_attach: Vec<GlobalListener> =
                wanted.iter().copied().filter(|l| !attached.contains(l)).collect();
            *attached = wanted;
            (to_detach, to_attach)
        };
        for listener in to_detach {
            host.detach(listener);
        }
        for listener in to_attach {
            host.attach(listener);
        }
    }

    // -----------------------------------------------------------------------
    // Prop getters
    // -----------------------------------------------------------------------

    /// Attributes and handlers for the root element.
    pub fn get_root_props(&self, extra: RootPropsExtra) -> RootProps {
        let config = self.config();
        let RootPropsExtra {
            attrs,
            on_click,
            on_key_down,
            on_key_up,
            on_focus,
            on_blur,
            on_drag_enter,
            on_drag_over,
            on_drag_leave,
            on_drop,
        } = extra;

        RootProps {
            tab_index: if config.no_keyboard { None } else { Some(0) },
            role: "button",
            attrs,
            on_click: self.handler(on_click, Self::root_click),
            on_key_down: self.handler(on_key_down, Self::root_key_down),
            on_key_up: self.handler(on_key_up, Self::root_key_up),
            on_focus: self.handler(on_focus, Self::root_focus),
            on_blur: self.handler(on_blur, Self::root_blur),
            on_drag_enter: self.handler(on_drag_enter, Self::drag_enter),
            on_drag_over: self.handler(on_drag_over, Self::drag_over),
            on_drag_leave: self.handler(on_drag_leave, Self::drag_leave),
            on_drop: self.handler(on_drop, Self::drop_files),
        }
    }

    /// Attributes and handlers for the hidden file input.
    pub fn get_input_props(&self, extra: InputPropsExtra) -> InputProps {
        let config = self.config();
        let InputPropsExtra {
            attrs,
            on_click,
            on_change,
        } = extra;

        InputProps {
            r#type: "file",
            style: HIDDEN_STYLE,
            tab_index: -1,
            accept: config.accept_attribute(),
            multiple: config.multiple,
            disabled: config.disabled,
            attrs,
            on_click: self.handler(on_click, Self::input_click),
            on_change: self.handler(on_change, Self::input_change),
        }
    }

    /// Compose an internal step with the caller's handler. The internal step
    /// decides whether to run the option callback; the caller's handler runs
    /// afterwards unless the drop zone is disabled.
    fn handler<E: 'static>(
        &self,
        extra: Option<Handler<E>>,
        internal: fn(&Self, &DropzoneOptions, &E),
    ) -> Handler<E> {
        let dropzone = self.clone();
        Rc::new(move |event: &E| {
            let options = dropzone.options();
            if options.config.disabled {
                return;
            }
            internal(&dropzone, &options, event);
            call(&extra, event);
        })
    }

    // -----------------------------------------------------------------------
    // Imperative actions
    // -----------------------------------------------------------------------

    /// Open the native file picker. Does nothing while disabled or unmounted.
    pub fn open(&self) {
        let options = self.options();
        if options.config.disabled {
            return;
        }
        let Some(host) = self.inner.host.borrow().clone() else {
            tracing::warn!("Cannot open the file dialog: dropzone is not mounted");
            return;
        };
        self.update_state(|s| s.is_file_dialog_active = true);
        if let Some(cb) = &options.on_file_dialog_open {
            cb();
        }
        host.open_file_dialog();
    }

    /// Window focus came back. If the file dialog is still marked active no
    /// selection arrived, so treat it as cancelled.
    pub fn handle_window_focus(&self) {
        if !self.inner.state.borrow().is_file_dialog_active {
            return;
        }
        tracing::debug!("File dialog cancelled");
        self.update_state(|s| s.is_file_dialog_active = false);
        if let Some(cb) = &self.options().on_file_dialog_cancel {
            cb();
        }
    }

    /// Document-level `dragover`: allow drops so the browser does not take
    /// over the file.
    pub fn handle_document_drag_over(&self, event: &DragEvent) {
        if self.inner.options.borrow().config.prevent_drop_on_document {
            event.prevent_default();
        }
    }

    /// Document-level `drop`: drops outside the root are swallowed, drops
    /// inside are left to the root's handler.
    pub fn handle_document_drop(&self, event: &DragEvent) {
        if event.target().is_within_root() {
            return;
        }
        if self.inner.options.borrow().config.prevent_drop_on_document {
            event.prevent_default();
        }
        self.inner.drag_depth.set(0);
        self.update_state(DropzoneState::end_drag);
    }

    // -----------------------------------------------------------------------
    // Root handlers
    // -----------------------------------------------------------------------

    fn root_click(&self, options: &DropzoneOptions, event: &MouseEvent) {
        let opens = matches!(
            event.target(),
            EventTarget::Root | EventTarget::Child { interactive: false }
        );
        if !options.config.no_click && opens {
            self.open();
        }
        call(&options.on_click, event);
    }

    fn root_key_down(&self, options: &DropzoneOptions, event: &KeyboardEvent) {
        if !options.config.no_keyboard
            && event.target() == EventTarget::Root
            && event.is_activation()
        {
            event.prevent_default();
            self.open();
        }
        call(&options.on_key_down, event);
    }

    fn root_key_up(&self, options: &DropzoneOptions, event: &KeyboardEvent) {
        call(&options.on_key_up, event);
    }

    fn root_focus(&self, options: &DropzoneOptions, event: &FocusEvent) {
        if !options.config.no_keyboard {
            self.update_state(|s| s.is_focused = true);
        }
        call(&options.on_focus, event);
    }

    fn root_blur(&self, options: &DropzoneOptions, event: &FocusEvent) {
        if !options.config.no_keyboard {
            self.update_state(|s| s.is_focused = false);
        }
        call(&options.on_blur, event);
    }

    // -----------------------------------------------------------------------
    // Drag handlers
    // -----------------------------------------------------------------------

    fn claim_drag_event(config: &DropzoneConfig, event: &DragEvent) {
        event.prevent_default();
        if config.no_drag_events_bubbling {
            event.stop_propagation();
        }
    }

    fn drag_enter(&self, options: &DropzoneOptions, event: &DragEvent) {
        if options.config.no_drag {
            return;
        }
        Self::claim_drag_event(&options.config, event);

        let depth = self.inner.drag_depth.get() + 1;
        self.inner.drag_depth.set(depth);
        if !event.has_files() {
            return;
        }

        let files = self.extract(options, FileEvent::Drag(event));
        let acceptable = is_drag_acceptable(&files, &options.config, options.validator.as_ref());
        self.update_state(|s| s.start_drag(files, acceptable));

        if depth == 1 {
            tracing::debug!(acceptable, "Drag entered dropzone");
            if let Some(cb) = &options.on_drag_enter {
                cb(event);
            }
        }
    }

    fn drag_over(&self, options: &DropzoneOptions, event: &DragEvent) {
        if options.config.no_drag {
            return;
        }
        Self::claim_drag_event(&options.config, event);

        if let Some(dt) = event.data_transfer().filter(|dt| dt.has_files()) {
            dt.set_drop_effect(DropEffect::Copy);
            if let Some(cb) = &options.on_drag_over {
                cb(event);
            }
        }
    }

    fn drag_leave(&self, options: &DropzoneOptions, event: &DragEvent) {
        if options.config.no_drag {
            return;
        }
        Self::claim_drag_event(&options.config, event);

        let depth = self.inner.drag_depth.get().saturating_sub(1);
        self.inner.drag_depth.set(depth);
        // Leaving a child element still leaves us inside the root.
        if depth > 0 {
            return;
        }

        let was_active = self.inner.state.borrow().is_drag_active;
        self.update_state(DropzoneState::end_drag);
        if was_active {
            tracing::debug!("Drag left dropzone");
            if let Some(cb) = &options.on_drag_leave {
                cb(event);
            }
        }
    }

    fn drop_files(&self, options: &DropzoneOptions, event: &DragEvent) {
        if options.config.no_drag {
            return;
        }
        Self::claim_drag_event(&options.config, event);
        self.inner.drag_depth.set(0);

        if !event.has_files() {
            self.update_state(DropzoneState::end_drag);
            return;
        }
        let files = self.extract(options, FileEvent::Drag(event));
        self.resolve_batch(options, files, Some(event), false);
    }

    // -----------------------------------------------------------------------
    // Input handlers
    // -----------------------------------------------------------------------

    fn input_click(&self, _options: &DropzoneOptions, event: &MouseEvent) {
        // Keep the click from reaching the root and reopening the picker.
        event.stop_propagation();
    }

    fn input_change(&self, options: &DropzoneOptions, event: &ChangeEvent) {
        let files = self.extract(options, FileEvent::Change(event));
        if files.is_empty() {
            let was_active = self.inner.state.borrow().is_file_dialog_active;
            self.update_state(|s| s.is_file_dialog_active = false);
            if was_active {
                tracing::debug!("File dialog closed without a selection");
                if let Some(cb) = &options.on_file_dialog_cancel {
                    cb();
                }
            }
        } else {
            self.resolve_batch(options, files, None, true);
        }
        call(&options.on_change, event);
    }

    // -----------------------------------------------------------------------
    // Pipeline
    // -----------------------------------------------------------------------

    /// Read files from an event. Failures are reported through `on_error`
    /// and yield no files.
    fn extract(&self, options: &DropzoneOptions, event: FileEvent<'_>) -> Vec<File> {
        let result = match &options.get_files_from_event {
            Some(extract) => extract(event),
            None => files_from_event(event),
        };
        match result {
            Ok(files) => files,
            Err(err) => {
                tracing::warn!(%err, "Failed to extract files from event");
                if let Some(cb) = &options.on_error {
                    cb(&err);
                }
                Vec::new()
            }
        }
    }

    /// Validate a dropped or selected batch, publish it in one update and
    /// fire the drop callbacks.
    fn resolve_batch(
        &self,
        options: &DropzoneOptions,
        files: Vec<File>,
        event: Option<&DragEvent>,
        closes_dialog: bool,
    ) {
        let Validated {
            accepted,
            rejections,
        } = validate_files(files, &options.config, options.validator.as_ref());

        tracing::info!(
            accepted = accepted.len(),
            rejected = rejections.len(),
            "Dropzone files resolved"
        );

        self.update_state(|s| {
            s.end_drag();
            if closes_dialog {
                s.is_file_dialog_active = false;
            }
            s.accepted_files = accepted.clone();
            s.file_rejections = rejections.clone();
        });

        if !accepted.is_empty() {
            if let Some(cb) = &options.on_drop_accepted {
                cb(&accepted);
            }
        }
        if !rejections.is_empty() {
            if let Some(cb) = &options.on_drop_rejected {
                cb(&rejections);
            }
        }
        if let Some(cb) = &options.on_drop {
            cb(&accepted, &rejections, event);
        }
    }
}

impl std::fmt::Debug for Dropzone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropzone")
            .field("options", &*self.inner.options.borrow())
            .field("state", &*self.inner.state.borrow())
            .field("drag_depth", &self.inner.drag_depth.get())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DataTransfer;

    fn pdf() -> File {
        File::new("file1.pdf", 1111, "application/pdf")
    }

    #[test]
    fn test_nested_enter_leave_keeps_drag_active() {
        let dropzone = Dropzone::new(DropzoneOptions::new());
        let root = dropzone.get_root_props(RootPropsExtra::new());

        (root.on_drag_enter)(&DragEvent::enter(DataTransfer::with_files(vec![pdf()])));
        (root.on_drag_enter)(
            &DragEvent::enter(DataTransfer::with_files(vec![pdf()]))
                .with_target(EventTarget::Child { interactive: false }),
        );
        assert_eq!(dropzone.inner.drag_depth.get(), 2);

        (root.on_drag_leave)(&DragEvent::leave(DataTransfer::with_files(vec![pdf()])));
        assert!(dropzone.state().is_drag_active);

        (root.on_drag_leave)(&DragEvent::leave(DataTransfer::with_files(vec![pdf()])));
        assert!(!dropzone.state().is_drag_active);
        assert_eq!(dropzone.inner.drag_depth.get(), 0);
    }

    #[test]
    fn test_extra_leave_does_not_underflow() {
        let dropzone = Dropzone::new(DropzoneOptions::new());
        let root = dropzone.get_root_props(RootPropsExtra::new());
        (root.on_drag_leave)(&DragEvent::leave(DataTransfer::default()));
        assert_eq!(dropzone.inner.drag_depth.get(), 0);
    }

    #[test]
    fn test_drop_resets_depth() {
        let dropzone = Dropzone::new(DropzoneOptions::new());
        let root = dropzone.get_root_props(RootPropsExtra::new());
        (root.on_drag_enter)(&DragEvent::enter(DataTransfer::with_files(vec![pdf()])));
        (root.on_drag_enter)(&DragEvent::enter(DataTransfer::with_files(vec![pdf()])));
        (root.on_drop)(&DragEvent::drop(DataTransfer::with_files(vec![pdf()])));
        assert_eq!(dropzone.inner.drag_depth.get(), 0);
        assert!(!dropzone.state().is_drag_active);
    }

    #[test]
    fn test_unchanged_state_does_not_notify() {
        let dropzone = Dropzone::new(DropzoneOptions::new());
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let _sub = dropzone.subscribe(move |_| seen.set(seen.get() + 1));

        dropzone.update_state(|s| s.is_focused = true);
        dropzone.update_state(|s| s.is_focused = true);
        assert_eq!(calls.get(), 1);
    }
}
