//! Prop bundles for the root element and the hidden file input.
//!
//! A template spreads [`RootProps`] on its drop zone element and
//! [`InputProps`] on a hidden `<input type="file">`. Callers pass their own
//! attributes and handlers through [`RootPropsExtra`] / [`InputPropsExtra`];
//! attributes are shallow-merged over the generated ones and handlers run
//! after the generated ones.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::event::{ChangeEvent, DragEvent, FocusEvent, KeyboardEvent, MouseEvent};

/// An event handler.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// Plain HTML attributes, by name.
pub type Attrs = BTreeMap<String, String>;

/// The style that keeps the file input out of sight.
pub const HIDDEN_STYLE: &str = "display: none";

/// Attributes and handlers for the drop zone root.
#[derive(Clone)]
pub struct RootProps {
    /// `tabindex`; `None` when keyboard interaction is off.
    pub tab_index: Option<i32>,
    /// `role`.
    pub role: &'static str,
    /// Caller attributes.
    pub attrs: Attrs,
    /// `click`: opens the file dialog.
    pub on_click: Handler<MouseEvent>,
    /// `keydown`: Enter or Space opens the file dialog.
    pub on_key_down: Handler<KeyboardEvent>,
    /// `keyup`.
    pub on_key_up: Handler<KeyboardEvent>,
    /// `focus`: sets `is_focused`.
    pub on_focus: Handler<FocusEvent>,
    /// `blur`: clears `is_focused`.
    pub on_blur: Handler<FocusEvent>,
    /// `dragenter`: starts or deepens a drag.
    pub on_drag_enter: Handler<DragEvent>,
    /// `dragover`: advertises a copy.
    pub on_drag_over: Handler<DragEvent>,
    /// `dragleave`: ends the drag once the root itself is left.
    pub on_drag_leave: Handler<DragEvent>,
    /// `drop`: validates and publishes the dropped files.
    pub on_drop: Handler<DragEvent>,
}

impl RootProps {
    /// Render the attributes as HTML would see them. Caller attributes
    /// override generated ones of the same name.
    pub fn attributes(&self) -> Attrs {
        let mut attrs = Attrs::new();
        attrs.insert("role".to_string(), self.role.to_string());
        if let Some(tab_index) = self.tab_index {
            attrs.insert("tabindex".to_string(), tab_index.to_string());
        }
        attrs.extend(self.attrs.clone());
        attrs
    }
}

impl fmt::Debug for RootProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootProps")
            .field("tab_index", &self.tab_index)
            .field("role", &self.role)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

/// Attributes and handlers for the hidden file input.
#[derive(Clone)]
pub struct InputProps {
    /// Always `"file"`.
    pub r#type: &'static str,
    /// Always [`HIDDEN_STYLE`].
    pub style: &'static str,
    /// Always `-1`, the input is reached through the root.
    pub tab_index: i32,
    /// `accept`, from the current config.
    pub accept: Option<String>,
    /// `multiple`, from the current config.
    pub multiple: bool,
    /// `disabled`, from the current config.
    pub disabled: bool,
    /// Caller attributes.
    pub attrs: Attrs,
    /// `click`: kept from reaching the root.
    pub on_click: Handler<MouseEvent>,
    /// `change`: validates and publishes the selection.
    pub on_change: Handler<ChangeEvent>,
}

impl InputProps {
    /// Render the attributes as HTML would see them. Boolean attributes are
    /// present with an empty value or absent.
    pub fn attributes(&self) -> Attrs {
        let mut attrs = Attrs::new();
        attrs.insert("type".to_string(), self.r#type.to_string());
        attrs.insert("style".to_string(), self.style.to_string());
        attrs.insert("tabindex".to_string(), self.tab_index.to_string());
        if let Some(accept) = &self.accept {
            attrs.insert("accept".to_string(), accept.clone());
        }
        if self.multiple {
            attrs.insert("multiple".to_string(), String::new());
        }
        if self.disabled {
            attrs.insert("disabled".to_string(), String::new());
        }
        attrs.extend(self.attrs.clone());
        attrs
    }
}

impl fmt::Debug for InputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("accept", &self.accept)
            .field("multiple", &self.multiple)
            .field("disabled", &self.disabled)
            .field("attrs", &self.attrs)
            .finish_non_exhaustive()
    }
}

/// Caller attributes and handlers for the root.
///
/// Each handler runs after the matching generated one.
#[derive(Clone, Default)]
pub struct RootPropsExtra {
    /// Merged over the generated attributes.
    pub attrs: Attrs,
    /// Extra `click` handler.
    pub on_click: Option<Handler<MouseEvent>>,
    /// Extra `keydown` handler.
    pub on_key_down: Option<Handler<KeyboardEvent>>,
    /// Extra `keyup` handler.
    pub on_key_up: Option<Handler<KeyboardEvent>>,
    /// Extra `focus` handler.
    pub on_focus: Option<Handler<FocusEvent>>,
    /// Extra `blur` handler.
    pub on_blur: Option<Handler<FocusEvent>>,
    /// Extra `dragenter` handler.
    pub on_drag_enter: Option<Handler<DragEvent>>,
    /// Extra `dragover` handler.
    pub on_drag_over: Option<Handler<DragEvent>>,
    /// Extra `dragleave` handler.
    pub on_drag_leave: Option<Handler<DragEvent>>,
    /// Extra `drop` handler.
    pub on_drop: Option<Handler<DragEvent>>,
}

impl RootPropsExtra {
    /// No attributes and no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, e.g. `aria-label`.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Run `f` on `click`.
    pub fn on_click(mut self, f: impl Fn(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    /// Run `f` on `keydown`.
    pub fn on_key_down(mut self, f: impl Fn(&KeyboardEvent) + 'static) -> Self {
        self.on_key_down = Some(Rc::new(f));
        self
    }

    /// Run `f` on `keyup`.
    pub fn on_key_up(mut self, f: impl Fn(&KeyboardEvent) + 'static) -> Self {
        self.on_key_up = Some(Rc::new(f));
        self
    }

    /// Run `f` on `focus`.
    pub fn on_focus(mut self, f: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Rc::new(f));
        self
    }

    /// Run `f` on `blur`.
    pub fn on_blur(mut self, f: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_blur = Some(Rc::new(f));
        self
    }

    /// Run `f` on `dragenter`.
    pub fn on_drag_enter(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_enter = Some(Rc::new(f));
        self
    }

    /// Run `f` on `dragover`.
    pub fn on_drag_over(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_over = Some(Rc::new(f));
        self
    }

    /// Run `f` on `dragleave`.
    pub fn on_drag_leave(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drag_leave = Some(Rc::new(f));
        self
    }

    /// Run `f` on `drop`.
    pub fn on_drop(mut self, f: impl Fn(&DragEvent) + 'static) -> Self {
        self.on_drop = Some(Rc::new(f));
        self
    }
}

/// Caller attributes and handlers for the input.
///
/// Each handler runs after the matching generated one.
#[derive(Clone, Default)]
pub struct InputPropsExtra {
    /// Merged over the generated attributes.
    pub attrs: Attrs,
    /// Extra `click` handler.
    pub on_click: Option<Handler<MouseEvent>>,
    /// Extra `change` handler.
    pub on_change: Option<Handler<ChangeEvent>>,
}

impl InputPropsExtra {
    /// No attributes and no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, e.g. `name`.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Run `f` on `click`.
    pub fn on_click(mut self, f: impl Fn(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    /// Run `f` on `change`.
    pub fn on_change(mut self, f: impl Fn(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }
}

/// Call an optional handler.
pub(crate) fn call<E>(handler: &Option<Handler<E>>, event: &E) {
    if let Some(handler) = handler {
        handler(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(multiple: bool, disabled: bool) -> InputProps {
        InputProps {
            r#type: "file",
            style: HIDDEN_STYLE,
            tab_index: -1,
            accept: None,
            multiple,
            disabled,
            attrs: Attrs::new(),
            on_click: Rc::new(|_: &MouseEvent| {}),
            on_change: Rc::new(|_: &ChangeEvent| {}),
        }
    }

    #[test]
    fn test_boolean_attributes_present_or_absent() {
        let attrs = input(true, false).attributes();
        assert_eq!(attrs.get("multiple").map(String::as_str), Some(""));
        assert!(!attrs.contains_key("disabled"));
        assert!(!attrs.contains_key("accept"));
    }

    #[test]
    fn test_extra_builders_fill_handlers() {
        let extra = InputPropsExtra::new()
            .attr("name", "upload")
            .on_change(|_| {});
        assert!(extra.on_change.is_some());
        assert!(extra.on_click.is_none());

        let mut props = input(false, false);
        props.attrs = extra.attrs;
        assert_eq!(props.attributes().get("name").map(String::as_str), Some("upload"));
    }
}
