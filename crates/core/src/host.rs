//! The capability set every behavior is written against.
//!
//! Behaviors never touch a concrete page. They take a [`Host`] (element tree,
//! timers, viewport intersection reporting) so the same code runs in the
//! browser binding and in the in-memory page used by tests.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A one-shot deferred callback.
pub type Task = Box<dyn FnOnce()>;

/// An event listener. Listeners live as long as the page.
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Called once per reported intersection entry.
pub type IntersectionCallback<E> = Box<dyn FnMut(&Intersection<E>) -> Watch>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Scroll,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Scroll => "scroll",
        }
    }
}

/// Vertical alignment for a smooth `scroll_into_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    #[default]
    Start,
    Center,
}

/// The subset of a DOM event the behaviors need.
pub trait UiEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

/// Element tree access.
///
/// Mutations are fire-and-forget: a binding that cannot apply one (detached
/// node, wrong element kind) leaves the page unchanged rather than failing.
pub trait Dom: Clone + 'static {
    type Element: Clone + PartialEq + fmt::Debug + 'static;
    type Event: UiEvent + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn closest(&self, el: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn previous_element_sibling(&self, el: &Self::Element) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;
    fn create_element(&self, tag: &str) -> Option<Self::Element>;
    fn append_child(&self, parent: &Self::Element, child: &Self::Element);
    /// Whether the element is attached to the document.
    fn contains(&self, el: &Self::Element) -> bool;
    fn remove(&self, el: &Self::Element);

    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    /// Returns whether the class is present afterwards.
    fn toggle_class(&self, el: &Self::Element, class: &str) -> bool;
    fn set_class_name(&self, el: &Self::Element, classes: &str);

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn set_disabled(&self, el: &Self::Element, disabled: bool);

    fn text(&self, el: &Self::Element) -> String;
    fn set_text(&self, el: &Self::Element, text: &str);

    /// Current value of a form control; empty for anything else.
    fn value(&self, el: &Self::Element) -> String;
    fn set_value(&self, el: &Self::Element, value: &str);

    /// Sets an inline style property. An empty value clears it.
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);
    fn focus(&self, el: &Self::Element);
    fn reset_form(&self, form: &Self::Element);

    fn scroll_into_view(&self, el: &Self::Element, align: ScrollAlign);
    /// Vertical scroll offset of the window.
    fn scroll_offset(&self) -> f64;

    fn listen(&self, el: &Self::Element, kind: EventKind, listener: Listener<Self::Event>);
    fn listen_window(&self, kind: EventKind, listener: Listener<Self::Event>);
}

/// Deferred callbacks on the UI thread. No cancellation.
pub trait Timers {
    fn after(&self, delay: Duration, task: Task);
    fn next_frame(&self, task: Task);
}

/// Whether an observer keeps watching a target after an entry was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Stop,
}

#[derive(Debug, Clone)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Margin applied to the viewport before intersecting, in px. Negative values
/// shrink the effective viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn bottom(px: f64) -> Self {
        Self {
            bottom: px,
            ..Self::default()
        }
    }

    /// CSS margin shorthand, e.g. `0px 0px -50px 0px`.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

pub trait Viewport: Dom {
    fn observe(
        &self,
        targets: &[Self::Element],
        options: &ObserveOptions,
        on_entry: IntersectionCallback<Self::Element>,
    );
}

/// Everything the site needs from its page.
pub trait Host: Dom + Timers + Viewport {}

impl<T: Dom + Timers + Viewport> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_renders_css_shorthand() {
        assert_eq!(RootMargin::bottom(-50.0).to_css(), "0px 0px -50px 0px");
        assert_eq!(RootMargin::default().to_css(), "0px 0px 0px 0px");
    }

    #[test]
    fn event_kinds_use_dom_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::Submit.as_str(), "submit");
        assert_eq!(EventKind::Scroll.as_str(), "scroll");
    }
}
