//! In-memory page for running the site without a browser.
//!
//! [`HeadlessPage`] implements the whole [`Host`](crate::host::Host)
//! capability set: an element tree, a virtual clock and a geometric
//! intersection model. Tests drive it with [`HeadlessPage::click`],
//! [`HeadlessPage::submit`], [`HeadlessPage::scroll_to`] and
//! [`HeadlessPage::advance`].
//!
//! Intersection entries are delivered at the end of every `advance` and
//! after every scroll, never synchronously from `observe`.

pub mod clock;
pub mod document;
pub mod fixture;
pub mod geometry;
pub mod selector;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::host::{
    Dom, EventKind, Intersection, IntersectionCallback, Listener, ObserveOptions, ScrollAlign,
    Task, Timers, UiEvent, Viewport, Watch,
};

use clock::{TimerQueue, FRAME};
use document::Document;
pub use document::{El, NodeId};
use geometry::{intersection_ratio, is_intersecting, Rect};

#[derive(Debug)]
pub struct HeadlessEvent {
    pub kind: EventKind,
    pub target: Option<NodeId>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl HeadlessEvent {
    fn new(kind: EventKind, target: Option<NodeId>) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }
}

impl UiEvent for HeadlessEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

/// Outcome of a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub default_prevented: bool,
    /// Number of listeners that ran.
    pub handled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Window,
    Element(NodeId),
}

type SharedListener = Rc<RefCell<Listener<HeadlessEvent>>>;

struct Registered {
    target: Target,
    kind: EventKind,
    listener: SharedListener,
}

struct Observer {
    options: ObserveOptions,
    /// Target and the last reported intersecting state.
    targets: RefCell<Vec<(NodeId, Option<bool>)>>,
    callback: RefCell<IntersectionCallback<NodeId>>,
}

struct Inner {
    doc: RefCell<Document>,
    clock: RefCell<TimerQueue>,
    listeners: RefCell<Vec<Registered>>,
    observers: RefCell<Vec<Rc<Observer>>>,
    scroll_requests: RefCell<Vec<(NodeId, ScrollAlign)>>,
}

/// Cheap to clone; clones share the same page.
#[derive(Clone)]
pub struct HeadlessPage {
    inner: Rc<Inner>,
}

impl HeadlessPage {
    pub fn new(doc: Document) -> Self {
        Self {
            inner: Rc::new(Inner {
                doc: RefCell::new(doc),
                clock: RefCell::new(TimerQueue::default()),
                listeners: RefCell::new(Vec::new()),
                observers: RefCell::new(Vec::new()),
                scroll_requests: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Runs `f` against the document. Do not call back into the page from `f`.
    pub fn with_document<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.doc.borrow_mut())
    }

    pub fn now(&self) -> Duration {
        self.inner.clock.borrow().now()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.clock.borrow().len()
    }

    /// Moves the virtual clock forward, running every task that falls due on
    /// the way, then delivers intersection changes.
    pub fn advance(&self, by: Duration) {
        let until = self.now() + by;
        loop {
            // The borrow must end before the task runs; tasks schedule more.
            let task = self.inner.clock.borrow_mut().pop_due(until);
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        self.inner.clock.borrow_mut().finish_at(until);
        self.flush_intersections();
    }

    /// Runs until no timers are left.
    pub fn settle(&self) {
        while self.pending_timers() > 0 {
            self.advance(FRAME);
        }
    }

    pub fn click(&self, el: NodeId) -> Dispatch {
        let event = HeadlessEvent::new(EventKind::Click, Some(el));
        let handled = self.bubble(el, &event);
        let default_prevented = event.default_prevented.get();
        if !default_prevented {
            self.click_default_action(el);
        }
        Dispatch {
            default_prevented,
            handled,
        }
    }

    pub fn submit(&self, form: NodeId) -> Dispatch {
        let event = HeadlessEvent::new(EventKind::Submit, Some(form));
        let handled = self.bubble(form, &event);
        Dispatch {
            default_prevented: event.default_prevented.get(),
            handled,
        }
    }

    /// Jumps the window to `y`, fires scroll listeners and delivers
    /// intersection changes.
    pub fn scroll_to(&self, y: f64) {
        {
            let mut doc = self.inner.doc.borrow_mut();
            let max = (doc.scroll_height() - doc.viewport_height).max(0.0);
            doc.scroll_y = y.clamp(0.0, max);
        }
        let event = HeadlessEvent::new(EventKind::Scroll, None);
        for listener in self.listeners_for(Target::Window, EventKind::Scroll) {
            (listener.borrow_mut())(&event);
        }
        self.flush_intersections();
    }

    pub fn fill(&self, el: NodeId, value: &str) {
        self.set_value(&el, value);
    }

    pub fn style(&self, el: NodeId, property: &str) -> Option<String> {
        self.inner.doc.borrow().node(el).style.get(property).cloned()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.inner.doc.borrow().focused
    }

    /// Every `scroll_into_view` request so far, oldest first.
    pub fn scroll_requests(&self) -> Vec<(NodeId, ScrollAlign)> {
        self.inner.scroll_requests.borrow().clone()
    }

    /// Toasts currently attached to the page.
    pub fn toasts(&self) -> Vec<NodeId> {
        self.query_all("[data-toast]")
    }

    /// Number of targets still watched across all observers.
    pub fn observed_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .map(|o| o.targets.borrow().len())
            .sum()
    }

    fn listeners_for(&self, target: Target, kind: EventKind) -> Vec<SharedListener> {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|r| r.target == target && r.kind == kind)
            .map(|r| Rc::clone(&r.listener))
            .collect()
    }

    /// Runs listeners from `el` up through its ancestors.
    fn bubble(&self, el: NodeId, event: &HeadlessEvent) -> usize {
        let mut handled = 0;
        let mut cursor = Some(el);
        while let Some(node) = cursor {
            for listener in self.listeners_for(Target::Element(node), event.kind) {
                (listener.borrow_mut())(event);
                handled += 1;
            }
            if event.propagation_stopped.get() {
                break;
            }
            cursor = self.inner.doc.borrow().parent(node);
        }
        handled
    }

    fn click_default_action(&self, el: NodeId) {
        let (submits_form, fragment) = {
            let doc = self.inner.doc.borrow();
            let node = doc.node(el);
            let submits = node.tag == "button"
                && node.attrs.get("type").map(String::as_str) == Some("submit");
            let form = if submits { doc.closest(el, "form") } else { None };
            let fragment = if node.tag == "a" {
                node.attrs
                    .get("href")
                    .and_then(|h| h.strip_prefix('#'))
                    .map(str::to_string)
            } else {
                None
            };
            (form, fragment)
        };

        if let Some(form) = submits_form {
            self.submit(form);
        }
        if let Some(id) = fragment {
            let top = {
                let doc = self.inner.doc.borrow();
                doc.element_by_id(&id).map(|t| doc.node(t).rect.y)
            };
            if let Some(top) = top {
                self.scroll_to(top);
            }
        }
    }

    fn viewport_rect(&self) -> Rect {
        let doc = self.inner.doc.borrow();
        Rect::new(0.0, doc.scroll_y, doc.viewport_width, doc.viewport_height)
    }

    /// Reports targets whose intersecting state changed since the last
    /// delivery, and every target on its first delivery.
    fn flush_intersections(&self) {
        let observers: Vec<Rc<Observer>> = self.inner.observers.borrow().clone();
        let viewport = self.viewport_rect();

        for observer in observers {
            let root = viewport.expand(&observer.options.root_margin);
            let entries: Vec<Intersection<NodeId>> = {
                let doc = self.inner.doc.borrow();
                let mut targets = observer.targets.borrow_mut();
                let mut entries = Vec::new();
                for (target, last) in targets.iter_mut() {
                    let ratio = if doc.is_attached(*target) {
                        intersection_ratio(&doc.node(*target).rect, &root)
                    } else {
                        0.0
                    };
                    let now = is_intersecting(ratio, &observer.options);
                    if *last != Some(now) {
                        *last = Some(now);
                        entries.push(Intersection {
                            target: *target,
                            is_intersecting: now,
                            ratio,
                        });
                    }
                }
                entries
            };

            for entry in entries {
                let watch = (observer.callback.borrow_mut())(&entry);
                if watch == Watch::Stop {
                    observer
                        .targets
                        .borrow_mut()
                        .retain(|(t, _)| *t != entry.target);
                }
            }
        }
    }
}

impl Dom for HeadlessPage {
    type Element = NodeId;
    type Event = HeadlessEvent;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner.doc.borrow().element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.inner.doc.borrow().select_all(selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.inner.doc.borrow().select_within(*scope, selector)
    }

    fn closest(&self, el: &NodeId, selector: &str) -> Option<NodeId> {
        self.inner.doc.borrow().closest(*el, selector)
    }

    fn previous_element_sibling(&self, el: &NodeId) -> Option<NodeId> {
        self.inner.doc.borrow().previous_element_sibling(*el)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.inner.doc.borrow().body())
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.inner.doc.borrow_mut().create(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.inner.doc.borrow_mut().attach(*parent, *child);
    }

    fn contains(&self, el: &NodeId) -> bool {
        self.inner.doc.borrow().is_attached(*el)
    }

    fn remove(&self, el: &NodeId) {
        self.inner.doc.borrow_mut().detach(*el);
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        self.inner.doc.borrow_mut().add_class(*el, class);
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        self.inner.doc.borrow_mut().remove_class(*el, class);
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.inner.doc.borrow().has_class(*el, class)
    }

    fn toggle_class(&self, el: &NodeId, class: &str) -> bool {
        let mut doc = self.inner.doc.borrow_mut();
        if doc.has_class(*el, class) {
            doc.remove_class(*el, class);
            false
        } else {
            doc.add_class(*el, class);
            true
        }
    }

    fn set_class_name(&self, el: &NodeId, classes: &str) {
        self.inner.doc.borrow_mut().set_attribute(*el, "class", classes);
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.inner.doc.borrow().attribute(*el, name)
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.inner.doc.borrow_mut().set_attribute(*el, name, value);
    }

    fn set_disabled(&self, el: &NodeId, disabled: bool) {
        let mut doc = self.inner.doc.borrow_mut();
        if disabled {
            doc.set_attribute(*el, "disabled", "");
        } else {
            doc.remove_attribute(*el, "disabled");
        }
    }

    fn text(&self, el: &NodeId) -> String {
        self.inner.doc.borrow().text_content(*el)
    }

    fn set_text(&self, el: &NodeId, text: &str) {
        self.inner.doc.borrow_mut().set_text(*el, text);
    }

    fn value(&self, el: &NodeId) -> String {
        let doc = self.inner.doc.borrow();
        if doc.is_form_control(*el) {
            doc.node(*el).value.clone()
        } else {
            String::new()
        }
    }

    fn set_value(&self, el: &NodeId, value: &str) {
        let mut doc = self.inner.doc.borrow_mut();
        if doc.is_form_control(*el) {
            doc.node_mut(*el).value = value.to_string();
        }
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) {
        let mut doc = self.inner.doc.borrow_mut();
        let style = &mut doc.node_mut(*el).style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    fn focus(&self, el: &NodeId) {
        self.inner.doc.borrow_mut().focused = Some(*el);
    }

    fn reset_form(&self, form: &NodeId) {
        self.inner.doc.borrow_mut().reset_form(*form);
    }

    /// Recorded immediately; the smooth scroll lands on the next frame.
    fn scroll_into_view(&self, el: &NodeId, align: ScrollAlign) {
        self.inner.scroll_requests.borrow_mut().push((*el, align));
        let y = {
            let doc = self.inner.doc.borrow();
            let rect = doc.node(*el).rect;
            match align {
                ScrollAlign::Start => rect.y,
                ScrollAlign::Center => rect.y + rect.height / 2.0 - doc.viewport_height / 2.0,
            }
        };
        let page = self.clone();
        self.next_frame(Box::new(move || page.scroll_to(y)));
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.doc.borrow().scroll_y
    }

    fn listen(&self, el: &NodeId, kind: EventKind, listener: Listener<HeadlessEvent>) {
        self.inner.listeners.borrow_mut().push(Registered {
            target: Target::Element(*el),
            kind,
            listener: Rc::new(RefCell::new(listener)),
        });
    }

    fn listen_window(&self, kind: EventKind, listener: Listener<HeadlessEvent>) {
        self.inner.listeners.borrow_mut().push(Registered {
            target: Target::Window,
            kind,
            listener: Rc::new(RefCell::new(listener)),
        });
    }
}

impl Timers for HeadlessPage {
    fn after(&self, delay: Duration, task: Task) {
        self.inner.clock.borrow_mut().schedule(delay, task);
    }

    fn next_frame(&self, task: Task) {
        self.after(FRAME, task);
    }
}

impl Viewport for HeadlessPage {
    fn observe(
        &self,
        targets: &[NodeId],
        options: &ObserveOptions,
        on_entry: IntersectionCallback<NodeId>,
    ) {
        self.inner.observers.borrow_mut().push(Rc::new(Observer {
            options: *options,
            targets: RefCell::new(targets.iter().map(|t| (*t, None)).collect()),
            callback: RefCell::new(on_entry),
        }));
    }
}
