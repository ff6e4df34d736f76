use std::time::Duration;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use osteria::host::{
    Dom, EventKind, Intersection, IntersectionCallback, Listener, ObserveOptions, ScrollAlign,
    Task, Timers, UiEvent, Viewport, Watch,
};

/// A DOM event as seen by the behaviors.
#[derive(Debug, Clone)]
pub struct WebEvent(web_sys::Event);

impl UiEvent for WebEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// The live page. Listeners, timers and observers registered through it are
/// leaked to JS and live as long as the page.
#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn add_listener(&self, target: &EventTarget, kind: EventKind, mut listener: Listener<WebEvent>) {
        let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
            listener(&WebEvent(ev));
        }) as Box<dyn FnMut(web_sys::Event)>);

        match target.add_event_listener_with_callback(kind.as_str(), cb.as_ref().unchecked_ref()) {
            Ok(()) => cb.forget(),
            Err(_) => web_sys::console::warn_1(&JsValue::from_str(&format!(
                "osteria: failed to listen for {}",
                kind.as_str()
            ))),
        }
    }
}

fn as_html(el: &Element) -> Option<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
}

impl Dom for WebPage {
    type Element = Element;
    type Event = WebEvent;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn closest(&self, el: &Element, selector: &str) -> Option<Element> {
        el.closest(selector).ok().flatten()
    }

    fn previous_element_sibling(&self, el: &Element) -> Option<Element> {
        el.previous_element_sibling()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn contains(&self, el: &Element) -> bool {
        el.is_connected()
    }

    fn remove(&self, el: &Element) {
        el.remove();
    }

    fn add_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().remove_1(class);
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn toggle_class(&self, el: &Element, class: &str) -> bool {
        el.class_list()
            .toggle(class)
            .unwrap_or_else(|_| self.has_class(el, class))
    }

    fn set_class_name(&self, el: &Element, classes: &str) {
        el.set_class_name(classes);
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn set_disabled(&self, el: &Element, disabled: bool) {
        if disabled {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn set_text(&self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn value(&self, el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, el: &Element, value: &str) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn set_style(&self, el: &Element, property: &str, value: &str) {
        let Some(html) = as_html(el) else {
            return;
        };
        let style = html.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn focus(&self, el: &Element) {
        if let Some(html) = as_html(el) {
            let _ = html.focus();
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn scroll_into_view(&self, el: &Element, align: ScrollAlign) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(match align {
            ScrollAlign::Start => ScrollLogicalPosition::Start,
            ScrollAlign::Center => ScrollLogicalPosition::Center,
        });
        el.scroll_into_view_with_scroll_into_view_options(&opts);
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn listen(&self, el: &Element, kind: EventKind, listener: Listener<WebEvent>) {
        self.add_listener(el, kind, listener);
    }

    fn listen_window(&self, kind: EventKind, listener: Listener<WebEvent>) {
        self.add_listener(&self.window, kind, listener);
    }
}

impl Timers for WebPage {
    fn after(&self, delay: Duration, task: Task) {
        let cb = Closure::once_into_js(move || task());
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }

    fn next_frame(&self, task: Task) {
        let cb = Closure::once_into_js(move |_ts: f64| task());
        let _ = self.window.request_animation_frame(cb.unchecked_ref());
    }
}

impl Viewport for WebPage {
    fn observe(
        &self,
        targets: &[Element],
        options: &ObserveOptions,
        mut on_entry: IntersectionCallback<Element>,
    ) {
        let cb = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let seen = Intersection {
                    target: target.clone(),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                if on_entry(&seen) == Watch::Stop {
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_css());

        let Ok(observer) = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)
        else {
            web_sys::console::warn_1(&JsValue::from_str(
                "osteria: IntersectionObserver unavailable",
            ));
            return;
        };
        for target in targets {
            observer.observe(target);
        }
        cb.forget();
    }
}
