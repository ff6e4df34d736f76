mod page;

use wasm_bindgen::prelude::*;

use osteria::mount;

use crate::boot::{mount_message, resolve_config, ConfigSource, CONFIG_SCRIPT_ID};

pub use page::{WebEvent, WebPage};

/// Mounts the site once the document has been parsed.
pub fn start() {
    let Some(page) = WebPage::from_window() else {
        web_sys::console::warn_1(&JsValue::from_str("osteria: no window/document"));
        return;
    };

    if page.document().ready_state() != "loading" {
        mount_page(&page);
        return;
    }

    let ready = page.clone();
    let cb = Closure::once_into_js(move || mount_page(&ready));
    if page
        .document()
        .add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
        .is_err()
    {
        web_sys::console::warn_1(&JsValue::from_str(
            "osteria: failed to wait for DOMContentLoaded",
        ));
    }
}

fn mount_page(page: &WebPage) {
    let raw = page
        .document()
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let (config, source) = resolve_config(raw.as_deref());
    if let ConfigSource::Fallback(e) = &source {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "osteria: {e}; using the default site config"
        )));
    }

    let report = mount(page, config);
    web_sys::console::log_1(&JsValue::from_str(&mount_message(&report, &source)));
}
