//! Smooth scrolling for in-page `#fragment` links.

use std::rc::Rc;

use tracing::debug;

use super::mobile_menu;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::{EventKind, Host, ScrollAlign, UiEvent};

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let anchors = host.query_all(&config.selectors.in_page_anchor);
    if anchors.is_empty() {
        return Err(SiteError::missing(&config.selectors.in_page_anchor));
    }
    let menu = host.element_by_id(&config.ids.mobile_menu);
    for anchor in &anchors {
        wire(host, anchor, menu.clone(), &config.classes.hidden);
    }
    Ok(())
}

/// The element id an in-page href points at. A bare `#` points nowhere.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Clicking `anchor` never jumps. If its fragment exists on the page it is
/// smoothly scrolled into view and an open mobile menu is closed.
pub fn wire<H: Host>(host: &H, anchor: &H::Element, menu: Option<H::Element>, hidden_class: &str) {
    let page = host.clone();
    let link = anchor.clone();
    let hidden_class = hidden_class.to_string();
    host.listen(
        anchor,
        EventKind::Click,
        Box::new(move |event| {
            event.prevent_default();

            let href = page.attribute(&link, "href").unwrap_or_default();
            let Some(target) = fragment_id(&href).and_then(|id| page.element_by_id(id)) else {
                debug!(href = %href, "anchor target not on page");
                return;
            };
            page.scroll_into_view(&target, ScrollAlign::Start);

            if let Some(menu) = &menu {
                if mobile_menu::close_if_open(&page, menu, &hidden_class) {
                    debug!("mobile menu closed after navigation");
                }
            }
        }),
    );
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::headless::clock::FRAME;
    use crate::headless::fixture::restaurant_page;
    use crate::headless::El;
    use crate::host::Dom;

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#menu"), Some("menu"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about"), None);
    }

    #[test]
    fn click_scrolls_smoothly_instead_of_jumping() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();

        let link = page.query_all("#mobile-menu a[href=\"#menu\"]")[0];
        let section = page.element_by_id("menu").unwrap();

        let dispatch = page.click(link);
        assert!(dispatch.default_prevented);
        assert_eq!(page.scroll_offset(), 0.0);
        assert_eq!(page.scroll_requests(), vec![(section, ScrollAlign::Start)]);

        page.advance(FRAME);
        assert_eq!(page.scroll_offset(), 1600.0);
    }

    #[test]
    fn navigation_closes_the_open_mobile_menu() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        let menu = page.element_by_id("mobile-menu").unwrap();
        page.remove_class(&menu, "hidden");

        let link = page.query_all("#mobile-menu a[href=\"#reservations\"]")[0];
        page.click(link);
        assert!(page.has_class(&menu, "hidden"));
    }

    #[test]
    fn dangling_fragment_is_a_quiet_no_op() {
        let page = restaurant_page();
        let body = page.body().unwrap();
        let dangling = page.with_document(|doc| {
            doc.append(body, El::new("a").attr("href", "#nowhere"))
        });
        let bare = page.with_document(|doc| doc.append(body, El::new("a").attr("href", "#")));
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        let menu = page.element_by_id("mobile-menu").unwrap();
        page.remove_class(&menu, "hidden");

        assert!(page.click(dangling).default_prevented);
        assert!(page.click(bare).default_prevented);
        assert!(page.scroll_requests().is_empty());
        assert!(!page.has_class(&menu, "hidden"));
    }
}
