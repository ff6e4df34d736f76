use std::rc::Rc;

use tracing::debug;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::{Dom, EventKind, Host};

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let ids = &config.ids;
    let toggle = host
        .element_by_id(&ids.menu_toggle)
        .ok_or_else(|| SiteError::missing(format!("#{}", ids.menu_toggle)))?;
    let menu = host
        .element_by_id(&ids.mobile_menu)
        .ok_or_else(|| SiteError::missing(format!("#{}", ids.mobile_menu)))?;
    wire(host, &toggle, menu, &config.classes.hidden);
    Ok(())
}

/// Each click on `toggle` flips the hidden class on `menu`.
pub fn wire<H: Host>(host: &H, toggle: &H::Element, menu: H::Element, hidden_class: &str) {
    let page = host.clone();
    let hidden_class = hidden_class.to_string();
    host.listen(
        toggle,
        EventKind::Click,
        Box::new(move |_| {
            let hidden = page.toggle_class(&menu, &hidden_class);
            debug!(open = !hidden, "mobile menu toggled");
        }),
    );
}

pub fn is_open<D: Dom>(host: &D, menu: &D::Element, hidden_class: &str) -> bool {
    !host.has_class(menu, hidden_class)
}

/// Hides the menu if it is showing. Returns whether it was open.
pub fn close_if_open<D: Dom>(host: &D, menu: &D::Element, hidden_class: &str) -> bool {
    if is_open(host, menu, hidden_class) {
        host.add_class(menu, hidden_class);
        true
    } else {
        false
    }
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::headless::fixture::{bare_page, restaurant_page};

    #[test]
    fn toggle_opens_and_closes() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        let toggle = page.element_by_id("menu-toggle").unwrap();
        let menu = page.element_by_id("mobile-menu").unwrap();

        assert!(!is_open(&page, &menu, "hidden"));
        page.click(toggle);
        assert!(is_open(&page, &menu, "hidden"));
        assert!(page.has_class(&menu, "md:hidden"));
        page.click(toggle);
        assert!(!is_open(&page, &menu, "hidden"));
    }

    #[test]
    fn close_if_open_only_acts_on_an_open_menu() {
        let page = restaurant_page();
        let menu = page.element_by_id("mobile-menu").unwrap();
        assert!(!close_if_open(&page, &menu, "hidden"));
        page.remove_class(&menu, "hidden");
        assert!(close_if_open(&page, &menu, "hidden"));
        assert!(page.has_class(&menu, "hidden"));
    }

    #[test]
    fn missing_toggle_is_not_an_error_for_the_page() {
        let page = bare_page();
        let cfg = Rc::new(SiteConfig::default());
        let err = setup(&page, &cfg).unwrap_err();
        assert_eq!(err.to_string(), "missing element: #menu-toggle");
    }
}
