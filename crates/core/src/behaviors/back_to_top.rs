//! Floating back-to-top button, shown once the page is scrolled past a fixed
//! offset. Re-evaluated on every scroll event.

use std::rc::Rc;

use crate::config::{Classes, SiteConfig};
use crate::error::SiteError;
use crate::host::{Dom, EventKind, Host};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Shown,
    Hidden,
}

impl ButtonState {
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            ButtonState::Shown
        } else {
            ButtonState::Hidden
        }
    }
}

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let id = &config.ids.back_to_top;
    let button = host
        .element_by_id(id)
        .ok_or_else(|| SiteError::missing(format!("#{id}")))?;
    wire(host, button, Rc::clone(config));
    Ok(())
}

pub fn wire<H: Host>(host: &H, button: H::Element, config: Rc<SiteConfig>) {
    let page = host.clone();
    host.listen_window(
        EventKind::Scroll,
        Box::new(move |_| {
            let state = ButtonState::for_offset(page.scroll_offset(), config.back_to_top_offset);
            apply(&page, &button, state, &config.classes);
        }),
    );
}

pub fn apply<D: Dom>(host: &D, button: &D::Element, state: ButtonState, classes: &Classes) {
    let (remove, add) = match state {
        ButtonState::Shown => (&classes.back_to_top_hidden, &classes.back_to_top_shown),
        ButtonState::Hidden => (&classes.back_to_top_shown, &classes.back_to_top_hidden),
    };
    for class in remove {
        host.remove_class(button, class);
    }
    for class in add {
        host.add_class(button, class);
    }
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::headless::fixture::restaurant_page;

    #[test]
    fn state_flips_strictly_above_threshold() {
        assert_eq!(ButtonState::for_offset(299.0, 300.0), ButtonState::Hidden);
        assert_eq!(ButtonState::for_offset(300.0, 300.0), ButtonState::Hidden);
        assert_eq!(ButtonState::for_offset(301.0, 300.0), ButtonState::Shown);
    }

    #[test]
    fn scrolling_swaps_the_class_pairs() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        let button = page.element_by_id("back-to-top").unwrap();

        page.scroll_to(800.0);
        assert!(page.has_class(&button, "opacity-100"));
        assert!(page.has_class(&button, "visible"));
        assert!(!page.has_class(&button, "opacity-0"));
        assert!(!page.has_class(&button, "invisible"));

        page.scroll_to(10.0);
        assert!(page.has_class(&button, "opacity-0"));
        assert!(page.has_class(&button, "invisible"));
        assert!(!page.has_class(&button, "opacity-100"));
        assert!(!page.has_class(&button, "visible"));
    }
}
