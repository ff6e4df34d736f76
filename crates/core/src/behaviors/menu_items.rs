use std::rc::Rc;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::{Dom, EventKind, Host, UiEvent};
use crate::toast::{show_toast, Severity};

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let buttons = host.query_all(&config.selectors.add_to_order);
    if buttons.is_empty() {
        return Err(SiteError::missing(&config.selectors.add_to_order));
    }
    for button in &buttons {
        wire(host, button, Rc::clone(config));
    }
    Ok(())
}

/// Clicking `button` confirms the enclosing card's dish with a toast. The
/// click does not reach the card or anything above it.
pub fn wire<H: Host>(host: &H, button: &H::Element, config: Rc<SiteConfig>) {
    let page = host.clone();
    let button_el = button.clone();
    host.listen(
        button,
        EventKind::Click,
        Box::new(move |event| {
            event.stop_propagation();
            let name = item_name(&page, &button_el, &config).unwrap_or_default();
            show_toast(&page, &config, &added_message(&name, &config), Severity::Success);
        }),
    );
}

/// Heading text of the card containing `el`, read at call time and used
/// as-is, surrounding whitespace included.
pub fn item_name<D: Dom>(host: &D, el: &D::Element, config: &SiteConfig) -> Option<String> {
    let card = host.closest(el, &config.selectors.menu_item)?;
    let heading = host.query_within(&card, &config.selectors.menu_item_name)?;
    Some(host.text(&heading))
}

pub fn added_message(name: &str, config: &SiteConfig) -> String {
    format!("{name}{}", config.texts.added_to_order_suffix)
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::headless::fixture::{bare_page, restaurant_page, MENU_ITEMS};

    #[test]
    fn add_raises_a_toast_naming_the_dish() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();

        let buttons = page.query_all(".menu-overlay button");
        assert_eq!(buttons.len(), MENU_ITEMS.len());
        page.click(buttons[1]);

        let toasts = page.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(page.text(&toasts[0]), "Spaghetti Carbonara added to order!");
        assert_eq!(page.attribute(&toasts[0], "data-toast").as_deref(), Some("success"));
    }

    #[test]
    fn name_is_read_at_click_time() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();

        let card = page.query_all(".menu-item")[0];
        let heading = page.query_within(&card, "h3").unwrap();
        page.set_text(&heading, "Pizza Bianca");
        let button = page.query_within(&card, "button").unwrap();
        page.click(button);

        assert_eq!(page.text(&page.toasts()[0]), "Pizza Bianca added to order!");
    }

    #[test]
    fn heading_whitespace_is_kept() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();

        let card = page.query_all(".menu-item")[2];
        let heading = page.query_within(&card, "h3").unwrap();
        page.set_text(&heading, "\n  Pizza Bianca\n");
        page.click(page.query_within(&card, "button").unwrap());

        assert_eq!(
            page.text(&page.toasts()[0]),
            "\n  Pizza Bianca\n added to order!"
        );
    }

    #[test]
    fn click_does_not_reach_the_card() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();

        let card = page.query_all(".menu-item")[0];
        let reached = Rc::new(Cell::new(false));
        let r = Rc::clone(&reached);
        page.listen(&card, EventKind::Click, Box::new(move |_| r.set(true)));

        let button = page.query_within(&card, "button").unwrap();
        let dispatch = page.click(button);
        assert_eq!(dispatch.handled, 1);
        assert!(!reached.get());
    }

    #[test]
    fn message_appends_the_suffix() {
        let cfg = SiteConfig::default();
        assert_eq!(added_message("Tiramisu", &cfg), "Tiramisu added to order!");
    }

    #[test]
    fn page_without_cards_is_skipped() {
        let page = bare_page();
        let err = setup(&page, &Rc::new(SiteConfig::default())).unwrap_err();
        assert!(matches!(err, SiteError::MissingElement(_)));
    }
}
