//! Scroll-triggered fade-in: marks targets visible the first time they enter
//! the (margin-adjusted) viewport. The mark is never removed.

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::{Host, ObserveOptions, Watch};

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let targets = host.query_all(&config.selectors.fade_in);
    if targets.is_empty() {
        return Err(SiteError::missing(&config.selectors.fade_in));
    }
    wire(host, &targets, &config.fade_in, &config.classes.visible);
    Ok(())
}

pub fn wire<H: Host>(
    host: &H,
    targets: &[H::Element],
    options: &ObserveOptions,
    visible_class: &str,
) {
    let marker = host.clone();
    let visible_class = visible_class.to_string();
    host.observe(
        targets,
        options,
        Box::new(move |entry| {
            if entry.is_intersecting {
                marker.add_class(&entry.target, &visible_class);
            }
            Watch::Keep
        }),
    );
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::headless::clock::FRAME;
    use crate::headless::fixture::{bare_page, restaurant_page};
    use crate::host::Dom;

    #[test]
    fn only_targets_in_view_are_marked() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        page.advance(FRAME);

        let visible: Vec<_> = page
            .query_all(".fade-in")
            .into_iter()
            .filter(|el| page.has_class(el, "visible"))
            .collect();
        assert_eq!(visible.len(), 2, "hero heading and hero link");
    }

    #[test]
    fn bottom_margin_delays_marking() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        let about = page.query_all(".fade-in")[2];

        // Target spans 900..1200. Viewport bottom at 930 leaves 30px (10%)
        // inside the raw viewport but nothing inside the 50px-shrunk one.
        page.scroll_to(130.0);
        assert!(!page.has_class(&about, "visible"));

        page.scroll_to(200.0);
        assert!(page.has_class(&about, "visible"));
    }

    #[test]
    fn mark_survives_leaving_the_viewport() {
        let page = restaurant_page();
        let cfg = Rc::new(SiteConfig::default());
        setup(&page, &cfg).unwrap();
        page.advance(FRAME);
        let hero = page.query_all(".fade-in")[0];
        assert!(page.has_class(&hero, "visible"));

        page.scroll_to(3000.0);
        page.scroll_to(0.0);
        page.scroll_to(3000.0);
        assert!(page.has_class(&hero, "visible"));
    }

    #[test]
    fn page_without_targets_is_skipped() {
        let page = bare_page();
        let cfg = Rc::new(SiteConfig::default());
        assert!(matches!(
            setup(&page, &cfg),
            Err(SiteError::MissingElement(_))
        ));
        assert_eq!(page.observed_count(), 0);
    }
}
