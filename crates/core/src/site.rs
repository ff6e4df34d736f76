//! Startup: wires every behavior once against a host page.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info};

use crate::behaviors::{
    anchors, back_to_top, fade_in, lazy_images, menu_items, mobile_menu, newsletter, reservation,
};
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    FadeIn,
    LazyImages,
    MobileMenu,
    BackToTop,
    SmoothAnchors,
    Reservation,
    MenuItems,
    Newsletter,
}

impl Behavior {
    pub fn label(self) -> &'static str {
        match self {
            Behavior::FadeIn => "fade-in",
            Behavior::LazyImages => "lazy-images",
            Behavior::MobileMenu => "mobile-menu",
            Behavior::BackToTop => "back-to-top",
            Behavior::SmoothAnchors => "smooth-anchors",
            Behavior::Reservation => "reservation",
            Behavior::MenuItems => "menu-items",
            Behavior::Newsletter => "newsletter",
        }
    }

    /// In mount order.
    pub fn all() -> &'static [Behavior] {
        &[
            Behavior::FadeIn,
            Behavior::LazyImages,
            Behavior::MobileMenu,
            Behavior::BackToTop,
            Behavior::SmoothAnchors,
            Behavior::Reservation,
            Behavior::MenuItems,
            Behavior::Newsletter,
        ]
    }

    fn setup<H: Host>(self, host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
        match self {
            Behavior::FadeIn => fade_in::setup(host, config),
            Behavior::LazyImages => lazy_images::setup(host, config),
            Behavior::MobileMenu => mobile_menu::setup(host, config),
            Behavior::BackToTop => back_to_top::setup(host, config),
            Behavior::SmoothAnchors => anchors::setup(host, config),
            Behavior::Reservation => reservation::setup(host, config).map(|_| ()),
            Behavior::MenuItems => menu_items::setup(host, config),
            Behavior::Newsletter => newsletter::setup(host, config),
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What [`mount`] managed to wire.
#[derive(Debug, Default)]
pub struct MountReport {
    pub wired: Vec<Behavior>,
    /// Behaviors left out, with the reason.
    pub skipped: Vec<(Behavior, SiteError)>,
}

impl MountReport {
    pub fn is_wired(&self, behavior: Behavior) -> bool {
        self.wired.contains(&behavior)
    }

    pub fn summary(&self) -> String {
        let mut out = format!("{}/{} behaviors wired", self.wired.len(), Behavior::all().len());
        if !self.skipped.is_empty() {
            let skipped: Vec<&str> = self.skipped.iter().map(|(b, _)| b.label()).collect();
            out.push_str(&format!(" (skipped: {})", skipped.join(", ")));
        }
        out
    }
}

/// Wires every behavior whose elements are on the page. Behaviors whose
/// elements are missing are skipped; the rest still run.
pub fn mount<H: Host>(host: &H, config: SiteConfig) -> MountReport {
    let config = Rc::new(config);
    let mut report = MountReport::default();
    for &behavior in Behavior::all() {
        match behavior.setup(host, &config) {
            Ok(()) => report.wired.push(behavior),
            Err(err) => {
                debug!(behavior = behavior.label(), %err, "behavior skipped");
                report.skipped.push((behavior, err));
            }
        }
    }
    info!("{}", report.summary());
    report
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use super::*;
    use crate::headless::fixture::{bare_page, restaurant_page};

    #[test]
    fn full_page_wires_everything() {
        let page = restaurant_page();
        let report = mount(&page, SiteConfig::default());
        assert_eq!(report.wired, Behavior::all());
        assert!(report.skipped.is_empty());
        assert_eq!(report.summary(), "8/8 behaviors wired");
    }

    #[test]
    fn bare_page_skips_everything_without_failing() {
        let page = bare_page();
        let report = mount(&page, SiteConfig::default());
        assert!(report.wired.is_empty());
        assert_eq!(report.skipped.len(), Behavior::all().len());
        assert!(report
            .skipped
            .iter()
            .all(|(_, err)| matches!(err, SiteError::MissingElement(_))));
        assert!(report.summary().starts_with("0/8 behaviors wired (skipped: fade-in,"));
    }

    #[test]
    fn renamed_ids_only_skip_what_they_break() {
        let page = restaurant_page();
        let mut config = SiteConfig::default();
        config.ids.back_to_top = "scroll-up".to_string();
        let report = mount(&page, config);
        assert!(!report.is_wired(Behavior::BackToTop));
        assert!(report.is_wired(Behavior::Reservation));
        assert_eq!(report.wired.len(), 7);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = Behavior::all().iter().map(|b| b.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Behavior::all().len());
    }
}
