//! Transient notifications.
//!
//! A toast is attached to `<body>` off-screen, slides in on the next frame,
//! slides out after the display time and is detached once the exit transition
//! has run. Each toast owns its own timeline; overlapping toasts stack.

use tracing::debug;

use crate::config::{SiteConfig, ToastStyle};
use crate::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    fn background(self, style: &ToastStyle) -> &str {
        match self {
            Severity::Success => &style.success_background,
            Severity::Error => &style.error_background,
        }
    }

    fn icon(self, style: &ToastStyle) -> &str {
        match self {
            Severity::Success => &style.success_icon,
            Severity::Error => &style.error_icon,
        }
    }
}

/// Raises a toast and returns its element, or `None` when the page has no
/// body to attach to.
///
/// The element carries `data-toast="success"` or `data-toast="error"`. The
/// attribute is a stable hook for stylesheets and page tests; the utility
/// classes may change with the theme.
pub fn show_toast<H: Host>(
    host: &H,
    config: &SiteConfig,
    message: &str,
    severity: Severity,
) -> Option<H::Element> {
    let style = &config.toast;
    let body = host.body()?;
    let toast = host.create_element("div")?;

    host.set_class_name(
        &toast,
        &format!(
            "{} {} {}",
            style.base_classes,
            severity.background(style),
            style.offscreen_class
        ),
    );
    host.set_attribute(&toast, "data-toast", severity.label());
    if let Some(icon) = host.create_element("i") {
        host.set_class_name(&icon, severity.icon(style));
        host.append_child(&toast, &icon);
    }
    if let Some(label) = host.create_element("span") {
        host.set_text(&label, message);
        host.append_child(&toast, &label);
    }
    host.append_child(&body, &toast);
    debug!(severity = severity.label(), message, "toast raised");

    {
        let host = host.clone();
        let toast = toast.clone();
        let offscreen = style.offscreen_class.clone();
        host.clone()
            .next_frame(Box::new(move || host.remove_class(&toast, &offscreen)));
    }

    {
        let host = host.clone();
        let toast = toast.clone();
        let offscreen = style.offscreen_class.clone();
        let exit = config.timing.toast_exit();
        host.clone().after(
            config.timing.toast_display(),
            Box::new(move || {
                host.add_class(&toast, &offscreen);
                let detach_host = host.clone();
                host.after(
                    exit,
                    Box::new(move || {
                        if detach_host.contains(&toast) {
                            detach_host.remove(&toast);
                        }
                    }),
                );
            }),
        );
    }

    Some(toast)
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::headless::fixture::restaurant_page;
    use crate::host::Dom;

    #[test]
    fn toast_slides_in_then_out_then_detaches() {
        let page = restaurant_page();
        let cfg = SiteConfig::default();
        let toast = show_toast(&page, &cfg, "Hello", Severity::Success).unwrap();

        assert!(page.contains(&toast));
        assert!(page.has_class(&toast, "translate-x-full"));
        assert!(page.has_class(&toast, "bg-green-500"));
        assert_eq!(page.text(&toast), "Hello");

        page.advance(Duration::from_millis(20));
        assert!(!page.has_class(&toast, "translate-x-full"));

        page.advance(Duration::from_millis(2980));
        assert!(page.has_class(&toast, "translate-x-full"));
        assert!(page.contains(&toast));

        page.advance(Duration::from_millis(299));
        assert!(page.contains(&toast));
        page.advance(Duration::from_millis(2));
        assert!(!page.contains(&toast));
    }

    #[test]
    fn error_toast_uses_error_styling() {
        let page = restaurant_page();
        let cfg = SiteConfig::default();
        let toast = show_toast(&page, &cfg, "Nope", Severity::Error).unwrap();
        assert!(page.has_class(&toast, "bg-red-500"));
        assert_eq!(page.attribute(&toast, "data-toast").as_deref(), Some("error"));
        assert_eq!(page.toasts(), vec![toast]);
        let icon = page.query_within(&toast, "i").unwrap();
        assert!(page.has_class(&icon, "fa-exclamation-triangle"));
    }

    #[test]
    fn removal_is_skipped_when_already_detached() {
        let page = restaurant_page();
        let cfg = SiteConfig::default();
        let toast = show_toast(&page, &cfg, "Gone early", Severity::Success).unwrap();
        page.remove(&toast);
        page.advance(cfg.timing.toast_lifetime() + Duration::from_millis(10));
        assert!(!page.contains(&toast));
    }

    #[test]
    fn overlapping_toasts_keep_independent_timelines() {
        let page = restaurant_page();
        let cfg = SiteConfig::default();
        let first = show_toast(&page, &cfg, "one", Severity::Success).unwrap();
        page.advance(Duration::from_millis(1000));
        let second = show_toast(&page, &cfg, "two", Severity::Success).unwrap();

        page.advance(Duration::from_millis(2400));
        assert!(!page.contains(&first));
        assert!(page.contains(&second));

        page.advance(Duration::from_millis(1000));
        assert!(!page.contains(&second));
    }
}
