//! Footer newsletter signup. The email input is whatever element sits right
//! before the subscribe button.

use std::rc::Rc;

use tracing::debug;

use crate::config::SiteConfig;
use crate::error::{SiteError, ValidationError};
use crate::host::{Dom, EventKind, Host};
use crate::toast::{show_toast, Severity};

/// Coarse plausibility check: non-empty, has an `@` and a `.`. Not an email
/// grammar.
pub fn is_plausible_email(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.contains('@') && candidate.contains('.')
}

pub fn check_email(candidate: &str) -> Result<(), ValidationError> {
    if is_plausible_email(candidate) {
        Ok(())
    } else {
        Err(ValidationError::ImplausibleEmail(candidate.to_string()))
    }
}

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let selector = &config.selectors.subscribe_button;
    let button = host
        .query_all(selector)
        .into_iter()
        .next()
        .ok_or_else(|| SiteError::missing(selector))?;
    wire(host, &button, Rc::clone(config));
    Ok(())
}

pub fn wire<H: Host>(host: &H, button: &H::Element, config: Rc<SiteConfig>) {
    let page = host.clone();
    let button_el = button.clone();
    host.listen(
        button,
        EventKind::Click,
        Box::new(move |_| {
            let Some(input) = page.previous_element_sibling(&button_el) else {
                debug!("subscribe button has no input before it");
                return;
            };
            let email = page.value(&input);
            match check_email(&email) {
                Ok(()) => {
                    show_toast(&page, &config, &config.texts.subscribed, Severity::Success);
                    page.set_value(&input, "");
                    debug!("newsletter signup accepted");
                }
                Err(err) => {
                    debug!(%err, "newsletter signup rejected");
                    highlight_error(&page, &input, &config);
                }
            }
        }),
    );
}

/// Focuses `input` and borders it in the error colour for a while.
pub fn highlight_error<H: Host>(host: &H, input: &H::Element, config: &SiteConfig) {
    host.focus(input);
    host.set_style(input, "border-color", &config.texts.error_border_color);
    let page = host.clone();
    let input = input.clone();
    host.after(
        config.timing.input_highlight(),
        Box::new(move || page.set_style(&input, "border-color", "")),
    );
}

#[cfg(all(test, feature = "headless"))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::headless::fixture::{bare_page, restaurant_page};
    use crate::headless::{HeadlessPage, NodeId};

    fn subscribe(email: &str) -> (HeadlessPage, NodeId) {
        let page = restaurant_page();
        setup(&page, &Rc::new(SiteConfig::default())).unwrap();
        let input = page.query_all("footer input")[0];
        let button = page.query_all("footer button")[0];
        page.fill(input, email);
        page.click(button);
        (page, input)
    }

    #[test]
    fn heuristic_is_substring_based() {
        assert!(is_plausible_email("a@b.c"));
        assert!(is_plausible_email("@."));
        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email(""));
        assert_eq!(
            check_email("nope"),
            Err(ValidationError::ImplausibleEmail("nope".to_string()))
        );
    }

    #[test]
    fn plausible_address_is_accepted() {
        let (page, input) = subscribe("a@b.c");
        let toasts = page.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(page.text(&toasts[0]), "Successfully subscribed!");
        assert_eq!(page.value(&input), "");
        assert_eq!(page.style(input, "border-color"), None);
    }

    #[test]
    fn implausible_address_flags_the_input() {
        let (page, input) = subscribe("not-an-email");
        assert!(page.toasts().is_empty());
        assert_eq!(page.focused(), Some(input));
        assert_eq!(page.style(input, "border-color").as_deref(), Some("#ef4444"));
        assert_eq!(page.value(&input), "not-an-email");

        page.advance(Duration::from_millis(1999));
        assert_eq!(page.style(input, "border-color").as_deref(), Some("#ef4444"));
        page.advance(Duration::from_millis(1));
        assert_eq!(page.style(input, "border-color"), None);
    }

    #[test]
    fn empty_address_is_rejected() {
        let (page, input) = subscribe("");
        assert!(page.toasts().is_empty());
        assert_eq!(page.focused(), Some(input));
    }

    #[test]
    fn page_without_footer_is_skipped() {
        let err = setup(&bare_page(), &Rc::new(SiteConfig::default())).unwrap_err();
        assert!(matches!(err, SiteError::MissingElement(_)));
    }
}
