//! Site configuration.
//!
//! Every field has a default matching the shipped markup, so an empty JSON
//! object (or no config at all) yields a working site. Overrides are merged
//! into the defaults key by key at every depth: `{"fade_in":{"threshold":0.2}}`
//! keeps the fade-in root margin.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SiteError;
use crate::host::{ObserveOptions, RootMargin};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub ids: ElementIds,
    pub selectors: Selectors,
    pub classes: Classes,
    pub fade_in: ObserveOptions,
    pub lazy_images: ObserveOptions,
    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_offset: f64,
    pub timing: Timing,
    pub texts: Texts,
    pub toast: ToastStyle,
    /// Ignore submits while a reservation is pending and disable the submit
    /// control until it settles.
    pub guard_overlapping_submissions: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            selectors: Selectors::default(),
            classes: Classes::default(),
            fade_in: ObserveOptions {
                threshold: 0.1,
                root_margin: RootMargin::bottom(-50.0),
            },
            lazy_images: ObserveOptions::default(),
            back_to_top_offset: 300.0,
            timing: Timing::default(),
            texts: Texts::default(),
            toast: ToastStyle::default(),
            guard_overlapping_submissions: false,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let overrides: Value = serde_json::from_str(raw)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }
}

/// Objects merge per key; anything else replaces the base value.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub menu_toggle: String,
    pub mobile_menu: String,
    pub back_to_top: String,
    pub reservation_form: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            menu_toggle: "menu-toggle".to_string(),
            mobile_menu: "mobile-menu".to_string(),
            back_to_top: "back-to-top".to_string(),
            reservation_form: "reservation-form".to_string(),
            success_message: "success-message".to_string(),
            error_message: "error-message".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub fade_in: String,
    pub lazy_image: String,
    pub in_page_anchor: String,
    pub add_to_order: String,
    pub menu_item: String,
    pub menu_item_name: String,
    pub subscribe_button: String,
    pub submit_button: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            fade_in: ".fade-in".to_string(),
            lazy_image: "img[data-src]".to_string(),
            in_page_anchor: "a[href^=\"#\"]".to_string(),
            add_to_order: ".menu-overlay button".to_string(),
            menu_item: ".menu-item".to_string(),
            menu_item_name: "h3".to_string(),
            subscribe_button: "footer button".to_string(),
            submit_button: "button[type=\"submit\"]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub visible: String,
    pub hidden: String,
    pub lazy: String,
    pub loading: String,
    pub back_to_top_shown: Vec<String>,
    pub back_to_top_hidden: Vec<String>,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            visible: "visible".to_string(),
            hidden: "hidden".to_string(),
            lazy: "lazy".to_string(),
            loading: "loading".to_string(),
            back_to_top_shown: vec!["opacity-100".to_string(), "visible".to_string()],
            back_to_top_hidden: vec!["opacity-0".to_string(), "invisible".to_string()],
        }
    }
}

/// Delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub submit_latency_ms: u64,
    pub toast_display_ms: u64,
    pub toast_exit_ms: u64,
    pub input_highlight_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1500,
            toast_display_ms: 3000,
            toast_exit_ms: 300,
            input_highlight_ms: 2000,
        }
    }
}

impl Timing {
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn toast_display(&self) -> Duration {
        Duration::from_millis(self.toast_display_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    pub fn input_highlight(&self) -> Duration {
        Duration::from_millis(self.input_highlight_ms)
    }

    /// How long a toast stays attached to the page.
    pub fn toast_lifetime(&self) -> Duration {
        self.toast_display() + self.toast_exit()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub submitting_label: String,
    pub subscribed: String,
    pub added_to_order_suffix: String,
    pub error_border_color: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            submitting_label: "Submitting...".to_string(),
            subscribed: "Successfully subscribed!".to_string(),
            added_to_order_suffix: " added to order!".to_string(),
            error_border_color: "#ef4444".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastStyle {
    pub base_classes: String,
    pub offscreen_class: String,
    pub success_background: String,
    pub error_background: String,
    pub success_icon: String,
    pub error_icon: String,
}

impl Default for ToastStyle {
    fn default() -> Self {
        Self {
            base_classes: "fixed top-20 right-4 text-white px-6 py-3 rounded-lg shadow-lg z-50 transform transition-transform duration-300".to_string(),
            offscreen_class: "translate-x-full".to_string(),
            success_background: "bg-green-500".to_string(),
            error_background: "bg-red-500".to_string(),
            success_icon: "fas fa-check mr-2".to_string(),
            error_icon: "fas fa-exclamation-triangle mr-2".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = SiteConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SiteConfig::default());
        assert_eq!(cfg.back_to_top_offset, 300.0);
        assert_eq!(cfg.timing.toast_lifetime(), Duration::from_millis(3300));
        assert_eq!(cfg.fade_in.root_margin.to_css(), "0px 0px -50px 0px");
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let cfg = SiteConfig::from_json(
            r#"{ "timing": { "submit_latency_ms": 10 }, "ids": { "menu_toggle": "burger" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.timing.submit_latency_ms, 10);
        assert_eq!(cfg.timing.toast_display_ms, 3000);
        assert_eq!(cfg.ids.menu_toggle, "burger");
        assert_eq!(cfg.ids.mobile_menu, "mobile-menu");
    }

    #[test]
    fn partial_fade_in_override_keeps_the_root_margin() {
        let cfg = SiteConfig::from_json(r#"{ "fade_in": { "threshold": 0.2 } }"#).unwrap();
        assert_eq!(cfg.fade_in.threshold, 0.2);
        assert_eq!(cfg.fade_in.root_margin, RootMargin::bottom(-50.0));

        let cfg =
            SiteConfig::from_json(r#"{ "fade_in": { "root_margin": { "top": 10 } } }"#).unwrap();
        assert_eq!(cfg.fade_in.threshold, 0.1);
        assert_eq!(cfg.fade_in.root_margin.top, 10.0);
        assert_eq!(cfg.fade_in.root_margin.bottom, -50.0);
    }

    #[test]
    fn lists_are_replaced_not_merged() {
        let cfg =
            SiteConfig::from_json(r#"{ "classes": { "back_to_top_shown": ["shown"] } }"#).unwrap();
        assert_eq!(cfg.classes.back_to_top_shown, vec!["shown".to_string()]);
        assert_eq!(cfg.classes.back_to_top_hidden, vec!["opacity-0", "invisible"]);
    }

    #[test]
    fn wrongly_typed_override_is_a_config_error() {
        let err = SiteConfig::from_json(r#"{ "fade_in": { "threshold": "high" } }"#).unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }
}
