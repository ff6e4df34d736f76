//! # osteria
//!
//! Client-side behaviors for a single-page restaurant site: scroll-triggered
//! fade-ins, deferred images, the mobile menu, the back-to-top button, smooth
//! in-page anchors, the reservation form, add-to-order toasts and the
//! newsletter signup.
//!
//! Behaviors are written against the [`host::Host`] capability set, so the
//! same code runs in the browser (`osteria_web`) and on the in-memory
//! [`headless`] page.
//!
//! ## Quick Start
//!
//! ```
//! # #[cfg(feature = "headless")] {
//! use std::time::Duration;
//! use osteria::prelude::*;
//! use osteria::headless::fixture::restaurant_page;
//!
//! let page = restaurant_page();
//! let report = mount(&page, SiteConfig::default());
//! assert!(report.is_wired(Behavior::Reservation));
//!
//! page.scroll_to(1600.0);
//! page.advance(Duration::from_millis(16));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `headless` (default): the in-memory page and the fixture site
//! - `demo` (default): the `osteria` binary replaying a scripted visit
//!
//! ## Modules
//!
//! - [`host`]: capability traits a page must provide
//! - [`behaviors`]: one module per page behavior
//! - [`toast`]: transient notifications
//! - [`site`]: startup and the mount report
//! - [`config`]: ids, selectors, classes, timings and texts

pub mod behaviors;
pub mod config;
pub mod error;
pub mod host;
pub mod site;
pub mod toast;

#[cfg(feature = "headless")]
pub mod headless;

pub use config::SiteConfig;
pub use error::{SiteError, ValidationError};
pub use site::{mount, Behavior, MountReport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SiteConfig;
    pub use crate::error::{SiteError, ValidationError};
    pub use crate::host::{Dom, EventKind, Host, ScrollAlign, Timers, UiEvent, Viewport, Watch};
    pub use crate::site::{mount, Behavior, MountReport};
    pub use crate::toast::{show_toast, Severity};
}
