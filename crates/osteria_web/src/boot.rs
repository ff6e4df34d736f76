//! Startup decisions that don't need a browser: where the config comes from
//! and what gets reported once the site is mounted.
//!
//! Kept out of the wasm-only `web` module so it can be unit-tested on the host.

use osteria::{MountReport, SiteConfig, SiteError};

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_SCRIPT_ID: &str = "osteria-config";

/// Where the mounted config came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// No config element, or an empty one.
    Defaults,
    Page,
    /// The page's config was rejected; defaults were used instead.
    Fallback(SiteError),
}

impl ConfigSource {
    pub fn label(&self) -> &'static str {
        match self {
            ConfigSource::Defaults => "defaults",
            ConfigSource::Page => "page",
            ConfigSource::Fallback(_) => "fallback",
        }
    }
}

/// Resolves the site config from the text of the config element, if any.
pub fn resolve_config(raw: Option<&str>) -> (SiteConfig, ConfigSource) {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return (SiteConfig::default(), ConfigSource::Defaults);
    };
    match SiteConfig::from_json(raw) {
        Ok(cfg) => (cfg, ConfigSource::Page),
        Err(e) => (SiteConfig::default(), ConfigSource::Fallback(e)),
    }
}

/// One console line summarizing a mount.
pub fn mount_message(report: &MountReport, source: &ConfigSource) -> String {
    format!("osteria: {} (config: {})", report.summary(), source.label())
}
