//! Deferred image loading. Each image swaps `data-src` into `src` the first
//! time it intersects and is then unobserved. Load failures are left to the
//! browser.

use std::rc::Rc;

use tracing::debug;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::host::{Host, ObserveOptions, Watch};

pub const DEFERRED_SRC_ATTR: &str = "data-src";

pub fn setup<H: Host>(host: &H, config: &Rc<SiteConfig>) -> Result<(), SiteError> {
    let images = host.query_all(&config.selectors.lazy_image);
    if images.is_empty() {
        return Err(SiteError::missing(&config.selectors.lazy_image));
    }
    wire(host, &images, &config.lazy_images, &config.classes.lazy);
    Ok(())
}

pub fn wire<H: Host>(host: &H, images: &[H::Element], options: &ObserveOptions, lazy_class: &str) {
    let loader = host.clone();
    let lazy_class = lazy_class.to_string();
    host.observe(
        images,
        options,
        Box::new(move |entry| {
            if !entry.is_intersecting {
                return Watch::Keep;
            }
            let img = &entry.target;
            if let Some(src) = loader.attribute(img, DEFERRED_SRC_ATTR) {
                debug!(src = %src, "loading deferred image");
                loader.set_attribute(img, "src", &src);
            }
            loader.remove_class(img, &lazy_class);
            Watch::Stop
        }),
    );
}
