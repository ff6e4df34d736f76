//! Trunk builds this binary for the page. On wasm32 with `web` the exported
//! start hook mounts the site; any other build just says how to get there.

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn main() {
    osteria_web::placeholder();
    eprintln!("osteria_web runs in the browser: build for wasm32 with `--features web`.");
    eprintln!("For a native run against the in-memory page, use the `osteria` binary.");
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount_on_load() {
    osteria_web::start();
}
