use std::process;
use std::time::Duration;

use osteria::behaviors::back_to_top::ButtonState;
use osteria::headless::fixture::{restaurant_page, MENU_ITEMS};
use osteria::headless::HeadlessPage;
use osteria::prelude::*;
use tracing::{error, info, warn};

fn main() {
    tracing_subscriber::fmt::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = args[i + 1].clone();
            args.drain(i..i + 2);
            Some(path)
        }
        Some(_) => {
            eprintln!("--config needs a file path");
            print_help();
            process::exit(2);
        }
        None => None,
    };

    match args.first().map(String::as_str) {
        None | Some("demo") => {}
        Some("--help") | Some("-h") | Some("help") => {
            print_help();
            return;
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    }

    let config = match config_path {
        Some(path) => load_config(&path),
        None => SiteConfig::default(),
    };
    run_demo(config);
}

fn print_help() {
    eprintln!("osteria: replays a visit to the restaurant site on an in-memory page\n");
    eprintln!("Usage: osteria [demo|help] [--config <file.json>]\n");
    eprintln!("Commands:");
    eprintln!("  demo      Scroll, browse, book and subscribe (default)");
    eprintln!("  help      Show this message");
}

fn load_config(path: &str) -> SiteConfig {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            error!("failed to read {path}: {e}");
            process::exit(1);
        }
    };
    match SiteConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{e}; using the default site config");
            SiteConfig::default()
        }
    }
}

fn run_demo(config: SiteConfig) {
    let page = restaurant_page();
    let report = mount(&page, config.clone());
    for (behavior, reason) in &report.skipped {
        warn!("{behavior} not wired: {reason}");
    }
    page.advance(Duration::from_millis(16));
    report_page(&page, &config, "landed");

    for y in [400.0, 1200.0, 2000.0] {
        page.scroll_to(y);
        page.advance(Duration::from_millis(16));
        report_page(&page, &config, &format!("scrolled to {y}"));
    }

    if let (Some(toggle), Some(menu)) = (
        page.element_by_id(&config.ids.menu_toggle),
        page.element_by_id(&config.ids.mobile_menu),
    ) {
        page.click(toggle);
        info!(open = !page.has_class(&menu, &config.classes.hidden), "tapped the menu button");
        if let Some(link) = page.query_within(&menu, "a[href=\"#reservations\"]") {
            page.click(link);
            page.settle();
            info!(
                offset = page.scroll_offset(),
                open = !page.has_class(&menu, &config.classes.hidden),
                "followed the reservations link"
            );
        }
    }

    if let Some(form) = page.element_by_id(&config.ids.reservation_form) {
        page.submit(form);
        info!(
            error_shown = shown(&page, &config.ids.error_message),
            "submitted an empty reservation"
        );

        for (id, value) in [
            ("name", "Jane Doe"),
            ("phone", "555-1234"),
            ("date", "2024-01-01"),
            ("time", "19:00"),
        ] {
            if let Some(field) = page.element_by_id(id) {
                page.fill(field, value);
            }
        }
        page.submit(form);
        page.advance(config.timing.submit_latency());
        info!(
            success_shown = shown(&page, &config.ids.success_message),
            "reservation round trip finished"
        );
        page.settle();
    }

    let buttons = page.query_all(&config.selectors.add_to_order);
    if let Some(button) = buttons.first() {
        page.click(*button);
        for toast in page.toasts() {
            info!(toast = %page.text(&toast), "ordered {}", MENU_ITEMS[0]);
        }
        page.settle();
    }

    if let Some(button) = page.query_all(&config.selectors.subscribe_button).first() {
        if let Some(input) = page.previous_element_sibling(button) {
            for email in ["not-an-email", "guest@example.com"] {
                page.fill(input, email);
                page.click(*button);
                info!(
                    email,
                    toasts = page.toasts().len(),
                    flagged = page.style(input, "border-color").is_some(),
                    "tried the newsletter"
                );
                page.settle();
            }
        }
    }

    page.scroll_to(0.0);
    report_page(&page, &config, "back at the top");
    info!(elapsed_ms = page.now().as_millis() as u64, "visit over");
}

fn shown(page: &HeadlessPage, id: &str) -> bool {
    page.element_by_id(id)
        .and_then(|el| page.style(el, "display"))
        .is_some_and(|d| d == "block")
}

fn report_page(page: &HeadlessPage, config: &SiteConfig, moment: &str) {
    let faded_in = page
        .query_all(&config.selectors.fade_in)
        .iter()
        .filter(|el| page.has_class(el, &config.classes.visible))
        .count();
    let pending_images = page.query_all(&format!("img.{}", config.classes.lazy)).len();
    let back_to_top = ButtonState::for_offset(page.scroll_offset(), config.back_to_top_offset);
    info!(
        offset = page.scroll_offset(),
        faded_in,
        pending_images,
        back_to_top = ?back_to_top,
        "{moment}"
    );
}
