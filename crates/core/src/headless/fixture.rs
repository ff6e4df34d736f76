//! The shipped page structure, rebuilt in memory.
//!
//! Viewport is 1280x800; sections are stacked top to bottom so scrolling
//! reveals them in order.

use super::document::{Document, El};
use super::HeadlessPage;

pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;

pub const MENU_ITEMS: [&str; 3] = ["Margherita Pizza", "Spaghetti Carbonara", "Tiramisu"];

const PLACEHOLDER_SRC: &str = "data:image/gif;base64,R0lGODlhAQABAAAAACw=";

pub fn restaurant_page() -> HeadlessPage {
    HeadlessPage::new(restaurant_document())
}

pub fn restaurant_document() -> Document {
    let mut doc = Document::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let body = doc.body();

    let nav = doc.append(body, El::new("nav").class("fixed w-full z-40").at(0.0, 80.0));
    doc.append(
        nav,
        El::new("a").attr("href", "#home").class("font-serif text-2xl").text("Osteria"),
    );
    doc.append(
        nav,
        El::new("button").id("menu-toggle").class("md:hidden").text("Menu"),
    );
    let mobile = doc.append(
        nav,
        El::new("div").id("mobile-menu").class("hidden md:hidden"),
    );
    for (href, label) in [
        ("#about", "About"),
        ("#menu", "Menu"),
        ("#reservations", "Reservations"),
        ("#contact", "Contact"),
    ] {
        doc.append(mobile, El::new("a").attr("href", href).text(label));
    }

    let home = doc.append(body, El::new("section").id("home").at(0.0, 800.0));
    doc.append(
        home,
        El::new("h1").class("fade-in").text("Osteria del Porto").at(200.0, 100.0),
    );
    doc.append(
        home,
        El::new("a")
            .attr("href", "#reservations")
            .class("btn fade-in")
            .text("Book a Table")
            .at(340.0, 60.0),
    );

    let about = doc.append(body, El::new("section").id("about").at(800.0, 800.0));
    doc.append(
        about,
        El::new("div").class("fade-in").text("Family recipes since 1962").at(900.0, 300.0),
    );
    doc.append(
        about,
        El::new("img")
            .class("lazy")
            .attr("src", PLACEHOLDER_SRC)
            .attr("data-src", "images/dining-room.jpg")
            .attr("alt", "Dining room")
            .at(1000.0, 400.0),
    );

    let menu = doc.append(body, El::new("section").id("menu").at(1600.0, 1200.0));
    for (i, name) in MENU_ITEMS.iter().enumerate() {
        let y = 1700.0 + 400.0 * i as f64;
        let card = doc.append(menu, El::new("div").class("menu-item fade-in").at(y, 350.0));
        doc.append(
            card,
            El::new("img")
                .class("lazy")
                .attr("src", PLACEHOLDER_SRC)
                .attr("data-src", &format!("images/menu-{i}.jpg"))
                .at(y, 200.0),
        );
        doc.append(card, El::new("h3").text(name));
        doc.append(card, El::new("p").class("price").text("$18"));
        let overlay = doc.append(card, El::new("div").class("menu-overlay"));
        doc.append(overlay, El::new("button").text("Add to Order"));
    }

    let reservations = doc.append(
        body,
        El::new("section").id("reservations").at(2800.0, 1000.0),
    );
    let form = doc.append(
        reservations,
        El::new("form").id("reservation-form").at(2900.0, 600.0),
    );
    doc.append(form, El::new("input").id("name").attr("type", "text"));
    doc.append(form, El::new("input").id("phone").attr("type", "tel"));
    doc.append(form, El::new("input").id("date").attr("type", "date"));
    doc.append(form, El::new("input").id("time").attr("type", "time"));
    doc.append(form, El::new("select").id("guests").value("2"));
    doc.append(form, El::new("textarea").id("special-requests"));
    doc.append(
        form,
        El::new("button")
            .attr("type", "submit")
            .class("btn-primary")
            .text("Reserve Table"),
    );
    doc.append(
        reservations,
        El::new("div")
            .id("success-message")
            .style("display", "none")
            .text("Thank you! Your reservation has been received.")
            .at(3550.0, 80.0),
    );
    doc.append(
        reservations,
        El::new("div")
            .id("error-message")
            .style("display", "none")
            .text("Please fill in all required fields.")
            .at(3650.0, 80.0),
    );

    let footer = doc.append(body, El::new("footer").id("contact").at(3800.0, 400.0));
    doc.append(
        footer,
        El::new("input")
            .attr("type", "email")
            .attr("placeholder", "Your email"),
    );
    doc.append(footer, El::new("button").text("Subscribe"));

    doc.append(
        body,
        El::new("button")
            .id("back-to-top")
            .class("fixed bottom-8 right-8 opacity-0 invisible")
            .text("Top"),
    );

    doc
}

/// A page with none of the elements the site hangs off.
pub fn bare_page() -> HeadlessPage {
    let mut doc = Document::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let body = doc.body();
    doc.append(body, El::new("main").text("Closed for the season").at(0.0, 800.0));
    HeadlessPage::new(doc)
}
