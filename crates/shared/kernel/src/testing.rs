//! A ready-made portfolio page for behavior tests.
//!
//! Geometry (viewport 800px):
//!
//! | element          | top  | height |
//! |------------------|------|--------|
//! | `#home`          | 0    | 700    |
//! | `#about`         | 700  | 800    |
//! | counters         | 900, 1000 | 60 |
//! | `#skills`        | 1500 | 900    |
//! | progress bars    | 1650, 1790 | 10 |
//! | `#contact`       | 2400 | 900    |

use crate::dom::{Document, Element, NodeId};

pub const VIEWPORT_HEIGHT: f64 = 800.0;

pub fn portfolio_page() -> Document {
    let mut doc = Document::new(VIEWPORT_HEIGHT);
    let root = doc.root();

    let nav = doc.append(
        root,
        Element::new("nav").with_id("mainNavbar").with_class("navbar").with_rect(0.0, 70.0),
    );
    for href in ["#", "#home", "#about", "#skills", "#contact"] {
        doc.append(nav, Element::new("a").with_class("nav-link").with_attribute("href", href));
    }
    doc.append(nav, Element::new("div").with_class("navbar-collapse"));

    let home = doc.append(root, Element::new("section").with_id("home").with_rect(0.0, 700.0));
    doc.append(home, Element::new("h1").with_id("typed-name").with_rect(200.0, 60.0));
    doc.append(home, Element::new("p").with_id("typed-title").with_rect(280.0, 30.0));

    let about = doc.append(root, Element::new("section").with_id("about").with_rect(700.0, 800.0));
    for (count, top) in [("100", 900.0), ("15", 1000.0)] {
        doc.append(
            about,
            Element::new("span")
                .with_class("counter")
                .with_attribute("data-count", count)
                .with_text("0")
                .with_rect(top, 60.0),
        );
    }

    let skills =
        doc.append(root, Element::new("section").with_id("skills").with_rect(1500.0, 900.0));
    for (width, top) in [("85", 1600.0), ("90", 1740.0)] {
        let card = doc.append(skills, Element::new("div").with_class("skill-card").with_rect(top, 120.0));
        doc.append(card, Element::new("span").with_class("skill-percent").with_text("0%"));
        let track = doc.append(card, Element::new("div").with_class("progress"));
        doc.append(
            track,
            Element::new("div")
                .with_class("progress-bar")
                .with_attribute("data-width", width)
                .with_rect(top + 50.0, 10.0),
        );
    }

    let contact =
        doc.append(root, Element::new("section").with_id("contact").with_rect(2400.0, 900.0));
    let form = doc.append(contact, Element::new("form").with_id("contactForm"));
    for (field, tag, error) in [
        ("contactName", "input", "nameError"),
        ("contactEmail", "input", "emailError"),
        ("contactMessage", "textarea", "messageError"),
    ] {
        doc.append(form, Element::new(tag).with_id(field));
        doc.append(form, Element::new("div").with_id(error).with_class("invalid-feedback"));
    }
    let submit = doc.append(form, Element::new("button").with_id("submitBtn"));
    doc.append(submit, Element::new("span").with_class("btn-text").with_text("Send Message"));
    doc.append(form, Element::new("div").with_id("formStatus").with_class("form-status"));

    doc
}

/// Looks up `id` in `doc`, panicking with a readable message when absent.
#[allow(clippy::missing_panics_doc)]
pub fn node(doc: &Document, id: &str) -> NodeId {
    doc.by_id(id).unwrap_or_else(|| panic!("fixture has no #{id}"))
}
