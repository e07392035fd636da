use folio_contact::{ContactForm, Field, StatusKind, SubmitOutcome, ValidationRules};
use folio_domain::config::{ContactConfig, FolioConfig};
use folio_domain::constants::{ARIA_LIVE, IS_INVALID, IS_VALID, SENDING};
use folio_kernel::clock::ManualClock;
use folio_kernel::context::PageContext;
use folio_kernel::dom::{Document, Dom, NodeId, Query};
use folio_kernel::testing::{node, portfolio_page};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn form_on(document: Document) -> (ContactForm, PageContext, ManualClock) {
    let clock = ManualClock::new();
    let ctx = PageContext::from_document(document).with_clock(clock.shared());
    (ContactForm::new(ctx.clone()).unwrap(), ctx, clock)
}

fn fill(ctx: &PageContext, name: &str, email: &str, message: &str) {
    let mut document = ctx.dom.write();
    for (id, value) in [("contactName", name), ("contactEmail", email), ("contactMessage", message)] {
        let field = document.by_id(id).unwrap();
        document.set_value(field, value);
    }
}

fn label(ctx: &PageContext) -> String {
    let document = ctx.dom.read();
    let button = node(&document, "submitBtn");
    let label = document.descendant_with_class(button, "btn-text").unwrap();
    document.text(label).unwrap().to_owned()
}

fn status(ctx: &PageContext) -> (Vec<String>, String) {
    let document = ctx.dom.read();
    let status = document.get(node(&document, "formStatus")).unwrap();
    (status.classes().to_vec(), status.text().to_owned())
}

#[tokio::test]
async fn test_blur_marks_invalid_then_valid() {
    let (form, ctx, _) = form_on(portfolio_page());
    let name = node(&ctx.dom.read(), "contactName");
    let error = node(&ctx.dom.read(), "nameError");

    ctx.dom.write().set_value(name, "A");
    assert_eq!(form.on_blur(name), Some(false));
    {
        let document = ctx.dom.read();
        assert!(document.has_class(name, IS_INVALID));
        assert!(!document.has_class(name, IS_VALID));
        assert_eq!(document.text(error), Some("Name must be at least 2 characters."));
    }

    ctx.dom.write().set_value(name, "Al");
    assert_eq!(form.on_blur(name), Some(true));
    let document = ctx.dom.read();
    assert!(document.has_class(name, IS_VALID));
    assert!(!document.has_class(name, IS_INVALID));
    assert_eq!(document.text(error), Some(""));
}

#[tokio::test]
async fn test_blur_on_other_nodes_is_ignored() {
    let (form, ctx, _) = form_on(portfolio_page());
    let about = node(&ctx.dom.read(), "about");
    assert_eq!(form.on_blur(about), None);
}

#[tokio::test]
async fn test_invalid_submit_runs_every_rule() {
    let (form, ctx, clock) = form_on(portfolio_page());
    fill(&ctx, "A", "a@b", "too short");

    assert_eq!(form.on_submit().await, SubmitOutcome::Rejected);

    let document = ctx.dom.read();
    for id in ["contactName", "contactEmail", "contactMessage"] {
        assert!(document.has_class(node(&document, id), IS_INVALID), "{id} not marked");
    }
    for (id, text) in [
        ("nameError", "Name must be at least 2 characters."),
        ("emailError", "Please enter a valid email address."),
        ("messageError", "Message must be at least 10 characters."),
    ] {
        assert_eq!(document.text(node(&document, id)), Some(text));
    }
    drop(document);

    let (classes, text) = status(&ctx);
    assert_eq!(classes, ["form-status", "show", "error"]);
    assert_eq!(text, "Please fix the errors below.");
    assert_eq!(label(&ctx), "Send Message");
    assert!(clock.waits().is_empty());
}

#[tokio::test]
async fn test_one_bad_field_blocks_submission() {
    let (form, ctx, _) = form_on(portfolio_page());
    fill(&ctx, "Ada", "ada@example.com", "123456789");

    assert_eq!(form.on_submit().await, SubmitOutcome::Rejected);
    let document = ctx.dom.read();
    assert!(document.has_class(node(&document, "contactName"), IS_VALID));
    assert!(document.has_class(node(&document, "contactMessage"), IS_INVALID));
}

#[tokio::test]
async fn test_valid_submit_plays_sending_sequence() {
    let dom = Dom::new(portfolio_page());
    let snapshots = Arc::new(Mutex::new(Vec::new()));

    let probe = dom.clone();
    let seen = Arc::clone(&snapshots);
    let clock = ManualClock::new().with_hook(move |_| {
        let document = probe.read();
        let button = node(&document, "submitBtn");
        let label = document.descendant_with_class(button, "btn-text").unwrap();
        seen.lock().push((
            document.text(label).unwrap().to_owned(),
            document.has_class(button, SENDING),
        ));
    });
    let ctx = PageContext::new(dom, clock.shared(), FolioConfig::default());
    let form = ContactForm::new(ctx.clone()).unwrap();
    fill(&ctx, "Ada", "ada@example.com", "Hello there, Ada here.");

    assert_eq!(form.on_submit().await, SubmitOutcome::Sent);

    assert_eq!(clock.waits(), vec![Duration::from_millis(800), Duration::from_millis(2500)]);
    assert_eq!(
        *snapshots.lock(),
        vec![("Sending...".to_owned(), true), ("Sent!".to_owned(), false)]
    );
    assert_eq!(label(&ctx), "Send Message");

    let (classes, text) = status(&ctx);
    assert_eq!(classes, ["form-status", "show", "success"]);
    assert_eq!(text, "Thank you! Your message has been sent successfully.");

    let document = ctx.dom.read();
    assert_eq!(document.attribute(node(&document, "formStatus"), ARIA_LIVE), Some("polite"));
    for id in ["contactName", "contactEmail", "contactMessage"] {
        let field = node(&document, id);
        assert_eq!(document.value(field), Some(""));
        assert!(!document.has_class(field, IS_VALID));
        assert!(!document.has_class(field, IS_INVALID));
    }
}

#[tokio::test]
async fn test_hide_status_clears_banner() {
    let (form, ctx, _) = form_on(portfolio_page());
    form.show_status(StatusKind::Error, "old");
    form.hide_status();

    let (classes, text) = status(&ctx);
    assert_eq!(classes, ["form-status"]);
    assert!(text.is_empty());
}

#[tokio::test]
async fn test_page_without_form_is_ignored() {
    let (form, _, clock) = form_on(Document::new(800.0));
    assert_eq!(form.on_submit().await, SubmitOutcome::Ignored);
    assert!(clock.waits().is_empty());
}

#[tokio::test]
async fn test_missing_label_uses_default() {
    let mut page = portfolio_page();
    let button = page.by_id("submitBtn").unwrap();
    let label = page.descendant_with_class(button, "btn-text").unwrap();
    page.get_mut(label).unwrap().remove_class("btn-text");
    let (form, ctx, _) = form_on(page);
    fill(&ctx, "Ada", "ada@example.com", "Hello there, Ada here.");

    assert_eq!(form.on_submit().await, SubmitOutcome::Sent);
    let document = ctx.dom.read();
    assert!(document.query_all(&Query::new().class("btn-text")).is_empty());
    assert!(!document.has_class(node(&document, "submitBtn"), SENDING));
}

fn rules() -> ValidationRules {
    ValidationRules::from_config(&ContactConfig::default()).unwrap()
}

fn input_of(ctx: &PageContext, field: Field) -> NodeId {
    let document = ctx.dom.read();
    document.by_id(field.input_id(&ctx.config.selectors)).unwrap()
}

proptest! {
    #[test]
    fn name_rule_counts_trimmed_chars(name in "\\PC{0,6}", pad in " {0,3}") {
        let padded = format!("{pad}{name}{pad}");
        let expected = padded.trim().chars().count() >= 2;
        prop_assert_eq!(rules().check(Field::Name, &padded).is_ok(), expected);
    }

    #[test]
    fn message_rule_counts_trimmed_chars(message in "[a-z ]{0,20}") {
        let expected = message.trim().chars().count() >= 10;
        prop_assert_eq!(rules().check(Field::Message, &message).is_ok(), expected);
    }

    #[test]
    fn well_formed_emails_pass(user in "[a-z0-9.]{1,8}", host in "[a-z0-9]{1,8}", tld in "[a-z]{2,4}") {
        let email = format!("{user}@{host}.{tld}");
        prop_assert!(rules().check(Field::Email, &email).is_ok());
    }

    #[test]
    fn emails_without_at_fail(local in "[a-z.]{0,12}") {
        prop_assert!(rules().check(Field::Email, &local).is_err());
    }

    #[test]
    fn markers_are_exclusive(value in "\\PC{0,12}") {
        let (form, ctx, _) = form_on(portfolio_page());
        let input = input_of(&ctx, Field::Name);
        ctx.dom.write().set_value(input, value);

        let valid = form.validate(Field::Name);
        let document = ctx.dom.read();
        prop_assert_eq!(document.has_class(input, IS_VALID), valid);
        prop_assert_eq!(document.has_class(input, IS_INVALID), !valid);
    }
}
