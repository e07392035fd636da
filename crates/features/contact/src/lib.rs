//! # Contact
//!
//! Client-side validation of the contact form and a simulated send.
//! No network request is ever made: a valid submission only plays the
//! "Sending..." / "Sent!" sequence and resets the form.

mod error;
mod form;
mod rules;

pub use error::{ContactError, ContactErrorExt};
pub use form::{ContactForm, StatusKind, SubmitOutcome};
pub use rules::{Field, ValidationRules};
