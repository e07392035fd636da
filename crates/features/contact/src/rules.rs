use crate::error::{ContactError, ContactErrorExt};
use folio_domain::config::{ContactConfig, SelectorConfig};
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub fn input_id(self, selectors: &SelectorConfig) -> &str {
        match self {
            Self::Name => &selectors.name_field_id,
            Self::Email => &selectors.email_field_id,
            Self::Message => &selectors.message_field_id,
        }
    }

    #[must_use]
    pub fn error_id(self, selectors: &SelectorConfig) -> &str {
        match self {
            Self::Name => &selectors.name_error_id,
            Self::Email => &selectors.email_error_id,
            Self::Message => &selectors.message_error_id,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// The three field rules, compiled once per form.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    name_min_chars: usize,
    message_min_chars: usize,
    email: Regex,
    name_error: String,
    email_error: String,
    message_error: String,
}

impl ValidationRules {
    /// # Errors
    /// Returns [`ContactError::Pattern`] if the configured email pattern is not a valid regex.
    pub fn from_config(config: &ContactConfig) -> Result<Self, ContactError> {
        let email = Regex::new(&config.email_pattern).context("contact.email_pattern")?;
        Ok(Self {
            name_min_chars: config.name_min_chars,
            message_min_chars: config.message_min_chars,
            email,
            name_error: config.name_error.clone(),
            email_error: config.email_error.clone(),
            message_error: config.message_error.clone(),
        })
    }

    /// Checks `value` (trimmed) against the rule for `field`.
    ///
    /// Lengths are counted in chars.
    ///
    /// # Errors
    /// Returns the message to show next to the field when the rule fails.
    pub fn check(&self, field: Field, value: &str) -> Result<(), &str> {
        let value = trim_blank(value);
        let ok = match field {
            Field::Name => value.chars().count() >= self.name_min_chars,
            Field::Email => self.email.is_match(value),
            Field::Message => value.chars().count() >= self.message_min_chars,
        };
        if ok { Ok(()) } else { Err(self.message(field)) }
    }

    #[must_use]
    pub fn message(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name_error,
            Field::Email => &self.email_error,
            Field::Message => &self.message_error,
        }
    }
}

/// Trims whitespace and byte order marks from both ends.
#[must_use]
fn trim_blank(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

const BYTE_ORDER_MARK: char = '\u{FEFF}';
