use std::borrow::Cow;

/// Error types specific to the contact feature.
#[folio_derive::folio_error]
pub enum ContactError {
    /// The configured email pattern does not compile.
    #[error("Invalid email pattern{}: {source}", format_context(.context))]
    Pattern { source: regex::Error, context: Option<Cow<'static, str>> },

    #[error("Internal contact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
