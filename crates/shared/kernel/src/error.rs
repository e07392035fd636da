use std::borrow::Cow;

#[folio_derive::folio_error]
pub enum PageError {
    #[error("Failed to read page layout{}: {source}", format_context(.context))]
    Read { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Failed to parse page layout{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid page layout{}: {message}", format_context(.context))]
    InvalidLayout { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal page error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl PageError {
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidLayout { message: message.into(), context: None }
    }
}
