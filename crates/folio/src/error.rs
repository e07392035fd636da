use std::borrow::Cow;

#[folio_derive::folio_error]
pub enum PortfolioError {
    #[error("Contact form setup failed{}: {source}", format_context(.context))]
    Contact { source: folio_contact::ContactError, context: Option<Cow<'static, str>> },

    #[error("Event bus error{}: {source}", format_context(.context))]
    Events { source: folio_events::EventBusError, context: Option<Cow<'static, str>> },

    #[error("Internal portfolio error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
