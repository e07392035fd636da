use folio_derive::folio_error;
use std::borrow::Cow;

#[folio_error]
pub enum LayoutError {
    #[error("Layout read error{}: {source}", format_context(.context))]
    Read {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal layout error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
