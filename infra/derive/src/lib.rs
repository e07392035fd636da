#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the page behavior infrastructure.
//! This crate removes the boilerplate around error enums and the async
//! runtime bootstrap used by the `folio` binaries.
//!
//! ## Usage
//! Add the crate as a regular dependency of the consuming crate:
//! ```toml
//! [dependencies]
//! folio-derive = { path = "../infra/derive" }
//! ```
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates’ tests as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap the specialized Tokio runtime.
///
/// This macro transforms an `async fn main` into a standard `fn main` that initializes
/// a pre-configured Tokio runtime based on the specified profile.
///
/// # Arguments
///
/// An optional profile, followed by optional `key = value` overrides:
///
/// * `single_threaded` - One cooperative event loop, like a browser tab.
/// * `memory_efficient` - A small pool, suited to a single page session.
/// * `high_performance` - More worker threads and larger stacks.
/// * `default` - Worker threads detected from the available parallelism.
/// * `worker_threads = N`, `stack_size = BYTES`, `thread_name = "name"`.
///
/// # Examples
///
/// ```rust,ignore
/// #[folio_runtime::main(memory_efficient, thread_name = "folio-page")]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// A high-level attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use folio_derive::folio_error;
/// use std::borrow::Cow;
///
/// #[folio_error]
/// pub enum PageError {
///     #[error("Layout parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal page error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<PageLayout, PageError> {
///     serde_json::from_str(raw).context("Parsing page layout")
/// }
/// ```
#[proc_macro_attribute]
pub fn folio_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
