use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, ItemFn, Lit, Meta, ReturnType, Token, Type};

const PROFILES: &str = "single_threaded, memory_efficient, high_performance, or default";

/// Expands the `#[folio_runtime::main]` attribute macro.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "The #[folio_runtime::main] attribute can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "The #[folio_runtime::main] attribute requires a Result return type",
        )
        .to_compile_error();
    }

    let config = match runtime_config(args) {
        Ok(config) => config,
        Err(err) => return err.to_compile_error(),
    };

    let name = &input.sig.ident;
    let body = &input.block;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let output = &input.sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #config;
            let rt = ::folio_runtime::build_runtime_with_config(&config)?;
            rt.block_on(async { #body })
        }
    }
}

/// Turns `profile, key = value, ...` into a `RuntimeConfig` builder chain.
///
/// The profile is optional and must come first; `worker_threads`,
/// `stack_size` and `thread_name` override single settings.
fn runtime_config(args: TokenStream) -> syn::Result<TokenStream> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;

    let mut profile = None;
    let mut overrides = Vec::new();

    for (index, meta) in metas.into_iter().enumerate() {
        match meta {
            Meta::Path(path) if index == 0 => {
                let Some(ident) = path.get_ident() else {
                    return Err(Error::new_spanned(path, format!("Expected a profile: {PROFILES}")));
                };
                profile = Some(match ident.to_string().as_str() {
                    "single_threaded" => quote! { single_threaded() },
                    "memory_efficient" => quote! { memory_efficient() },
                    "high_performance" => quote! { high_performance() },
                    "default" => quote! { default() },
                    _ => {
                        return Err(Error::new_spanned(
                            ident,
                            format!("Unknown runtime profile. Use: {PROFILES}"),
                        ));
                    },
                });
            },
            Meta::Path(path) => {
                return Err(Error::new_spanned(path, "The runtime profile must be the first argument"));
            },
            Meta::NameValue(pair) => {
                let key = pair.path.get_ident().map(ToString::to_string).unwrap_or_default();
                let value = &pair.value;
                overrides.push(match key.as_str() {
                    "worker_threads" => quote! { .with_worker_threads(#value) },
                    "stack_size" => quote! { .with_stack_size(#value) },
                    "thread_name" if is_str_literal(value) => quote! { .with_thread_name(#value) },
                    "thread_name" => {
                        return Err(Error::new_spanned(value, "thread_name expects a string literal"));
                    },
                    _ => {
                        return Err(Error::new_spanned(
                            pair.path,
                            "Unknown runtime setting. Use: worker_threads, stack_size, or thread_name",
                        ));
                    },
                });
            },
            Meta::List(list) => {
                return Err(Error::new_spanned(list, "Unexpected argument list"));
            },
        }
    }

    let profile = profile.unwrap_or_else(|| quote! { default() });
    Ok(quote! { ::folio_runtime::RuntimeConfig::#profile #(#overrides)* })
}

const fn is_str_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Lit(ExprLit { lit: Lit::Str(_), .. }))
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(args: TokenStream) -> String {
        runtime_config(args).map(|tokens| tokens.to_string()).unwrap_or_else(|e| e.to_string())
    }

    #[test]
    fn test_empty_args_use_default_profile() {
        assert_eq!(expand(quote! {}), quote! { ::folio_runtime::RuntimeConfig::default() }.to_string());
    }

    #[test]
    fn test_profile_with_overrides() {
        let expanded = expand(quote! { memory_efficient, worker_threads = 2, thread_name = "folio-page" });
        assert_eq!(
            expanded,
            quote! {
                ::folio_runtime::RuntimeConfig::memory_efficient()
                    .with_worker_threads(2)
                    .with_thread_name("folio-page")
            }
            .to_string()
        );
    }

    #[test]
    fn test_overrides_without_profile() {
        let expanded = expand(quote! { stack_size = 4194304 });
        assert!(expanded.contains("default ()"));
        assert!(expanded.contains("with_stack_size"));
    }

    #[test]
    fn test_rejects_unknown_profile_and_setting() {
        assert!(expand(quote! { turbo }).starts_with("Unknown runtime profile"));
        assert!(expand(quote! { retries = 3 }).starts_with("Unknown runtime setting"));
        assert!(expand(quote! { default, single_threaded }).contains("first argument"));
        assert!(expand(quote! { thread_name = 7 }).contains("string literal"));
    }

    #[test]
    fn test_result_return_is_required() {
        let with_result: ItemFn = syn::parse_quote! { async fn main() -> anyhow::Result<()> { Ok(()) } };
        let without: ItemFn = syn::parse_quote! { async fn main() {} };
        assert!(returns_result(&with_result.sig.output));
        assert!(!returns_result(&without.sig.output));
    }
}
