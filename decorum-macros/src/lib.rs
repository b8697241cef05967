//! Procedural macros for Decorum.
//!
//! - `#[feature_listener(EVENT)]` - Submit a function as a link-time feature listener

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Expr, FnArg, ItemFn, LitStr, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[feature_listener]` macro.
struct FeatureListenerArgs {
    /// The event to register with, usually a `feature_event!` static.
    event: Expr,
    /// Optional explicit listener name; defaults to the function name.
    name: Option<LitStr>,
}

impl Parse for FeatureListenerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error(
                "expected the event to register with, e.g. #[feature_listener(EVENT)]",
            ));
        }

        let event: Expr = input.parse()?;
        let mut name = None;

        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "listener name must not be empty"));
                    }
                    name = Some(lit);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }
        }

        Ok(FeatureListenerArgs { event, name })
    }
}

/// Submits a function as a feature listener, installed by
/// `decorum::install_static_listeners()`.
///
/// The function must have the listener signature:
///
/// ```rust,ignore
/// decorum::feature_event!(pub static EVENT: RenderContext);
///
/// #[decorum::feature_listener(EVENT, name = "capes")]
/// fn capes(
///     subject: &SubjectType,
///     renderer: &dyn BaseRenderer,
///     registration: &mut Registration<'_>,
///     context: &RenderContext,
/// ) -> Result<(), BoxError> {
///     if renderer.supports(Capabilities::BIPED) {
///         registration.append(Cape::default())?;
///     }
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn feature_listener(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as FeatureListenerArgs);
    let input = parse_macro_input!(item as ItemFn);

    if let Some(asyncness) = &input.sig.asyncness {
        return syn::Error::new_spanned(asyncness, "feature listeners must be synchronous")
            .to_compile_error()
            .into();
    }

    if input.sig.inputs.len() != 4 {
        return syn::Error::new_spanned(
            &input.sig.inputs,
            "feature listeners take (subject, renderer, registration, context)",
        )
        .to_compile_error()
        .into();
    }

    if let Some(FnArg::Receiver(receiver)) = input.sig.inputs.first() {
        return syn::Error::new_spanned(receiver, "feature listeners must be free functions")
            .to_compile_error()
            .into();
    }

    let fn_name = &input.sig.ident;
    let event = &args.event;
    let listener_name = args
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| fn_name.to_string());
    let install_fn = format_ident!("__decorum_install_{}", fn_name);

    let expanded = quote! {
        #input

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #install_fn() -> ::core::result::Result<::decorum::ListenerId, ::decorum::RegistrationError> {
            (#event).register_fn_named(#listener_name, #fn_name)
        }

        ::decorum::inventory::submit! {
            ::decorum::StaticListener::new(#listener_name, #install_fn)
        }
    };

    TokenStream::from(expanded)
}
