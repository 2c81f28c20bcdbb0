//! The `#[component]` attribute.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{parse_quote, Error, FnArg, Item, ItemFn, Result, ReturnType};

pub struct ComponentFunction {
    pub f: ItemFn,
}

impl Parse for ComponentFunction {
    fn parse(input: ParseStream) -> Result<Self> {
        let parsed: Item = input.parse()?;

        match parsed {
            Item::Fn(f) => {
                let sig = &f.sig;

                if sig.constness.is_some() {
                    return Err(Error::new(
                        sig.constness.span(),
                        "const functions can't be components",
                    ));
                }

                if sig.asyncness.is_some() {
                    return Err(Error::new(
                        sig.asyncness.span(),
                        "async functions can't be components",
                    ));
                }

                if sig.abi.is_some() {
                    return Err(Error::new(
                        sig.abi.span(),
                        "extern functions can't be components",
                    ));
                }

                if let ReturnType::Default = sig.output {
                    return Err(Error::new(
                        sig.paren_token.span,
                        "component must return `likes_view::view::View`",
                    ));
                }

                if let Some(receiver) = sig.inputs.iter().find_map(|arg| match arg {
                    FnArg::Receiver(receiver) => Some(receiver),
                    FnArg::Typed(_) => None,
                }) {
                    return Err(Error::new(
                        receiver.span(),
                        "function components can't accept a receiver",
                    ));
                }

                match sig.inputs.len() {
                    0 => Err(Error::new(
                        sig.paren_token.span,
                        "component must take a `ScopeRef` as its first argument",
                    )),
                    1 | 2 => Ok(Self { f }),
                    _ => Err(Error::new(
                        sig.inputs.span(),
                        "component should not take more than 2 arguments",
                    )),
                }
            }
            item => Err(Error::new_spanned(
                item,
                "the `component` attribute can only be applied to functions",
            )),
        }
    }
}

pub fn component_impl(comp: ComponentFunction) -> Result<TokenStream> {
    let ComponentFunction { mut f } = comp;

    if f.sig.inputs.len() == 1 {
        f.sig.inputs.push(parse_quote! { _: () });
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = f;

    Ok(quote! {
        #(#attrs)*
        #[allow(non_snake_case)]
        #vis #sig #block
    })
}
