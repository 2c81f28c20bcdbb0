use proc_macro::TokenStream;
use syn::parse_macro_input;

mod component;

/// A macro for creating components from functions.
///
/// The function takes the reactive scope as its first argument and, optionally, a props value
/// as its second, and returns a `View<G>`. A function without a props argument is given an
/// implicit `()` one, so every component can be instantiated the same way.
///
/// ```
/// use likes_view::prelude::*;
///
/// #[component]
/// fn Greeting<'a, G: Html>(ctx: ScopeRef<'a>) -> View<G> {
///     h(ctx, "p").t("Hello!").view()
/// }
///
/// let html = likes_view::render_to_string(|ctx| Greeting(ctx, ()));
/// assert_eq!(html, "<p>Hello!</p>");
/// ```
#[proc_macro_attribute]
pub fn component(_attr: TokenStream, component: TokenStream) -> TokenStream {
    let comp = parse_macro_input!(component as component::ComponentFunction);

    component::component_impl(comp)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
