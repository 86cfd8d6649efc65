mod component;

use proc_macro::TokenStream;

/// Implements `entity_index::components::Component` for a struct or enum.
///
/// The derived name defaults to the type's identifier and can be overridden with
/// `#[component(name = "...")]`.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    match syn::parse(input) {
        Ok(ast) => component::impl_component(&ast),
        Err(err) => err.to_compile_error().into(),
    }
}
