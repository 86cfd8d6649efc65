use syn::{DeriveInput, Error, Lit, Meta, NestedMeta};
use proc_macro::TokenStream;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    let component_name = match parse_name(ast) {
        Ok(Some(value)) => value,
        Ok(None) => name.to_string(),
        Err(err) => return err.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics ::entity_index::components::Component for #name #ty_generics #where_clause {
            #[inline(always)]
            fn name() -> &'static str {
                #component_name
            }
        }
    };
    gen.into()
}

fn parse_name(ast: &DeriveInput) -> syn::Result<Option<String>> {
    let mut name = None;

    for attr in ast.attrs.iter().filter(|a| a.path.is_ident("component")) {
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            other => return Err(Error::new_spanned(other, "expected #[component(name = \"...\")]")),
        };

        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::NameValue(value)) if value.path.is_ident("name") => match value.lit {
                    Lit::Str(lit) if lit.value().is_empty() => {
                        return Err(Error::new_spanned(lit, "component name cannot be empty"));
                    },
                    Lit::Str(lit) => name = Some(lit.value()),
                    other => return Err(Error::new_spanned(other, "component name must be a string literal")),
                },
                other => return Err(Error::new_spanned(other, "unknown component attribute")),
            }
        }
    }

    Ok(name)
}
