use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct InInput {
    ident: syn::Ident,
    data: ast::Data<InVariant, ()>,
}

#[derive(Debug, FromVariant)]
struct InVariant {
    ident: syn::Ident,
}

pub fn in_operator_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match InInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };
    let enum_name = &enum_info.ident;

    let variants = enum_info.data.take_enum().unwrap_or_default();

    let methods = variants.iter().map(|var| {
        let var_name = &var.ident;
        let snake = var_name.to_string().to_snake_case();
        let where_fn = format_ident!("where_{}", snake);
        let keyword = snake.replace('_', " ").to_uppercase();
        let doc = format!(
            "Appends a `<column> {keyword} (...)` predicate. The relation is either a \
             subquery builder, compiled right away, or a sequence of values; an empty \
             sequence writes `()`."
        );

        quote! {
            #[doc = #doc]
            pub fn #where_fn<C, L>(&mut self, column: C, relation: L) -> crate::Result<&mut Self>
            where
                C: crate::IntoIdent,
                L: crate::IntoInList,
            {
                self.where_in_expr(
                    column.into_ident(),
                    relation.into_in_list(),
                    #enum_name::#var_name,
                )
            }
        }
    });

    quote! {
        impl crate::Builder {
            #(#methods)*
        }
    }
    .into()
}
