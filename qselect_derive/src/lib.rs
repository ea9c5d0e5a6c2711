use proc_macro::TokenStream;

mod r#in;

/// Generates one `where_<variant>` method on `crate::Builder` per variant of
/// the annotated unit enum, each forwarding to `Builder::where_in_expr`.
#[proc_macro_derive(InOperator)]
pub fn in_operator_methods(input: TokenStream) -> TokenStream {
    r#in::in_operator_methods_impl(input)
}
