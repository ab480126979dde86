use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::MappedStruct;

/// Provided for `#[derive(Mapped)]`.
pub(crate) fn match_mapped_impls(ast: DeriveInput) -> TokenStream {
    // Parse type shape, attributes and fields.
    let mapped = match MappedStruct::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let mapped_impl = super::impl_trait_mapped(&mapped);
    let partial_eq_impl = super::get_partial_eq_impl(&mapped);
    let auto_register_impl = super::get_auto_register_impl(&mapped);

    TokenStream::from(quote! {
        const _: () = {
            #mapped_impl

            #partial_eq_impl

            #auto_register_impl
        };
    })
}
