use quote::quote_spanned;

use crate::derive_data::MappedStruct;

/// Generate `PartialEq` implementation through `mapped_eq`.
pub(crate) fn get_partial_eq_impl(mapped: &MappedStruct) -> proc_macro2::TokenStream {
    let Some(span) = mapped.attrs().partial_eq else {
        return crate::utils::empty();
    };

    let mapped_eq_ = crate::path::mapped_eq_(mapped.mw_mapping_path());
    let ident = mapped.ident();

    quote_spanned! { span =>
        impl ::core::cmp::PartialEq for #ident {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                #mapped_eq_(self, other)
            }
        }
    }
}
