use crate::derive_data::MappedStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(mapped: &MappedStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = mapped.attrs().auto_register else {
        return crate::utils::empty();
    };

    let auto_register_ = crate::path::auto_register_(mapped.mw_mapping_path());
    let ident = mapped.ident();

    let register = if mapped.attrs().default.is_some() {
        quote_spanned!(span => register_default)
    } else {
        quote_spanned!(span => register)
    };

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegistration(|registry| {
                registry.#register::<#ident>();
            })
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &MappedStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
