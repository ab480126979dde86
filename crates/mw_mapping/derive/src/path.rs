//! Paths into `mw_mapping` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `mw_mapping` crate.
///
/// 1. For crates that depend on `mw_mapping`, `::mw_mapping` is returned.
/// 2. For crates that depend on `memberwise`, `::memberwise::mapping` is returned.
/// 3. Otherwise `::mw_mapping` is returned, which may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is called once per derive and
/// the path is passed around.
pub(crate) fn mw_mapping() -> syn::Path {
    mw_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("mw_mapping"))
}

// -----------------------------------------------------------------------------
// Internal API

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(mw_mapping_path: &syn::Path) -> TokenStream {
    quote! {
        #mw_mapping_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn mapped_(mw_mapping_path: &syn::Path) -> TokenStream {
    quote! {
        #mw_mapping_path::Mapped
    }
}

#[inline(always)]
pub(crate) fn member_mapping_(mw_mapping_path: &syn::Path) -> TokenStream {
    quote! {
        #mw_mapping_path::MemberMapping
    }
}

#[inline(always)]
pub(crate) fn field_binding_(mw_mapping_path: &syn::Path) -> TokenStream {
    quote! {
        #mw_mapping_path::FieldBinding
    }
}

#[inline(always)]
pub(crate) fn mapped_eq_(mw_mapping_path: &syn::Path) -> TokenStream {
    quote! {
        #mw_mapping_path::mapped_eq
    }
}
