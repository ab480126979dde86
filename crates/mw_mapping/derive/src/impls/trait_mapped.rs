use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::MappedStruct;

/// Generate the binding table, the `static` mapping and the `Mapped` implementation.
///
/// Similar to following:
///
/// ```ignore
/// static __MAPPING_BINDINGS: [FieldBinding<Foo>; 2] = [
///     FieldBinding::<Foo>::new("one", |value: &Foo| &value.one, |value: &mut Foo| &mut value.one),
///     FieldBinding::<Foo>::new("two", |value: &Foo| &value.two, |value: &mut Foo| &mut value.two),
/// ];
///
/// static __MAPPING: MemberMapping<Foo> = MemberMapping::new("Foo", &__MAPPING_BINDINGS);
///
/// impl Mapped for Foo {
///     fn member_mapping() -> &'static MemberMapping<Self> {
///         &__MAPPING
///     }
/// }
/// ```
pub(crate) fn impl_trait_mapped(mapped: &MappedStruct) -> TokenStream {
    let mw_mapping_path = mapped.mw_mapping_path();
    let mapped_ = crate::path::mapped_(mw_mapping_path);
    let member_mapping_ = crate::path::member_mapping_(mw_mapping_path);
    let field_binding_ = crate::path::field_binding_(mw_mapping_path);

    let ident = mapped.ident();
    let type_name = mapped.type_name();
    let len = mapped.fields().len();

    let bindings = mapped.fields().iter().map(|field| {
        let field_ident = &field.ident;
        let name = &field.name;
        // The span makes a field type without `FieldValue` point at the field.
        quote_spanned! { field.span =>
            #field_binding_::<#ident>::new(
                #name,
                |value: &#ident| &value.#field_ident,
                |value: &mut #ident| &mut value.#field_ident,
            )
        }
    });

    quote! {
        static __MAPPING_BINDINGS: [#field_binding_<#ident>; #len] = [
            #(#bindings,)*
        ];

        static __MAPPING: #member_mapping_<#ident> =
            #member_mapping_::new(#type_name, &__MAPPING_BINDINGS);

        impl #mapped_ for #ident {
            #[inline]
            fn member_mapping() -> &'static #member_mapping_<Self> {
                &__MAPPING
            }
        }
    }
}
