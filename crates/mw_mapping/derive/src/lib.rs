//! See [`Mapped`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MAPPING_ATTRIBUTE_NAME: &str = "mapping";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Member Mapping Derivation
///
/// `#[derive(Mapped)]` implements `Mapped` for a struct with named fields.
/// Every field takes part in the mapping, in declaration order, with its own
/// name as display name.
///
/// ```rust, ignore
/// #[derive(Mapped)]
/// struct Foo {
///     one: i32,
///     two: String,
///     three: char,
/// }
/// ```
///
/// The mapping lives in a `static`, so generic types, enums, unions, tuple
/// structs and unit structs are rejected.
///
/// Every mapped field type must implement `FieldValue`.
///
/// ## Field Attributes
///
/// ### Skipping a field
///
/// A skipped field is not part of the mapping: it does not take part in
/// equality and is never serialized.
///
/// ```rust, ignore
/// #[derive(Mapped)]
/// struct Bar {
///     one: i32,
///     #[mapping(skip)]
///     notes: String,
/// }
/// ```
///
/// ### Display name
///
/// ```rust, ignore
/// #[derive(Mapped)]
/// struct Bar {
///     #[mapping(rename = "first value")]
///     one: i32,
/// }
/// ```
///
/// A display name must be non-empty, must not contain `:` `,` `{` `}`, a tab
/// or a line break (`\n` or `\r`), and must be unique within the type.
///
/// ## Type Attributes
///
/// - `type_name = "..."`: the name reported by `MemberMapping::type_name`,
///   the struct identifier by default.
/// - `partial_eq`: also implements `PartialEq` with `mapped_eq`.
/// - `auto_register`: submits the type for `MappingRegistry::auto_register`.
///   Has no effect without the `auto_register` feature.
/// - `default`: declares that the type implements `Default`, so that
///   automatic registration includes deserialization support.
///
/// ```rust, ignore
/// #[derive(Mapped, Default)]
/// #[mapping(type_name = "FOO", partial_eq, auto_register, default)]
/// struct Foo {
///     one: i32,
/// }
/// ```
#[proc_macro_derive(Mapped, attributes(mapping))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_mapped_impls(ast)
}
