use std::collections::HashSet;

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Path};

use super::{FieldAttributes, TypeAttributes};
use crate::utils::is_valid_name;

/// A mapped field: its identifier and display name.
#[derive(Debug)]
pub(crate) struct MappedField {
    pub ident: Ident,
    pub name: String,
    pub span: Span,
}

/// A struct accepted by `#[derive(Mapped)]`.
pub(crate) struct MappedStruct<'a> {
    mw_mapping_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    fields: Vec<MappedField>,
}

impl core::fmt::Debug for MappedStruct<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MappedStruct")
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<'a> MappedStruct<'a> {
    /// Checks the shape of `ast` and collects the mapped fields.
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        Self::from_input_with_path(ast, crate::path::mw_mapping())
    }

    pub(crate) fn from_input_with_path(ast: &'a DeriveInput, mw_mapping_path: Path) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`Mapped` cannot be derived for generic types, a member mapping is a single `static` table",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Mapped` cannot be derived for tuple structs, fields need names",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Mapped` cannot be derived for unit structs",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Mapped` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Mapped` cannot be derived for unions",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        let mut seen = HashSet::new();

        for field in &named.named {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip.is_some() {
                continue;
            }

            // Named fields always have an identifier.
            let Some(ident) = field.ident.clone() else {
                continue;
            };

            let (name, span) = match &field_attrs.rename {
                Some(lit) => (lit.value(), lit.span()),
                None => (ident.unraw().to_string(), ident.span()),
            };

            if !is_valid_name(&name) {
                return Err(syn::Error::new(
                    span,
                    format!(
                        "invalid display name `{}`, it must be non-empty and cannot contain `:` `,` `{{` `}}`, tabs or line breaks",
                        name.escape_debug(),
                    ),
                ));
            }

            if !seen.insert(name.clone()) {
                return Err(syn::Error::new(
                    span,
                    format!("duplicate display name `{name}`"),
                ));
            }

            fields.push(MappedField { ident, name, span });
        }

        Ok(Self {
            mw_mapping_path,
            attrs,
            ident: &ast.ident,
            fields,
        })
    }

    #[inline]
    pub fn mw_mapping_path(&self) -> &Path {
        &self.mw_mapping_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    /// The value of `type_name`, the struct identifier by default.
    pub fn type_name(&self) -> String {
        match &self.attrs.type_name {
            Some(lit) => lit.value(),
            None => self.ident.unraw().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::MappedStruct;

    fn parse(ast: &DeriveInput) -> syn::Result<MappedStruct<'_>> {
        MappedStruct::from_input_with_path(ast, parse_quote!(::mw_mapping))
    }

    fn names<'a>(mapped: &'a MappedStruct<'_>) -> Vec<&'a str> {
        mapped.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn collects_fields_in_order() {
        let ast: DeriveInput = parse_quote! {
            struct Foo {
                one: i32,
                #[mapping(skip)]
                notes: String,
                #[mapping(rename = "third one")]
                three: char,
                r#type: u8,
            }
        };

        let mapped = parse(&ast).unwrap();
        assert_eq!(names(&mapped), ["one", "third one", "type"]);
        assert_eq!(mapped.fields()[1].ident, "three");
        assert_eq!(mapped.type_name(), "Foo");
    }

    #[test]
    fn custom_type_name() {
        let ast: DeriveInput = parse_quote! {
            #[mapping(type_name = "FOO")]
            struct Foo { one: i32 }
        };
        assert_eq!(parse(&ast).unwrap().type_name(), "FOO");
    }

    #[test]
    fn all_fields_skipped() {
        let ast: DeriveInput = parse_quote! {
            struct Opaque {
                #[mapping(skip)]
                a: u8,
            }
        };
        assert!(parse(&ast).unwrap().fields().is_empty());
    }

    #[test]
    fn rejected_shapes() {
        let inputs: [DeriveInput; 5] = [
            parse_quote!(struct Tuple(i32);),
            parse_quote!(struct Unit;),
            parse_quote!(enum Kind { A, B }),
            parse_quote!(union Bits { a: u32, b: f32 }),
            parse_quote!(struct Generic<T> { value: T }),
        ];
        for ast in &inputs {
            assert!(parse(ast).is_err());
        }
    }

    #[test]
    fn rejected_names() {
        let invalid: DeriveInput = parse_quote! {
            struct Foo {
                #[mapping(rename = "a:b")]
                one: i32,
            }
        };
        assert!(parse(&invalid).is_err());

        let duplicate: DeriveInput = parse_quote! {
            struct Foo {
                one: i32,
                #[mapping(rename = "one")]
                two: i32,
            }
        };
        let err = parse(&duplicate).unwrap_err();
        assert_eq!(err.to_string(), "duplicate display name `one`");
    }
}
