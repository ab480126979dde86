use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

use crate::MAPPING_ATTRIBUTE_NAME;

/// Type level `#[mapping(...)]` options.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_name = "..."`
    pub type_name: Option<LitStr>,
    /// `partial_eq`
    pub partial_eq: Option<Span>,
    /// `auto_register`
    pub auto_register: Option<Span>,
    /// `default`
    pub default: Option<Span>,
}

fn set_flag(flag: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate `mapping` attribute"));
    }
    *flag = Some(meta.path.require_ident()?.span());
    Ok(())
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MAPPING_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_name") {
                    if this.type_name.is_some() {
                        return Err(meta.error("duplicate `type_name`"));
                    }
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "`type_name` cannot be empty"));
                    }
                    this.type_name = Some(name);
                    Ok(())
                } else if meta.path.is_ident("partial_eq") {
                    set_flag(&mut this.partial_eq, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut this.auto_register, &meta)
                } else if meta.path.is_ident("default") {
                    set_flag(&mut this.default, &meta)
                } else if meta.path.is_ident("skip") || meta.path.is_ident("rename") {
                    Err(meta.error("this attribute can only be applied to fields"))
                } else {
                    Err(meta.error(
                        "unknown `mapping` attribute, expected `type_name`, `partial_eq`, `auto_register` or `default`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::TypeAttributes;

    #[test]
    fn parse_all_options() {
        let input: DeriveInput = parse_quote! {
            #[derive(Mapped)]
            #[mapping(type_name = "FOO", partial_eq)]
            #[mapping(auto_register, default)]
            struct Foo { one: i32 }
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs).unwrap();
        assert_eq!(attrs.type_name.map(|lit| lit.value()).as_deref(), Some("FOO"));
        assert!(attrs.partial_eq.is_some());
        assert!(attrs.auto_register.is_some());
        assert!(attrs.default.is_some());
    }

    #[test]
    fn defaults() {
        let input: DeriveInput = parse_quote! {
            #[doc = "not ours"]
            struct Foo { one: i32 }
        };

        let attrs = TypeAttributes::parse_attrs(&input.attrs).unwrap();
        assert!(attrs.type_name.is_none());
        assert!(attrs.partial_eq.is_none());
    }

    #[test]
    fn rejects_unknown_and_duplicates() {
        let unknown: DeriveInput = parse_quote! {
            #[mapping(hash)]
            struct Foo { one: i32 }
        };
        assert!(TypeAttributes::parse_attrs(&unknown.attrs).is_err());

        let duplicate: DeriveInput = parse_quote! {
            #[mapping(partial_eq, partial_eq)]
            struct Foo { one: i32 }
        };
        assert!(TypeAttributes::parse_attrs(&duplicate.attrs).is_err());

        let field_only: DeriveInput = parse_quote! {
            #[mapping(skip)]
            struct Foo { one: i32 }
        };
        assert!(TypeAttributes::parse_attrs(&field_only.attrs).is_err());

        let empty_name: DeriveInput = parse_quote! {
            #[mapping(type_name = "")]
            struct Foo { one: i32 }
        };
        assert!(TypeAttributes::parse_attrs(&empty_name.attrs).is_err());
    }
}
