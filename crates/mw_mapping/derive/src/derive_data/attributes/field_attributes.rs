use proc_macro2::Span;
use syn::{Attribute, LitStr};

use crate::MAPPING_ATTRIBUTE_NAME;

/// Field level `#[mapping(...)]` options.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `skip`
    pub skip: Option<Span>,
    /// `rename = "..."`
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MAPPING_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    if this.skip.is_some() {
                        return Err(meta.error("duplicate `skip`"));
                    }
                    this.skip = Some(meta.path.require_ident()?.span());
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    if this.rename.is_some() {
                        return Err(meta.error("duplicate `rename`"));
                    }
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown `mapping` field attribute, expected `skip` or `rename`"))
                }
            })?;
        }

        if let (Some(span), Some(_)) = (this.skip, &this.rename) {
            return Err(syn::Error::new(span, "a skipped field cannot be renamed"));
        }

        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use syn::{Field, parse_quote};

    use super::FieldAttributes;

    fn parse(field: Field) -> syn::Result<FieldAttributes> {
        FieldAttributes::parse_attrs(&field.attrs)
    }

    #[test]
    fn skip_and_rename() {
        let attrs = parse(parse_quote!(#[mapping(skip)] notes: String)).unwrap();
        assert!(attrs.skip.is_some());
        assert!(attrs.rename.is_none());

        let attrs = parse(parse_quote!(#[mapping(rename = "first")] one: i32)).unwrap();
        assert!(attrs.skip.is_none());
        assert_eq!(attrs.rename.map(|lit| lit.value()).as_deref(), Some("first"));
    }

    #[test]
    fn rejects_invalid_combinations() {
        assert!(parse(parse_quote!(#[mapping(skip, rename = "x")] one: i32)).is_err());
        assert!(parse(parse_quote!(#[mapping(skip)] #[mapping(skip)] one: i32)).is_err());
        assert!(parse(parse_quote!(#[mapping(partial_eq)] one: i32)).is_err());
        assert!(parse(parse_quote!(#[mapping(rename)] one: i32)).is_err());
    }
}
