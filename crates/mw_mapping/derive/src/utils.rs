use proc_macro2::TokenStream;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Same rules as `mw_mapping::is_valid_name`, checked before expansion so the
/// error points at the field.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| matches!(c, ':' | ',' | '{' | '}' | '\t' | '\n' | '\r'))
}
