use alloc::string::String;

use crate::Mapped;

/// Serializes `value` into the mapping text format.
///
/// See the [module documentation](crate::text) for the exact layout.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, text};
///
/// #[derive(Mapped)]
/// struct Foo {
///     one: i32,
///     two: &'static str,
///     three: char,
/// }
///
/// let foo = Foo { one: 1, two: "abc", three: '-' };
/// assert_eq!(text::serialize(&foo), "{\n\tone : 1,\n\ttwo : abc,\n\tthree : -\n}");
/// ```
pub fn serialize<T: Mapped>(value: &T) -> String {
    let mut out = String::new();
    serialize_into(value, &mut out);
    out
}

/// Appends the serialized form of `value` to `out`.
///
/// Existing content of `out` is left untouched.
pub fn serialize_into<T: Mapped>(value: &T, out: &mut String) {
    let mapping = T::member_mapping();
    let start = out.len();

    out.reserve(4 + mapping.len() * 16);
    out.push_str("{\n");

    for binding in mapping {
        out.push('\t');
        out.push_str(binding.name());
        out.push_str(" : ");
        binding.get(value).write_value(out);
        out.push_str(",\n");
    }

    // Remove the comma of the last field line. With no fields the buffer only
    // holds `{\n` past `start` and nothing is removed.
    let maybe_comma = out.len() - 2;
    if maybe_comma > start {
        out.remove(maybe_comma);
    }
    out.push('}');

    log::trace!(
        "serialized `{}` ({} mapped fields, {} bytes)",
        mapping.type_name(),
        mapping.len(),
        out.len() - start,
    );
}
