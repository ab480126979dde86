//! Serde support for mapped values.
//!
//! [`MappedSerialize`] exposes any [`Mapped`] value to a `serde` serializer as
//! a struct whose fields are the mapped fields, in mapping order. The struct is
//! named by [`MemberMapping::type_name`](crate::MemberMapping::type_name).
//!
//! Integers that fit into 64 bits are written with `serialize_i64` or
//! `serialize_u64`, wider values with the 128-bit methods.

use serde_core::ser::SerializeStruct;
use serde_core::{Serialize, Serializer};

use crate::Mapped;
use crate::value::{FieldValue, ValueRef};

// -----------------------------------------------------------------------------
// ValueRef

impl Serialize for ValueRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Signed(v) => match i64::try_from(v) {
                Ok(v) => serializer.serialize_i64(v),
                Err(_) => serializer.serialize_i128(v),
            },
            Self::Unsigned(v) => match u64::try_from(v) {
                Ok(v) => serializer.serialize_u64(v),
                Err(_) => serializer.serialize_u128(v),
            },
            Self::Text(v) => serializer.serialize_str(v),
            Self::Character(v) => serializer.serialize_char(v),
        }
    }
}

impl Serialize for dyn FieldValue + '_ {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value_ref().serialize(serializer)
    }
}

// -----------------------------------------------------------------------------
// MappedSerialize

/// A [`Serialize`] adapter over the member mapping of `T`.
///
/// Unmapped fields are not visible to the serializer.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, serde::MappedSerialize};
///
/// #[derive(Mapped)]
/// struct Foo {
///     one: i32,
///     two: String,
///     #[mapping(skip)]
///     notes: String,
/// }
///
/// let foo = Foo { one: 1, two: "abc".into(), notes: "ignored".into() };
/// let json = serde_json::to_string(&MappedSerialize(&foo)).unwrap();
/// assert_eq!(json, r#"{"one":1,"two":"abc"}"#);
/// ```
#[derive(Debug)]
pub struct MappedSerialize<'a, T>(pub &'a T);

impl<T> Clone for MappedSerialize<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MappedSerialize<'_, T> {}

impl<T: Mapped> Serialize for MappedSerialize<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mapping = T::member_mapping();

        let mut state = serializer.serialize_struct(mapping.type_name(), mapping.len())?;
        for binding in mapping {
            state.serialize_field(binding.name(), binding.get(self.0))?;
        }
        state.end()
    }
}
