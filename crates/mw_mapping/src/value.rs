//! Field values: the per-kind formatter and parser used by every mapping operation.
//!
//! A mapped field is reached through `dyn FieldValue`. The trait has two
//! directions:
//!
//! - [`FieldValue::value_ref`] borrows the value as a [`ValueRef`], which drives
//!   equality, the text formatter and the serde bridge.
//! - [`FieldValue::assign_text`] is the inverse formatter used by deserialization.
//!
//! Three kinds are supported, see [`FieldKind`].

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use core::num::{IntErrorKind, ParseIntError};
use core::str::FromStr;

use crate::error::FieldParseError;

// -----------------------------------------------------------------------------
// FieldKind

/// The kind of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Any primitive integer, formatted in canonical base-10.
    Integer,
    /// String-like data, written verbatim without quoting or escaping.
    Text,
    /// A single `char`, written verbatim.
    Character,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Character => "character",
        })
    }
}

// -----------------------------------------------------------------------------
// ValueRef

/// A borrowed view of one field value.
///
/// Integers are widened so that every integer type shares one representation.
/// Two fields of the same Rust type compare equal exactly when their
/// `ValueRef`s do.
///
/// The [`Display`](fmt::Display) implementation is the text formatter.
///
/// ```
/// use mw_mapping::value::ValueRef;
///
/// assert_eq!(ValueRef::Signed(-12).to_string(), "-12");
/// assert_eq!(ValueRef::Text("a b").to_string(), "a b");
/// assert_eq!(ValueRef::Character('-').to_string(), "-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRef<'a> {
    Signed(i128),
    Unsigned(u128),
    Text(&'a str),
    Character(char),
}

impl ValueRef<'_> {
    /// Returns the [`FieldKind`] of this value.
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Signed(_) | Self::Unsigned(_) => FieldKind::Integer,
            Self::Text(_) => FieldKind::Text,
            Self::Character(_) => FieldKind::Character,
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Signed(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Character(v) => write!(f, "{v}"),
        }
    }
}

// -----------------------------------------------------------------------------
// FieldValue

/// A value that can appear in a member mapping.
///
/// Implemented for the primitive integers, `char`, `String`, `Box<str>`,
/// `Cow<'static, str>` and `&'static str`.
///
/// `&'static str` fields can be compared and serialized, but
/// [`assign_text`](FieldValue::assign_text) always fails for them with
/// [`FieldParseError::BorrowedText`] because the parsed text does not outlive
/// the input.
pub trait FieldValue {
    /// Borrows the value.
    fn value_ref(&self) -> ValueRef<'_>;

    /// Replaces the value with the one parsed from `text`.
    ///
    /// This is the inverse of the text formatter. On error `self` is unchanged.
    fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError>;

    /// Returns the [`FieldKind`] of the value.
    #[inline]
    fn field_kind(&self) -> FieldKind {
        self.value_ref().kind()
    }

    /// Appends the formatted value to `out`.
    fn write_value(&self, out: &mut String) {
        use core::fmt::Write;

        match self.value_ref() {
            ValueRef::Text(text) => out.push_str(text),
            ValueRef::Character(c) => out.push(c),
            other => {
                // Writing into a `String` cannot fail.
                let _ = write!(out, "{other}");
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Integers

/// Strict integer parsing: the whole text must be an optional `-` followed by
/// decimal digits, in range for `T`.
fn parse_integer<T>(text: &str, type_name: &'static str) -> Result<T, FieldParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    let invalid = |kind: IntErrorKind| FieldParseError::InvalidInteger {
        text: text.to_string(),
        type_name,
        kind,
    };

    if text.starts_with('+') {
        return Err(invalid(IntErrorKind::InvalidDigit));
    }

    text.parse::<T>().map_err(|err| invalid(err.kind().clone()))
}

macro_rules! impl_integer_value {
    ($variant:ident as $wide:ty => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                #[inline]
                fn value_ref(&self) -> ValueRef<'_> {
                    ValueRef::$variant(*self as $wide)
                }

                fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError> {
                    *self = parse_integer::<$ty>(text, stringify!($ty))?;
                    Ok(())
                }
            }
        )+
    };
}

impl_integer_value!(Signed as i128 => i8, i16, i32, i64, i128, isize);
impl_integer_value!(Unsigned as u128 => u8, u16, u32, u64, u128, usize);

// -----------------------------------------------------------------------------
// Character

impl FieldValue for char {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Character(*self)
    }

    fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(FieldParseError::CharacterLength {
                len: text.chars().count(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Text

impl FieldValue for String {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

impl FieldValue for Box<str> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError> {
        *self = Box::from(text);
        Ok(())
    }
}

impl FieldValue for Cow<'static, str> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    fn assign_text(&mut self, text: &str) -> Result<(), FieldParseError> {
        *self = Cow::Owned(text.to_string());
        Ok(())
    }
}

impl FieldValue for &'static str {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Text(self)
    }

    #[inline]
    fn assign_text(&mut self, _text: &str) -> Result<(), FieldParseError> {
        Err(FieldParseError::BorrowedText)
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use core::num::IntErrorKind;

    use super::{FieldKind, FieldValue, ValueRef};
    use crate::error::FieldParseError;

    fn formatted(value: &dyn FieldValue) -> String {
        let mut out = String::new();
        value.write_value(&mut out);
        out
    }

    #[test]
    fn format_by_kind() {
        assert_eq!(formatted(&0_i32), "0");
        assert_eq!(formatted(&-42_i64), "-42");
        assert_eq!(formatted(&u128::MAX), "340282366920938463463374607431768211455");
        assert_eq!(formatted(&i128::MIN), "-170141183460469231731687303715884105728");
        assert_eq!(formatted(&String::from("a, b")), "a, b");
        assert_eq!(formatted(&"abc"), "abc");
        assert_eq!(formatted(&'\u{e9}'), "\u{e9}");
    }

    #[test]
    fn kinds() {
        assert_eq!(7_u8.field_kind(), FieldKind::Integer);
        assert_eq!('x'.field_kind(), FieldKind::Character);
        assert_eq!(Box::<str>::from("x").field_kind(), FieldKind::Text);
        assert_eq!(FieldKind::Character.to_string(), "character");
    }

    #[test]
    fn integer_parsing_is_strict() {
        let mut v = 5_i32;
        v.assign_text("-17").unwrap();
        assert_eq!(v, -17);

        let kind_of = |err: FieldParseError| match err {
            FieldParseError::InvalidInteger { kind, .. } => kind,
            other => panic!("unexpected error {other:?}"),
        };

        assert_eq!(kind_of(v.assign_text("+3").unwrap_err()), IntErrorKind::InvalidDigit);
        assert_eq!(kind_of(v.assign_text("12abc").unwrap_err()), IntErrorKind::InvalidDigit);
        assert_eq!(kind_of(v.assign_text(" 1").unwrap_err()), IntErrorKind::InvalidDigit);
        assert_eq!(kind_of(v.assign_text("").unwrap_err()), IntErrorKind::Empty);
        assert_eq!(kind_of(v.assign_text("2147483648").unwrap_err()), IntErrorKind::PosOverflow);
        assert_eq!(v, -17);

        let mut u = 0_u8;
        assert_eq!(kind_of(u.assign_text("-1").unwrap_err()), IntErrorKind::InvalidDigit);
        assert_eq!(kind_of(u.assign_text("256").unwrap_err()), IntErrorKind::PosOverflow);
    }

    #[test]
    fn integer_error_names_type() {
        let err = 0_u16.assign_text("x").unwrap_err();
        assert_eq!(
            err,
            FieldParseError::InvalidInteger {
                text: "x".into(),
                type_name: "u16",
                kind: IntErrorKind::InvalidDigit,
            }
        );
    }

    #[test]
    fn character_parsing() {
        let mut c = 'a';
        c.assign_text("-").unwrap();
        assert_eq!(c, '-');
        assert_eq!(c.assign_text(""), Err(FieldParseError::CharacterLength { len: 0 }));
        assert_eq!(c.assign_text("ab"), Err(FieldParseError::CharacterLength { len: 2 }));
        assert_eq!(c, '-');
    }

    #[test]
    fn text_parsing() {
        let mut s = String::from("old");
        s.assign_text("new value").unwrap();
        assert_eq!(s, "new value");

        let mut cow: Cow<'static, str> = Cow::Borrowed("x");
        cow.assign_text("y").unwrap();
        assert_eq!(cow, "y");

        let mut borrowed: &'static str = "keep";
        assert_eq!(borrowed.assign_text("y"), Err(FieldParseError::BorrowedText));
        assert_eq!(borrowed, "keep");
    }

    #[test]
    fn value_ref_equality() {
        assert_eq!(3_u8.value_ref(), ValueRef::Unsigned(3));
        assert_ne!("a".value_ref(), "b".value_ref());
        assert_eq!(String::from("a").value_ref(), "a".value_ref());
    }
}
