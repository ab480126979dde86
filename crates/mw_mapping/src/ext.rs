use alloc::string::String;

use crate::error::DeserializeError;
use crate::{Mapped, equality, text};

/// Method forms of the mapping operations, implemented for every [`Mapped`] type.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, MappedExt};
///
/// #[derive(Mapped, Default)]
/// struct Foo {
///     one: i32,
///     #[mapping(skip)]
///     notes: String,
/// }
///
/// let a = Foo { one: 1, notes: "a".into() };
/// let b = Foo::deserialize_mapped("{\n\tone : 1\n}").unwrap();
///
/// assert!(a.mapped_eq(&b));
/// assert_eq!(a.serialize_mapped(), "{\n\tone : 1\n}");
/// ```
pub trait MappedExt: Mapped {
    /// See [`mapped_eq`](crate::mapped_eq).
    #[inline]
    fn mapped_eq(&self, other: &Self) -> bool {
        equality::mapped_eq(self, other)
    }

    /// See [`mapped_ne`](crate::mapped_ne).
    #[inline]
    fn mapped_ne(&self, other: &Self) -> bool {
        equality::mapped_ne(self, other)
    }

    /// See [`text::serialize`].
    #[inline]
    fn serialize_mapped(&self) -> String {
        text::serialize(self)
    }

    /// See [`text::deserialize`].
    #[inline]
    fn deserialize_mapped(input: &str) -> Result<Self, DeserializeError>
    where
        Self: Default,
    {
        text::deserialize(input)
    }
}

impl<T: Mapped> MappedExt for T {}

#[cfg(test)]
mod tests {
    use super::MappedExt;
    use crate::derive::Mapped;

    #[derive(Mapped, Default, Debug)]
    #[mapping(partial_eq)]
    struct Pair {
        left: u8,
        right: char,
        #[mapping(skip)]
        weight: usize,
    }

    #[test]
    fn methods_match_free_functions() {
        let a = Pair { left: 1, right: 'r', weight: 10 };
        let b = Pair { left: 1, right: 'r', weight: 20 };
        let c = Pair { left: 2, right: 'r', weight: 10 };

        assert!(a.mapped_eq(&b));
        assert!(a.mapped_ne(&c));
        assert_eq!(a.serialize_mapped(), "{\n\tleft : 1,\n\tright : r\n}");

        let parsed = Pair::deserialize_mapped(&c.serialize_mapped()).unwrap();
        assert!(parsed.mapped_eq(&c));
        assert_eq!(parsed.weight, 0);
    }

    #[test]
    fn partial_eq_uses_mapping() {
        let a = Pair { left: 1, right: 'r', weight: 10 };
        let b = Pair { left: 1, right: 'r', weight: 20 };
        assert_eq!(a, b);
        assert_ne!(a, Pair { left: 1, right: 'l', weight: 10 });
        assert_ne!(a.weight, b.weight);
    }
}
