//! Structural equality over the member mapping.

use crate::Mapped;

/// Returns `true` if every mapped field of `lhs` equals the same field of `rhs`.
///
/// Fields are compared in mapping order and the comparison stops at the first
/// mismatch. Unmapped fields are never read, so a type with an empty mapping
/// compares equal unconditionally.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, mapped_eq};
///
/// #[derive(Mapped)]
/// struct Bar {
///     one: i32,
///     two: String,
///     #[mapping(skip)]
///     notes: String,
/// }
///
/// let a = Bar { one: 1, two: "abc".into(), notes: "Extra notes".into() };
/// let b = Bar { one: 1, two: "abc".into(), notes: "Different notes".into() };
/// let c = Bar { one: 3, two: "abc".into(), notes: "Extra notes".into() };
///
/// assert!(mapped_eq(&a, &b));
/// assert!(!mapped_eq(&a, &c));
/// ```
pub fn mapped_eq<T: Mapped>(lhs: &T, rhs: &T) -> bool {
    T::member_mapping()
        .iter()
        .all(|binding| binding.get(lhs).value_ref() == binding.get(rhs).value_ref())
}

/// The negation of [`mapped_eq`].
#[inline]
pub fn mapped_ne<T: Mapped>(lhs: &T, rhs: &T) -> bool {
    !mapped_eq(lhs, rhs)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{mapped_eq, mapped_ne};
    use crate::derive::Mapped;

    #[derive(Mapped)]
    #[mapping(type_name = "FOO")]
    struct Foo {
        one: i32,
        two: &'static str,
        three: char,
    }

    #[derive(Mapped)]
    struct Bar {
        one: i32,
        two: String,
        #[mapping(skip)]
        ignore_me: String,
    }

    #[derive(Mapped)]
    struct Opaque {
        #[mapping(skip)]
        a: u64,
        #[mapping(skip)]
        b: String,
    }

    #[test]
    fn field_mismatches() {
        let my_var = Foo { one: 1, two: "abc", three: '-' };
        let exact_match = Foo { one: 1, two: "abc", three: '-' };
        let one_mismatch = Foo { one: 2, two: "abc", three: '-' };
        let two_mismatch = Foo { one: 1, two: "cba", three: '-' };
        let three_mismatch = Foo { one: 1, two: "abc", three: '*' };

        assert!(mapped_eq(&my_var, &my_var));
        assert!(mapped_eq(&my_var, &exact_match));
        assert!(mapped_ne(&my_var, &one_mismatch));
        assert!(mapped_ne(&my_var, &two_mismatch));
        assert!(mapped_ne(&my_var, &three_mismatch));
    }

    #[test]
    fn unmapped_fields_do_not_participate() {
        let bar = |one, two: &str, ignore_me: &str| Bar {
            one,
            two: two.into(),
            ignore_me: ignore_me.into(),
        };

        let my_var = bar(1, "abc", "Extra notes");
        assert!(mapped_eq(&my_var, &bar(1, "abc", "Extra notes")));
        assert!(mapped_eq(
            &my_var,
            &bar(1, "abc", "Extra notes do not participate in equality check.")
        ));
        assert!(mapped_ne(&my_var, &bar(3, "abc", "N/A")));
        assert!(mapped_ne(&my_var, &bar(1, "4", "N/A")));
        assert_eq!(my_var.ignore_me, "Extra notes");
    }

    #[test]
    fn empty_mapping_is_always_equal() {
        let a = Opaque { a: 1, b: "x".into() };
        let b = Opaque { a: 2, b: "y".into() };
        assert!(mapped_eq(&a, &b));
        assert!(!mapped_ne(&a, &b));
        assert_ne!(a.a, b.a);
        assert_ne!(a.b, b.b);
    }
}
