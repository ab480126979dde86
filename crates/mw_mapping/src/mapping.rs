//! The member mapping protocol.
//!
//! A type opts in by implementing [`Mapped`], which returns a `static`
//! [`MemberMapping`]: the ordered list of [`FieldBinding`]s that take part in
//! equality and serialization. Fields without a binding are invisible to both.

use core::fmt;

use crate::value::FieldValue;

// -----------------------------------------------------------------------------
// FieldBinding

/// Shared access to one field of `T`.
pub type FieldGetter<T> = for<'a> fn(&'a T) -> &'a dyn FieldValue;

/// Mutable access to one field of `T`.
pub type FieldGetterMut<T> = for<'a> fn(&'a mut T) -> &'a mut dyn FieldValue;

/// One participating field of `T`: how to reach it and its display name.
///
/// Bindings are type-level data and are usually created in a `static`
/// initializer, by [`#[derive(Mapped)]`](crate::derive::Mapped) or the
/// [`bind!`](crate::bind) macro.
///
/// # Examples
///
/// ```
/// use mw_mapping::FieldBinding;
/// use mw_mapping::value::ValueRef;
///
/// struct Point { x: i32 }
///
/// static X: FieldBinding<Point> = FieldBinding::<Point>::new("x", |p| &p.x, |p| &mut p.x);
///
/// let p = Point { x: 3 };
/// assert_eq!(X.name(), "x");
/// assert_eq!(X.get(&p).value_ref(), ValueRef::Signed(3));
/// ```
pub struct FieldBinding<T> {
    name: &'static str,
    get: FieldGetter<T>,
    get_mut: FieldGetterMut<T>,
}

impl<T> FieldBinding<T> {
    /// Creates a binding named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains one of `:` `,` `{` `}`, a tab, a
    /// newline or a carriage return. In a `static` initializer this is a
    /// compile error.
    pub const fn new(name: &'static str, get: FieldGetter<T>, get_mut: FieldGetterMut<T>) -> Self {
        assert!(is_valid_name(name), "invalid field display name");
        Self { name, get, get_mut }
    }

    /// Returns the display name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field of `value`.
    #[inline]
    pub fn get<'a>(&self, value: &'a T) -> &'a dyn FieldValue {
        (self.get)(value)
    }

    /// Returns the field of `value` mutably.
    #[inline]
    pub fn get_mut<'a>(&self, value: &'a mut T) -> &'a mut dyn FieldValue {
        (self.get_mut)(value)
    }
}

impl<T> Clone for FieldBinding<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldBinding<T> {}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Returns `true` if `name` can be used as a display name.
///
/// A name must be non-empty and must not contain the characters the text
/// format uses as delimiters: `:` `,` `{` `}`, tab, newline and carriage
/// return.
pub const fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b':' | b',' | b'{' | b'}' | b'\t' | b'\n' | b'\r') {
            return false;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// -----------------------------------------------------------------------------
// MemberMapping

/// The ordered field bindings of a structure type.
///
/// The order is the serialization order and the order the deserializer
/// expects. A mapping may be empty.
///
/// # Examples
///
/// ```
/// use mw_mapping::{bind, FieldBinding, MemberMapping};
///
/// struct Foo { one: i32, two: String, notes: String }
///
/// static FIELDS: [FieldBinding<Foo>; 2] = [bind!(Foo::one), bind!(Foo::two => "second")];
/// static FOO: MemberMapping<Foo> = MemberMapping::new("Foo", &FIELDS);
///
/// assert_eq!(FOO.len(), 2);
/// assert_eq!(FOO.index_of("second"), Some(1));
/// assert!(FOO.field("notes").is_none());
/// assert_eq!(FOO.field_names().collect::<Vec<_>>(), ["one", "second"]);
/// ```
pub struct MemberMapping<T: 'static> {
    type_name: &'static str,
    bindings: &'static [FieldBinding<T>],
}

impl<T: 'static> MemberMapping<T> {
    /// Creates a mapping for the type called `type_name`.
    ///
    /// # Panics
    ///
    /// Panics if two bindings share a display name. In a `static` initializer
    /// this is a compile error.
    pub const fn new(type_name: &'static str, bindings: &'static [FieldBinding<T>]) -> Self {
        let mut i = 0;
        while i < bindings.len() {
            let mut j = i + 1;
            while j < bindings.len() {
                assert!(
                    !str_eq(bindings[i].name, bindings[j].name),
                    "duplicate field display name"
                );
                j += 1;
            }
            i += 1;
        }
        Self {
            type_name,
            bindings,
        }
    }

    /// Returns the name of the mapped type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the number of mapped fields.
    #[inline]
    pub const fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no field is mapped.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the bindings in mapping order.
    #[inline]
    pub const fn bindings(&self) -> &'static [FieldBinding<T>] {
        self.bindings
    }

    /// Returns an iterator over the bindings in mapping order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'static, FieldBinding<T>> {
        self.bindings.iter()
    }

    /// Returns the binding at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'static FieldBinding<T>> {
        self.bindings.get(index)
    }

    /// Returns the binding with display name `name`.
    ///
    /// This is O(N) complexity.
    pub fn field(&self, name: &str) -> Option<&'static FieldBinding<T>> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// Returns the position of the binding with display name `name`.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.name == name)
    }

    /// Returns the display names in mapping order.
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + use<T> {
        self.bindings.iter().map(FieldBinding::name)
    }
}

impl<T: 'static> fmt::Debug for MemberMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberMapping")
            .field("type_name", &self.type_name)
            .field("fields", &self.bindings)
            .finish()
    }
}

impl<T: 'static> IntoIterator for &MemberMapping<T> {
    type Item = &'static FieldBinding<T>;
    type IntoIter = core::slice::Iter<'static, FieldBinding<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

// -----------------------------------------------------------------------------
// Mapped

/// A structure type that exposes a [`MemberMapping`].
///
/// Equality ([`mapped_eq`](crate::mapped_eq)), serialization
/// ([`text::serialize`](crate::text::serialize)) and deserialization
/// ([`text::deserialize`](crate::text::deserialize)) are generic over this
/// trait.
///
/// `member_mapping` is type-level metadata: it takes no instance and must
/// return the same table on every call. Prefer
/// [`#[derive(Mapped)]`](crate::derive::Mapped); a hand-written
/// implementation keeps the table in a `static`:
///
/// ```
/// use mw_mapping::{bind, FieldBinding, Mapped, MemberMapping};
///
/// struct Foo { one: i32, two: char }
///
/// impl Mapped for Foo {
///     fn member_mapping() -> &'static MemberMapping<Self> {
///         static FIELDS: [FieldBinding<Foo>; 2] = [bind!(Foo::one), bind!(Foo::two)];
///         static MAPPING: MemberMapping<Foo> = MemberMapping::new("Foo", &FIELDS);
///         &MAPPING
///     }
/// }
///
/// assert_eq!(Foo::member_mapping().len(), 2);
/// ```
pub trait Mapped: Sized + 'static {
    /// Returns the member mapping of this type.
    fn member_mapping() -> &'static MemberMapping<Self>;
}

// -----------------------------------------------------------------------------
// bind!

/// Creates a [`FieldBinding`] for a named field.
///
/// - `bind!(Type::field)` uses the field name as display name.
/// - `bind!(Type::field => "label")` uses `label`.
///
/// `Type` must be a single identifier in scope.
#[macro_export]
macro_rules! bind {
    ($ty:ident :: $field:ident) => {
        $crate::bind!($ty :: $field => ::core::stringify!($field))
    };
    ($ty:ident :: $field:ident => $name:expr) => {
        $crate::FieldBinding::<$ty>::new(
            $name,
            |value: &$ty| &value.$field,
            |value: &mut $ty| &mut value.$field,
        )
    };
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{FieldBinding, Mapped, MemberMapping, is_valid_name};
    use crate::value::ValueRef;

    struct Sample {
        id: u32,
        label: String,
        #[allow(dead_code, reason = "unmapped on purpose")]
        cache: Vec<u8>,
    }

    impl Mapped for Sample {
        fn member_mapping() -> &'static MemberMapping<Self> {
            static FIELDS: [FieldBinding<Sample>; 2] = [bind!(Sample::id), bind!(Sample::label => "name")];
            static MAPPING: MemberMapping<Sample> = MemberMapping::new("Sample", &FIELDS);
            &MAPPING
        }
    }

    struct Nothing;

    impl Mapped for Nothing {
        fn member_mapping() -> &'static MemberMapping<Self> {
            static MAPPING: MemberMapping<Nothing> = MemberMapping::new("Nothing", &[]);
            &MAPPING
        }
    }

    #[test]
    fn mapping_is_type_level_and_stable() {
        let a = Sample::member_mapping();
        let b = Sample::member_mapping();
        assert!(core::ptr::eq(a, b));
        assert_eq!(a.type_name(), "Sample");
        assert_eq!(a.field_names().collect::<Vec<_>>(), ["id", "name"]);
    }

    #[test]
    fn lookup() {
        let mapping = Sample::member_mapping();
        assert_eq!(mapping.index_of("id"), Some(0));
        assert_eq!(mapping.index_of("label"), None);
        assert_eq!(mapping.field("name").map(FieldBinding::name), Some("name"));
        assert!(mapping.get(2).is_none());
        assert_eq!(mapping.into_iter().count(), 2);
    }

    #[test]
    fn bindings_read_and_write() {
        let mut s = Sample {
            id: 7,
            label: String::from("x"),
            cache: Vec::new(),
        };
        let mapping = Sample::member_mapping();
        let label = mapping.field("name").unwrap();
        assert_eq!(label.get(&s).value_ref(), ValueRef::Text("x"));

        label.get_mut(&mut s).assign_text("renamed").unwrap();
        assert_eq!(s.label, "renamed");
        assert_eq!(mapping.get(0).unwrap().get(&s).value_ref(), ValueRef::Unsigned(7));
    }

    #[test]
    fn empty_mapping() {
        let mapping = Nothing::member_mapping();
        assert!(mapping.is_empty());
        assert_eq!(mapping.iter().count(), 0);
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_name("one"));
        assert!(is_valid_name("with space"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a:b"));
        assert!(!is_valid_name("a,b"));
        assert!(!is_valid_name("{"));
        assert!(!is_valid_name("tab\there"));
        assert!(!is_valid_name("line\nbreak"));
        assert!(!is_valid_name("carriage\rreturn"));
    }

    #[test]
    #[should_panic(expected = "duplicate field display name")]
    fn duplicate_names_rejected() {
        static BINDINGS: [FieldBinding<Sample>; 2] = [bind!(Sample::id), bind!(Sample::label => "id")];
        let _ = MemberMapping::new("Sample", &BINDINGS);
    }

    #[test]
    #[should_panic(expected = "invalid field display name")]
    fn invalid_name_rejected() {
        let name = core::hint::black_box("bad:name");
        let _ = FieldBinding::<Sample>::new(name, |s| &s.id, |s| &mut s.id);
    }
}
