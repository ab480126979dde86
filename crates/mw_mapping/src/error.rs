use alloc::string::String;
use core::fmt;
use core::num::IntErrorKind;

use thiserror::Error;

// -----------------------------------------------------------------------------
// FieldParseError

/// Failure to convert the text of one field back into its value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldParseError {
    #[error("`{text}` is not a valid `{type_name}`: {}", IntKindDisplay(.kind))]
    InvalidInteger {
        text: String,
        type_name: &'static str,
        kind: IntErrorKind,
    },

    #[error("expected exactly one character, found {len}")]
    CharacterLength { len: usize },

    #[error("borrowed text fields cannot be assigned from parsed input")]
    BorrowedText,
}

struct IntKindDisplay<'a>(&'a IntErrorKind);

impl fmt::Display for IntKindDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            IntErrorKind::Empty => "empty text",
            IntErrorKind::PosOverflow => "too large",
            IntErrorKind::NegOverflow => "too small",
            _ => "invalid digit",
        })
    }
}

// -----------------------------------------------------------------------------
// DeserializeError

/// Why a field line of the serialized text could not be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// The line does not start with a tab.
    MissingIndent,
    /// The line has no ` : ` between name and value.
    MissingSeparator,
    /// A field line other than the last does not end with `,`.
    MissingComma,
    /// The last field line ends with `,` but runs into `}` without a newline.
    Unterminated,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingIndent => "expected a leading tab",
            Self::MissingSeparator => "expected ` : ` between name and value",
            Self::MissingComma => "expected a trailing `,`",
            Self::Unterminated => "expected a newline between the trailing `,` and `}`",
        })
    }
}

/// Failure to deserialize a mapped value from its text form.
///
/// Line numbers count from the opening `{`, which is line 0.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeserializeError {
    #[error("input does not start with `{{`")]
    MissingOpenBrace,

    #[error("input does not end with `}}`")]
    MissingCloseBrace,

    #[error("expected a newline after the opening `{{`")]
    MissingHeaderNewline,

    #[error("line {line} is malformed: {reason}")]
    MalformedLine { line: usize, reason: LineError },

    #[error("`{type_name}` maps {expected} fields but the input has {found}")]
    FieldCount {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("field {index} of `{type_name}` is `{expected}` but the input names `{found}`")]
    FieldName {
        type_name: &'static str,
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("field `{name}` could not be parsed")]
    Field {
        name: &'static str,
        #[source]
        source: FieldParseError,
    },
}

// -----------------------------------------------------------------------------
// RegistryError

/// Failure of a [`MappingRegistry`](crate::registry::MappingRegistry) lookup
/// or of the operation it dispatches to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("no mapped type `{name}` is registered")]
    NotRegistered { name: String },

    #[error("type name `{name}` matches several registered types")]
    AmbiguousName { name: String },

    #[error("expected a value of `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{type_name}` was registered without `Default` and cannot be deserialized")]
    DeserializeUnsupported { type_name: &'static str },

    #[error(transparent)]
    Deserialize(#[from] DeserializeError),
}
