use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{DeserializeError, LineError};
use crate::{Mapped, MemberMapping};

// -----------------------------------------------------------------------------
// Line splitting

/// One `\tname : value` line, with the trailing comma removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldLine<'a> {
    line: usize,
    name: &'a str,
    value: &'a str,
}

/// Checks the brace and newline structure and splits the field lines.
///
/// Every line but the last must end with `,`, the last one may. The last
/// line may also run straight into the closing `}`, as long as it has no `,`.
fn split_field_lines(input: &str) -> Result<Vec<FieldLine<'_>>, DeserializeError> {
    let body = input
        .strip_prefix('{')
        .ok_or(DeserializeError::MissingOpenBrace)?;
    let body = body
        .strip_suffix('}')
        .ok_or(DeserializeError::MissingCloseBrace)?;
    let mut rest = body
        .strip_prefix('\n')
        .ok_or(DeserializeError::MissingHeaderNewline)?;

    let mut raw_lines = Vec::new();
    while !rest.is_empty() {
        let line = raw_lines.len() + 1;
        let (text, tail) = match rest.split_once('\n') {
            Some(split) => split,
            None if rest.ends_with(',') => {
                return Err(DeserializeError::MalformedLine {
                    line,
                    reason: LineError::Unterminated,
                });
            }
            None => (rest, ""),
        };
        raw_lines.push((line, text));
        rest = tail;
    }

    let last = raw_lines.len().saturating_sub(1);
    raw_lines
        .into_iter()
        .enumerate()
        .map(|(index, (line, text))| -> Result<FieldLine, DeserializeError> {
            let malformed = |reason| DeserializeError::MalformedLine { line, reason };

            let text = text
                .strip_prefix('\t')
                .ok_or(malformed(LineError::MissingIndent))?;
            let (name, value) = text
                .split_once(" : ")
                .ok_or(malformed(LineError::MissingSeparator))?;
            let value = match value.strip_suffix(',') {
                Some(value) => value,
                None if index == last => value,
                None => return Err(malformed(LineError::MissingComma)),
            };

            Ok(FieldLine { line, name, value })
        })
        .collect()
}

/// Checks that the lines name the mapped fields, in mapping order.
fn check_names<T>(mapping: &MemberMapping<T>, lines: &[FieldLine<'_>]) -> Result<(), DeserializeError> {
    if lines.len() != mapping.len() {
        return Err(DeserializeError::FieldCount {
            type_name: mapping.type_name(),
            expected: mapping.len(),
            found: lines.len(),
        });
    }

    for (index, (binding, line)) in mapping.iter().zip(lines).enumerate() {
        if binding.name() != line.name {
            return Err(DeserializeError::FieldName {
                type_name: mapping.type_name(),
                index,
                expected: binding.name(),
                found: line.name.to_string(),
            });
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// Public API

/// Parses `input` and assigns the mapped fields of `target`.
///
/// The structure of the whole input (braces, line shapes, field count and
/// names) is validated before any field is written. Values are then assigned
/// in mapping order; if one fails to parse, the fields before it have already
/// been updated.
///
/// Unmapped fields of `target` are never touched.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, text};
///
/// #[derive(Mapped)]
/// struct Entry {
///     id: u32,
///     #[mapping(skip)]
///     cached: bool,
/// }
///
/// let mut entry = Entry { id: 0, cached: true };
/// text::deserialize_into("{\n\tid : 9\n}", &mut entry).unwrap();
/// assert_eq!(entry.id, 9);
/// assert!(entry.cached);
/// ```
pub fn deserialize_into<T: Mapped>(input: &str, target: &mut T) -> Result<(), DeserializeError> {
    let mapping = T::member_mapping();

    let lines = split_field_lines(input)?;
    check_names(mapping, &lines)?;

    for (binding, line) in mapping.iter().zip(&lines) {
        binding
            .get_mut(target)
            .assign_text(line.value)
            .map_err(|source| DeserializeError::Field {
                name: binding.name(),
                source,
            })?;
    }

    log::trace!(
        "deserialized `{}` ({} mapped fields)",
        mapping.type_name(),
        mapping.len(),
    );

    Ok(())
}

/// Parses `input` into a new value, starting from `T::default()`.
///
/// Unmapped fields keep their default values. See [`deserialize_into`] for
/// the validation rules.
///
/// # Examples
///
/// ```
/// use mw_mapping::{derive::Mapped, text};
///
/// #[derive(Mapped, Default)]
/// struct Foo {
///     one: i32,
///     two: String,
///     three: char,
/// }
///
/// let foo: Foo = text::deserialize("{\n\tone : 1,\n\ttwo : abc,\n\tthree : -,\n}").unwrap();
/// assert_eq!((foo.one, foo.two.as_str(), foo.three), (1, "abc", '-'));
/// ```
pub fn deserialize<T: Mapped + Default>(input: &str) -> Result<T, DeserializeError> {
    let mut value = T::default();
    deserialize_into(input, &mut value)?;
    Ok(value)
}
