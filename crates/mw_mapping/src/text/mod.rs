//! The human-readable text format of mapped values.
//!
//! ## Layout
//!
//! ```text
//! {
//! 	one : 1,
//! 	two : abc,
//! 	three : -
//! }
//! ```
//!
//! - The first line is `{`.
//! - Each mapped field, in mapping order, is a tab, the display name, ` : `
//!   and the formatted value on its own line. Every field line but the last
//!   ends with `,`.
//! - The last line is `}`, with no newline after it.
//!
//! A type with an empty mapping is written as `{` and `}` on two lines.
//!
//! Values are written without quoting or escaping: integers in base 10, text
//! verbatim, characters verbatim.
//!
//! ## Parsing
//!
//! [`deserialize`] accepts the layout above, and the last field line may also
//! end with `,` or omit its newline (`-\n}`, `-,\n}` and `-}` all parse). A
//! `,` directly before `}` is rejected. The field lines must name the mapped
//! fields in mapping order.
//!
//! Because text is not escaped, a text value containing a newline, or a last
//! field whose text ends with `,`, does not survive a round trip.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::{deserialize, deserialize_into};
pub use ser::{serialize, serialize_into};
