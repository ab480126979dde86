//! Parsing of `#[mapping(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;
