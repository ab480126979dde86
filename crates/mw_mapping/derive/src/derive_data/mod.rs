//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod mapped_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use mapped_struct::MappedStruct;
