#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Code generated by `#[derive(Mapped)]` refers to `mw_mapping`, also inside
// this crate and its tests.
extern crate self as mw_mapping;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod equality;
mod ext;
mod mapping;

pub mod error;
pub mod registry;
pub mod serde;
pub mod text;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use equality::{mapped_eq, mapped_ne};
pub use ext::MappedExt;
pub use mapping::{FieldBinding, FieldGetter, FieldGetterMut, Mapped, MemberMapping, is_valid_name};
pub use mw_mapping_derive as derive;
