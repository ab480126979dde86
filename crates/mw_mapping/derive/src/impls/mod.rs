// -----------------------------------------------------------------------------
// Modules

mod match_mapped;

mod auto_register;
mod partial_eq;
mod trait_mapped;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_mapped::match_mapped_impls;

use auto_register::get_auto_register_impl;
use partial_eq::get_partial_eq_impl;
use trait_mapped::impl_trait_mapped;
