//! Type descriptors
//!
//! A type descriptor is the capability table a value cell consults whenever
//! it has to create, copy, render or destroy a typed representation. The cell
//! itself never looks inside the typed value; everything type-specific goes
//! through this trait.

use crate::error::ValueError;
use std::fmt;

/// Conversion and lifecycle hooks for one kind of typed representation
pub trait ObjType: 'static {
    /// The binary form owned by a cell of this type
    type Internal: fmt::Debug;

    /// Short type name used in diagnostics
    const NAME: &'static str;

    /// Parse text into a typed representation.
    ///
    /// Must reject anything that `update_string` could not have produced
    /// from some value, modulo the accepted base prefixes.
    fn set_from_any(text: &str) -> Result<Self::Internal, ValueError>;

    /// Render the canonical text form
    fn update_string(rep: &Self::Internal) -> String;

    /// Deep-copy a typed representation
    fn dup(rep: &Self::Internal) -> Result<Self::Internal, ValueError>;

    /// Destroy a typed representation
    fn free(rep: Self::Internal) {
        drop(rep);
    }
}
