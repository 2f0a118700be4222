//! Variant specifications.
//!
//! This module provides:
//!
//! - [`Specification`]: The declarative description of a component
//! - [`Fragment`], [`CompoundVariant`], [`CompoundSlot`]: Its building blocks
//! - [`PropValue`]: Values that select variants
//! - [`MergedSpec`]: A specification with its `extend` chain applied
//! - [`SpecError`]: Errors from loading specification documents

mod error;
mod merge;
mod types;

pub use error::SpecError;
pub use merge::MergedSpec;
pub use types::{
    CompoundSlot, CompoundVariant, Condition, Fragment, PropValue, Specification, VariantTable,
    Variants, BASE_SLOT,
};
