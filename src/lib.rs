//! # Variations - Declarative Style Variants
//!
//! `variations` turns a declarative description of a component's styling into
//! class strings. A [`Specification`] lists base classes, variant axes (for
//! example `color` or `size`) with a fragment per value, compound rules that
//! apply when several axes match, and optional named slots for multi-part
//! components. Specifications can extend one another.
//!
//! ## Core Concepts
//!
//! - [`Specification`]: The declarative description, buildable in code or
//!   loaded from JSON/YAML
//! - [`Variation`]: A created component; call it with [`Props`] to get classes
//! - [`MergeCache`]: Memoized conflict resolution, so `p-2 p-4` becomes `p-4`
//! - [`Config`] / [`ConfigOverride`]: Resolution switches and merger customization
//! - [`TvFactory`]: A factory with a fixed default configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use variations::{create_variation, Props, Specification};
//! use serde_json::json;
//!
//! let button = create_variation(
//!     &Specification::from_json_value(json!({
//!         "base": "px-4 py-2 font-bold transition-all",
//!         "variants": {
//!             "color": {
//!                 "primary": "bg-blue-500 text-white",
//!                 "secondary": "bg-gray-500 text-black"
//!             },
//!             "size": { "sm": "text-sm", "lg": "text-lg" },
//!             "fullWidth": { "true": "w-full" }
//!         },
//!         "defaultVariants": { "color": "primary", "size": "sm" }
//!     }))
//!     .unwrap(),
//!     None,
//! )
//! .unwrap();
//!
//! let props = Props::new()
//!     .set("color", "secondary")
//!     .set("size", "lg")
//!     .set("fullWidth", true);
//!
//! assert_eq!(
//!     button.class(&props).as_deref(),
//!     Some("px-4 py-2 font-bold transition-all bg-gray-500 text-black text-lg w-full")
//! );
//! ```
//!
//! ## Slots
//!
//! A specification with `slots` resolves to one class string per slot.
//! Fragments keyed by slot name apply to those slots only:
//!
//! ```rust
//! use variations::{create_variation, Fragment, Props, Specification};
//!
//! let card = create_variation(
//!     &Specification::new()
//!         .slot("base", "rounded p-4")
//!         .slot("title", "font-bold")
//!         .variant("size", "lg", Fragment::slots([("base", "p-6"), ("title", "text-lg")])),
//!     None,
//! )
//! .unwrap();
//!
//! let slots = card.slots(&Props::new().set("size", "lg"));
//! assert_eq!(slots["base"].as_deref(), Some("rounded p-6"));
//! assert_eq!(slots["title"].as_deref(), Some("font-bold text-lg"));
//! ```
//!
//! ## Caching
//!
//! [`create_variation`] shares one process-wide [`MergeCache`]. Use
//! [`create_variation_with_cache`] or [`TvFactory::with_cache`] to give a
//! group of components their own cache.

pub mod classes;
pub mod config;
pub mod merge;
pub mod spec;
pub mod tv;
pub mod util;
pub mod variation;

use std::sync::Arc;

pub use classes::{cn_base, ClassValue};
pub use config::{Config, ConfigOverride, ResponsiveVariants};
pub use merge::{
    ClassMerger, MergeCache, MergeConfig, MergeConfigError, MergeConfigExtension, Table,
    TailwindMerger,
};
pub use spec::{
    CompoundSlot, CompoundVariant, Condition, Fragment, MergedSpec, PropValue, SpecError,
    Specification, VariantTable, Variants, BASE_SLOT,
};
pub use tv::TvFactory;
pub use util::{
    falsy_to_string, flat_merge_arrays, is_empty_map, join_objects, merge_objects,
    remove_extra_spaces,
};
pub use variation::{Layout, Props, SlotClasses, Variation, VariationOutput};

/// Creates a component using the process-wide [`MergeCache`].
///
/// `config` is applied over [`Config::default`].
///
/// # Errors
///
/// Returns an error if `config` carries a merge configuration the class
/// merger cannot be built from.
pub fn create_variation(
    options: &Specification,
    config: Option<&ConfigOverride>,
) -> Result<Variation, MergeConfigError> {
    create_variation_with_cache(options, config, MergeCache::global())
}

/// Creates a component that resolves conflicts through `cache`.
///
/// # Errors
///
/// See [`create_variation`].
pub fn create_variation_with_cache(
    options: &Specification,
    config: Option<&ConfigOverride>,
    cache: Arc<MergeCache>,
) -> Result<Variation, MergeConfigError> {
    let config = match config {
        Some(over) => over.resolve(),
        None => Config::default(),
    };
    Variation::new(options, config, cache)
}

/// Creates a factory whose components start from `config`.
pub fn create_tv(config: ConfigOverride) -> TvFactory {
    TvFactory::new(config)
}
