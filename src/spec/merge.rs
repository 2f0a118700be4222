//! Inheritance: folding an `extend` chain into one effective specification.
//!
//! # Precedence
//!
//! | Field | With an ancestor |
//! |-------|------------------|
//! | `base` | ancestor base composed before local base |
//! | `variants` | per axis: local table replaces the ancestor's |
//! | `defaultVariants` | per axis: local default replaces the ancestor's |
//! | `compoundVariants` | ancestor rules, then local rules |
//! | `slots` | shared slots compose ancestor then local fragments |
//! | `compoundSlots` | local rules only |
//!
//! The ancestor is merged first, so an `extend` that itself extends
//! contributes its own effective fields.

use indexmap::IndexMap;

use super::types::{
    CompoundSlot, CompoundVariant, PropValue, Specification, Variants, BASE_SLOT,
};
use crate::classes::{cn_base, ClassValue};
use crate::util::{flat_merge_arrays, is_empty_map, join_objects, merge_objects};

/// A specification with its ancestry applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSpec {
    pub base: Option<String>,
    pub slots: IndexMap<String, Option<String>>,
    pub variants: Variants,
    pub default_variants: IndexMap<String, PropValue>,
    pub compound_variants: Vec<CompoundVariant>,
    pub compound_slots: Vec<CompoundSlot>,
    /// The ancestor as declared, before merging.
    pub extend: Option<Box<Specification>>,
}

impl MergedSpec {
    /// Merges `options` over its `extend` chain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use variations::{MergedSpec, Specification};
    ///
    /// let parent = Specification::new().base("a");
    /// let merged = MergedSpec::new(&Specification::new().base("b").extend(parent));
    /// assert_eq!(merged.base.as_deref(), Some("a b"));
    ///
    /// let merged = MergedSpec::new(&Specification::new().base("b"));
    /// assert_eq!(merged.base.as_deref(), Some("b"));
    /// ```
    pub fn new(options: &Specification) -> Self {
        let parent = options.extend.as_deref().map(MergedSpec::new);
        let parent = parent.as_ref();

        let parent_base = parent
            .and_then(|p| p.base.as_deref())
            .filter(|b| !b.is_empty());

        // Composition only happens when there is an ancestor base; otherwise
        // the local base passes through as written.
        let base = match parent_base {
            Some(parent_base) => cn_base([
                ClassValue::from(parent_base),
                ClassValue::from(options.base.as_deref()),
            ]),
            None => options.base.clone(),
        };

        let variants = match parent.map(|p| &p.variants) {
            Some(inherited) if !is_empty_map(Some(inherited)) => {
                merge_objects(inherited, &options.variants)
            }
            _ => options.variants.clone(),
        };

        let default_variants = match parent.map(|p| &p.default_variants) {
            Some(inherited) if !is_empty_map(Some(inherited)) => {
                merge_objects(inherited, &options.default_variants)
            }
            _ => options.default_variants.clone(),
        };

        let compound_variants = match parent.map(|p| &p.compound_variants) {
            Some(inherited) if !inherited.is_empty() => {
                flat_merge_arrays(inherited, &options.compound_variants)
            }
            _ => options.compound_variants.clone(),
        };

        let slots = merge_slots(options, parent);

        Self {
            base,
            slots,
            variants,
            default_variants,
            compound_variants,
            compound_slots: options.compound_slots.clone(),
            extend: options.extend.clone(),
        }
    }

    /// Returns `true` when the component exposes slots.
    pub fn is_slotted(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Flattens back into a plain specification with no `extend`.
    ///
    /// Merging the result again yields the same effective fields, so a built
    /// component can serve as the ancestor of another.
    pub fn to_specification(&self) -> Specification {
        Specification {
            base: self.base.clone(),
            extend: None,
            slots: self
                .slots
                .iter()
                .map(|(name, class)| (name.clone(), class.clone().unwrap_or_default()))
                .collect(),
            variants: self.variants.clone(),
            compound_variants: self.compound_variants.clone(),
            compound_slots: self.compound_slots.clone(),
            default_variants: self.default_variants.clone(),
        }
    }
}

fn merge_slots(
    options: &Specification,
    parent: Option<&MergedSpec>,
) -> IndexMap<String, Option<String>> {
    let parent_slots = parent.map(|p| &p.slots).filter(|s| !s.is_empty());

    let mut component_slots: IndexMap<String, Option<String>> = IndexMap::new();
    if !options.slots.is_empty() {
        // The ancestor base only folds into `base` when it has no slots of its own.
        let inherited_base = match parent_slots {
            None => parent.and_then(|p| p.base.as_deref()),
            Some(_) => None,
        };
        component_slots.insert(
            BASE_SLOT.to_string(),
            cn_base([
                ClassValue::from(options.base.as_deref()),
                ClassValue::from(inherited_base),
            ]),
        );
        for (name, class) in &options.slots {
            component_slots.insert(name.clone(), Some(class.clone()));
        }
    }

    match parent_slots {
        None => component_slots,
        Some(inherited) => {
            let local = if component_slots.is_empty() {
                IndexMap::from([(BASE_SLOT.to_string(), options.base.clone())])
            } else {
                component_slots
            };
            join_objects(inherited, &local)
        }
    }
}
