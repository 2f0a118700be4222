//! Resolved components.
//!
//! A [`Variation`] is what the factory returns: the merged specification,
//! the configuration it was created with, and a handle to the merge cache.
//! Calling it with [`Props`] produces the final class string, or one string
//! per slot.

mod props;
mod resolve;

pub use props::Props;

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

use crate::config::Config;
use crate::merge::{MergeCache, MergeConfigError};
use crate::spec::{
    CompoundSlot, CompoundVariant, MergedSpec, PropValue, Specification, Variants, BASE_SLOT,
};
use resolve::Selection;

/// Slot name to resolved classes, in slot declaration order.
pub type SlotClasses = IndexMap<String, Option<String>>;

/// How a component's output is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One class string for the whole component.
    Flat,
    /// One class string per slot.
    Slotted,
}

/// The result of resolving a [`Variation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariationOutput {
    /// Output of a component without slots; `None` when no class remains.
    Class(Option<String>),
    /// Output of a slotted component.
    Slots(SlotClasses),
}

impl VariationOutput {
    /// Returns the flat class string, if this is flat output.
    pub fn as_class(&self) -> Option<&str> {
        match self {
            VariationOutput::Class(class) => class.as_deref(),
            VariationOutput::Slots(_) => None,
        }
    }

    /// Returns the slot table, if this is slotted output.
    pub fn as_slots(&self) -> Option<&SlotClasses> {
        match self {
            VariationOutput::Class(_) => None,
            VariationOutput::Slots(slots) => Some(slots),
        }
    }
}

/// A component created from a [`Specification`].
///
/// The specification is merged with its `extend` chain once, at creation;
/// every call only selects fragments and resolves conflicts.
///
/// # Example
///
/// ```rust
/// use variations::{create_variation, Props, Specification};
///
/// let button = create_variation(
///     &Specification::new()
///         .base("px-4 py-2")
///         .variant("size", "sm", "text-sm")
///         .variant("size", "lg", "text-lg px-6")
///         .default_variant("size", "sm"),
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(button.class(&Props::new()).as_deref(), Some("px-4 py-2 text-sm"));
/// assert_eq!(
///     button.class(&Props::new().set("size", "lg")).as_deref(),
///     Some("py-2 text-lg px-6")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Variation {
    spec: MergedSpec,
    layout: Layout,
    config: Config,
    cache: Arc<MergeCache>,
}

impl Variation {
    /// Merges `options`, registers `config` with `cache`, and returns the component.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.tw_merge_config` cannot produce a class merger.
    pub fn new(
        options: &Specification,
        config: Config,
        cache: Arc<MergeCache>,
    ) -> Result<Self, MergeConfigError> {
        let spec = MergedSpec::new(options);
        cache.observe(&config.tw_merge_config)?;

        let layout = if spec.is_slotted() {
            Layout::Slotted
        } else {
            Layout::Flat
        };

        Ok(Self {
            spec,
            layout,
            config,
            cache,
        })
    }

    /// Resolves the component for `props`.
    pub fn call(&self, props: &Props) -> VariationOutput {
        match self.layout {
            Layout::Flat => VariationOutput::Class(self.resolve_flat(props)),
            Layout::Slotted => VariationOutput::Slots(self.resolve_slots(props)),
        }
    }

    /// Resolves to a single class string.
    ///
    /// For slotted components this is the `base` slot.
    pub fn class(&self, props: &Props) -> Option<String> {
        match self.layout {
            Layout::Flat => self.resolve_flat(props),
            Layout::Slotted => self.slot(BASE_SLOT, props),
        }
    }

    /// Resolves every slot.
    ///
    /// `props.class` and `props.class_name` go to the `base` slot;
    /// per-slot classes from [`Props::slot_class`] go to their slot. A
    /// component without slots reports its output under `base`.
    pub fn slots(&self, props: &Props) -> SlotClasses {
        match self.layout {
            Layout::Flat => IndexMap::from([(BASE_SLOT.to_string(), self.resolve_flat(props))]),
            Layout::Slotted => self.resolve_slots(props),
        }
    }

    /// Resolves one slot, appending `props.class` and `props.class_name` to it.
    ///
    /// On a component without slots, `base` resolves to the same string as
    /// [`class`](Variation::class).
    pub fn slot(&self, name: &str, props: &Props) -> Option<String> {
        if self.layout == Layout::Flat && name == BASE_SLOT {
            return self.resolve_flat(props);
        }

        let selection = Selection::new(&self.spec, props);
        let extra = [
            props.class_value(),
            props.class_name_value(),
            props.slot_class_value(name),
        ];
        self.cache
            .resolve(selection.slot(name, &extra), &self.config)
    }

    fn resolve_flat(&self, props: &Props) -> Option<String> {
        let classes = Selection::new(&self.spec, props).flat();
        let resolved = self.cache.resolve(classes, &self.config);
        trace!(output = ?resolved, "variation resolved");
        resolved
    }

    fn resolve_slots(&self, props: &Props) -> SlotClasses {
        let selection = Selection::new(&self.spec, props);
        self.spec
            .slots
            .keys()
            .map(|name| {
                let mut extra = Vec::with_capacity(3);
                if name == BASE_SLOT {
                    extra.push(props.class_value());
                    extra.push(props.class_name_value());
                }
                extra.push(props.slot_class_value(name));

                let classes = selection.slot(name, &extra);
                (name.clone(), self.cache.resolve(classes, &self.config))
            })
            .collect()
    }

    /// Names of the variant axes, in declaration order.
    pub fn variant_keys(&self) -> Vec<&str> {
        self.spec.variants.keys().map(String::as_str).collect()
    }

    /// Effective base classes.
    pub fn base(&self) -> Option<&str> {
        self.spec.base.as_deref()
    }

    /// Effective slot table; empty for components without slots.
    pub fn slot_table(&self) -> &IndexMap<String, Option<String>> {
        &self.spec.slots
    }

    pub fn variants(&self) -> &Variants {
        &self.spec.variants
    }

    pub fn default_variants(&self) -> &IndexMap<String, PropValue> {
        &self.spec.default_variants
    }

    pub fn compound_variants(&self) -> &[CompoundVariant] {
        &self.spec.compound_variants
    }

    pub fn compound_slots(&self) -> &[CompoundSlot] {
        &self.spec.compound_slots
    }

    /// The ancestor specification, as declared.
    pub fn extend(&self) -> Option<&Specification> {
        self.spec.extend.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_slotted(&self) -> bool {
        self.layout == Layout::Slotted
    }

    /// The merged specification, usable as another component's `extend`.
    pub fn specification(&self) -> Specification {
        self.spec.to_specification()
    }
}
