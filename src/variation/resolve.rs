//! Per-call fragment selection.
//!
//! Given the merged specification and the call-time props, these functions
//! collect the ordered fragment list for the whole component (flat layout)
//! or for one slot (slotted layout). Conflict resolution happens afterwards,
//! in the cache.
//!
//! Lookups never fail: a missing axis, value or slot contributes nothing.

use indexmap::IndexMap;

use super::props::Props;
use crate::classes::ClassValue;
use crate::spec::{Condition, Fragment, MergedSpec, PropValue, BASE_SLOT};
use crate::util::falsy_to_string;

pub(crate) struct Selection<'a> {
    spec: &'a MergedSpec,
    props: &'a Props,
}

impl<'a> Selection<'a> {
    pub fn new(spec: &'a MergedSpec, props: &'a Props) -> Self {
        Self { spec, props }
    }

    /// Value in effect for `axis`: the prop, else the default.
    fn effective_value(&self, axis: &str) -> Option<&'a PropValue> {
        match self.props.get(axis) {
            None | Some(PropValue::Null) => self.spec.default_variants.get(axis),
            value => value,
        }
    }

    /// Variant key for `axis`; an unset axis resolves to `"false"`.
    fn value_key(&self, axis: &str) -> String {
        falsy_to_string(self.effective_value(axis))
    }

    /// Compound rules only see props passed at the call site; defaults
    /// never satisfy a condition.
    fn matches(&self, conditions: &IndexMap<String, Condition>) -> bool {
        conditions.iter().all(|(axis, condition)| {
            condition.matches(&falsy_to_string(self.props.get(axis)))
        })
    }

    fn variant_fragments(&self, slot: &str) -> Vec<String> {
        self.spec
            .variants
            .iter()
            .filter_map(|(axis, table)| {
                let key = self.value_key(axis);
                table.get(&key)?.for_slot(slot).map(str::to_string)
            })
            .collect()
    }

    fn compound_variant_fragments(&self, slot: &str) -> Vec<String> {
        let part = |fragment: &Option<Fragment>| {
            fragment
                .as_ref()
                .and_then(|f| f.for_slot(slot))
                .map(str::to_string)
        };

        self.spec
            .compound_variants
            .iter()
            .filter(|rule| self.matches(&rule.conditions))
            .flat_map(|rule| [part(&rule.class), part(&rule.class_name)])
            .flatten()
            .collect()
    }

    fn compound_slot_fragments(&self, slot: &str) -> Vec<String> {
        self.spec
            .compound_slots
            .iter()
            .filter(|rule| rule.slots.iter().any(|s| s == slot))
            .filter(|rule| self.matches(&rule.conditions))
            .flat_map(|rule| [rule.class.clone(), rule.class_name.clone()])
            .flatten()
            .collect()
    }

    /// Fragments for a component without slots.
    pub fn flat(&self) -> Vec<ClassValue> {
        let mut classes = vec![ClassValue::from(self.spec.base.as_deref())];

        if !self.spec.variants.is_empty() {
            classes.push(self.variant_fragments(BASE_SLOT).into());
            classes.push(self.compound_variant_fragments(BASE_SLOT).into());
        }

        classes.push(ClassValue::from(self.props.class_value()));
        classes.push(ClassValue::from(self.props.class_name_value()));
        classes
    }

    /// Fragments for one slot, followed by `extra` call-site classes.
    pub fn slot(&self, slot: &str, extra: &[Option<&str>]) -> Vec<ClassValue> {
        let slot_base = self.spec.slots.get(slot).cloned().flatten();

        let mut classes = vec![
            ClassValue::from(slot_base),
            self.variant_fragments(slot).into(),
            self.compound_variant_fragments(slot).into(),
            self.compound_slot_fragments(slot).into(),
        ];
        classes.extend(extra.iter().map(|class| ClassValue::from(*class)));
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::cn_base;
    use crate::spec::{CompoundSlot, CompoundVariant, Specification};

    fn composed(classes: Vec<ClassValue>) -> Option<String> {
        cn_base(classes)
    }

    fn button() -> MergedSpec {
        MergedSpec::new(
            &Specification::new()
                .base("btn")
                .variant("color", "primary", "primary")
                .variant("color", "secondary", "secondary")
                .variant("size", "sm", "small")
                .variant("size", "lg", "large")
                .variant("disabled", "true", "is-disabled")
                .variant("disabled", "false", "is-enabled")
                .default_variant("color", "primary")
                .default_variant("size", "sm"),
        )
    }

    #[test]
    fn test_defaults_apply() {
        let spec = button();
        let props = Props::new();
        let out = composed(Selection::new(&spec, &props).flat());
        assert_eq!(out.as_deref(), Some("btn primary small is-enabled"));
    }

    #[test]
    fn test_props_override_defaults() {
        let spec = button();
        let props = Props::new().set("color", "secondary").set("disabled", true);
        let out = composed(Selection::new(&spec, &props).flat());
        assert_eq!(out.as_deref(), Some("btn secondary small is-disabled"));
    }

    #[test]
    fn test_null_prop_falls_back_to_default() {
        let spec = button();
        let props = Props::new().set("size", PropValue::Null);
        let out = composed(Selection::new(&spec, &props).flat());
        assert_eq!(out.as_deref(), Some("btn primary small is-enabled"));
    }

    #[test]
    fn test_unknown_value_contributes_nothing() {
        let spec = button();
        let props = Props::new().set("size", "xl").set("ghost", "yes");
        let out = composed(Selection::new(&spec, &props).flat());
        assert_eq!(out.as_deref(), Some("btn primary is-enabled"));
    }

    #[test]
    fn test_compound_any_value() {
        let spec = MergedSpec::new(
            &Specification::new()
                .variant("size", "sm", "s")
                .variant("size", "md", "m")
                .variant("size", "lg", "l")
                .compound_variant(
                    CompoundVariant::new()
                        .when_any("size", ["sm", "md"])
                        .class("compact"),
                ),
        );

        let props = Props::new().set("size", "md");
        assert_eq!(
            composed(Selection::new(&spec, &props).flat()).as_deref(),
            Some("m compact")
        );

        let props = Props::new().set("size", "lg");
        assert_eq!(
            composed(Selection::new(&spec, &props).flat()).as_deref(),
            Some("l")
        );
    }

    #[test]
    fn test_compound_false_matches_unset_axis() {
        let spec = MergedSpec::new(
            &Specification::new()
                .variant("loading", "true", "busy")
                .compound_variant(CompoundVariant::new().when("loading", false).class("idle")),
        );
        let props = Props::new();
        assert_eq!(
            composed(Selection::new(&spec, &props).flat()).as_deref(),
            Some("idle")
        );
    }

    #[test]
    fn test_compound_ignores_defaults() {
        let spec = MergedSpec::new(
            &Specification::new()
                .variant("color", "primary", "bg-blue-500")
                .variant("size", "sm", "text-sm")
                .variant("size", "lg", "text-lg")
                .default_variant("color", "primary")
                .default_variant("size", "sm")
                .compound_variant(
                    CompoundVariant::new()
                        .when("color", "primary")
                        .when("size", "lg")
                        .class("uppercase"),
                ),
        );

        let props = Props::new().set("size", "lg");
        assert_eq!(
            composed(Selection::new(&spec, &props).flat()).as_deref(),
            Some("bg-blue-500 text-lg")
        );

        let props = Props::new().set("color", "primary").set("size", "lg");
        assert_eq!(
            composed(Selection::new(&spec, &props).flat()).as_deref(),
            Some("bg-blue-500 text-lg uppercase")
        );
    }

    #[test]
    fn test_compound_slot_ignores_defaults() {
        let spec = MergedSpec::new(
            &Specification::new()
                .slot("icon", "w-4")
                .variant("size", "lg", "gap-2")
                .default_variant("size", "lg")
                .compound_slot(CompoundSlot::new(["icon"]).when("size", "lg").class("w-6")),
        );

        let props = Props::new();
        let selection = Selection::new(&spec, &props);
        assert_eq!(composed(selection.slot("icon", &[])).as_deref(), Some("w-4"));

        let props = Props::new().set("size", "lg");
        let selection = Selection::new(&spec, &props);
        assert_eq!(
            composed(selection.slot("icon", &[])).as_deref(),
            Some("w-4 w-6")
        );
    }

    #[test]
    fn test_slot_selection() {
        let spec = MergedSpec::new(
            &Specification::new()
                .slot("base", "x")
                .slot("icon", "y")
                .variant("active", "true", Fragment::slots([("icon", "z")]))
                .variant("tone", "loud", "shout")
                .compound_slot(CompoundSlot::new(["icon"]).when("active", true).class("glow")),
        );
        let props = Props::new().set("active", true).set("tone", "loud");
        let selection = Selection::new(&spec, &props);

        assert_eq!(
            composed(selection.slot("base", &[])).as_deref(),
            Some("x shout")
        );
        assert_eq!(
            composed(selection.slot("icon", &[Some("extra")])).as_deref(),
            Some("y z glow extra")
        );
        assert_eq!(composed(selection.slot("missing", &[])), None);
    }
}
