//! Declarative specification types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::SpecError;
use crate::util::falsy_to_string;

/// Name of the slot that receives unslotted fragments.
pub const BASE_SLOT: &str = "base";

/// A prop or default value selecting a variant.
///
/// Values are compared through their string key (see
/// [`falsy_to_string`](crate::falsy_to_string)), so `Bool(true)` and
/// `Text("true")` select the same variant. Numbers that do not fit an `i64`
/// (`1.5`, large unsigned values) are kept as [`Number`](PropValue::Number)
/// and select by their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Number(serde_json::Number),
    Text(String),
    Null,
}

impl PropValue {
    /// The variant key this value selects.
    pub fn key(&self) -> String {
        falsy_to_string(Some(self))
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Int(n) => write!(f, "{}", n),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => f.write_str(s),
            PropValue::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

/// The classes a variant value contributes.
///
/// A plain fragment applies to the whole component (the `base` slot when the
/// component has slots). A slot-keyed fragment names the slot each part goes
/// to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Class(String),
    Slots(IndexMap<String, String>),
}

impl Fragment {
    /// Creates a slot-keyed fragment.
    pub fn slots<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Fragment::Slots(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The part of this fragment that applies to `slot`.
    pub fn for_slot(&self, slot: &str) -> Option<&str> {
        match self {
            Fragment::Class(class) if slot == BASE_SLOT => Some(class),
            Fragment::Class(_) => None,
            Fragment::Slots(slots) => slots.get(slot).map(String::as_str),
        }
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Fragment::Class(value.to_string())
    }
}

impl From<String> for Fragment {
    fn from(value: String) -> Self {
        Fragment::Class(value)
    }
}

/// Value-key to fragment table of one variant axis.
pub type VariantTable = IndexMap<String, Fragment>;

/// Axis name to value table.
pub type Variants = IndexMap<String, VariantTable>;

/// A compound rule constraint on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Any of the listed values satisfies the constraint.
    Any(Vec<PropValue>),
    /// Exactly this value satisfies the constraint.
    One(PropValue),
}

impl Condition {
    /// Returns `true` if the resolved key satisfies this constraint.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Condition::Any(values) => values.iter().any(|v| v.key() == key),
            Condition::One(value) => value.key() == key,
        }
    }
}

impl From<PropValue> for Condition {
    fn from(value: PropValue) -> Self {
        Condition::One(value)
    }
}

macro_rules! condition_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Condition {
                fn from(value: $ty) -> Self {
                    Condition::One(value.into())
                }
            }
        )*
    };
}

condition_from!(bool, i32, i64, &str, String);

/// Extra classes applied when several axes match at once.
///
/// # Example
///
/// ```rust
/// use variations::CompoundVariant;
///
/// let rule = CompoundVariant::new()
///     .when("color", "primary")
///     .when_any("size", ["md", "lg"])
///     .class("uppercase");
/// assert_eq!(rule.conditions.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Fragment>,
    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<Fragment>,
    /// Axis constraints; every one must match.
    #[serde(flatten)]
    pub conditions: IndexMap<String, Condition>,
}

impl CompoundVariant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `axis` to resolve to `value`.
    pub fn when(mut self, axis: &str, value: impl Into<PropValue>) -> Self {
        self.conditions
            .insert(axis.to_string(), Condition::One(value.into()));
        self
    }

    /// Requires `axis` to resolve to one of `values`.
    pub fn when_any<I, V>(mut self, axis: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions
            .insert(axis.to_string(), Condition::Any(values));
        self
    }

    pub fn class(mut self, class: impl Into<Fragment>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<Fragment>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// Extra classes applied to a set of slots, optionally gated on axis values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundSlot {
    pub slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(flatten)]
    pub conditions: IndexMap<String, Condition>,
}

impl CompoundSlot {
    /// Creates a rule targeting `slots`.
    pub fn new<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Requires `axis` to resolve to `value`.
    pub fn when(mut self, axis: &str, value: impl Into<PropValue>) -> Self {
        self.conditions
            .insert(axis.to_string(), Condition::One(value.into()));
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// A component's declarative style description.
///
/// Specifications can be built in code or loaded from JSON/YAML documents
/// using the same field names as the JavaScript surface (`compoundVariants`,
/// `defaultVariants`, ...).
///
/// # Example
///
/// ```rust
/// use variations::{Fragment, Specification};
///
/// let button = Specification::new()
///     .base("font-medium")
///     .variant("size", "sm", "text-sm")
///     .variant("size", "lg", "text-lg")
///     .default_variant("size", "sm");
///
/// let from_json = Specification::from_json_str(r#"{
///     "base": "font-medium",
///     "variants": { "size": { "sm": "text-sm", "lg": "text-lg" } },
///     "defaultVariants": { "size": "sm" }
/// }"#).unwrap();
///
/// assert_eq!(button, from_json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend: Option<Box<Specification>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub slots: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variants: Variants,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compound_variants: Vec<CompoundVariant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compound_slots: Vec<CompoundSlot>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub default_variants: IndexMap<String, PropValue>,
}

impl Specification {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a specification from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Converts an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SpecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a specification from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Inherits from `parent`; local definitions take precedence.
    pub fn extend(mut self, parent: Specification) -> Self {
        self.extend = Some(Box::new(parent));
        self
    }

    pub fn slot(mut self, name: &str, class: impl Into<String>) -> Self {
        self.slots.insert(name.to_string(), class.into());
        self
    }

    /// Adds (or replaces) one value of a variant axis.
    pub fn variant(mut self, axis: &str, key: &str, fragment: impl Into<Fragment>) -> Self {
        self.variants
            .entry(axis.to_string())
            .or_default()
            .insert(key.to_string(), fragment.into());
        self
    }

    pub fn default_variant(mut self, axis: &str, value: impl Into<PropValue>) -> Self {
        self.default_variants
            .insert(axis.to_string(), value.into());
        self
    }

    pub fn compound_variant(mut self, rule: CompoundVariant) -> Self {
        self.compound_variants.push(rule);
        self
    }

    pub fn compound_slot(mut self, rule: CompoundSlot) -> Self {
        self.compound_slots.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prop_value_keys() {
        assert_eq!(PropValue::from(true).key(), "true");
        assert_eq!(PropValue::from(false).key(), "false");
        assert_eq!(PropValue::Null.key(), "false");
        assert_eq!(PropValue::from(3).key(), "3");
        assert_eq!(PropValue::from("lg").key(), "lg");
    }

    #[test]
    fn test_prop_value_deserialize() {
        let values: Vec<PropValue> = serde_json::from_value(json!([true, 2, "x", null])).unwrap();
        assert_eq!(
            values,
            vec![
                PropValue::Bool(true),
                PropValue::Int(2),
                PropValue::Text("x".into()),
                PropValue::Null
            ]
        );
    }

    #[test]
    fn test_fractional_numbers_select_by_text() {
        let spec = Specification::from_json_str(
            r#"{
                "variants": { "opacity": { "1.5": "opacity-75" } },
                "defaultVariants": { "opacity": 1.5 },
                "compoundVariants": [ { "opacity": [0.5, 1.5], "class": "blur-sm" } ]
            }"#,
        )
        .unwrap();

        let default = &spec.default_variants["opacity"];
        assert!(matches!(default, PropValue::Number(_)));
        assert_eq!(default.key(), "1.5");
        assert!(spec.variants["opacity"].contains_key(&default.key()));
        assert!(spec.compound_variants[0].conditions["opacity"].matches("1.5"));
    }

    #[test]
    fn test_fragment_for_slot() {
        let plain = Fragment::from("a");
        assert_eq!(plain.for_slot("base"), Some("a"));
        assert_eq!(plain.for_slot("icon"), None);

        let slotted = Fragment::slots([("icon", "z")]);
        assert_eq!(slotted.for_slot("icon"), Some("z"));
        assert_eq!(slotted.for_slot("base"), None);
    }

    #[test]
    fn test_condition_matching() {
        assert!(Condition::from("primary").matches("primary"));
        assert!(Condition::from(true).matches("true"));
        assert!(Condition::from(false).matches("false"));
        assert!(!Condition::from("primary").matches("secondary"));

        let any = Condition::Any(vec!["sm".into(), "md".into()]);
        assert!(any.matches("md"));
        assert!(!any.matches("lg"));
    }

    #[test]
    fn test_compound_variant_deserialize() {
        let rule: CompoundVariant = serde_json::from_value(json!({
            "color": "primary",
            "size": ["sm", "md"],
            "class": "uppercase",
            "className": "tracking-wide"
        }))
        .unwrap();

        assert_eq!(rule.class, Some(Fragment::from("uppercase")));
        assert_eq!(rule.class_name, Some(Fragment::from("tracking-wide")));
        assert_eq!(rule.conditions["color"], Condition::from("primary"));
        assert_eq!(
            rule.conditions["size"],
            Condition::Any(vec!["sm".into(), "md".into()])
        );
        assert_eq!(
            rule.conditions.keys().collect::<Vec<_>>(),
            vec!["color", "size"]
        );
    }

    #[test]
    fn test_compound_slot_deserialize() {
        let rule: CompoundSlot = serde_json::from_value(json!({
            "slots": ["icon", "label"],
            "class": "opacity-50",
            "disabled": true
        }))
        .unwrap();

        assert_eq!(rule.slots, vec!["icon".to_string(), "label".to_string()]);
        assert_eq!(rule.class.as_deref(), Some("opacity-50"));
        assert_eq!(rule.conditions["disabled"], Condition::from(true));
    }

    #[test]
    fn test_specification_from_json_keeps_axis_order() {
        let spec = Specification::from_json_value(json!({
            "variants": {
                "size": { "sm": "text-sm" },
                "color": { "primary": "bg-blue-500" },
                "fullWidth": { "true": "w-full" }
            }
        }))
        .unwrap();
        let axes: Vec<&str> = spec.variants.keys().map(String::as_str).collect();
        assert_eq!(axes, vec!["size", "color", "fullWidth"]);
    }

    #[test]
    fn test_specification_slot_keyed_variant() {
        let spec = Specification::from_json_value(json!({
            "slots": { "icon": "y" },
            "variants": { "active": { "true": { "icon": "z" } } }
        }))
        .unwrap();
        assert_eq!(
            spec.variants["active"]["true"],
            Fragment::slots([("icon", "z")])
        );
    }

    #[test]
    fn test_specification_nested_extend() {
        let spec = Specification::from_json_str(
            r#"{ "base": "b", "extend": { "base": "a", "extend": { "base": "root" } } }"#,
        )
        .unwrap();
        let parent = spec.extend.as_deref().unwrap();
        assert_eq!(parent.base.as_deref(), Some("a"));
        assert_eq!(
            parent.extend.as_deref().and_then(|s| s.base.as_deref()),
            Some("root")
        );
    }

    #[test]
    fn test_specification_from_yaml() {
        let yaml = r#"
base: px-4
variants:
  size:
    sm: text-sm
  disabled:
    "true": opacity-50
defaultVariants:
  size: sm
compoundVariants:
  - size: sm
    disabled: true
    class: cursor-not-allowed
"#;
        let spec = Specification::from_yaml_str(yaml).unwrap();
        assert_eq!(spec.base.as_deref(), Some("px-4"));
        assert_eq!(spec.default_variants["size"], PropValue::from("sm"));
        assert_eq!(spec.compound_variants.len(), 1);
        assert_eq!(
            spec.compound_variants[0].conditions["disabled"],
            Condition::from(true)
        );
    }

    #[test]
    fn test_specification_invalid_document() {
        assert!(Specification::from_json_str(r#"{ "variants": 3 }"#).is_err());
    }

    #[test]
    fn test_serialize_omits_empty_fields() {
        let spec = Specification::new().base("a");
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!({ "base": "a" }));
    }
}
