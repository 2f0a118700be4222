//! Call-time props.

use indexmap::IndexMap;
use serde_json::Value;

use crate::spec::PropValue;

/// Values passed to a [`Variation`](crate::Variation) when resolving classes.
///
/// Axis values select variants; `class` and `class_name` are appended last.
/// For slotted components, [`slot_class`](Props::slot_class) appends classes
/// to one slot.
///
/// # Example
///
/// ```rust
/// use variations::Props;
///
/// let props = Props::new()
///     .set("color", "secondary")
///     .set("fullWidth", true)
///     .class("mt-2");
///
/// let same = Props::from_json(&serde_json::json!({
///     "color": "secondary",
///     "fullWidth": true,
///     "class": "mt-2"
/// }));
/// assert_eq!(props, same);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    values: IndexMap<String, PropValue>,
    class: Option<String>,
    class_name: Option<String>,
    slot_classes: IndexMap<String, String>,
}

impl Props {
    /// Creates empty props: every axis falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a variant axis.
    pub fn set(mut self, axis: &str, value: impl Into<PropValue>) -> Self {
        self.values.insert(axis.to_string(), value.into());
        self
    }

    /// Appends classes after every variant fragment.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Appends classes after `class`.
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Appends classes to a single slot.
    pub fn slot_class(mut self, slot: &str, class: impl Into<String>) -> Self {
        self.slot_classes.insert(slot.to_string(), class.into());
        self
    }

    /// Value supplied for `axis`, if any.
    pub fn get(&self, axis: &str) -> Option<&PropValue> {
        self.values.get(axis)
    }

    pub fn class_value(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn class_name_value(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Classes supplied for `slot`, if any.
    pub fn slot_class_value(&self, slot: &str) -> Option<&str> {
        self.slot_classes.get(slot).map(String::as_str)
    }

    /// Reads props from a JSON object.
    ///
    /// `class`, `className` and `classNames` (slot name to classes) are
    /// reserved; every other key is an axis value. Arrays and objects cannot
    /// select a variant and are ignored, as is anything that is not an object.
    pub fn from_json(value: &Value) -> Self {
        let mut props = Props::new();
        let Some(object) = value.as_object() else {
            return props;
        };

        for (key, value) in object {
            match key.as_str() {
                "class" => props.class = value.as_str().map(str::to_string),
                "className" => props.class_name = value.as_str().map(str::to_string),
                "classNames" => {
                    if let Some(slots) = value.as_object() {
                        props.slot_classes = slots
                            .iter()
                            .filter_map(|(slot, class)| {
                                class.as_str().map(|c| (slot.clone(), c.to_string()))
                            })
                            .collect();
                    }
                }
                _ => {
                    if let Some(value) = prop_value(value) {
                        props.values.insert(key.clone(), value);
                    }
                }
            }
        }

        props
    }
}

fn prop_value(value: &Value) -> Option<PropValue> {
    match value {
        Value::Null => Some(PropValue::Null),
        Value::Bool(b) => Some(PropValue::Bool(*b)),
        Value::Number(n) => Some(
            n.as_i64()
                .map_or_else(|| PropValue::Number(n.clone()), PropValue::Int),
        ),
        Value::String(s) => Some(PropValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}
