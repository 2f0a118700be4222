//! Class-list composition.
//!
//! [`cn_base`] joins class fragments into a single normalized string. Falsy
//! entries are skipped, and an empty result is reported as `None` rather than
//! `""` so callers never join in a stray separator.

/// One entry of a class list.
///
/// Lists nest a single level: a [`ClassValue::List`] holds plain fragments,
/// which is all the resolver ever produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValue {
    /// A fragment of space-separated class tokens.
    Class(String),
    /// A sequence of fragments flattened in place.
    List(Vec<String>),
    /// A falsy entry (`false`, `null`, `undefined`) that contributes nothing.
    Skip,
}

impl From<&str> for ClassValue {
    fn from(value: &str) -> Self {
        ClassValue::Class(value.to_string())
    }
}

impl From<String> for ClassValue {
    fn from(value: String) -> Self {
        ClassValue::Class(value)
    }
}

impl From<&String> for ClassValue {
    fn from(value: &String) -> Self {
        ClassValue::Class(value.clone())
    }
}

impl<T: Into<ClassValue>> From<Option<T>> for ClassValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ClassValue::Skip, Into::into)
    }
}

impl From<Vec<String>> for ClassValue {
    fn from(value: Vec<String>) -> Self {
        ClassValue::List(value)
    }
}

impl From<bool> for ClassValue {
    /// Booleans never carry classes; `cond && "x"` style guards yield `Skip`.
    fn from(_: bool) -> Self {
        ClassValue::Skip
    }
}

/// Joins class fragments into one space-normalized string.
///
/// Lists are flattened one level, falsy and blank entries are dropped, and
/// runs of whitespace collapse to a single space.
///
/// # Example
///
/// ```rust
/// use variations::{cn_base, ClassValue};
///
/// let disabled = false;
/// let classes = cn_base([
///     ClassValue::from("px-4  py-2"),
///     ClassValue::from(disabled.then_some("opacity-50")),
///     ClassValue::from(vec!["font-bold".to_string()]),
/// ]);
/// assert_eq!(classes.as_deref(), Some("px-4 py-2 font-bold"));
///
/// assert_eq!(cn_base([ClassValue::Skip, ClassValue::from("  ")]), None);
/// ```
pub fn cn_base<I>(classes: I) -> Option<String>
where
    I: IntoIterator,
    I::Item: Into<ClassValue>,
{
    let mut tokens: Vec<String> = Vec::new();
    let mut push = |fragment: &str| {
        tokens.extend(fragment.split_whitespace().map(str::to_string));
    };

    for class in classes {
        match class.into() {
            ClassValue::Class(fragment) => push(&fragment),
            ClassValue::List(fragments) => fragments.iter().for_each(|f| push(f.as_str())),
            ClassValue::Skip => {}
        }
    }

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}
