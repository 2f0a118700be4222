//! Small helpers shared by the merger and the resolver.
//!
//! These mirror the primitive operations of the variant model: empty-map
//! checks, boolean-to-key coercion, shallow merges and whitespace cleanup.

use indexmap::IndexMap;
use std::hash::Hash;

use crate::classes::{cn_base, ClassValue};
use crate::spec::PropValue;

/// Returns `true` if the map is absent or has no entries.
///
/// # Example
///
/// ```rust
/// use indexmap::IndexMap;
/// use variations::is_empty_map;
///
/// let empty: IndexMap<String, String> = IndexMap::new();
/// assert!(is_empty_map(Some(&empty)));
/// assert!(is_empty_map::<String, String>(None));
/// ```
pub fn is_empty_map<K, V>(map: Option<&IndexMap<K, V>>) -> bool {
    map.map_or(true, IndexMap::is_empty)
}

/// Coerces a prop value into the string key used for variant lookups.
///
/// Absent values, `null` and `false` all become `"false"`. Every other
/// value becomes its string form, so `true` and `"true"` address the same
/// key.
///
/// # Example
///
/// ```rust
/// use variations::{falsy_to_string, PropValue};
///
/// assert_eq!(falsy_to_string(None), "false");
/// assert_eq!(falsy_to_string(Some(&PropValue::Bool(true))), "true");
/// assert_eq!(falsy_to_string(Some(&PropValue::from("lg"))), "lg");
/// ```
pub fn falsy_to_string(value: Option<&PropValue>) -> String {
    match value {
        None | Some(PropValue::Null) | Some(PropValue::Bool(false)) => "false".to_string(),
        Some(PropValue::Bool(true)) => "true".to_string(),
        Some(PropValue::Int(n)) => n.to_string(),
        Some(PropValue::Number(n)) => n.to_string(),
        Some(PropValue::Text(s)) => s.clone(),
    }
}

/// Shallow merge: keys of `over` replace keys of `under`.
///
/// Keys already present in `under` keep their position; new keys are
/// appended in the order `over` declares them.
pub fn merge_objects<K, V>(under: &IndexMap<K, V>, over: &IndexMap<K, V>) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    let mut merged = under.clone();
    for (key, value) in over {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Concatenates two sequences, preserving order.
pub fn flat_merge_arrays<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    merged.extend_from_slice(first);
    merged.extend_from_slice(second);
    merged
}

/// Collapses runs of whitespace into a single space and trims both ends.
///
/// # Example
///
/// ```rust
/// use variations::remove_extra_spaces;
///
/// assert_eq!(remove_extra_spaces("  px-4 \n  py-2  "), "px-4 py-2");
/// ```
pub fn remove_extra_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins two slot tables, composing the fragments of keys present in both.
///
/// Every key of `first` is kept in place; keys of `second` are composed onto
/// the existing entry or appended.
pub fn join_objects(
    first: &IndexMap<String, Option<String>>,
    second: &IndexMap<String, Option<String>>,
) -> IndexMap<String, Option<String>> {
    let mut joined = first.clone();
    for (key, value) in second {
        let existing = joined.get(key).cloned().flatten();
        let composed = cn_base([ClassValue::from(existing), ClassValue::from(value.clone())]);
        joined.insert(key.clone(), composed);
    }
    joined
}
