//! Class merger customization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::MergeConfigError;
use super::groups::Tables;

/// Group id or theme key mapped to a list of entries.
pub type Table = BTreeMap<String, Vec<String>>;

/// Customization for the built-in class merger.
///
/// Top-level tables replace the default entry with the same key; the
/// [`extend`](MergeConfig::extend) block then appends to whatever is in
/// effect. Maps are ordered, so equality does not depend on the order keys
/// were declared in.
///
/// Class group patterns come in three shapes:
///
/// | Pattern | Matches |
/// |---------|---------|
/// | `block` | exactly `block` |
/// | `p-*` | `p-` followed by any value, including `p-[3px]` |
/// | `text-$fontSize` | `text-` followed by a value listed in `theme.fontSize` |
///
/// # Example
///
/// ```rust
/// use variations::MergeConfig;
///
/// let config = MergeConfig::new()
///     .theme("fontSize", ["tiny", "huge"])
///     .class_group("shadow-glow", ["glow-*"])
///     .extend_class_group("font-size", ["text-$fontSize"]);
///
/// assert!(!config.is_empty());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeConfig {
    /// Prefix every utility carries (e.g. `tw-`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Modifier separator; `:` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    pub theme: Table,
    pub class_groups: Table,
    pub conflicting_class_groups: Table,
    pub conflicting_class_group_modifiers: Table,
    pub extend: MergeConfigExtension,
}

/// Additive tables layered on top of the effective configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeConfigExtension {
    pub theme: Table,
    pub class_groups: Table,
    pub conflicting_class_groups: Table,
    pub conflicting_class_group_modifiers: Table,
}

impl MergeConfigExtension {
    /// Returns `true` if no table has entries.
    pub fn is_empty(&self) -> bool {
        self.theme.is_empty()
            && self.class_groups.is_empty()
            && self.conflicting_class_groups.is_empty()
            && self.conflicting_class_group_modifiers.is_empty()
    }
}

impl MergeConfig {
    /// Creates an empty configuration (default merger behavior).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing is customized.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.separator.is_none()
            && self.theme.is_empty()
            && self.class_groups.is_empty()
            && self.conflicting_class_groups.is_empty()
            && self.conflicting_class_group_modifiers.is_empty()
            && self.extend.is_empty()
    }

    /// Sets the utility prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the modifier separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Replaces a theme scale.
    pub fn theme<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.theme.insert(key.to_string(), collect(values));
        self
    }

    /// Replaces (or defines) a class group.
    pub fn class_group<I, S>(mut self, id: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_groups.insert(id.to_string(), collect(patterns));
        self
    }

    /// Replaces the groups a class group overrides.
    pub fn conflicting_class_groups<I, S>(mut self, id: &str, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicting_class_groups
            .insert(id.to_string(), collect(groups));
        self
    }

    /// Replaces the groups a class group overrides when it carries a postfix modifier.
    pub fn conflicting_class_group_modifiers<I, S>(mut self, id: &str, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicting_class_group_modifiers
            .insert(id.to_string(), collect(groups));
        self
    }

    /// Appends values to a theme scale.
    pub fn extend_theme<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append(&mut self.extend.theme, key, values);
        self
    }

    /// Appends patterns to a class group.
    pub fn extend_class_group<I, S>(mut self, id: &str, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append(&mut self.extend.class_groups, id, patterns);
        self
    }

    /// Appends conflicting groups to a class group.
    pub fn extend_conflicting_class_groups<I, S>(mut self, id: &str, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append(&mut self.extend.conflicting_class_groups, id, groups);
        self
    }

    /// Checks that every pattern and conflict rule resolves against the
    /// effective tables (defaults plus this customization).
    ///
    /// # Errors
    ///
    /// Returns the first unresolvable reference found.
    pub fn validate(&self) -> Result<(), MergeConfigError> {
        Tables::from_config(self).check()
    }
}

fn collect<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

fn append<I, S>(table: &mut Table, key: &str, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    table
        .entry(key.to_string())
        .or_default()
        .extend(values.into_iter().map(Into::into));
}
