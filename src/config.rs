//! Factory configuration.
//!
//! [`Config`] carries the behavior flags a variation is created with;
//! [`ConfigOverride`] is its partial form, used to layer call-site settings
//! over a factory's defaults.

use serde::{Deserialize, Serialize};

use crate::merge::MergeConfig;
use crate::spec::SpecError;

/// Responsive variant expansion setting.
///
/// Recorded on every variation so callers can inspect it; expansion itself
/// is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveVariants {
    /// Enables or disables expansion for every breakpoint.
    Enabled(bool),
    /// Enables expansion for the listed breakpoints only.
    Breakpoints(Vec<String>),
}

impl ResponsiveVariants {
    /// Returns `true` unless expansion is disabled outright.
    pub fn is_enabled(&self) -> bool {
        match self {
            ResponsiveVariants::Enabled(enabled) => *enabled,
            ResponsiveVariants::Breakpoints(breakpoints) => !breakpoints.is_empty(),
        }
    }
}

impl Default for ResponsiveVariants {
    fn default() -> Self {
        ResponsiveVariants::Enabled(false)
    }
}

/// Behavior flags for a variation.
///
/// # Example
///
/// ```rust
/// use variations::Config;
///
/// let config = Config::from_json_str(r#"{ "twMerge": false }"#).unwrap();
/// assert!(!config.tw_merge);
/// assert!(config.tw_merge_config.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Resolve class conflicts; when off, output is plain composition.
    pub tw_merge: bool,
    /// Customization for the class merger.
    pub tw_merge_config: MergeConfig,
    /// Responsive expansion setting, carried through untouched.
    pub responsive_variants: ResponsiveVariants,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tw_merge: true,
            tw_merge_config: MergeConfig::default(),
            responsive_variants: ResponsiveVariants::default(),
        }
    }
}

impl Config {
    /// Returns this configuration with every field set in `over` replaced.
    pub fn with_override(&self, over: &ConfigOverride) -> Config {
        Config {
            tw_merge: over.tw_merge.unwrap_or(self.tw_merge),
            tw_merge_config: over
                .tw_merge_config
                .clone()
                .unwrap_or_else(|| self.tw_merge_config.clone()),
            responsive_variants: over
                .responsive_variants
                .clone()
                .unwrap_or_else(|| self.responsive_variants.clone()),
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// A partial [`Config`]; unset fields defer to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tw_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tw_merge_config: Option<MergeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive_variants: Option<ResponsiveVariants>,
}

impl ConfigOverride {
    /// Creates an override that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether class conflicts are resolved.
    pub fn tw_merge(mut self, enabled: bool) -> Self {
        self.tw_merge = Some(enabled);
        self
    }

    /// Sets the class merger customization.
    pub fn tw_merge_config(mut self, config: MergeConfig) -> Self {
        self.tw_merge_config = Some(config);
        self
    }

    /// Sets the responsive expansion setting.
    pub fn responsive_variants(mut self, responsive: ResponsiveVariants) -> Self {
        self.responsive_variants = Some(responsive);
        self
    }

    /// Shallow merge: fields set in `over` win.
    pub fn merge(&self, over: &ConfigOverride) -> ConfigOverride {
        ConfigOverride {
            tw_merge: over.tw_merge.or(self.tw_merge),
            tw_merge_config: over
                .tw_merge_config
                .clone()
                .or_else(|| self.tw_merge_config.clone()),
            responsive_variants: over
                .responsive_variants
                .clone()
                .or_else(|| self.responsive_variants.clone()),
        }
    }

    /// Applies this override to the defaults.
    pub fn resolve(&self) -> Config {
        Config::default().with_override(self)
    }
}

impl From<Config> for ConfigOverride {
    fn from(config: Config) -> Self {
        ConfigOverride {
            tw_merge: Some(config.tw_merge),
            tw_merge_config: Some(config.tw_merge_config),
            responsive_variants: Some(config.responsive_variants),
        }
    }
}
