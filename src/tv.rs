//! Factories with a fixed default configuration.
//!
//! [`create_tv`](crate::create_tv) captures a [`ConfigOverride`] once; every
//! component created through the returned [`TvFactory`] starts from it, and a
//! per-call override is layered on top.

use std::sync::Arc;

use crate::config::{Config, ConfigOverride};
use crate::merge::{MergeCache, MergeConfigError};
use crate::spec::Specification;
use crate::variation::Variation;

/// Creates [`Variation`]s that share a base configuration.
///
/// # Example
///
/// ```rust
/// use variations::{create_tv, ConfigOverride, Props, Specification};
///
/// let tv = create_tv(ConfigOverride::new().tw_merge(false));
/// let spec = Specification::new().base("p-2 p-4");
///
/// let raw = tv.create(&spec, None).unwrap();
/// assert_eq!(raw.class(&Props::new()).as_deref(), Some("p-2 p-4"));
///
/// let merged = tv.create(&spec, Some(&ConfigOverride::new().tw_merge(true))).unwrap();
/// assert_eq!(merged.class(&Props::new()).as_deref(), Some("p-4"));
/// ```
#[derive(Debug, Clone)]
pub struct TvFactory {
    base: ConfigOverride,
    cache: Arc<MergeCache>,
}

impl TvFactory {
    /// Creates a factory backed by the process-wide cache.
    pub fn new(base: ConfigOverride) -> Self {
        Self::with_cache(base, MergeCache::global())
    }

    /// Creates a factory backed by `cache`.
    pub fn with_cache(base: ConfigOverride, cache: Arc<MergeCache>) -> Self {
        Self { base, cache }
    }

    /// Creates a component; fields set in `config` replace the factory's.
    ///
    /// # Errors
    ///
    /// Returns an error if the effective merge configuration is unusable.
    pub fn create(
        &self,
        options: &Specification,
        config: Option<&ConfigOverride>,
    ) -> Result<Variation, MergeConfigError> {
        let effective = match config {
            Some(over) => self.base.merge(over),
            None => self.base.clone(),
        };
        Variation::new(options, effective.resolve(), Arc::clone(&self.cache))
    }

    /// The configuration components get when no override is passed.
    pub fn config(&self) -> Config {
        self.base.resolve()
    }
}
