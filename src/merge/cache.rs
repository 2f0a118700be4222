//! Memoized class merger shared by every variation.
//!
//! Building a merger means compiling every class group, so it is done once
//! and reused. The cache tracks the most recently adopted [`MergeConfig`];
//! whenever a factory brings a different non-empty configuration, the cache
//! marks itself dirty and rebuilds before the next resolution.
//!
//! The adopted configuration is shared: a change made while creating one
//! variation applies to every later resolution through the same cache,
//! including variations created earlier.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

use super::config::MergeConfig;
use super::error::MergeConfigError;
use super::merger::{ClassMerger, TailwindMerger};
use crate::classes::{cn_base, ClassValue};
use crate::config::Config;

#[derive(Debug, Default)]
struct CacheState {
    merger: Option<Arc<dyn ClassMerger>>,
    config: MergeConfig,
    dirty: bool,
    rebuilds: usize,
}

/// Lazily built, configuration-aware class merger.
///
/// # Example
///
/// ```rust
/// use variations::{ClassValue, Config, MergeCache};
///
/// let cache = MergeCache::new();
/// let classes = [ClassValue::from("p-2"), ClassValue::from("p-4")];
/// let merged = cache.resolve(classes, &Config::default());
/// assert_eq!(merged.as_deref(), Some("p-4"));
/// assert_eq!(cache.rebuild_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MergeCache {
    state: Mutex<CacheState>,
}

static GLOBAL_CACHE: Lazy<Arc<MergeCache>> = Lazy::new(|| Arc::new(MergeCache::new()));

impl MergeCache {
    /// Creates an empty cache; the merger is built on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache used by [`create_variation`](crate::create_variation).
    pub fn global() -> Arc<MergeCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the configuration a factory was created with.
    ///
    /// Empty configurations leave the cache untouched. A configuration that
    /// differs from the adopted one is validated, adopted, and flags the
    /// merger for rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce a merger; the
    /// cache keeps its previous configuration in that case.
    pub fn observe(&self, config: &MergeConfig) -> Result<(), MergeConfigError> {
        if config.is_empty() {
            return Ok(());
        }

        let mut state = self.lock();
        if state.config == *config {
            return Ok(());
        }

        config.validate()?;
        debug!(
            class_groups = config.class_groups.len() + config.extend.class_groups.len(),
            theme_keys = config.theme.len() + config.extend.theme.len(),
            "merge configuration changed"
        );
        state.config = config.clone();
        state.dirty = true;
        Ok(())
    }

    /// Returns the current merger, rebuilding it if needed.
    pub fn merger(&self) -> Arc<dyn ClassMerger> {
        let mut state = self.lock();
        if !state.dirty {
            if let Some(merger) = &state.merger {
                return Arc::clone(merger);
            }
        }

        let merger: Arc<dyn ClassMerger> = if state.config.is_empty() {
            Arc::new(TailwindMerger::default())
        } else {
            Arc::new(TailwindMerger::new(&state.config))
        };
        state.merger = Some(Arc::clone(&merger));
        state.dirty = false;
        state.rebuilds += 1;
        debug!(rebuilds = state.rebuilds, "class merger rebuilt");
        merger
    }

    /// Composes `classes` and resolves conflicts according to `config`.
    ///
    /// When `config.tw_merge` is off the merger is bypassed and the plain
    /// composition is returned. An empty result is `None`.
    pub fn resolve<I>(&self, classes: I, config: &Config) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<ClassValue>,
    {
        let composed = cn_base(classes);
        if !config.tw_merge {
            return composed;
        }

        let merger = self.merger();
        let merged = merger.merge(composed.as_deref().unwrap_or_default());
        trace!(input = ?composed, output = %merged, "classes merged");
        if merged.is_empty() {
            None
        } else {
            Some(merged)
        }
    }

    /// Number of times the merger has been (re)built.
    pub fn rebuild_count(&self) -> usize {
        self.lock().rebuilds
    }

    /// The configuration the merger is currently built from.
    pub fn config(&self) -> MergeConfig {
        self.lock().config.clone()
    }

    /// Drops the merger and the adopted configuration.
    ///
    /// Mainly useful for isolating tests that share the global cache.
    pub fn reset(&self) {
        *self.lock() = CacheState::default();
    }
}
