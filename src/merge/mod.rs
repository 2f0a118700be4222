//! Class conflict resolution.
//!
//! This module provides:
//!
//! - [`ClassMerger`]: The conflict-resolution seam
//! - [`TailwindMerger`]: Built-in merger for utility-first class names
//! - [`MergeConfig`]: Theme, class-group and conflict customization
//! - [`MergeCache`]: Memoized merger that rebuilds when the configuration changes
//! - [`MergeConfigError`]: Errors from an unusable customization

mod cache;
mod config;
mod error;
mod groups;
mod merger;
mod values;

pub use cache::MergeCache;
pub use config::{MergeConfig, MergeConfigExtension, Table};
pub use error::MergeConfigError;
pub use merger::{ClassMerger, TailwindMerger};
