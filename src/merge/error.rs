//! Resolver configuration errors.

use thiserror::Error;

/// A [`MergeConfig`](super::MergeConfig) that cannot be turned into a
/// class merger.
///
/// These are programmer errors in the customization object; they surface
/// when a factory hands the configuration to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeConfigError {
    /// A class group pattern references a theme key that is not defined.
    #[error("class group '{group}' references unknown theme key '{key}'")]
    UnknownThemeKey { group: String, key: String },

    /// An arbitrary-value pattern names a value kind that does not exist.
    #[error("class group '{group}' accepts unknown value kind '{kind}'")]
    UnknownValueKind { group: String, kind: String },

    /// A conflict rule names a class group that is not defined.
    #[error("conflict rule for '{from}' references unknown class group '{to}'")]
    UnknownClassGroup { from: String, to: String },

    /// A class group contains an empty pattern.
    #[error("class group '{group}' contains an empty pattern")]
    EmptyPattern { group: String },
}
