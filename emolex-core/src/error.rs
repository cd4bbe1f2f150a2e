//! Load-time errors.
//!
//! Only construction can fail. Annotating, splitting and identifying a
//! text always produce a value, degrading to sentinels instead of erroring.

use std::path::PathBuf;

use emolex_types::LexiconClass;
use thiserror::Error;

/// Errors raised while loading lexicons, language profiles or configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the resource.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resource was read but is not valid JSON of the expected shape.
    #[error("malformed resource {}: {source}", path.display())]
    Malformed {
        /// Path of the resource, or `<inline>` for in-memory JSON.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A lexicon entry has an empty symbol key.
    #[error("{class} lexicon contains an empty symbol")]
    EmptySymbol {
        /// Class of the offending lexicon.
        class: LexiconClass,
    },

    /// The same symbol was inserted twice.
    #[error("{class} lexicon contains duplicate symbol {symbol:?}")]
    DuplicateSymbol {
        /// Class of the offending lexicon.
        class: LexiconClass,
        /// The repeated symbol.
        symbol: String,
    },

    /// An emoticon pattern failed to compile.
    #[error("cannot build pattern for {symbol:?}: {source}")]
    InvalidPattern {
        /// The symbol whose pattern failed.
        symbol: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A language profile is structurally invalid.
    #[error("invalid language profile {}: {reason}", path.display())]
    InvalidProfile {
        /// Path of the profile.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// The pipeline configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        LoadError::Malformed {
            path: path.into(),
            source,
        }
    }
}
