//! Error types for the migration core
//!
//! Only fatal conditions are errors. Fields that cannot be migrated are
//! recorded in the aggregated log instead and never surface here.

use inferred_source::PatchError;
use std::path::PathBuf;

/// Errors from the virtual file tree
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// IO error during read or write
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not UTF-8
    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },
}

impl TreeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading a [`MigrationConfig`](crate::MigrationConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid migration config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Fatal errors for one project's migration
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// None of the configured config file names exist under the project root
    #[error("no Remix config file found for project '{project}' under '{root}'")]
    ConfigFileNotFound { project: String, root: String },

    /// Config file could not be parsed or patched
    #[error("failed to patch {path}: {source}")]
    Patch {
        path: String,
        #[source]
        source: PatchError,
    },

    /// File tree error
    #[error("file tree error: {0}")]
    Tree(#[from] TreeError),
}

impl MigrationError {
    /// Create patch error for path
    pub fn patch(path: impl Into<String>, source: PatchError) -> Self {
        Self::Patch {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;
