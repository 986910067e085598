//! Defines the [`Error`] type shared by the homepage and sitemap builders.

use std::path::PathBuf;
use thiserror::Error;

/// The result of a fallible build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure in either builder. None of these are recovered from;
/// the binary reports them and exits non-zero. Messages don't repeat their
/// underlying cause, which is reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when a file or directory in the build output tree can't be
    /// read or written.
    #[error("Accessing '{}'", path.display())]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned when the build output root exists but isn't a directory.
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Returned when the homepage template is missing or unreadable.
    #[error("Opening template file '{}'", path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned for errors while walking the build output tree.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Returned when the project file can't be loaded.
    #[error("Loading configuration '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Returned when the configured base URL isn't an absolute URL.
    #[error("Invalid base URL '{url}'")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
}
