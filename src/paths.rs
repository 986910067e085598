//! Path and file helpers shared by the homepage and sitemap builders.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Component, Path};

/// The file name that marks a directory as a page (and, directly under the
/// build root, as a book).
pub const INDEX_FILE: &str = "index.html";

/// Fails with [`Error::FileSystem`] if `path` doesn't exist and with
/// [`Error::NotADirectory`] if it exists but isn't a directory.
pub fn require_dir(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|err| Error::FileSystem {
        path: path.to_owned(),
        source: err,
    })?;
    match metadata.is_dir() {
        true => Ok(()),
        false => Err(Error::NotADirectory {
            path: path.to_owned(),
        }),
    }
}

/// Converts a directory path relative to the build root into a URL path. The
/// result always begins and ends with `/` and uses `/` as its separator
/// regardless of platform, so the root itself (an empty path) becomes `/`.
pub fn url_path(relative_dir: &Path) -> String {
    let mut url_path = String::from("/");
    for component in relative_dir.components() {
        if let Component::Normal(segment) = component {
            url_path.push_str(&segment.to_string_lossy());
            url_path.push('/');
        }
    }
    url_path
}

/// Reads `path` as text. Invalid UTF-8 is replaced rather than treated as an
/// error, since pages in the build output aren't guaranteed to be clean.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|err| Error::FileSystem {
        path: path.to_owned(),
        source: err,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    tracing::info!(path = %path.display(), bytes = contents.len(), "writing");
    fs::write(path, contents).map_err(|err| Error::FileSystem {
        path: path.to_owned(),
        source: err,
    })
}
