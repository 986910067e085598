//! Exports [`build_all`], which runs the homepage step ([`crate::homepage`])
//! and then the sitemap step ([`crate::sitemap`]), and the [`Summary`] each
//! step reports.

use crate::config::Config;
use crate::error::Result;
use crate::homepage::build_homepage;
use crate::sitemap::build_sitemap;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a build step produced. Its [`fmt::Display`] form is the one-line
/// status message printed by the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Summary {
    Homepage { books: usize, path: PathBuf },
    Sitemap { urls: usize, path: PathBuf },
}

impl Summary {
    /// The file the step wrote.
    pub fn path(&self) -> &Path {
        match self {
            Summary::Homepage { path, .. } => path,
            Summary::Sitemap { path, .. } => path,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Summary::Homepage { books, .. } => {
                write!(f, "Homepage generated with {} books", books)
            }
            Summary::Sitemap { urls, .. } => {
                write!(f, "Sitemap generated with {} URLs", urls)
            }
        }
    }
}

/// Builds the homepage and then the sitemap. The sitemap step doesn't run if
/// the homepage step fails, so the sitemap always reflects the new homepage.
pub fn build_all(config: &Config) -> Result<Vec<Summary>> {
    let homepage = build_homepage(config)?;
    let sitemap = build_sitemap(config)?;
    Ok(vec![homepage, sitemap])
}
