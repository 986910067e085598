//! The library code for `postbuild`, a pair of post-processing steps run over
//! a static site's build output directory once the pages themselves have
//! been generated:
//!
//! 1. Writing the homepage, which links to every book found directly under
//!    the output root ([`crate::homepage`])
//! 2. Writing `sitemap.xml`, which lists the URL of every `index.html` in the
//!    output tree ([`crate::sitemap`])
//!
//! Both steps take an explicit [`config::Config`], scan the tree in a single
//! synchronous pass, render their document in memory, and only then write it,
//! so a failed run never leaves a partial file behind. [`build::build_all`]
//! runs them in sequence.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod error;
pub mod homepage;
pub mod paths;
pub mod sitemap;

pub use error::{Error, Result};
