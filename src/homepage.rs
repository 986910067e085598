//! Generates the site homepage: one link per book found directly under the
//! build root, substituted into the homepage template.
//!
//! A book is any direct child directory of the root that contains an
//! `index.html` file. Its slug is the directory name and its title is taken
//! from the first `<title>` tag of that page, falling back to the slug.

use crate::build::Summary;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::paths::{read_text, require_dir, write_text, INDEX_FILE};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// The token in the homepage template that is replaced by the book links.
pub const BOOK_LINKS_PLACEHOLDER: &str = "{{BOOK_LINKS}}";

/// Suffixes removed from the end of extracted titles. The first is the
/// em-dash suffix as it appears after a UTF-8 page has been decoded as
/// Windows-1252 upstream; the second is the same suffix decoded correctly.
const TITLE_SUFFIXES: [&str; 2] = [" \u{e2}\u{20ac}\u{201d} Analysis", " \u{2014} Analysis"];

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>([^<]+)</title>").unwrap());

/// A book found under the build root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    /// The directory name, used both as the URL segment and the fallback
    /// title.
    pub slug: String,

    /// The display title.
    pub title: String,
}

impl Book {
    /// Loads the book at `{root}/{slug}`, reading its title from
    /// `{root}/{slug}/index.html`.
    pub fn load(root: &Path, slug: &str) -> Result<Book> {
        let html = read_text(&root.join(slug).join(INDEX_FILE))?;
        Ok(Book {
            slug: slug.to_owned(),
            title: extract_title(&html, slug),
        })
    }

    fn to_link(&self) -> String {
        format!(r#"<li><a href="/{}/">{}</a></li>"#, self.slug, self.title)
    }
}

/// Returns the slugs of every book directly under `root`, sorted. Entries
/// that are plain files or directories without an `index.html` are skipped.
pub fn find_books(root: &Path) -> Result<Vec<String>> {
    require_dir(root)?;
    let read_dir_error = |err| Error::FileSystem {
        path: root.to_owned(),
        source: err,
    };

    let mut slugs = Vec::new();
    for result in fs::read_dir(root).map_err(read_dir_error)? {
        let entry = result.map_err(read_dir_error)?;
        let path = entry.path();
        if path.is_dir() && path.join(INDEX_FILE).is_file() {
            let slug = entry.file_name().to_string_lossy().into_owned();
            tracing::debug!(%slug, "found book");
            slugs.push(slug);
        } else {
            tracing::debug!(path = %path.display(), "skipping");
        }
    }
    slugs.sort();
    Ok(slugs)
}

/// Returns the text of the first `<title>` tag in `html` with any legacy
/// " — Analysis" suffix removed, or `slug` if there is no title tag.
pub fn extract_title(html: &str, slug: &str) -> String {
    match TITLE_RE.captures(html) {
        Some(captures) => {
            let title = &captures[1];
            TITLE_SUFFIXES
                .iter()
                .find_map(|suffix| title.strip_suffix(suffix))
                .unwrap_or(title)
                .to_owned()
        }
        None => slug.to_owned(),
    }
}

/// Renders one `<li>` link per book, newline-joined.
pub fn render_links(books: &[Book]) -> String {
    books
        .iter()
        .map(Book::to_link)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Replaces the first occurrence of [`BOOK_LINKS_PLACEHOLDER`] in `template`
/// with `links`. A template without the placeholder comes back unchanged.
pub fn apply_template(template: &str, links: &str) -> String {
    template.replacen(BOOK_LINKS_PLACEHOLDER, links, 1)
}

fn load_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| Error::Template {
        path: path.to_owned(),
        source: err,
    })
}

/// Builds the homepage from a [`Config`]: finds the books under
/// [`Config::root_directory`], renders them into [`Config::template_path`],
/// and writes the result to [`Config::homepage_output`]. Nothing is written
/// unless every preceding step succeeds.
pub fn build_homepage(config: &Config) -> Result<Summary> {
    let slugs = find_books(&config.root_directory)?;
    let template = load_template(&config.template_path)?;
    let books = slugs
        .iter()
        .map(|slug| Book::load(&config.root_directory, slug))
        .collect::<Result<Vec<Book>>>()?;

    let output = config.homepage_output();
    write_text(&output, &apply_template(&template, &render_links(&books)))?;
    Ok(Summary::Homepage {
        books: books.len(),
        path: output,
    })
}
