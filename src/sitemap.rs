//! Generates `sitemap.xml` from every `index.html` anywhere in the build
//! output tree.

use crate::build::Summary;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::paths::{require_dir, url_path, write_text, INDEX_FILE};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A page discovered in the build output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SitemapEntry {
    /// The location of the page's `index.html` on disk.
    pub file_path: PathBuf,

    /// The public URL of the page's directory.
    pub url: String,
}

/// Walks `root` depth-first and returns the path of every file named
/// `index.html`, including one directly under `root`.
pub fn find_pages(root: &Path) -> Result<Vec<PathBuf>> {
    require_dir(root)?;
    let mut pages = Vec::new();
    for result in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = result?;
        if entry.file_type().is_file() && entry.file_name() == INDEX_FILE {
            tracing::debug!(path = %entry.path().display(), "found page");
            pages.push(entry.into_path());
        }
    }
    Ok(pages)
}

/// Converts the path of an `index.html` under `root` into its canonical URL:
/// `base_url` followed by the page's directory path with a trailing slash.
pub fn canonical_url(root: &Path, index_file: &Path, base_url: &str) -> Result<String> {
    let relative = index_file
        .strip_prefix(root)
        .ok()
        .and_then(Path::parent)
        .ok_or_else(|| Error::FileSystem {
            path: index_file.to_owned(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a page under '{}'", root.display()),
            ),
        })?;
    Ok(format!("{}{}", base_url, url_path(relative)))
}

/// Collects the [`SitemapEntry`] for every page under `root`, ordered by the
/// page's directory path (so `a/` sorts before `a-b/`, and both before
/// `a/b/`). A trailing slash on `base_url` is ignored.
pub fn collect_entries(root: &Path, base_url: &str) -> Result<Vec<SitemapEntry>> {
    let base_url = base_url.trim_end_matches('/');
    let mut entries = find_pages(root)?
        .into_iter()
        .map(|file_path| {
            let url = canonical_url(root, &file_path, base_url)?;
            Ok(SitemapEntry { file_path, url })
        })
        .collect::<Result<Vec<SitemapEntry>>>()?;
    // Every URL shares `base_url`, so comparing without the trailing slash
    // compares the bare directory paths.
    entries.sort_by(|a, b| {
        a.url
            .trim_end_matches('/')
            .cmp(b.url.trim_end_matches('/'))
    });
    Ok(entries)
}

/// Renders the sitemap document. Each entry gets a bare `<loc>`; no
/// `lastmod`, `changefreq`, or `priority` is emitted.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let urls = entries
        .iter()
        .map(|entry| format!("  <url><loc>{}</loc></url>", entry.url))
        .collect::<Vec<String>>();
    format!(
        "{}\n<urlset xmlns=\"{}\">\n{}\n</urlset>",
        XML_DECLARATION,
        SITEMAP_NAMESPACE,
        urls.join("\n")
    )
}

/// Builds the sitemap from a [`Config`], writing it to
/// [`Config::sitemap_output`].
pub fn build_sitemap(config: &Config) -> Result<Summary> {
    let entries = collect_entries(&config.root_directory, &config.base_url)?;
    let output = config.sitemap_output();
    write_text(&output, &render_sitemap(&entries))?;
    Ok(Summary::Sitemap {
        urls: entries.len(),
        path: output,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_canonical_url_root() -> Result<()> {
        let root = Path::new("/site/dist");
        assert_eq!(
            "https://example.com/",
            canonical_url(root, &root.join("index.html"), "https://example.com")?
        );
        Ok(())
    }

    #[test]
    fn test_canonical_url_nested() -> Result<()> {
        let root = Path::new("/site/dist");
        assert_eq!(
            "https://example.com/book-a/part-2/",
            canonical_url(
                root,
                &root.join("book-a/part-2/index.html"),
                "https://example.com"
            )?
        );
        Ok(())
    }

    #[test]
    fn test_canonical_url_outside_root() {
        assert!(canonical_url(
            Path::new("/site/dist"),
            Path::new("/elsewhere/index.html"),
            "https://example.com"
        )
        .is_err());
    }

    #[test]
    fn test_find_pages_at_every_depth() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "index.html");
        touch(root, "a/index.html");
        touch(root, "a/b/c/index.html");
        touch(root, "a/page.html");
        touch(root, "d/notindex.html");
        fs::create_dir_all(root.join("e/index.html")).unwrap();

        let mut pages = find_pages(root)?;
        pages.sort();
        assert_eq!(
            vec![
                root.join("a/b/c/index.html"),
                root.join("a/index.html"),
                root.join("index.html"),
            ],
            pages
        );
        Ok(())
    }

    #[test]
    fn test_collect_entries_orders_by_directory() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "a-b/index.html");
        touch(root, "a/b/index.html");
        touch(root, "a/index.html");
        touch(root, "index.html");

        let urls = collect_entries(root, "https://x.com")?
            .into_iter()
            .map(|entry| entry.url)
            .collect::<Vec<String>>();
        assert_eq!(
            vec![
                "https://x.com/",
                "https://x.com/a/",
                "https://x.com/a-b/",
                "https://x.com/a/b/",
            ],
            urls
        );
        Ok(())
    }

    #[test]
    fn test_build_sitemap_ignores_trailing_slash_on_base_url() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "index.html");
        touch(tmp.path(), "book-a/index.html");

        let config = Config {
            base_url: "https://example.com/".to_owned(),
            ..Config::for_root(tmp.path())
        };
        build_sitemap(&config)?;
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://example.com/</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/book-a/</loc>"));
        assert!(!sitemap.contains("example.com//"));
        Ok(())
    }

    #[test]
    fn test_find_pages_missing_root() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            find_pages(&tmp.path().join("dist")),
            Err(Error::FileSystem { .. })
        ));
    }

    #[test]
    fn test_render_sitemap() {
        let entries = vec![
            SitemapEntry {
                file_path: PathBuf::from("dist/index.html"),
                url: "https://example.com/".to_owned(),
            },
            SitemapEntry {
                file_path: PathBuf::from("dist/a/index.html"),
                url: "https://example.com/a/".to_owned(),
            },
        ];
        assert_eq!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
             <url><loc>https://example.com/</loc></url>\n  \
             <url><loc>https://example.com/a/</loc></url>\n\
             </urlset>",
            render_sitemap(&entries)
        );
    }

    #[test]
    fn test_build_sitemap_empty_tree() -> Result<()> {
        let tmp = TempDir::new().unwrap();
        let summary = build_sitemap(&Config::for_root(tmp.path()))?;
        assert_eq!("Sitemap generated with 0 URLs", summary.to_string());
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("<url>"));
        Ok(())
    }
}
