//! Defines [`Config`], the explicit configuration handed to both builders,
//! and the logic for layering it from defaults, a `postbuild.yaml` project
//! file, and command-line overrides.

use crate::error::{Error, Result};
use crate::paths::INDEX_FILE;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "postbuild.yaml";

pub const DEFAULT_ROOT_DIRECTORY: &str = "./dist";
pub const DEFAULT_TEMPLATE_PATH: &str = "./templates/homepage.html";
pub const DEFAULT_BASE_URL: &str = "https://luminait.app";
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// A partial configuration. This is both the shape of `postbuild.yaml` and
/// the set of command-line overrides; any field left as `None` falls through
/// to the layer beneath it.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub root_directory: Option<PathBuf>,
    pub template_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub homepage_output: Option<PathBuf>,
    pub sitemap_output: Option<PathBuf>,
}

impl Settings {
    /// Resolves every relative path against `dir`. Used for project files so
    /// their paths mean the same thing regardless of the working directory.
    fn relative_to(self, dir: &Path) -> Settings {
        let join = |p: Option<PathBuf>| p.map(|p| dir.join(p));
        Settings {
            root_directory: join(self.root_directory),
            template_path: join(self.template_path),
            base_url: self.base_url,
            homepage_output: join(self.homepage_output),
            sitemap_output: join(self.sitemap_output),
        }
    }
}

/// The resolved configuration for a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The build output directory scanned by both builders.
    pub root_directory: PathBuf,

    /// The homepage template. It should contain a `{{BOOK_LINKS}}`
    /// placeholder.
    pub template_path: PathBuf,

    /// The public site origin, without a trailing slash (e.g.,
    /// `https://example.com`).
    pub base_url: String,

    /// Where the homepage is written. Defaults to `{root}/index.html`.
    pub homepage_output: Option<PathBuf>,

    /// Where the sitemap is written. Defaults to `{root}/sitemap.xml`.
    pub sitemap_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_directory: PathBuf::from(DEFAULT_ROOT_DIRECTORY),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            base_url: DEFAULT_BASE_URL.to_owned(),
            homepage_output: None,
            sitemap_output: None,
        }
    }
}

impl Config {
    /// Builds a configuration for the given build root with every other
    /// field at its default.
    pub fn for_root(root_directory: impl Into<PathBuf>) -> Config {
        Config {
            root_directory: root_directory.into(),
            ..Config::default()
        }
    }

    /// Looks for `postbuild.yaml` in `dir` and then in each of its ancestors,
    /// loading the first one found. If there is none, the defaults are
    /// returned.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.is_file() {
            return Config::from_project_file(&path);
        }
        match dir.parent() {
            Some(parent) => Config::from_directory(parent),
            None => {
                tracing::debug!("no {} found; using defaults", PROJECT_FILE);
                Ok(Config::default())
            }
        }
    }

    /// Loads the defaults overlaid with the project file at `path`.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let config_error = |message: String| Error::Config {
            path: path.to_owned(),
            message,
        };
        let contents =
            std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        // An empty file deserializes as YAML null rather than an empty map.
        let settings: Settings = match contents.trim().is_empty() {
            true => Settings::default(),
            false => serde_yaml::from_str(&contents).map_err(|e| config_error(e.to_string()))?,
        };
        let project_root = path.parent().unwrap_or_else(|| Path::new("."));
        tracing::debug!(path = %path.display(), "loaded project file");
        Config::default().apply(settings.relative_to(project_root))
    }

    /// Overlays `settings` onto this configuration, validating the base URL
    /// if one is given.
    pub fn apply(self, settings: Settings) -> Result<Config> {
        Ok(Config {
            root_directory: settings.root_directory.unwrap_or(self.root_directory),
            template_path: settings.template_path.unwrap_or(self.template_path),
            base_url: match settings.base_url {
                Some(url) => normalize_base_url(&url)?,
                None => self.base_url,
            },
            homepage_output: settings.homepage_output.or(self.homepage_output),
            sitemap_output: settings.sitemap_output.or(self.sitemap_output),
        })
    }

    pub fn homepage_output(&self) -> PathBuf {
        match &self.homepage_output {
            Some(path) => path.clone(),
            None => self.root_directory.join(INDEX_FILE),
        }
    }

    pub fn sitemap_output(&self) -> PathBuf {
        match &self.sitemap_output {
            Some(path) => path.clone(),
            None => self.root_directory.join(SITEMAP_FILE),
        }
    }
}

/// Checks that `url` is absolute and strips any trailing slashes so that
/// joining it with a `/`-prefixed path never doubles the slash.
pub fn normalize_base_url(url: &str) -> Result<String> {
    Url::parse(url).map_err(|e| Error::BaseUrl {
        url: url.to_owned(),
        source: e,
    })?;
    Ok(url.trim_end_matches('/').to_owned())
}
