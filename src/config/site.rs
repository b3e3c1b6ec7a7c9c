//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Feed-level and layout settings for a site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Feed
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: AuthorConfig,
    pub copyright: String,

    // Layout
    /// Number of most recent posts left out of the archive page
    pub archive_skip: usize,
    /// Output sub-directory for individual post pages
    pub posts_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog - All posts".to_string(),
            link: "http://example.com/".to_string(),
            description: String::new(),
            author: AuthorConfig::default(),
            copyright: String::new(),

            archive_skip: 5,
            posts_dir: "posts".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, else `_config.yml` in `base_dir` if it exists,
    /// else the defaults
    pub fn resolve<P: AsRef<Path>>(path: Option<&Path>, base_dir: P) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = base_dir.as_ref().join("_config.yml");
        if default_path.exists() {
            tracing::debug!("Loading config from {:?}", default_path);
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Default author identity used in feeds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}
