//! deftly: a small static blog generator
//!
//! Posts are markdown files with `author:`, `title:`, `date:`, `tags:` and
//! `description:` lines. A build renders every post through a directory of
//! Tera templates and writes an index, about, contact and archive page plus
//! Atom and RSS feeds.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

pub use error::{Error, Result};

use std::path::PathBuf;

/// A site to build
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Directory of post files
    pub source_dir: PathBuf,
    /// Directory of `*.html` templates
    pub template_dir: PathBuf,
    /// Output directory
    pub public_dir: PathBuf,
}

impl Site {
    pub fn new(
        config: config::SiteConfig,
        source_dir: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            source_dir: source_dir.into(),
            template_dir: template_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    /// Generate the static site
    pub fn build(&self) -> Result<content::Posts> {
        commands::build::run(self)
    }
}
