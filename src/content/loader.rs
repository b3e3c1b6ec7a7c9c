//! Post loader - reads every post in a source directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{frontmatter, MarkdownRenderer, Post, Posts};
use crate::error::{Error, Result};

/// Loads and renders posts from a flat source directory
pub struct PostLoader {
    renderer: MarkdownRenderer,
    posts_dir: String,
}

impl PostLoader {
    /// `posts_dir` is the URL directory posts are published under
    pub fn new(posts_dir: &str) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            posts_dir: posts_dir.trim_matches('/').to_string(),
        }
    }

    /// Source files in `src`, in file name order. Hidden files and
    /// sub-directories are skipped.
    pub fn source_files(&self, src: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(src)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| src.to_path_buf(), Path::to_path_buf);
                Error::io(path, e.into())
            })?;

            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if entry.file_type().is_file() && !hidden {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Parse one post file and render its body
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let mut post = frontmatter::parse_file(path)?;
        post.render_body(&self.renderer);
        post.url = self.post_url(path);
        Ok(post)
    }

    /// Load every post in `src`, newest first
    pub fn load_posts(&self, src: &Path) -> Result<Posts> {
        let mut posts = Vec::new();
        for path in self.source_files(src)? {
            posts.push(self.load_post(&path)?);
        }

        let mut posts = Posts::from(posts);
        posts.sort_by_date();
        Ok(posts)
    }

    /// `/posts/<name>.html` for a source file `<name>.md`
    pub fn post_url(&self, path: &Path) -> String {
        let page = html_file_name(path);
        if self.posts_dir.is_empty() {
            format!("/{}", page)
        } else {
            format!("/{}/{}", self.posts_dir, page)
        }
    }
}

/// The source file name with its extension swapped for `.html`
fn html_file_name(path: &Path) -> String {
    let name = path.file_name().map(Path::new).unwrap_or(path);
    name.with_extension("html").to_string_lossy().to_string()
}
