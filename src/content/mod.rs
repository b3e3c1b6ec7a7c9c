//! Content module - post files, their front-matter, and markdown

pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{classify, Line};
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{join_tags, parse_tags, Post, Posts, Tag, User};
