//! Post, author and tag models

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::MarkdownRenderer;
use crate::helpers::{format_rfc1123, zero_date, PostDate};

lazy_static! {
    /// `First Last <user@example.com>`
    static ref USER_LINE_RE: Regex = Regex::new(r"^(.*)\s(.*)\s<(.*)>$").unwrap();
}

/// The author of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Unused
    pub pubkey: Vec<u8>,
    /// Unused
    pub username: String,
}

impl User {
    /// Parse a `First Last <user@example.com>` string
    ///
    /// Text of any other shape yields a user with empty fields.
    pub fn parse(s: &str) -> Self {
        match USER_LINE_RE.captures(s) {
            Some(caps) => Self {
                first_name: caps[1].to_string(),
                last_name: caps[2].to_string(),
                email: caps[3].to_string(),
                ..Default::default()
            },
            None => Self::default(),
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Inverse of [`User::parse`]
    pub fn to_line(&self) -> String {
        format!("{} <{}>", self.full_name(), self.email)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty() && self.email.is_empty()
    }
}

/// A post tag. Only the name is ever populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: u64,
    pub created: Option<DateTime<FixedOffset>>,
    pub name: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            created: None,
            name: name.to_string(),
        }
    }
}

/// Split a comma separated tags value into trimmed tags
pub fn parse_tags(value: &str) -> Vec<Tag> {
    value.split(',').map(|name| Tag::new(name.trim())).collect()
}

/// Join tag names with ", "
pub fn join_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub date: PostDate,

    /// Markdown after parsing, HTML after [`Post::render_body`]
    pub body: String,

    pub author: User,

    /// Unused
    pub signed: bool,
    /// Unused
    pub signature: Vec<u8>,

    pub tags: Vec<Tag>,

    /// Site-relative URL, e.g. `/posts/hello.html`
    pub url: String,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: zero_date(),
            body: String::new(),
            author: User::default(),
            signed: false,
            signature: Vec::new(),
            tags: Vec::new(),
            url: String::new(),
        }
    }
}

impl Post {
    /// Replace the markdown body with its HTML rendering
    pub fn render_body(&mut self, renderer: &MarkdownRenderer) {
        self.body = renderer.render(&self.body);
    }

    /// The metadata lines this post would be written with
    ///
    /// Fields that were never set are left out.
    pub fn frontmatter_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.author.is_empty() {
            lines.push(format!("author: {}", self.author.to_line()));
        }
        if !self.title.is_empty() {
            lines.push(format!("title: {}", self.title));
        }
        if !self.date.is_zero() {
            lines.push(format!("date: {}", format_rfc1123(&self.date)));
        }
        if !self.tags.is_empty() {
            lines.push(format!("tags: {}", join_tags(&self.tags)));
        }
        if !self.description.is_empty() {
            lines.push(format!("description: {}", self.description));
        }
        lines
    }
}

/// A collection of posts
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Posts(pub Vec<Post>);

impl Posts {
    /// Sort newest first. Posts with equal dates keep their relative order.
    pub fn sort_by_date(&mut self) {
        self.0.sort_by(|a, b| b.date.at.cmp(&a.date.at));
    }

    /// The most recent post, once sorted
    pub fn newest(&self) -> Option<&Post> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.0
    }
}

impl From<Vec<Post>> for Posts {
    fn from(posts: Vec<Post>) -> Self {
        Self(posts)
    }
}
