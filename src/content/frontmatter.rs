//! Front-matter parsing
//!
//! A post carries its metadata as single lines with a literal prefix
//! anywhere in the file:
//!
//! ```text
//! author: Jane Doe <jane@example.com>
//! title: Hello
//! date: Mon, 02 Jan 2006 15:04:05 MST
//! tags: go, web
//! description: A first post
//! ```
//!
//! Every other line is body text.

use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::post::{join_tags, parse_tags, Post, User};
use crate::error::{Error, Result};
use crate::helpers::parse_rfc1123;

lazy_static! {
    static ref AUTHOR_RE: Regex = Regex::new(r"^author:\s(.*)$").unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"^title:\s(.*)$").unwrap();
    static ref DATE_RE: Regex = Regex::new(r"^date:\s(.*)$").unwrap();
    static ref TAGS_RE: Regex = Regex::new(r"^tags:\s(.*)$").unwrap();
    static ref DESCRIPTION_RE: Regex = Regex::new(r"^description:\s(.*)$").unwrap();
}

/// What a single line of a post file is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Author(&'a str),
    Title(&'a str),
    Date(&'a str),
    Tags(&'a str),
    Description(&'a str),
    Body(&'a str),
}

/// Classify a line. Prefixes are tried in a fixed order and the first match
/// wins; anything else is body.
pub fn classify<'a>(line: &'a str) -> Line<'a> {
    let patterns: [(&Regex, fn(&'a str) -> Line<'a>); 5] = [
        (&*AUTHOR_RE, Line::Author),
        (&*TITLE_RE, Line::Title),
        (&*DATE_RE, Line::Date),
        (&*TAGS_RE, Line::Tags),
        (&*DESCRIPTION_RE, Line::Description),
    ];

    for (re, kind) in patterns {
        if let Some(value) = re.captures(line).and_then(|caps| caps.get(1)) {
            return kind(value.as_str());
        }
    }
    Line::Body(line)
}

/// Build a post from lines of text. `path` is only used for error reporting.
pub fn parse_lines<I>(path: &Path, lines: I) -> Result<Post>
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut post = Post::default();

    for line in lines {
        let line = line.map_err(|e| Error::io(path, e))?;
        match classify(&line) {
            Line::Author(value) => {
                post.author = User::parse(value);
                tracing::debug!(
                    "Author: {} ({})",
                    post.author.full_name(),
                    post.author.email
                );
            }
            Line::Title(value) => {
                post.title = value.to_string();
                tracing::debug!("Title: {}", post.title);
            }
            Line::Date(value) => {
                post.date = parse_rfc1123(value).map_err(|source| Error::Date {
                    path: path.to_path_buf(),
                    value: value.to_string(),
                    source,
                })?;
                tracing::debug!("Date: {}", post.date);
            }
            Line::Tags(value) => {
                post.tags.extend(parse_tags(value));
                tracing::debug!("Tags: {}", join_tags(&post.tags));
            }
            Line::Description(value) => {
                post.description = value.to_string();
                tracing::debug!("Description: {}", post.description);
            }
            Line::Body(text) => {
                post.body.push_str(text);
                post.body.push('\n');
            }
        }
    }

    Ok(post)
}

/// Read a post file. The body is left as markdown.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub fn parse_file(path: &Path) -> Result<Post> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let lines = std::iter::from_fn(|| {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(decode_line(&buf))),
            Err(e) => Some(Err(e)),
        }
    });
    parse_lines(path, lines)
}

/// A raw line without its `\n` or `\r\n` terminator
fn decode_line(raw: &[u8]) -> String {
    let line = match raw.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => raw,
    };
    String::from_utf8_lossy(line).into_owned()
}
