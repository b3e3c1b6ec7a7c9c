//! Error types for deftly

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while building or watching a site
#[derive(Error, Debug)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `date:` line that is not RFC 1123
    #[error("error in '{path}': invalid date {value:?}: {source}")]
    Date {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("feed error in {path}: {reason}")]
    Feed { path: PathBuf, reason: String },

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("cannot serve on {addr}: {source}")]
    Serve {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid serve address {0:?}")]
    Address(String),

    #[error("command {command:?} failed: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no posts found in {0}")]
    NoPosts(PathBuf),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
