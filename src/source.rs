//! Reading fragment collections from text or files.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a source cannot provide any fragment lines.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A path source was given an empty path.
    #[error("no path given")]
    EmptyPath,
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The source was readable but held no fragment lines.
    #[error("{origin} contains no fragments")]
    Empty { origin: String },
}

/// Where a fragment collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fragment lines given directly.
    Literal(String),
    /// A file with one fragment per line.
    Path(PathBuf),
}

impl Source {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Interprets `descriptor` as text or as a path depending on `is_literal`.
    pub fn from_descriptor(descriptor: &str, is_literal: bool) -> Self {
        if is_literal {
            Self::literal(descriptor)
        } else {
            Self::path(descriptor)
        }
    }

    /// Reads the source and returns its fragment lines in order.
    ///
    /// Blank (whitespace-only) lines are skipped; every other line is kept
    /// verbatim.
    pub fn load(&self) -> Result<Vec<String>, LoadError> {
        let lines = match self {
            Self::Literal(text) => split_lines(text),
            Self::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(LoadError::EmptyPath);
                }
                let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                split_lines(&text)
            }
        };

        if lines.is_empty() {
            return Err(LoadError::Empty {
                origin: self.to_string(),
            });
        }
        log::debug!("read {} fragment lines from {}", lines.len(), self);
        Ok(lines)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_) => write!(f, "literal source"),
            Self::Path(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// Loads fragment lines from a descriptor that is either the text itself
/// (`is_literal`) or a path to it.
pub fn load_lines(descriptor: &str, is_literal: bool) -> Result<Vec<String>, LoadError> {
    Source::from_descriptor(descriptor, is_literal).load()
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
