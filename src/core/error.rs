//! Error types for corpus input
//!
//! The tokenizer and frequency counter never fail; every error here comes
//! from locating or decoding the input files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning or reading a corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus root does not exist or is not a directory
    #[error("corpus root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A file could not be opened or read
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file is not valid UTF-8 and strict decoding was requested
    #[error("{} is not valid UTF-8 (invalid byte at offset {offset})", path.display())]
    InvalidUtf8 { path: PathBuf, offset: usize },
}

impl CorpusError {
    /// Stable machine-readable code, used in error result items
    pub fn code(&self) -> &'static str {
        match self {
            CorpusError::NotADirectory(_) => "NOT_A_DIRECTORY",
            CorpusError::Unreadable { .. } => "FILE_UNREADABLE",
            CorpusError::InvalidUtf8 { .. } => "INVALID_UTF8",
        }
    }
}
