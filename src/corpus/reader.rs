//! Document reading and decoding
//!
//! Provides consistent handling for:
//! - Unreadable files
//! - Non-UTF-8 files (strict, lossy or skip)
//!
//! Each file is read in one call, so its handle is released before the
//! function returns on every path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::CorpusError;
use crate::core::model::{ItemError, ResultItem};

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// Invalid UTF-8 is an error
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD
    Lossy,
    /// Skip non-UTF-8 files with a warning
    Skip,
}

impl fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingStrategy::Strict => "strict",
            EncodingStrategy::Lossy => "lossy",
            EncodingStrategy::Skip => "skip",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(EncodingStrategy::Strict),
            "lossy" => Ok(EncodingStrategy::Lossy),
            "skip" => Ok(EncodingStrategy::Skip),
            _ => Err(format!(
                "Unknown encoding strategy: {}. Available: strict, lossy, skip",
                s
            )),
        }
    }
}

/// Warning codes for document reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningCode {
    /// File could not be opened or read
    FileUnreadable,
    /// File skipped because it is not valid UTF-8
    InvalidUtf8,
    /// Lossy encoding conversion used
    LossyConversion,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::FileUnreadable => "FILE_UNREADABLE",
            WarningCode::InvalidUtf8 => "INVALID_UTF8",
            WarningCode::LossyConversion => "LOSSY_CONVERSION",
        }
    }
}

/// A structured warning about one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWarning {
    pub code: WarningCode,
    pub message: String,
    /// Path relative to the corpus root
    pub path: String,
}

impl FileWarning {
    pub fn new(code: WarningCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// Downgrade a read error to a warning, for runs that skip bad files
    pub fn from_error(error: &CorpusError, path: impl Into<String>) -> Self {
        let code = match error {
            CorpusError::InvalidUtf8 { .. } => WarningCode::InvalidUtf8,
            CorpusError::Unreadable { .. } | CorpusError::NotADirectory(_) => {
                WarningCode::FileUnreadable
            }
        };
        Self::new(code, error.to_string(), path)
    }

    /// Convert to an error ResultItem
    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::error(ItemError::new(self.code.as_str(), &self.message)).with_path(&self.path)
    }
}

/// Decoded text of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the corpus root
    pub path: String,
    pub text: String,
    /// Whether invalid UTF-8 was replaced
    pub lossy: bool,
}

/// What reading a file produced
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    Loaded(Document),
    Skipped(FileWarning),
}

/// Read and decode one file
///
/// Errors are returned for unreadable files, and for invalid UTF-8 under
/// [`EncodingStrategy::Strict`]. Other encoding strategies never fail on
/// decoding.
pub fn read_document(
    path: &Path,
    relative: &str,
    encoding: EncodingStrategy,
) -> Result<ReadOutcome, CorpusError> {
    let bytes = fs::read(path).map_err(|source| CorpusError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(ReadOutcome::Loaded(Document {
            path: relative.to_string(),
            text,
            lossy: false,
        })),
        Err(err) => match encoding {
            EncodingStrategy::Strict => Err(CorpusError::InvalidUtf8 {
                path: path.to_path_buf(),
                offset: err.utf8_error().valid_up_to(),
            }),
            EncodingStrategy::Skip => Ok(ReadOutcome::Skipped(FileWarning::new(
                WarningCode::InvalidUtf8,
                format!(
                    "File contains invalid UTF-8 at byte {}",
                    err.utf8_error().valid_up_to()
                ),
                relative,
            ))),
            EncodingStrategy::Lossy => {
                log::warn!(
                    "{}: {} (lossy UTF-8 conversion applied)",
                    relative,
                    WarningCode::LossyConversion.as_str()
                );
                Ok(ReadOutcome::Loaded(Document {
                    path: relative.to_string(),
                    text: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                    lossy: true,
                }))
            }
        },
    }
}
