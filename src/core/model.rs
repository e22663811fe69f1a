//! Unified Result Model
//!
//! Every command maps its output to this model before rendering.

use serde::{Deserialize, Serialize};

use crate::core::frequency::RankedToken;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Document,
    Token,
    Rank,
    Error,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// File size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Path relative to root, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// 1-based position in a ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Occurrences of `token` across the corpus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(default)]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            rank: None,
            token: None,
            count: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// Create a new document result
    pub fn document(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty(Kind::Document)
        }
    }

    /// Create a new token result (one token of a token stream)
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::empty(Kind::Token)
        }
    }

    /// Create a new ranking entry, `rank` is 1-based
    pub fn ranked(rank: usize, entry: RankedToken) -> Self {
        Self {
            rank: Some(rank),
            token: Some(entry.token),
            count: Some(entry.count),
            ..Self::empty(Kind::Rank)
        }
    }

    /// Create a new error result
    pub fn error(error: ItemError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    /// Build a result set from a ranking, numbering entries from 1
    pub fn from_ranking(ranking: Vec<RankedToken>) -> Self {
        ranking
            .into_iter()
            .enumerate()
            .map(|(i, entry)| ResultItem::ranked(i + 1, entry))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
