//! Frequency counting and top-K ranking
//!
//! A [`FrequencyCounter`] accumulates tokens from any number of documents and
//! is frozen into an immutable [`FrequencyTable`] that answers ranking queries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::core::tokenizer::{tokenize_with, TokenFilter};

/// Order between tokens with equal counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Token seen first in the corpus ranks first
    #[default]
    FirstSeen,
    /// Tokens ordered by their string value, ascending
    Lexical,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TieBreak::FirstSeen => "first-seen",
            TieBreak::Lexical => "lexical",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-seen" | "first" | "insertion" => Ok(TieBreak::FirstSeen),
            "lexical" | "alpha" | "alphabetical" => Ok(TieBreak::Lexical),
            _ => Err(format!(
                "Unknown tie-break: {}. Available: first-seen, lexical",
                s
            )),
        }
    }
}

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedToken {
    pub token: String,
    pub count: u64,
}

impl RankedToken {
    pub fn new(token: impl Into<String>, count: u64) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    count: u64,
    first_seen: usize,
}

/// Accumulates token counts
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    entries: HashMap<String, Entry>,
    total: u64,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`
    pub fn add(&mut self, token: impl Into<String>) {
        let next = self.entries.len();
        self.entries
            .entry(token.into())
            .or_insert(Entry {
                count: 0,
                first_seen: next,
            })
            .count += 1;
        self.total += 1;
    }

    /// Count every token in the iterator, in order
    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.add(token);
        }
    }

    /// Tokens counted so far
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn finish(self) -> FrequencyTable {
        FrequencyTable {
            entries: self.entries,
            total: self.total,
        }
    }
}

/// Immutable mapping from token to occurrence count
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: HashMap<String, Entry>,
    total: u64,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counter = FrequencyCounter::new();
        counter.extend(tokens);
        counter.finish()
    }

    /// Count of `token`, or `None` if it never occurred
    pub fn get(&self, token: &str) -> Option<u64> {
        self.entries.get(token).map(|entry| entry.count)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tokens counted, duplicates included
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate `(token, count)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(token, entry)| (token.as_str(), entry.count))
    }

    /// Snapshot of the counts, ordered by token
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(token, count)| (token.to_string(), count))
            .collect()
    }

    /// The `k` most frequent tokens, highest count first
    ///
    /// Returns fewer than `k` entries when the table holds fewer distinct
    /// tokens; `k == 0` yields an empty ranking.
    pub fn rank(&self, k: usize, tie_break: TieBreak) -> Vec<RankedToken> {
        if k == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, &Entry)> = self.entries.iter().collect();
        ranked.sort_unstable_by(|(ta, a), (tb, b)| {
            b.count.cmp(&a.count).then_with(|| match tie_break {
                TieBreak::FirstSeen => a.first_seen.cmp(&b.first_seen),
                TieBreak::Lexical => ta.cmp(tb),
            })
        });

        ranked
            .into_iter()
            .take(k)
            .map(|(token, entry)| RankedToken::new(token.clone(), entry.count))
            .collect()
    }
}

/// Count the tokens of in-memory documents, in the order given
pub fn count_documents<I, S>(documents: I, filter: TokenFilter) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counter = FrequencyCounter::new();
    for document in documents {
        counter.extend(tokenize_with(document.as_ref(), filter));
    }
    counter.finish()
}
