//! wordfreq - Most frequent words across a directory of text files
//!
//! wordfreq provides:
//! - Corpus scanning with configurable depth, extensions and ignore rules
//! - Unicode word-boundary tokenization with case folding
//! - Frequency counting with deterministic top-K ranking
//! - Unified output format (jsonl/json/md/raw)
//!
//! The tokenizer and counter work on in-memory text, so callers can skip the
//! filesystem entirely:
//!
//! ```rust
//! use wordfreq::core::frequency::{count_documents, TieBreak};
//! use wordfreq::core::tokenizer::TokenFilter;
//!
//! let table = count_documents(["a a a b b c"], TokenFilter::All);
//! let top = table.rank(2, TieBreak::FirstSeen);
//! assert_eq!(top[0].token, "a");
//! assert_eq!(top[1].count, 2);
//! ```

pub mod cli;
pub mod core;
pub mod corpus;
pub mod flows;
pub mod logging;
