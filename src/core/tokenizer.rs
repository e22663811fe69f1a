//! Tokenizer - Splits decoded text into lowercase word tokens
//!
//! Segmentation follows the Unicode word boundary rules (UAX #29):
//! - Letter/digit runs form one token, including non-ASCII letters
//! - Every other punctuation or symbol character is its own token, even where
//!   the boundary rules would join a run of them ("___" gives three "_")
//! - Whitespace separates tokens and is never emitted
//! - Contractions stay whole ("don't"), hyphenations split ("well", "-", "known")
//! - Numbers keep internal separators ("3.14", "1,000")
//!
//! Every token is case-folded with the Unicode lowercase mapping.
//!
//! Usage:
//! ```rust
//! use wordfreq::core::tokenizer::tokenize;
//!
//! let tokens: Vec<String> = tokenize("The cat sat.").collect();
//! assert_eq!(tokens, ["the", "cat", "sat", "."]);
//! ```

use std::fmt;
use std::str::FromStr;
use unicode_segmentation::{Graphemes, UWordBounds, UnicodeSegmentation};

/// Which tokens survive extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenFilter {
    /// Words and punctuation tokens
    #[default]
    All,
    /// Only tokens containing at least one letter or digit
    Words,
}

impl TokenFilter {
    fn keeps(&self, segment: &str) -> bool {
        if segment.chars().all(char::is_whitespace) {
            return false;
        }
        match self {
            TokenFilter::All => true,
            TokenFilter::Words => segment.chars().any(char::is_alphanumeric),
        }
    }
}

impl fmt::Display for TokenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenFilter::All => "all",
            TokenFilter::Words => "words",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TokenFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TokenFilter::All),
            "words" | "words-only" => Ok(TokenFilter::Words),
            _ => Err(format!("Unknown token filter: {}. Available: all, words", s)),
        }
    }
}

/// Lazy token stream over one document
///
/// Cloning forks the stream at its current position. Call [`tokenize`]
/// again on the same text to start over.
#[derive(Clone)]
pub struct Tokens<'a> {
    bounds: UWordBounds<'a>,
    /// Remaining marks of a punctuation-only segment
    marks: Option<Graphemes<'a>>,
    filter: TokenFilter,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(marks) = &mut self.marks {
                if let Some(mark) = marks.find(|g| !g.chars().all(char::is_whitespace)) {
                    return Some(mark.to_lowercase());
                }
                self.marks = None;
            }

            let filter = self.filter;
            let segment = self.bounds.find(|segment| filter.keeps(segment))?;
            if segment.chars().any(char::is_alphanumeric) {
                return Some(segment.to_lowercase());
            }
            // ExtendNumLet joins runs like "___"; split them one mark at a time.
            self.marks = Some(segment.graphemes(true));
        }
    }
}

impl fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Tokenize text, keeping words and punctuation
pub fn tokenize(text: &str) -> Tokens<'_> {
    tokenize_with(text, TokenFilter::All)
}

/// Tokenize text with an explicit token filter
pub fn tokenize_with(text: &str, filter: TokenFilter) -> Tokens<'_> {
    Tokens {
        bounds: text.split_word_bounds(),
        marks: None,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(toks("").is_empty());
        assert!(toks("   \n\t  \r\n").is_empty());
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(toks("Cat"), toks("cat"));
        assert_eq!(toks("CAT"), vec!["cat"]);
    }

    #[test]
    fn test_sentence_punctuation() {
        assert_eq!(toks("The cat sat."), vec!["the", "cat", "sat", "."]);
        assert_eq!(toks("hello,world"), vec!["hello", ",", "world"]);
    }

    #[test]
    fn test_quotes_and_marks_are_single_tokens() {
        assert_eq!(toks("\"hi!\""), vec!["\"", "hi", "!", "\""]);
        assert_eq!(toks("wait..."), vec!["wait", ".", ".", "."]);
    }

    #[test]
    fn test_connector_runs_split_into_marks() {
        assert_eq!(
            toks("a ___ b __init__"),
            vec!["a", "_", "_", "_", "b", "__init__"]
        );
        let words: Vec<String> = tokenize_with("a ___ b", TokenFilter::Words).collect();
        assert_eq!(words, vec!["a", "b"]);
    }

    #[test]
    fn test_symbol_clusters_stay_intact() {
        // a grapheme with a combining mark is one token, not two
        assert_eq!(toks("-\u{301}-"), vec!["-\u{301}", "-"]);
    }

    #[test]
    fn test_contractions_stay_whole() {
        assert_eq!(toks("Don't stop"), vec!["don't", "stop"]);
        assert_eq!(toks("it’s"), vec!["it’s"]);
    }

    #[test]
    fn test_hyphenations_split() {
        assert_eq!(toks("well-known"), vec!["well", "-", "known"]);
    }

    #[test]
    fn test_numbers_keep_separators() {
        assert_eq!(toks("pi is 3.14"), vec!["pi", "is", "3.14"]);
        assert_eq!(toks("1,000 items"), vec!["1,000", "items"]);
    }

    #[test]
    fn test_abbreviation_trailing_dot() {
        assert_eq!(toks("U.S.A."), vec!["u.s.a", "."]);
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(toks("Straße ÉCOLE"), vec!["straße", "école"]);
    }

    #[test]
    fn test_whitespace_never_emitted() {
        let tokens = toks("a  b\n\nc\td");
        assert_eq!(tokens, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_words_filter_drops_punctuation() {
        let tokens: Vec<String> =
            tokenize_with("The cat, the \"hat\" - done.", TokenFilter::Words).collect();
        assert_eq!(tokens, vec!["the", "cat", "the", "hat", "done"]);
    }

    #[test]
    fn test_restartable() {
        let text = "one two three";
        let first: Vec<String> = tokenize(text).collect();
        let second: Vec<String> = tokenize(text).collect();
        assert_eq!(first, second);

        let mut stream = tokenize(text);
        assert_eq!(stream.next().as_deref(), Some("one"));
        let fork = stream.clone();
        assert_eq!(stream.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<TokenFilter>().unwrap(), TokenFilter::All);
        assert_eq!("WORDS".parse::<TokenFilter>().unwrap(), TokenFilter::Words);
        assert!("nouns".parse::<TokenFilter>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(TokenFilter::All.to_string(), "all");
        assert_eq!(TokenFilter::Words.to_string(), "words");
    }
}
