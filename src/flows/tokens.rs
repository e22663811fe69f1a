//! Tokens flow - Emit the token stream of a single file
//!
//! Useful for checking how the tokenizer splits a given text.

use anyhow::Result;
use std::path::Path;

use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::{display_path, resolve};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::tokenizer::{tokenize_with, TokenFilter};
use crate::corpus::reader::{read_document, EncodingStrategy, ReadOutcome};

/// Tokenize one file into a result set of token items
pub fn tokenize_file(
    root: &Path,
    file: &Path,
    filter: TokenFilter,
    encoding: EncodingStrategy,
) -> Result<ResultSet> {
    let path = resolve(root, file);
    let relative = display_path(&path, root);

    let result_set: ResultSet = match read_document(&path, &relative, encoding)? {
        ReadOutcome::Loaded(document) => tokenize_with(&document.text, filter)
            .map(ResultItem::token)
            .collect(),
        ReadOutcome::Skipped(warning) => {
            log::warn!("skipping {}: {}", warning.path, warning.message);
            std::iter::once(warning.to_result_item()).collect()
        }
    };

    Ok(result_set)
}

/// Run the tokens command
pub fn run_tokens(
    root: &Path,
    file: &Path,
    filter: TokenFilter,
    encoding: EncodingStrategy,
    config: RenderConfig,
) -> Result<()> {
    let result_set = tokenize_file(root, file, filter, encoding)?;

    let renderer = Renderer::with_config(config);
    renderer.render_to(&result_set, std::io::stdout().lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use std::fs;
    use tempfile::tempdir;

    fn tokens_of(set: &ResultSet) -> Vec<&str> {
        set.items.iter().filter_map(|i| i.token.as_deref()).collect()
    }

    #[test]
    fn test_tokenize_file_relative_to_root() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("note.txt"), "Don't panic, well-known towel!").unwrap();

        let set = tokenize_file(
            temp.path(),
            Path::new("note.txt"),
            TokenFilter::All,
            EncodingStrategy::Strict,
        )
        .unwrap();

        assert_eq!(
            tokens_of(&set),
            vec!["don't", "panic", ",", "well", "-", "known", "towel", "!"]
        );
        assert!(set.items.iter().all(|i| i.kind == Kind::Token));
    }

    #[test]
    fn test_tokenize_file_words_only() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("note.txt"), "Hello, hello!").unwrap();

        let set = tokenize_file(
            temp.path(),
            Path::new("note.txt"),
            TokenFilter::Words,
            EncodingStrategy::Strict,
        )
        .unwrap();
        assert_eq!(tokens_of(&set), vec!["hello", "hello"]);
    }

    #[test]
    fn test_tokenize_file_skipped_encoding() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.txt"), [0xC3u8, 0x28]).unwrap();

        let set = tokenize_file(
            temp.path(),
            Path::new("bad.txt"),
            TokenFilter::All,
            EncodingStrategy::Skip,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].kind, Kind::Error);
        assert_eq!(set.items[0].path.as_deref(), Some("bad.txt"));
    }

    #[test]
    fn test_tokenize_missing_file() {
        let temp = tempdir().unwrap();
        let result = tokenize_file(
            temp.path(),
            Path::new("missing.txt"),
            TokenFilter::All,
            EncodingStrategy::Strict,
        );
        assert!(result.is_err());
    }
}
