//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::frequency::TieBreak;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::tokenizer::TokenFilter;
use crate::corpus::reader::EncodingStrategy;
use crate::corpus::scan::ScanOptions;
use crate::flows::top::{TopOptions, DEFAULT_LIMIT};

/// wordfreq - count the most frequent words across a directory of text files.
#[derive(Parser, Debug)]
#[command(name = "wordfreq")]
#[command(
    author,
    version,
    about,
    long_about = r#"wordfreq reads every text file in a directory, splits the lowercase text
into tokens on Unicode word boundaries, and reports the most frequent tokens.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into other tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: one plain line per item; ranked tokens print as ('token', count)

Examples:
    wordfreq --root articles top
    wordfreq --root articles top --limit 20 --words-only --format md
    wordfreq --root articles scan --recursive --ext txt
    wordfreq tokens articles/intro.txt
"#
)]
pub struct Cli {
    /// Corpus root directory.
    #[arg(
        long,
        global = true,
        default_value = ".",
        env = "WORDFREQ_ROOT",
        value_name = "ROOT",
        long_help = "Corpus root directory (defaults to the current directory).\n\n\
All paths emitted in results are relative to this root."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        env = "WORDFREQ_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Disable colored log output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (-v lists each document as it is read, -vv adds per-document detail).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which files under ROOT make up the corpus.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Walk subdirectories too (default: only files directly in ROOT).
    #[arg(long)]
    pub recursive: bool,

    /// Maximum directory depth when walking recursively.
    #[arg(long, value_name = "N", requires = "recursive")]
    pub max_depth: Option<usize>,

    /// Skip hidden files/directories (dotfiles are read by default).
    #[arg(long)]
    pub no_hidden: bool,

    /// Apply .gitignore/.ignore rules, including those of parent directories.
    #[arg(long)]
    pub respect_ignore: bool,

    /// Only include files with these extensions (comma-separated).
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub ext: Vec<String>,
}

impl ScanArgs {
    pub fn to_options(&self) -> ScanOptions {
        let extensions: Vec<String> = self
            .ext
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        ScanOptions {
            max_depth: if self.recursive { self.max_depth } else { Some(1) },
            hidden: !self.no_hidden,
            ignore: self.respect_ignore,
            extensions: if extensions.is_empty() {
                None
            } else {
                Some(extensions)
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the most frequent tokens across the corpus.
    #[command(
        long_about = "Read every document under ROOT, tokenize it, and emit the LIMIT most\n\
frequent tokens, highest count first.\n\n\
Ties are broken by first occurrence in the corpus (documents are read in\n\
sorted path order) unless --tie-break lexical is given.\n\n\
Examples:\n\
  wordfreq --root articles top\n\
  wordfreq --root articles top -n 10 --words-only --format raw\n"
    )]
    Top {
        #[command(flatten)]
        scan: ScanArgs,

        /// Number of tokens to report.
        #[arg(
            short = 'n',
            long,
            default_value_t = DEFAULT_LIMIT,
            env = "WORDFREQ_LIMIT",
            value_name = "K"
        )]
        limit: usize,

        /// Order of tokens with equal counts (first-seen/lexical).
        #[arg(
            long,
            default_value = "first-seen",
            value_parser = ["first-seen", "lexical"],
            value_name = "ORDER"
        )]
        tie_break: String,

        /// Drop punctuation tokens, count only tokens with letters or digits.
        #[arg(long)]
        words_only: bool,

        /// Handling of invalid UTF-8 (strict/lossy/skip).
        #[arg(
            long,
            default_value = "strict",
            value_parser = ["strict", "lossy", "skip"],
            value_name = "MODE"
        )]
        encoding: String,

        /// Skip files that cannot be read instead of aborting.
        #[arg(
            long,
            long_help = "Skip files that cannot be opened or decoded and keep counting.\n\n\
Skipped files are reported as error items in the output. Without this flag\n\
the first unreadable file aborts the run with a non-zero exit status."
        )]
        skip_unreadable: bool,

        /// Print corpus statistics on stderr.
        #[arg(long)]
        stats: bool,
    },

    /// List the documents that make up the corpus.
    #[command(long_about = "List the files under ROOT that `top` would read, in reading order.\n\n\
Examples:\n\
  wordfreq --root articles scan\n\
  wordfreq --root articles scan --recursive --ext txt,md\n")]
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the token stream of one file.
    #[command(long_about = "Tokenize a single file and emit one token item per token, in order.\n\n\
Use this to check how text is split: contractions stay whole, hyphenated\n\
words split, punctuation marks are their own tokens.\n\n\
Example:\n\
  wordfreq tokens articles/intro.txt --format raw\n")]
    Tokens {
        /// File to tokenize (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Drop punctuation tokens.
        #[arg(long)]
        words_only: bool,

        /// Handling of invalid UTF-8 (strict/lossy/skip).
        #[arg(
            long,
            default_value = "strict",
            value_parser = ["strict", "lossy", "skip"],
            value_name = "MODE"
        )]
        encoding: String,
    },
}

fn token_filter(words_only: bool) -> TokenFilter {
    if words_only {
        TokenFilter::Words
    } else {
        TokenFilter::All
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(|e: String| anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    match cli.command {
        Commands::Top {
            scan,
            limit,
            tie_break,
            words_only,
            encoding,
            skip_unreadable,
            stats,
        } => {
            let options = TopOptions {
                limit,
                tie_break: tie_break.parse::<TieBreak>().map_err(|e| anyhow!(e))?,
                filter: token_filter(words_only),
                encoding: encoding.parse::<EncodingStrategy>().map_err(|e| anyhow!(e))?,
                skip_unreadable,
            };
            crate::flows::top::run_top(&root, &scan.to_options(), &options, stats, render_config)
        }

        Commands::Scan { scan } => {
            crate::corpus::scan::run_scan(&root, &scan.to_options(), render_config)
        }

        Commands::Tokens {
            file,
            words_only,
            encoding,
        } => crate::flows::tokens::run_tokens(
            &root,
            &file,
            token_filter(words_only),
            encoding.parse::<EncodingStrategy>().map_err(|e| anyhow!(e))?,
            render_config,
        ),
    }
}
