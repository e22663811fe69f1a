//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer, followed by a newline when there is output
    pub fn render_to<W: Write>(&self, result_set: &ResultSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(result_set);
        if output.is_empty() {
            return Ok(());
        }
        writer.write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut documents = Vec::new();
        let mut tokens = Vec::new();
        let mut ranks = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Document => documents.push(item),
                Kind::Token => tokens.push(item),
                Kind::Rank => ranks.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}", error.code, error.message));
                    if let Some(path) = &item.path {
                        output.push_str(&format!(" (`{}`)", path));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !documents.is_empty() {
            output.push_str("## Documents\n\n");
            for item in documents {
                self.render_document_md(&mut output, item);
            }
            output.push('\n');
        }

        if !tokens.is_empty() {
            output.push_str("## Tokens\n\n");
            for item in tokens {
                if let Some(token) = &item.token {
                    output.push_str(&format!("- `{}`\n", token));
                }
            }
            output.push('\n');
        }

        if !ranks.is_empty() {
            output.push_str("## Top Tokens\n\n");
            output.push_str("| # | Token | Count |\n");
            output.push_str("|---|-------|-------|\n");
            for item in ranks {
                output.push_str(&format!(
                    "| {} | `{}` | {} |\n",
                    item.rank.unwrap_or_default(),
                    escape_table_cell(item.token.as_deref().unwrap_or_default()),
                    item.count.unwrap_or_default()
                ));
            }
            output.push('\n');
        }

        output
    }

    fn render_document_md(&self, output: &mut String, item: &ResultItem) {
        let Some(path) = &item.path else {
            return;
        };
        output.push_str(&format!("- `{}`", path));
        if let Some(size) = item.meta.size {
            output.push_str(&format!(" ({} bytes)", size));
        }
        output.push('\n');
    }

    /// Render as plain lines, ranked tokens as `('token', count)` tuples
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| match item.kind {
                Kind::Rank => Some(format!(
                    "({}, {})",
                    quote_token(item.token.as_deref().unwrap_or_default()),
                    item.count.unwrap_or_default()
                )),
                Kind::Token => item.token.clone(),
                Kind::Document => item.path.clone(),
                Kind::Error => item
                    .errors
                    .first()
                    .map(|e| format!("# {}: {}", e.code, e.message)),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Quote a token the way Python's `repr` quotes a string
///
/// Single quotes unless the token contains a single quote and no double
/// quote. Backslashes, the chosen quote and control characters are escaped.
fn quote_token(token: &str) -> String {
    let quote = if token.contains('\'') && !token.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(token.len() + 2);
    out.push(quote);
    for c in token.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
