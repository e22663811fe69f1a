//! Flows module - Multi-step commands
//!
//! Provides:
//! - top: Scan, read, tokenize, count and rank a corpus
//! - tokens: Token stream of a single file

pub mod tokens;
pub mod top;
