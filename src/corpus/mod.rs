//! Corpus module - Locating and decoding the input documents
//!
//! Provides:
//! - scan: Directory traversal with the ignore crate
//! - reader: File reading with encoding strategies

pub mod reader;
pub mod scan;
