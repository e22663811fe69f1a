//! Core module - Contains the fundamental data structures and algorithms
//!
//! This module provides:
//! - Tokenization of decoded text into lowercase tokens
//! - Frequency counting and top-K ranking
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path normalization utilities
//! - Corpus error types

pub mod error;
pub mod frequency;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
