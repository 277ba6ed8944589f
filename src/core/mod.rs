//! Core decomposition functionality.
//!
//! This module contains the main operations:
//! - Decomposing a structured URL into dir / base / base-query / canonical path
//! - The parse and resolve facade
//! - Labeled hashing for deduplication keys

pub mod decomposer;
pub mod hasher;
pub mod parser;

// Re-export main functionality
pub use decomposer::{decompose, Decomposition};
pub use hasher::{extract_lower_bits, fingerprint, hash_component};
pub use parser::{parse, resolve_reference, UrlParser};
