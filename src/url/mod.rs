//! URL normalization, structured parsing and host utilities.
//!
//! This module contains the collaborators of the decomposer:
//! - String normalization behind the [`Normalizer`] trait
//! - Structured parsing and reference resolution ([`StructuredUrl`])
//! - `www.`-aware host suffix checks

pub mod domain;
pub mod normalizer;
pub mod syntax;

// Re-export main functionality
pub use domain::{is_subdomain, strip_www};
pub use normalizer::{normalize_host, remove_dot_segments, NormalizeFlags, Normalizer, SafeNormalizer};
pub use syntax::StructuredUrl;
