//! crawlurl - canonical URL decomposition for crawl frontiers
//!
//! This crate normalizes absolute and relative URLs and splits them into the
//! pieces a crawler compares and deduplicates on: the directory, the final
//! path segment ("base"), the base with its query, and a canonical path that
//! remembers whether the original ended with a significant `/`.
//!
//! # Quick Start
//!
//! ```
//! use crawlurl::{is_subdomain, parse, strip_www};
//!
//! let page = parse("HTTP://WWW.Host.com:80/root/subdir/document?q=query")?;
//! assert_eq!(page.to_string(), "http://www.host.com/root/subdir/document?q=query");
//! assert_eq!(page.dir(), "/root/subdir");
//! assert_eq!(page.base(), "document");
//! assert_eq!(page.base_query(), "document?q=query");
//!
//! // Resolve a link found on the page
//! let link = parse("../other/")?;
//! let target = page.resolve_reference(&link)?;
//! assert_eq!(target.path(), "/root/other/");
//!
//! // Stay on the same site
//! assert_eq!(strip_www(page.host()), ("host.com", true));
//! assert!(is_subdomain("blog.host.com", &page));
//! # Ok::<(), crawlurl::UrlError>(())
//! ```
//!
//! # Decomposition
//!
//! | Input                            | path              | dir      | base       | base_query  |
//! |----------------------------------|-------------------|----------|------------|-------------|
//! | `http://host.com`                |                   |          |            |             |
//! | `http://host.com/`               | `/`               | `/`      |            |             |
//! | `http://host.com/root/document/` | `/root/document/` | `/root`  | `document` | `document`  |
//! | `http://host.com?q=query/`       | `?q=query/`       |          |            | `?q=query`  |
//! | `http://host.com/?q=query/`      | `/?q=query/`      | `/`      |            | `?q=query`  |
//!
//! A `/` ending the query counts as a trailing slash, and the trailing slash is
//! always rendered at the very end of `path`.
//!
//! # Error Handling
//!
//! [`parse`] returns `Result<Url, UrlError>`:
//!
//! - [`UrlError::Normalization`]: bad percent escapes, bad scheme, control characters
//! - [`UrlError::Syntax`]: the normalized string is not a valid URL reference
//! - [`UrlError::RelativeBase`]: resolution against a relative base

// Re-export main parsing functions
pub use crate::core::{decompose, parse, resolve_reference, Decomposition, UrlParser};

// Re-export host utilities
pub use crate::url::{is_subdomain, strip_www};

// Re-export public types
pub use config::{ConfigError, ParserConfig};
pub use error::UrlError;
pub use types::{Url, UrlComponentType};
pub use crate::url::{normalize_host, remove_dot_segments, NormalizeFlags, Normalizer, SafeNormalizer};
pub use crate::url::StructuredUrl;
pub use crate::core::{extract_lower_bits, fingerprint, hash_component};

// Module declarations
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;
pub mod url;
