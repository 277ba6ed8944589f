//! Directory / base / query decomposition of a structured URL.
//!
//! The reconstruction order matters: a `/` ending the query is recorded first,
//! then a `/` ending a real path. Either one makes the canonical path end with
//! `/`, and neither ever clears the flag.

use tracing::trace;

use crate::types::Url;
use crate::url::syntax::StructuredUrl;

/// The derived path fields of a [`Url`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    pub dir: String,
    pub base: String,
    pub base_query: String,
    pub path: String,
    pub raw_query: String,
}

impl Decomposition {
    /// Decompose a dot-segment-free path and a raw query (without `?`).
    ///
    /// # Examples
    ///
    /// ```
    /// use crawlurl::Decomposition;
    ///
    /// let parts = Decomposition::from_parts("/root/subdir/document/", "");
    /// assert_eq!(parts.dir, "/root/subdir");
    /// assert_eq!(parts.base, "document");
    /// assert_eq!(parts.path, "/root/subdir/document/");
    /// ```
    pub fn from_parts(path: &str, query: &str) -> Self {
        let (query, mut trailing_slash) = match query.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (query, false),
        };

        let mut parts = Decomposition {
            raw_query: query.to_string(),
            ..Decomposition::default()
        };

        if path == "/" {
            parts.dir.push('/');
            parts.path.push('/');
            if !query.is_empty() {
                parts.base_query = format!("?{}", query);
                parts.path.push_str(&parts.base_query);
            }
            if trailing_slash {
                parts.path.push('/');
            }
            return parts;
        }

        if !path.is_empty() {
            let trimmed = match path.strip_suffix('/') {
                Some(trimmed) => {
                    trailing_slash = true;
                    trimmed
                }
                None => path,
            };

            let (dir, base) = split_dir_base(trimmed);
            parts.dir = dir.to_string();
            if !base.is_empty() {
                parts.base = base.to_string();
                parts.base_query = base.to_string();
            }

            parts.path.push_str(dir);
            if !dir.is_empty() && dir != "/" {
                parts.path.push('/');
            }
        }

        if !query.is_empty() {
            parts.base_query.push('?');
            parts.base_query.push_str(query);
        }
        parts.path.push_str(&parts.base_query);

        if trailing_slash {
            parts.path.push('/');
        }
        parts
    }
}

/// Decompose a structured URL into the crawler-facing [`Url`]. Never fails.
pub fn decompose(structured: &StructuredUrl) -> Url {
    let parts = Decomposition::from_parts(structured.path(), structured.query().unwrap_or_default());
    trace!(
        path = structured.path(),
        dir = %parts.dir,
        base = %parts.base,
        base_query = %parts.base_query,
        canonical = %parts.path,
        "decomposed URL path"
    );

    Url {
        scheme: structured.scheme().unwrap_or_default().to_string(),
        host: structured.host().unwrap_or_default().to_string(),
        path: parts.path,
        dir: parts.dir,
        base: parts.base,
        base_query: parts.base_query,
        raw_query: parts.raw_query,
        structured: structured.clone(),
    }
}

/// Split a path at its last `/` into (directory, final segment).
///
/// The directory loses trailing slashes; an absolute path keeps `/` as its root.
/// A path without any `/` has an empty directory.
fn split_dir_base(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => {
            let dir = path[..idx].trim_end_matches('/');
            let dir = if dir.is_empty() && path.starts_with('/') {
                "/"
            } else {
                dir
            };
            (dir, &path[idx + 1..])
        }
        None => ("", path),
    }
}
