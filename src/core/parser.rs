//! Parsing facade: normalizer -> syntax parser -> decomposer.

use std::fmt;

use tracing::debug;

use crate::config::ParserConfig;
use crate::core::decomposer::decompose;
use crate::error::UrlError;
use crate::types::Url;
use crate::url::normalizer::{Normalizer, SafeNormalizer};
use crate::url::syntax::StructuredUrl;

/// Parses strings into [`Url`] values with a pluggable [`Normalizer`].
///
/// # Examples
///
/// ```
/// use crawlurl::{NormalizeFlags, SafeNormalizer, UrlParser};
///
/// let parser = UrlParser::with_normalizer(SafeNormalizer::new(NormalizeFlags {
///     decode_unnecessary_escapes: false,
///     ..NormalizeFlags::default()
/// }));
/// let url = parser.parse("http://host.com/a/%7eb")?;
/// assert_eq!(url.base(), "%7Eb");
/// assert_eq!(crawlurl::parse("http://host.com/a/%7eb")?.base(), "~b");
/// # Ok::<(), crawlurl::UrlError>(())
/// ```
pub struct UrlParser {
    normalizer: Box<dyn Normalizer>,
}

impl UrlParser {
    /// Parser using [`SafeNormalizer`] with every flag on.
    pub fn new() -> Self {
        Self::with_normalizer(SafeNormalizer::default())
    }

    pub fn with_normalizer(normalizer: impl Normalizer + 'static) -> Self {
        Self {
            normalizer: Box::new(normalizer),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::with_normalizer(SafeNormalizer::new(config.normalize))
    }

    /// Normalize, parse and decompose `raw`.
    pub fn parse(&self, raw: &str) -> Result<Url, UrlError> {
        let normalized = self.normalizer.normalize(raw).map_err(|err| {
            debug!(input = raw, error = %err, "URL rejected by normalizer");
            err
        })?;
        let structured = StructuredUrl::parse(&normalized).map_err(|err| {
            debug!(input = raw, normalized = %normalized, error = %err, "URL rejected by parser");
            err
        })?;

        let url = decompose(&structured);
        debug!(input = raw, url = %url, "parsed URL");
        Ok(url)
    }

    /// Resolve `reference` against `base` and decompose the result.
    pub fn resolve_reference(&self, base: &Url, reference: &Url) -> Result<Url, UrlError> {
        let resolved = base.resolve_reference(reference)?;
        debug!(base = %base, reference = %reference, resolved = %resolved, "resolved reference");
        Ok(resolved)
    }

    /// Parse `reference` and resolve it against `base` in one step.
    pub fn resolve_str(&self, base: &Url, reference: &str) -> Result<Url, UrlError> {
        let reference = self.parse(reference)?;
        self.resolve_reference(base, &reference)
    }
}

impl Default for UrlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UrlParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlParser").finish_non_exhaustive()
    }
}

/// Parse a URL string with the default safe normalization.
///
/// # Examples
///
/// ```
/// use crawlurl::parse;
///
/// let url = parse("http://host.com/root/subdir/document?q=query")?;
/// assert_eq!(url.dir(), "/root/subdir");
/// assert_eq!(url.base(), "document");
/// assert_eq!(url.base_query(), "document?q=query");
/// # Ok::<(), crawlurl::UrlError>(())
/// ```
pub fn parse(raw: &str) -> Result<Url, UrlError> {
    UrlParser::new().parse(raw)
}

/// Resolve `reference` against the absolute URL `base`.
pub fn resolve_reference(base: &Url, reference: &Url) -> Result<Url, UrlError> {
    base.resolve_reference(reference)
}
