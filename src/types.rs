//! The decomposed URL value handed to crawler code.

use std::fmt;

use crate::core::decomposer::decompose;
use crate::core::hasher::fingerprint;
use crate::error::UrlError;
use crate::url::syntax::StructuredUrl;

/// A URL split into directory, final segment and query, with its canonical path.
///
/// Built once by [`parse`](crate::parse) or [`Url::resolve_reference`] and never
/// mutated afterwards, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) path: String,
    pub(crate) dir: String,
    pub(crate) base: String,
    pub(crate) base_query: String,
    pub(crate) raw_query: String,
    pub(crate) structured: StructuredUrl,
}

impl Url {
    /// Scheme, empty for relative references.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host with any non-default port, empty when there is no authority.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Canonical reconstructed path: dir, base, query and the trailing slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path without its final segment; `/` for the root, empty without a path.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Final path segment, empty for the root or an empty path.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// [`base`](Self::base) followed by `?` and the query when there is one.
    pub fn base_query(&self) -> &str {
        &self.base_query
    }

    /// Query without `?`, minus a single trailing `/`.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.structured.fragment()
    }

    pub fn is_abs(&self) -> bool {
        self.structured.is_absolute()
    }

    /// The parsed reference this value was decomposed from.
    pub fn structured(&self) -> &StructuredUrl {
        &self.structured
    }

    /// Get a single component by kind. A missing fragment reads as `""`.
    pub fn component(&self, component: UrlComponentType) -> &str {
        match component {
            UrlComponentType::Scheme => self.scheme(),
            UrlComponentType::Host => self.host(),
            UrlComponentType::Path => self.path(),
            UrlComponentType::Dir => self.dir(),
            UrlComponentType::Base => self.base(),
            UrlComponentType::BaseQuery => self.base_query(),
            UrlComponentType::RawQuery => self.raw_query(),
            UrlComponentType::Fragment => self.fragment().unwrap_or_default(),
        }
    }

    /// 64-bit deduplication key of the canonical string form.
    pub fn fingerprint(&self) -> u64 {
        fingerprint(&self.to_string())
    }

    /// Resolve `reference` against this URL, which must be absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawlurl::parse;
    ///
    /// let page = parse("http://host.com/yo/wordpress/actu")?;
    /// let link = parse("../from/parent")?;
    /// assert_eq!(page.resolve_reference(&link)?.path(), "/yo/from/parent");
    /// # Ok::<(), crawlurl::UrlError>(())
    /// ```
    pub fn resolve_reference(&self, reference: &Url) -> Result<Url, UrlError> {
        let resolved = self.structured.resolve(&reference.structured)?;
        Ok(decompose(&resolved))
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.structured.scheme() {
            Some(scheme) if self.structured.has_authority() => {
                write!(f, "{}://{}{}", scheme, self.host, self.path)
            }
            Some(scheme) => write!(f, "{}:{}", scheme, self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// Enum for selecting a single component of a [`Url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlComponentType {
    /// URL scheme (http)
    Scheme,
    /// Host and non-default port (blog.host.com:8080)
    Host,
    /// Canonical path (/root/document?q=1)
    Path,
    /// Directory (/root)
    Dir,
    /// Final segment (document)
    Base,
    /// Final segment and query (document?q=1)
    BaseQuery,
    /// Query string (q=1)
    RawQuery,
    /// Fragment without '#'
    Fragment,
}
