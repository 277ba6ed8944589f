//! Structured URL references backed by the `url` crate.
//!
//! The `url` crate only models absolute URLs and always gives special schemes
//! a `/` path. A crawler needs both relative references and the difference
//! between `http://host.com` and `http://host.com/`, so [`StructuredUrl`] keeps
//! the RFC 3986 split of the source string alongside what `url` parsed.

use std::fmt;

use url::Url as ParsedUrl;

use crate::error::UrlError;

/// RFC 3986 Appendix B split of a URI reference, without any validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawReference<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> RawReference<'a> {
    pub fn split(input: &'a str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        let (scheme, rest) = match scheme_candidate(rest) {
            Some(candidate) if is_valid_scheme(candidate) => {
                (Some(candidate), &rest[candidate.len() + 1..])
            }
            _ => (None, rest),
        };
        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(&after[..end]), &after[end..])
            }
            None => (None, rest),
        };

        RawReference {
            scheme,
            authority,
            path,
            query,
            fragment,
        }
    }
}

/// Text before the first `:` when that colon comes before any `/`.
///
/// `input` must already be stripped of its query and fragment.
pub(crate) fn scheme_candidate(input: &str) -> Option<&str> {
    let colon = input.find(':')?;
    match input.find('/') {
        Some(slash) if slash < colon => None,
        _ => Some(&input[..colon]),
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// A parsed URL reference: scheme, authority, path, query and fragment.
///
/// Absolute references are validated by the `url` crate; relative ones are
/// checked for the few constraints that make them unambiguous. A value is
/// immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuredUrl {
    scheme: Option<String>,
    userinfo: Option<String>,
    host: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl StructuredUrl {
    /// Parse an already normalized URL reference.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let raw = RawReference::split(input);
        if raw.scheme.is_some() {
            let parsed =
                ParsedUrl::parse(input).map_err(|e| UrlError::syntax(input, e.to_string()))?;
            let keep_empty_path = raw.authority.is_some() && raw.path.is_empty();
            Ok(Self::from_parsed(&parsed, keep_empty_path))
        } else {
            Self::parse_relative(input, &raw)
        }
    }

    fn parse_relative(input: &str, raw: &RawReference<'_>) -> Result<Self, UrlError> {
        if input.chars().any(|c| c.is_ascii_control() || c == ' ') {
            return Err(UrlError::syntax(input, "invalid character in URL reference"));
        }

        let (userinfo, host) = match raw.authority {
            Some(authority) => {
                let (userinfo, host_port) = match authority.rsplit_once('@') {
                    Some((userinfo, host_port)) => (Some(userinfo.to_string()), host_port),
                    None => (None, authority),
                };
                if !has_valid_port(host_port) {
                    return Err(UrlError::syntax(input, "invalid port in authority"));
                }
                (userinfo, Some(host_port.to_string()))
            }
            None => {
                let first_segment = raw.path.split('/').next().unwrap_or_default();
                if first_segment.contains(':') {
                    return Err(UrlError::syntax(
                        input,
                        "first path segment in URL cannot contain colon",
                    ));
                }
                (None, None)
            }
        };

        Ok(StructuredUrl {
            scheme: None,
            userinfo,
            host,
            path: raw.path.to_string(),
            query: raw.query.map(str::to_string),
            fragment: raw.fragment.map(str::to_string),
        })
    }

    /// Build from a `url::Url`. `keep_empty_path` restores an empty path that
    /// the `url` crate turned into `/`.
    pub(crate) fn from_parsed(parsed: &ParsedUrl, keep_empty_path: bool) -> Self {
        let (userinfo, host) = if parsed.has_authority() {
            let mut host = parsed.host_str().unwrap_or_default().to_string();
            if let Some(port) = parsed.port() {
                host.push(':');
                host.push_str(&port.to_string());
            }

            let userinfo = if parsed.username().is_empty() && parsed.password().is_none() {
                None
            } else {
                let mut userinfo = parsed.username().to_string();
                if let Some(password) = parsed.password() {
                    userinfo.push(':');
                    userinfo.push_str(password);
                }
                Some(userinfo)
            };
            (userinfo, Some(host))
        } else {
            (None, None)
        };

        let path = if keep_empty_path && parsed.path() == "/" {
            String::new()
        } else {
            parsed.path().to_string()
        };

        StructuredUrl {
            scheme: Some(parsed.scheme().to_string()),
            userinfo,
            host,
            path,
            query: parsed.query().map(str::to_string),
            fragment: parsed.fragment().map(str::to_string),
        }
    }

    /// Resolve `reference` against `self` (RFC 3986 §5.3, through `url::Url::join`).
    ///
    /// `self` must be absolute. An absolute reference is returned as is.
    pub fn resolve(&self, reference: &StructuredUrl) -> Result<StructuredUrl, UrlError> {
        if !self.is_absolute() {
            return Err(UrlError::RelativeBase {
                base: self.to_string(),
            });
        }
        if reference.is_absolute() {
            return Ok(reference.clone());
        }

        let base_str = self.to_string();
        let base =
            ParsedUrl::parse(&base_str).map_err(|e| UrlError::syntax(&base_str, e.to_string()))?;
        let reference_str = reference.to_string();
        let joined = base
            .join(&reference_str)
            .map_err(|e| UrlError::syntax(&reference_str, e.to_string()))?;

        // An empty reference path keeps whichever empty path it inherits.
        let keep_empty_path =
            reference.path.is_empty() && (reference.host.is_some() || self.path.is_empty());
        Ok(Self::from_parsed(&joined, keep_empty_path))
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn has_authority(&self) -> bool {
        self.host.is_some()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Host, with the port appended when it is not the scheme default.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for StructuredUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{}@", userinfo)?;
            }
            f.write_str(host)?;
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

fn has_valid_port(host_port: &str) -> bool {
    let port = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => match host_port[end + 1..].strip_prefix(':') {
                Some(port) => port,
                None => return host_port.len() == end + 1,
            },
            None => return false,
        }
    } else {
        match host_port.rsplit_once(':') {
            Some((_, port)) => port,
            None => return true,
        }
    };
    port.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_reference() {
        let raw = RawReference::split("http://user@host.com:8080/a/b?q=1#frag");
        assert_eq!(raw.scheme, Some("http"));
        assert_eq!(raw.authority, Some("user@host.com:8080"));
        assert_eq!(raw.path, "/a/b");
        assert_eq!(raw.query, Some("q=1"));
        assert_eq!(raw.fragment, Some("frag"));
    }

    #[test]
    fn test_split_without_path() {
        let raw = RawReference::split("http://host.com?q=query/");
        assert_eq!(raw.authority, Some("host.com"));
        assert_eq!(raw.path, "");
        assert_eq!(raw.query, Some("q=query/"));
    }

    #[test]
    fn test_split_relative() {
        let raw = RawReference::split("../from/parent?x#y?z");
        assert_eq!(raw.scheme, None);
        assert_eq!(raw.authority, None);
        assert_eq!(raw.path, "../from/parent");
        assert_eq!(raw.query, Some("x"));
        assert_eq!(raw.fragment, Some("y?z"));
    }

    #[test]
    fn test_scheme_candidate() {
        assert_eq!(scheme_candidate("http://a"), Some("http"));
        assert_eq!(scheme_candidate("a/b:c"), None);
        assert_eq!(scheme_candidate(":foo"), Some(""));
        assert!(is_valid_scheme("svn+ssh"));
        assert!(!is_valid_scheme("1http"));
        assert!(!is_valid_scheme(""));
    }

    #[test]
    fn test_parse_keeps_empty_path() {
        let url = StructuredUrl::parse("http://www.host.com").unwrap();
        assert_eq!(url.path(), "");
        assert_eq!(url.host(), Some("www.host.com"));
        assert_eq!(url.to_string(), "http://www.host.com");

        let root = StructuredUrl::parse("http://www.host.com/").unwrap();
        assert_eq!(root.path(), "/");
    }

    #[test]
    fn test_parse_non_default_port() {
        let url = StructuredUrl::parse("http://host.com:8080/x").unwrap();
        assert_eq!(url.host(), Some("host.com:8080"));
        assert_eq!(url.to_string(), "http://host.com:8080/x");
    }

    #[test]
    fn test_parse_relative() {
        let url = StructuredUrl::parse("from/current?a=b").unwrap();
        assert!(!url.is_absolute());
        assert!(!url.has_authority());
        assert_eq!(url.path(), "from/current");
        assert_eq!(url.query(), Some("a=b"));
        assert_eq!(url.to_string(), "from/current?a=b");
    }

    #[test]
    fn test_parse_network_path_reference() {
        let url = StructuredUrl::parse("//cdn.host.com/lib.js").unwrap();
        assert!(!url.is_absolute());
        assert_eq!(url.host(), Some("cdn.host.com"));
        assert_eq!(url.to_string(), "//cdn.host.com/lib.js");
    }

    #[test]
    fn test_parse_rejects_colon_in_first_segment() {
        let err = StructuredUrl::parse("1http://host.com").unwrap_err();
        assert!(matches!(err, UrlError::Syntax { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(StructuredUrl::parse("http://host.com:port/").is_err());
        assert!(StructuredUrl::parse("//host.com:port/").is_err());
        assert!(StructuredUrl::parse("//[::1]:8080/").is_ok());
    }

    #[test]
    fn test_resolve() {
        let base = StructuredUrl::parse("http://a.com/yo/wordpress/actu").unwrap();
        let reference = StructuredUrl::parse("../from/parent").unwrap();
        let resolved = base.resolve(&reference).unwrap();
        assert_eq!(resolved.to_string(), "http://a.com/yo/from/parent");
    }

    #[test]
    fn test_resolve_query_only_against_empty_path() {
        let base = StructuredUrl::parse("http://a.com").unwrap();
        let reference = StructuredUrl::parse("?page=2").unwrap();
        let resolved = base.resolve(&reference).unwrap();
        assert_eq!(resolved.path(), "");
        assert_eq!(resolved.to_string(), "http://a.com?page=2");
    }

    #[test]
    fn test_resolve_requires_absolute_base() {
        let base = StructuredUrl::parse("/relative").unwrap();
        let reference = StructuredUrl::parse("x").unwrap();
        assert_eq!(
            base.resolve(&reference).unwrap_err(),
            UrlError::RelativeBase {
                base: "/relative".to_string()
            }
        );
    }
}
