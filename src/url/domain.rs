//! Host suffix helpers used to keep a crawl inside one site.

use crate::types::Url;

const WWW_PREFIX: &str = "www.";

/// Strip a leading `www.` from a host.
///
/// Returns the remaining host and whether the prefix was present.
///
/// # Examples
///
/// ```
/// use crawlurl::strip_www;
///
/// assert_eq!(strip_www("www.example.com"), ("example.com", true));
/// assert_eq!(strip_www("example.com"), ("example.com", false));
/// ```
pub fn strip_www(host: &str) -> (&str, bool) {
    match host.strip_prefix(WWW_PREFIX) {
        Some(stripped) => (stripped, true),
        None => (host, false),
    }
}

/// Whether `host` is `target`'s host or one of its subdomains, ignoring `www.`.
///
/// This is a plain string suffix test, not a label-boundary test:
/// `notlemonde.fr` is reported as a subdomain of `lemonde.fr`.
/// Empty hosts never match.
///
/// # Examples
///
/// ```
/// use crawlurl::{is_subdomain, parse};
///
/// let site = parse("http://lemonde.fr/")?;
/// assert!(is_subdomain("www.blog.lemonde.fr", &site));
/// assert!(!is_subdomain("example.com", &site));
/// # Ok::<(), crawlurl::UrlError>(())
/// ```
pub fn is_subdomain(host: &str, target: &Url) -> bool {
    let (host, _) = strip_www(host);
    let (target_host, _) = strip_www(target.host());
    if host.is_empty() || target_host.is_empty() {
        return false;
    }
    host.ends_with(target_host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse;

    #[test]
    fn test_strip_www_short_hosts() {
        assert_eq!(strip_www(""), ("", false));
        assert_eq!(strip_www("www"), ("www", false));
        assert_eq!(strip_www("www."), ("", true));
    }

    #[test]
    fn test_is_subdomain() {
        let site = parse("http://lemonde.fr/").unwrap();
        assert!(is_subdomain("lemonde.fr", &site));
        assert!(is_subdomain("blog.lemonde.fr", &site));
        assert!(is_subdomain("bigbrowser.blog.lemonde.fr", &site));
        assert!(!is_subdomain("lemonde.com", &site));
    }

    #[test]
    fn test_is_subdomain_ignores_www_on_target() {
        let site = parse("http://www.lemonde.fr/").unwrap();
        assert!(is_subdomain("blog.lemonde.fr", &site));
    }

    #[test]
    fn test_is_subdomain_plain_suffix() {
        let site = parse("http://lemonde.fr/").unwrap();
        assert!(is_subdomain("notlemonde.fr", &site));
    }

    #[test]
    fn test_is_subdomain_empty_hosts() {
        let relative = parse("/just/a/path").unwrap();
        assert!(!is_subdomain("lemonde.fr", &relative));

        let site = parse("http://lemonde.fr/").unwrap();
        assert!(!is_subdomain("", &site));
        assert!(!is_subdomain("www.", &site));
    }
}
