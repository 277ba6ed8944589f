//! URL string normalization applied before structured parsing.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::UrlError;
use crate::url::syntax::{is_valid_scheme, scheme_candidate, RawReference};

/// Turns a raw URL string into its normalized form.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> Result<String, UrlError>;
}

/// Which normalizations [`SafeNormalizer`] applies. Every flag defaults to on.
///
/// The scheme is always lowercased and a scheme's default port is always
/// dropped. The `url` crate rewrites absolute `http`, `https` and `ftp` URLs the
/// same way, so `lowercase_host`, `remove_empty_port_separator` and
/// `remove_dot_segments` only change the result of network-path references
/// (`//host/path`) and of URLs with a non-special scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeFlags {
    /// `//Host.COM/` -> `//host.com/`; non-ASCII hosts are converted with IDNA.
    pub lowercase_host: bool,
    /// `%2f` -> `%2F`
    pub uppercase_escapes: bool,
    /// `%7E` -> `~`, only for unreserved characters.
    pub decode_unnecessary_escapes: bool,
    /// `my file.html` -> `my%20file.html`, in the path, query and fragment.
    pub encode_necessary_escapes: bool,
    /// `//host.com:/` -> `//host.com/`
    pub remove_empty_port_separator: bool,
    /// `http://host.com/a?` -> `http://host.com/a`
    pub remove_empty_query_separator: bool,
    /// `//host.com/a/./b/../c` -> `//host.com/a/c`, only for references with a
    /// scheme or an authority.
    pub remove_dot_segments: bool,
}

impl Default for NormalizeFlags {
    fn default() -> Self {
        Self {
            lowercase_host: true,
            uppercase_escapes: true,
            decode_unnecessary_escapes: true,
            encode_necessary_escapes: true,
            remove_empty_port_separator: true,
            remove_empty_query_separator: true,
            remove_dot_segments: true,
        }
    }
}

/// String-level normalizer that only applies semantics-preserving rewrites.
///
/// Rejects control characters, malformed schemes and malformed percent escapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeNormalizer {
    flags: NormalizeFlags,
}

impl SafeNormalizer {
    pub fn new(flags: NormalizeFlags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> NormalizeFlags {
        self.flags
    }

    fn normalize_authority(
        &self,
        raw: &str,
        scheme: Option<&str>,
        authority: &str,
    ) -> Result<String, UrlError> {
        let (userinfo, host_port) = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => (Some(userinfo), host_port),
            None => (None, authority),
        };
        let (host, port) = split_host_port(host_port);

        let mut out = String::with_capacity(authority.len());
        if let Some(userinfo) = userinfo {
            out.push_str(&self.normalize_escapes(userinfo));
            out.push('@');
        }

        if self.flags.lowercase_host {
            let host = normalize_host(host).map_err(|reason| UrlError::normalization(raw, reason))?;
            out.push_str(&host);
        } else {
            out.push_str(host);
        }

        if let Some(port) = port {
            let drop_port = (port.is_empty() && self.flags.remove_empty_port_separator)
                || scheme
                    .and_then(default_port)
                    .is_some_and(|default| port == default);
            if !drop_port {
                out.push(':');
                out.push_str(port);
            }
        }
        Ok(out)
    }

    /// Percent-encode the characters a URL cannot carry literally.
    fn encode_escapes<'a>(&self, component: &'a str) -> Cow<'a, str> {
        if !self.flags.encode_necessary_escapes || !component.chars().any(needs_escape) {
            return Cow::Borrowed(component);
        }

        let mut out = String::with_capacity(component.len() + 8);
        let mut buf = [0u8; 4];
        for c in component.chars() {
            if needs_escape(c) {
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }

    /// Rewrite the percent escapes of one component according to the flags.
    ///
    /// Escapes must have been validated with [`validate_escapes`].
    fn normalize_escapes(&self, component: &str) -> String {
        if !self.flags.uppercase_escapes && !self.flags.decode_unnecessary_escapes {
            return component.to_string();
        }

        let mut out = String::with_capacity(component.len());
        let mut rest = component;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let hex = rest.get(pos + 1..pos + 3).unwrap_or_default();
            match u8::from_str_radix(hex, 16) {
                Ok(byte) if hex.len() == 2 => {
                    if self.flags.decode_unnecessary_escapes && is_unreserved(byte) {
                        out.push(char::from(byte));
                    } else if self.flags.uppercase_escapes {
                        out.push('%');
                        out.push_str(&hex.to_ascii_uppercase());
                    } else {
                        out.push('%');
                        out.push_str(hex);
                    }
                    rest = &rest[pos + 3..];
                }
                _ => {
                    out.push('%');
                    rest = &rest[pos + 1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Normalizer for SafeNormalizer {
    fn normalize(&self, raw: &str) -> Result<String, UrlError> {
        if raw.chars().any(|c| c.is_ascii_control()) {
            return Err(UrlError::normalization(raw, "invalid control character in URL"));
        }

        let head = raw.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        if let Some(candidate) = scheme_candidate(head) {
            if candidate.is_empty() {
                return Err(UrlError::normalization(raw, "missing protocol scheme"));
            }
            if !is_valid_scheme(candidate) {
                return Err(UrlError::normalization(
                    raw,
                    format!("invalid scheme {:?}", candidate),
                ));
            }
        }
        validate_escapes(raw)?;

        let parts = RawReference::split(raw);
        let mut out = String::with_capacity(raw.len());

        if let Some(scheme) = parts.scheme {
            out.push_str(&scheme.to_ascii_lowercase());
            out.push(':');
        }

        let scheme = parts.scheme.map(str::to_ascii_lowercase);
        if let Some(authority) = parts.authority {
            out.push_str("//");
            out.push_str(&self.normalize_authority(raw, scheme.as_deref(), authority)?);
        }

        let path = self.normalize_escapes(&self.encode_escapes(parts.path));
        if self.flags.remove_dot_segments && (parts.scheme.is_some() || parts.authority.is_some())
        {
            out.push_str(&remove_dot_segments(&path));
        } else {
            out.push_str(&path);
        }

        if let Some(query) = parts.query {
            if !(query.is_empty() && self.flags.remove_empty_query_separator) {
                out.push('?');
                out.push_str(&self.normalize_escapes(&self.encode_escapes(query)));
            }
        }
        if let Some(fragment) = parts.fragment {
            out.push('#');
            out.push_str(&self.normalize_escapes(&self.encode_escapes(fragment)));
        }

        Ok(out)
    }
}

/// Lowercase a host; non-ASCII hosts go through IDNA UTS-46 ASCII conversion.
pub fn normalize_host(host: &str) -> Result<String, String> {
    if host.is_ascii() {
        return Ok(host.to_ascii_lowercase());
    }
    idna::domain_to_ascii(&host.to_lowercase())
        .map_err(|_| format!("invalid internationalized host {:?}", host))
}

/// Check that every `%` starts a two-digit hexadecimal escape.
pub fn validate_escapes(raw: &str) -> Result<(), UrlError> {
    let mut rest = raw;
    while let Some(pos) = rest.find('%') {
        let escape = &rest[pos..];
        let valid = escape
            .as_bytes()
            .get(1..3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            let shown: String = escape.chars().take(3).collect();
            return Err(UrlError::normalization(
                raw,
                format!("invalid URL escape {:?}", shown),
            ));
        }
        rest = &rest[pos + 3..];
    }
    Ok(())
}

/// RFC 3986 §5.2.4 dot-segment removal.
pub fn remove_dot_segments(path: &str) -> String {
    let (prefix, body) = match path.strip_prefix('/') {
        Some(body) => ("/", body),
        None => ("", path),
    };

    let mut segments: Vec<&str> = Vec::new();
    let mut trailing = false;
    for segment in body.split('/') {
        trailing = matches!(segment, "." | "..");
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(path.len());
    out.push_str(prefix);
    out.push_str(&segments.join("/"));
    if trailing && !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out
}

fn split_host_port(host_port: &str) -> (&str, Option<&str>) {
    if host_port.starts_with('[') {
        if let Some(end) = host_port.find(']') {
            let (host, rest) = host_port.split_at(end + 1);
            return (host, rest.strip_prefix(':'));
        }
        return (host_port, None);
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    }
}

fn default_port(scheme: &str) -> Option<&'static str> {
    match scheme {
        "http" | "ws" => Some("80"),
        "https" | "wss" => Some("443"),
        "ftp" => Some("21"),
        _ => None,
    }
}

/// Space, non-ASCII and the ASCII characters RFC 3986 never allows unescaped.
/// Brackets stay literal.
fn needs_escape(c: char) -> bool {
    !c.is_ascii() || matches!(c, ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}
