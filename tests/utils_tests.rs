//! Integration tests for reference resolution and host utilities.

use crawlurl::{is_subdomain, parse, resolve_reference, strip_www, UrlError, UrlParser};

const BASE: &str = "http://www.dealerofpeopleemotions.com/yo/wordpress/actu";

#[test]
fn test_resolve_from_root() {
    let base = parse(BASE).unwrap();
    let resolved = base.resolve_reference(&parse("/from/root/").unwrap()).unwrap();

    assert!(resolved.is_abs());
    assert_eq!(resolved.path(), "/from/root/");
    assert_eq!(resolved.dir(), "/from");
    assert_eq!(resolved.base(), "root");
    assert_eq!(
        resolved.to_string(),
        "http://www.dealerofpeopleemotions.com/from/root/"
    );
}

#[test]
fn test_resolve_from_current() {
    let base = parse(BASE).unwrap();
    let resolved = base.resolve_reference(&parse("from/current").unwrap()).unwrap();
    assert_eq!(resolved.path(), "/yo/wordpress/from/current");
}

#[test]
fn test_resolve_from_parent() {
    let base = parse(BASE).unwrap();
    let resolved = base.resolve_reference(&parse("../from/parent").unwrap()).unwrap();
    assert_eq!(resolved.path(), "/yo/from/parent");
}

#[test]
fn test_resolve_absolute_reference_wins() {
    let base = parse(BASE).unwrap();
    let other = parse("https://other.org/page?x=1").unwrap();
    let resolved = resolve_reference(&base, &other).unwrap();
    assert_eq!(resolved, other);
}

#[test]
fn test_resolve_network_path_reference() {
    let base = parse("https://host.com/a/b").unwrap();
    let resolved = base.resolve_reference(&parse("//cdn.host.com").unwrap()).unwrap();
    assert_eq!(resolved.to_string(), "https://cdn.host.com");
    assert_eq!(resolved.path(), "");
}

#[test]
fn test_resolve_reference_with_spaces() {
    let base = parse("http://host.com/root/document").unwrap();

    let link = parse("/docs/my file.html").unwrap();
    assert_eq!(link.path(), "/docs/my%20file.html");
    assert_eq!(link.base(), "my%20file.html");
    let resolved = base.resolve_reference(&link).unwrap();
    assert_eq!(resolved.to_string(), "http://host.com/docs/my%20file.html");

    let link = parse("my file.html").unwrap();
    assert_eq!(link.dir(), "");
    let resolved = base.resolve_reference(&link).unwrap();
    assert_eq!(resolved.to_string(), "http://host.com/root/my%20file.html");
    assert_eq!(resolved.dir(), "/root");
}

#[test]
fn test_resolve_query_only_reference() {
    let base = parse("http://host.com/list/page").unwrap();
    let resolved = base.resolve_reference(&parse("?page=2/").unwrap()).unwrap();
    assert_eq!(resolved.path(), "/list/page?page=2/");
    assert_eq!(resolved.base_query(), "page?page=2");
}

#[test]
fn test_resolve_keeps_decomposition_rules() {
    let parser = UrlParser::new();
    let base = parser.parse("http://host.com/a/b/c").unwrap();
    let resolved = parser.resolve_str(&base, "./d/").unwrap();
    assert_eq!(resolved.path(), "/a/b/d/");
    assert_eq!(resolved.dir(), "/a/b");
    assert_eq!(resolved.base(), "d");
}

#[test]
fn test_resolve_requires_absolute_base() {
    let base = parse("/yo/wordpress/actu").unwrap();
    let err = base.resolve_reference(&parse("x").unwrap()).unwrap_err();
    assert_eq!(
        err,
        UrlError::RelativeBase {
            base: "/yo/wordpress/actu".to_string()
        }
    );
}

#[test]
fn test_strip_www() {
    assert_eq!(strip_www("www.example.com"), ("example.com", true));
    assert_eq!(strip_www("example.com"), ("example.com", false));
    assert_eq!(strip_www("wwwexample.com"), ("wwwexample.com", false));
}

#[test]
fn test_subdomains_of_lemonde() {
    let site = parse("http://lemonde.fr/").unwrap();

    assert!(is_subdomain("blog.lemonde.fr", &site));
    assert!(is_subdomain("www.blog.lemonde.fr", &site));
    assert!(is_subdomain("bigbrowser.blog.lemonde.fr", &site));
    assert!(!is_subdomain("lefigaro.fr", &site));
}

#[test]
fn test_subdomain_is_a_plain_suffix_match() {
    let site = parse("http://lemonde.fr/").unwrap();
    assert!(is_subdomain("notlemonde.fr", &site));
}
