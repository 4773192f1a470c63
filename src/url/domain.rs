use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `mailto:` links), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mapper::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses a URL string and extracts its domain in one step
///
/// Returns None for unparsable or host-less URLs.
pub fn domain_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(extract_domain)
}

/// Returns true if both URLs have the same host
///
/// Scheme, port and path are ignored. A URL that cannot be parsed, or has
/// no host, is never on the same domain as anything.
///
/// # Examples
///
/// ```
/// use site_mapper::url::is_same_domain;
///
/// assert!(is_same_domain("http://example.com/a", "https://EXAMPLE.com"));
/// assert!(!is_same_domain("https://blog.example.com", "https://example.com"));
/// ```
pub fn is_same_domain(url: &str, reference_url: &str) -> bool {
    match (domain_of(url), domain_of(reference_url)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_domain_of_mailto() {
        assert_eq!(domain_of("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_domain_of_garbage() {
        assert_eq!(domain_of("not a url"), None);
        assert_eq!(domain_of(""), None);
    }

    #[test]
    fn test_same_domain_ignores_scheme_and_path() {
        assert!(is_same_domain(
            "http://example.com/a/b",
            "https://example.com"
        ));
    }

    #[test]
    fn test_same_domain_ignores_port() {
        assert!(is_same_domain(
            "http://127.0.0.1:8080/page",
            "http://127.0.0.1:9090/index"
        ));
    }

    #[test]
    fn test_different_domains() {
        assert!(!is_same_domain("http://other.com", "http://example.com"));
    }

    #[test]
    fn test_subdomain_is_different_domain() {
        assert!(!is_same_domain(
            "https://www.example.com",
            "https://example.com"
        ));
    }

    #[test]
    fn test_unparsable_is_never_same_domain() {
        assert!(!is_same_domain("example.com/page", "example.com/page"));
        assert!(!is_same_domain("", "https://example.com"));
    }
}
