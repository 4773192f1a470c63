/// Returns true if no disallowed prefix matches the start of `url`
///
/// Matching is a plain, case-sensitive string prefix test.
///
/// # Examples
///
/// ```
/// use site_mapper::url::is_allowed;
///
/// let disallowed = vec!["https://example.com/private".to_string()];
/// assert!(is_allowed("https://example.com/public", &disallowed));
/// assert!(!is_allowed("https://example.com/private/x", &disallowed));
/// ```
pub fn is_allowed(url: &str, disallowed: &[String]) -> bool {
    !disallowed.iter().any(|prefix| url.starts_with(prefix.as_str()))
}
