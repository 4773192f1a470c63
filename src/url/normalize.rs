/// Normalizes a URL by trimming every trailing character that is not a letter
///
/// Trivially-equivalent forms such as `https://example.com/`,
/// `https://example.com#` and `https://example.com/#/` all collapse to
/// `https://example.com`. The result is the key used for deduplication and
/// domain comparison.
///
/// Stripping stops once the string is empty. An empty result means the input
/// was degenerate and callers should discard it.
///
/// The operation is idempotent: the result always ends in a letter or is
/// empty, so normalizing it again changes nothing.
///
/// # Examples
///
/// ```
/// use site_mapper::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/about/"), "https://example.com/about");
/// assert_eq!(normalize_url("https://example.com/#"), "https://example.com");
/// assert_eq!(normalize_url("/#/"), "");
/// ```
pub fn normalize_url(url: &str) -> &str {
    url.trim_end_matches(|c: char| !c.is_alphabetic())
}
