//! URL and path helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component
///
/// # Examples
/// ```ignore
/// encode_component("a b/c.txt") // -> "a%20b%2Fc.txt"
/// ```
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Percent-encode each segment of a slash-separated path, keeping the slashes
///
/// # Examples
/// ```ignore
/// encode_path("web/my file.txt") // -> "web/my%20file.txt"
/// ```
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Join two repo-relative paths with exactly one slash between them
///
/// # Examples
/// ```ignore
/// join_path("web/content/", "/docs") // -> "web/content/docs"
/// join_path("", "docs")              // -> "docs"
/// ```
pub fn join_path(a: &str, b: &str) -> String {
    let a = a.trim_end_matches('/');
    let b = b.trim_start_matches('/');

    if a.is_empty() {
        b.to_string()
    } else if b.is_empty() {
        a.to_string()
    } else {
        format!("{}/{}", a, b)
    }
}

/// Last segment of a slash-separated path, or `None` for an empty tail
pub fn last_segment(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|s| !s.is_empty())
}
