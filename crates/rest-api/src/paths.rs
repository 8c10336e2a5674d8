//! Path and query-string helpers for resource endpoints.

use std::borrow::Cow;

/// Percent-encodes one path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Appends `?k=v&...` to `path`, or nothing when `pairs` is empty.
pub(crate) fn with_query(path: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path;
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("{path}?{}", serializer.finish())
}
