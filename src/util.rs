//! Shared utility helpers.

/// Case-insensitive equality for identifiers. Only non-ASCII input allocates.
#[inline]
pub fn eq_ci(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.to_lowercase() == b.to_lowercase()
}

/// Lowercased key used to index identifiers case-insensitively.
#[inline]
pub fn fold_ci(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive ends_with check without allocating.
#[inline]
pub fn ends_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[haystack.len() - needle.len()..]
            .eq_ignore_ascii_case(needle.as_bytes())
}
