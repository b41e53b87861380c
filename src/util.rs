/// Lowercases `value`, taking the ASCII fast path when possible.
pub(crate) fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.to_lowercase()
    }
}

/// Case-insensitive comparison that avoids allocating for ASCII input.
pub(crate) fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    normalize_lower(a) == normalize_lower(b)
}

/// Returns `true` when `value` is a non-empty RFC 9110 token.
pub(crate) fn is_http_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            matches!(
                byte,
                b'0'..=b'9'
                    | b'A'..=b'Z'
                    | b'a'..=b'z'
                    | b'!'
                    | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
        })
}

/// Splits a comma-separated header value, trimming entries and dropping empty ones.
pub(crate) fn split_header_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Trims and deduplicates `values` case-insensitively, keeping the first spelling seen.
pub(crate) fn dedup_ignore_case<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut deduped: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if deduped
            .iter()
            .any(|existing| equals_ignore_case(existing, &trimmed))
        {
            continue;
        }
        deduped.push(trimmed);
    }
    deduped
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
