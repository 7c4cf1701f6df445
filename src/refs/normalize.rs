//! Reduce a raw reference target to the file name used for matching

use std::borrow::Cow;

/// Strip surrounding `<...>` from a link destination
pub fn strip_angle_brackets(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Split a Markdown link destination from an optional title.
///
/// `img.png "Title"`, `img.png 'Title'` and `img.png (Title)` all yield
/// `img.png`. Whitespace not followed by a title is kept, so unescaped
/// paths such as `my image.png` survive intact.
pub fn strip_title(destination: &str) -> &str {
    let destination = destination.trim();
    if let Some(inner) = destination.strip_prefix('<') {
        return match inner.find('>') {
            Some(end) => inner[..end].trim(),
            None => destination,
        };
    }

    let mut search_from = 0;
    while let Some(offset) = destination[search_from..].find(char::is_whitespace) {
        let split = search_from + offset;
        let rest = destination[split..].trim_start();
        if rest.starts_with('"') || rest.starts_with('\'') || rest.starts_with('(') {
            return destination[..split].trim_end();
        }
        search_from = split + destination[split..].chars().next().map_or(1, char::len_utf8);
    }
    destination
}

/// Drop a `?query` or `#fragment` suffix
pub fn strip_query_and_fragment(target: &str) -> &str {
    match target.find(['?', '#']) {
        Some(idx) => &target[..idx],
        None => target,
    }
}

/// Last path component, accepting both '/' and '\' as separators
pub fn basename(target: &str) -> &str {
    match target.rfind(['/', '\\']) {
        Some(idx) => &target[idx + 1..],
        None => target,
    }
}

/// Normalize a reference target to its basename
pub fn reference_basename(target: &str) -> &str {
    basename(strip_query_and_fragment(target.trim())).trim()
}

/// Basename of a target taken literally, keeping any `?` or `#`
pub fn literal_basename(target: &str) -> &str {
    basename(target.trim()).trim()
}

/// Percent-decoded form of a name, if it differs from the input and is valid UTF-8
pub fn percent_decoded(name: &str) -> Option<String> {
    if !name.contains('%') {
        return None;
    }
    match urlencoding::decode(name) {
        Ok(Cow::Owned(decoded)) if decoded != name => Some(decoded),
        _ => None,
    }
}
