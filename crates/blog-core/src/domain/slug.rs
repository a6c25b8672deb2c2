//! Slug derivation and validation.

/// Maximum length of a post slug.
pub const SLUG_MAX_LEN: usize = 50;

/// Derive a URL-safe slug from free text.
///
/// Transliterates to ASCII (`é` becomes `e`, `ß` becomes `ss`), lowercases,
/// drops everything except ASCII letters, digits, underscores,
/// hyphens and whitespace, collapses runs of whitespace/hyphens into a single
/// hyphen and trims leading/trailing hyphens and underscores. The result is
/// truncated to `max_len` characters.
pub fn slugify(text: &str, max_len: usize) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len().min(max_len));
    let mut pending_sep = false;

    for c in ascii.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_sep = true;
        }
    }

    slug.truncate(max_len);
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Whether `value` is a non-empty slug of letters, digits, underscores or hyphens.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
