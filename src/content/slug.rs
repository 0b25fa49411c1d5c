//! Slug derivation

/// Derive a URL-safe slug from a human-readable name.
///
/// Lowercase ASCII, words joined by `-`; non-ASCII text is transliterated.
pub fn derive_slug(name: &str) -> String {
    slug::slugify(name)
}

/// `base` if nobody uses it yet, otherwise the first free `base-N` (N >= 1)
pub fn unique_slug<F>(base: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Slug used when neither the explicit slug nor the name yields one
pub const FALLBACK_SLUG: &str = "post";

/// Use the explicit slug when one is given, otherwise derive it from `name`.
///
/// Never empty: input with nothing sluggable becomes [`FALLBACK_SLUG`].
pub fn slug_or_derive(explicit: Option<&str>, name: &str) -> String {
    explicit
        .map(derive_slug)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(derive_slug(name)).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}
