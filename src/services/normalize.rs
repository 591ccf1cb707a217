/// Canonical form for industry, genre, and movie-type comparisons
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Like [`normalize`], for values that may be absent; absence normalizes to `""`
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
