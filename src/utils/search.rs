//! Case folding shared by stored search columns and search input.
//!
//! SQLite's `LOWER()` only folds ASCII, so text is folded in Rust when it is
//! written and matched with a plain `LIKE` against the folded column.

/// Unicode lowercase form stored in `*_search` columns.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// `%text%` over folded text, with LIKE metacharacters matched literally.
pub fn like_pattern(search: &str) -> String {
    let folded = fold_case(search);
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
