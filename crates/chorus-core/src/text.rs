//! Word normalization shared by keyword triggers and pickup similarity.

use std::collections::HashSet;

/// Lowercase, replace every non-alphanumeric character with a space, and
/// split on whitespace. Empty tokens never appear.
pub fn normalized_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Normalized words joined by single spaces, padded with a space on each
/// side so whole-word phrases can be found with `contains(" phrase ")`.
pub fn padded_normalized(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 2);
    padded.push(' ');
    for word in normalized_words(text) {
        padded.push_str(&word);
        padded.push(' ');
    }
    padded
}

/// Set of normalized words.
pub fn word_set(text: &str) -> HashSet<String> {
    normalized_words(text).collect()
}
