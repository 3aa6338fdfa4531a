//! Splits text records into normalized word tokens.

use super::stopwords::is_stop_word;

/// Lazily tokenizes one text record.
///
/// The record is split on whitespace and every piece is lowercased.
/// Stop words are dropped. Punctuation is left attached to the word
/// it touches, so `"cat."` and `"cat"` are different tokens.
///
/// The iterator borrows `record` and holds no other state, so the
/// same record can be tokenized any number of times.
pub fn tokenize(record: &str) -> impl Iterator<Item = String> + '_ {
    record
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
}
