//! Spelling game checks and word selection.

use rand::seq::SliceRandom;
use rand::Rng;

/// Case-insensitive, whitespace-trimmed comparison of a whole word.
pub fn validate_spelling(input: &str, word: &str) -> bool {
    input.trim().to_lowercase() == word.trim().to_lowercase()
}

/// Check one typed letter against the letter at `position` (0-based).
///
/// Out-of-range positions are never correct.
pub fn validate_letter(letter: &str, word: &str, position: usize) -> bool {
    match word.chars().nth(position) {
        Some(expected) => letter.to_lowercase() == expected.to_lowercase().to_string(),
        None => false,
    }
}

/// Pick a word that has not been used yet in this session.
///
/// Once every word has been used, any word may be picked again. Returns
/// `None` only for an empty word list.
pub fn select_word<'a, R, S>(words: &'a [S], used: &[S], rng: &mut R) -> Option<&'a str>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let fresh: Vec<&str> = words
        .iter()
        .map(|w| w.as_ref())
        .filter(|w| !used.iter().any(|u| u.as_ref() == *w))
        .collect();

    if fresh.is_empty() {
        return words.choose(rng).map(|w| w.as_ref());
    }
    fresh.choose(rng).copied()
}
