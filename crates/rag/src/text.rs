//! Query tokenization
//!
//! Lowercases, splits on Unicode word boundaries and drops Dutch/English
//! stop words so that "Wat kost het platform?" and "hoeveel kost het
//! platform" share their content words.

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

const STOPWORDS: &[&str] = &[
    // Dutch
    "de", "het", "een", "en", "van", "ik", "je", "jij", "u", "we", "wij", "jullie", "mijn",
    "uw", "is", "zijn", "wat", "hoe", "welke", "op", "in", "te", "dat", "die", "er", "met",
    "voor", "aan", "om", "ook", "als", "bij", "of", "naar", "dan", "maar", "nog", "al", "wel",
    "niet", "kan", "kun", "dit", "deze", "zo", "ben", "heb", "hebben", "wordt", "worden",
    // English
    "the", "a", "an", "is", "are", "was", "were", "be", "do", "does", "what", "how", "i",
    "you", "we", "it", "of", "to", "for", "on", "with", "and", "or", "my", "your", "can",
    "this", "that",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Lowercased content words in text order
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .unicode_words()
        .filter(|w| !is_stopword(w))
        .map(|w| w.to_string())
        .collect()
}

pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}

/// Lowercased words joined by single spaces, stop words kept
///
/// Used for phrase lookups ("met iemand spreken") where the stop words matter.
pub fn normalize_phrase(text: &str) -> String {
    let lower = text.to_lowercase();
    lower.unicode_words().collect::<Vec<_>>().join(" ")
}

/// Substring containment in either direction.
///
/// Equal strings always match. Otherwise the shorter side needs at least
/// `min_len` chars, so "op" never matches "optimalisatie".
pub fn fuzzy_contains(a: &str, b: &str, min_len: usize) -> bool {
    if a == b {
        return true;
    }
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    shorter.chars().count() >= min_len && longer.contains(shorter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stopwords_and_punctuation() {
        assert_eq!(tokenize("Wat kost het platform?"), vec!["kost", "platform"]);
        assert_eq!(
            tokenize("hoeveel kost het platform"),
            vec!["hoeveel", "kost", "platform"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ?! ").is_empty());
        assert!(tokenize("wat is het").is_empty());
    }

    #[test]
    fn test_fuzzy_contains_either_direction() {
        assert!(fuzzy_contains("kosten", "kost", 3));
        assert!(fuzzy_contains("kost", "kosten", 3));
        assert!(fuzzy_contains("ai", "ai", 3));
        assert!(!fuzzy_contains("op", "optimalisatie", 3));
        assert!(!fuzzy_contains("prijs", "kost", 3));
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("Kan ik met  IEMAND spreken?"), "kan ik met iemand spreken");
    }
}
