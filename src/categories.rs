use std::collections::HashMap;

use crate::models::CategoryScore;

/// Category key for the passage-based question shape.
pub const READING_COMPREHENSION: &str = "reading_comprehension";

/// Canonicalize one category key. Keys written by older services arrive
/// spaced and capitalized ("Word Recognition"); newer ones arrive already in
/// underscore form. Idempotent.
pub fn normalize_category_key(raw: &str) -> String {
    if raw.contains(' ') {
        raw.to_lowercase().replace(' ', "_")
    } else {
        raw.to_lowercase()
    }
}

/// Rewrite every key of a score map into canonical form. Values pass through
/// unchanged.
pub fn normalize_category_scores(
    raw: &HashMap<String, CategoryScore>,
) -> HashMap<String, CategoryScore> {
    raw.iter()
        .map(|(key, entry)| (normalize_category_key(key), entry.clone()))
        .collect()
}

/// Human label for a category key. The set of known categories is closed;
/// anything else is its own label.
pub fn display_name(key: &str) -> String {
    match key {
        "alphabet_knowledge" => "Alphabet Knowledge".to_string(),
        "phonological_awareness" => "Phonological Awareness".to_string(),
        "decoding" => "Decoding".to_string(),
        "word_recognition" => "Word Recognition".to_string(),
        "reading_comprehension" => "Reading Comprehension".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(total: i64, correct: i64, score: f64) -> CategoryScore {
        CategoryScore {
            total,
            correct,
            score,
        }
    }

    #[test]
    fn test_normalize_key_variants() {
        assert_eq!(normalize_category_key("Word Recognition"), "word_recognition");
        assert_eq!(normalize_category_key("word_recognition"), "word_recognition");
        assert_eq!(normalize_category_key("ALPHABET KNOWLEDGE"), "alphabet_knowledge");
        assert_eq!(normalize_category_key("Decoding"), "decoding");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut raw = HashMap::new();
        raw.insert("Word Recognition".to_string(), score(5, 4, 80.0));
        raw.insert("decoding".to_string(), score(5, 2, 40.0));

        let once = normalize_category_scores(&raw);
        let twice = normalize_category_scores(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_spaced_and_underscored_converge() {
        let mut spaced = HashMap::new();
        spaced.insert("Word Recognition".to_string(), score(5, 4, 80.0));
        let mut underscored = HashMap::new();
        underscored.insert("word_recognition".to_string(), score(5, 4, 80.0));

        assert_eq!(
            normalize_category_scores(&spaced),
            normalize_category_scores(&underscored)
        );
        assert!(normalize_category_scores(&spaced).contains_key("word_recognition"));
    }

    #[test]
    fn test_normalize_passes_values_through() {
        let mut raw = HashMap::new();
        raw.insert("Alphabet Knowledge".to_string(), score(5, 4, 80.0));

        let normalized = normalize_category_scores(&raw);
        assert_eq!(normalized["alphabet_knowledge"], score(5, 4, 80.0));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("alphabet_knowledge"), "Alphabet Knowledge");
        assert_eq!(display_name("phonological_awareness"), "Phonological Awareness");
        assert_eq!(display_name("decoding"), "Decoding");
        assert_eq!(display_name("word_recognition"), "Word Recognition");
        assert_eq!(display_name("reading_comprehension"), "Reading Comprehension");
    }

    #[test]
    fn test_unknown_category_is_its_own_label() {
        assert_eq!(display_name("fluency"), "fluency");
    }
}
