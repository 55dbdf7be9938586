use std::sync::LazyLock;

use regex::Regex;

use super::TokenExtractor;
use crate::core::{
    Language,
    NormalizeConfig,
    StopwordSet,
};

static EN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9']+").unwrap());

/// Pattern-based tokenizer for Latin-script text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTokenizer;

impl TokenExtractor for EnglishTokenizer {
    fn language(&self) -> Language {
        Language::English
    }

    fn extract(&self, text: &str, stopwords: &StopwordSet, normalize: &NormalizeConfig) -> Vec<String> {
        EN_WORD
            .find_iter(text)
            .filter_map(|m| {
                let token = normalize.normalize_en_case(m.as_str());
                if stopwords.contains_ignore_case(&token) {
                    return None;
                }
                // Short words are noise unless they carry a digit (`3d`, `5g`)
                if token.chars().count() <= 2 && !token.chars().any(|c| c.is_ascii_digit()) {
                    return None;
                }
                Some(token)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, stopwords: &[&str], normalize: &str) -> Vec<String> {
        let normalize: NormalizeConfig = serde_json::from_str(normalize).unwrap();
        EnglishTokenizer.extract(text, &StopwordSet::from_list(stopwords), &normalize)
    }

    #[test]
    fn test_cat_sat_on_a_mat() {
        assert_eq!(extract("The cat sat on a mat.", &["the", "a"], "{}"), vec!["cat", "sat", "mat"]);
    }

    #[test]
    fn test_acronyms_and_normalization() {
        let tokens = extract(
            "Writing Javascript and JS against the API with HTTP/2 in 3D",
            &["the", "with", "and"],
            r#"{ "en": { "javascript": "JavaScript", "js": "JavaScript" } }"#,
        );
        assert_eq!(tokens, vec!["writing", "JavaScript", "JavaScript", "against", "API", "HTTP", "3D"]);
    }

    #[test]
    fn test_apostrophes_stay_in_words() {
        assert_eq!(extract("Don't panic", &[], "{}"), vec!["don't", "panic"]);
    }

    #[test]
    fn test_stopwords_never_survive() {
        let stopwords = ["rust", "API", "don't"];
        let tokens = extract("Rust RUST rust API api Don't", &stopwords, "{}");
        for token in &tokens {
            assert!(!stopwords.contains(&token.as_str()), "{token} leaked");
        }
    }

    #[test]
    fn test_ignores_japanese() {
        assert!(extract("日本語だけの文章", &[], "{}").is_empty());
    }
}
