use std::{
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use vibrato::Tokenizer;

use super::{
    token_models::VibratoToken,
    TokenExtractor,
};
use crate::{
    core::{
        CloudError,
        Language,
        NormalizeConfig,
        StopwordSet,
    },
    dictionary::{
        init_vibrato,
        DictType,
    },
};

// Hiragana, katakana, CJK ideographs (with Extension A and compatibility forms) and the
// 々〆〇 marks. Punctuation (、。「」) splits runs.
static JAPANESE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{3005}-\x{3007}\x{3040}-\x{30FF}\x{3400}-\x{4DBF}\x{4E00}-\x{9FFF}\x{F900}-\x{FAFF}]+")
        .unwrap()
});

pub fn contains_japanese(text: &str) -> bool {
    JAPANESE_RUN.is_match(text)
}

/// Contiguous Japanese spans of `text`; only these reach the morphological analyzer.
pub fn japanese_runs(text: &str) -> impl Iterator<Item = &str> {
    JAPANESE_RUN.find_iter(text).map(|m| m.as_str())
}

/// Japanese tokenizer backed by a vibrato system dictionary.
pub struct JapaneseTokenizer {
    tokenizer: Tokenizer,
    dict_type: DictType,
}

impl JapaneseTokenizer {
    pub fn new(tokenizer: Tokenizer, dict_type: DictType) -> Self {
        Self { tokenizer, dict_type }
    }

    pub fn load(dict_type: DictType, dict_path: Option<&Path>) -> Result<Self, CloudError> {
        let tokenizer = init_vibrato(&dict_type, dict_path)?;
        Ok(Self::new(tokenizer, dict_type))
    }

    /// Runs the analyzer over `text` without any filtering.
    pub fn analyze(&self, text: &str) -> Vec<VibratoToken> {
        let mut worker = self.tokenizer.new_worker();
        let mut tokens = Vec::new();

        for run in japanese_runs(text) {
            worker.reset_sentence(run);
            worker.tokenize();
            tokens.extend(worker.token_iter().map(VibratoToken::from));
        }

        tokens
    }
}

impl TokenExtractor for JapaneseTokenizer {
    fn language(&self) -> Language {
        Language::Japanese
    }

    fn extract(&self, text: &str, stopwords: &StopwordSet, normalize: &NormalizeConfig) -> Vec<String> {
        self.analyze(text)
            .iter()
            .filter_map(|token| select_japanese_token(token, &self.dict_type, stopwords, normalize))
            .collect()
    }
}

/// Decides whether an analyzer token is counted, and under which form.
///
/// Keeps nouns, adjectives and verbs by their dictionary form. A katakana-only lemma
/// for a word written in kanji (UniDic gives `ヒト` for `人`) falls back to the surface.
/// Single characters and stopwords are dropped after normalization.
pub fn select_japanese_token(
    token: &VibratoToken,
    dict_type: &DictType,
    stopwords: &StopwordSet,
    normalize: &NormalizeConfig,
) -> Option<String> {
    if token.surface.is_empty() || !token.pos().is_content_word() {
        return None;
    }

    let mut base = token.base_form(dict_type);
    if is_katakana(base) && token.surface.chars().any(is_kanji) {
        base = token.surface.as_str();
    }

    let base = normalize.apply(Language::Japanese, base);
    if stopwords.contains(base) || base.chars().count() <= 1 {
        return None;
    }

    Some(base.to_string())
}

/// ァ through ヴ plus the long vowel mark. Small ヵヶ, ヷ-ヺ and ・ do not count.
fn is_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| ('\u{30A1}'..='\u{30F4}').contains(&c) || c == 'ー')
}

fn is_kanji(c: char) -> bool {
    matches!(c, '\u{3005}'..='\u{3007}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}')
}
