pub mod english;
pub mod pos_tags;
pub mod token_models;
pub mod tokenizer;

use crate::core::{
    Language,
    NormalizeConfig,
    StopwordSet,
};

/// One language's token extraction: raw text in, normalized and filtered tokens out.
pub trait TokenExtractor {
    fn language(&self) -> Language;

    fn extract(&self, text: &str, stopwords: &StopwordSet, normalize: &NormalizeConfig) -> Vec<String>;
}

pub use english::EnglishTokenizer;
pub use tokenizer::{
    contains_japanese,
    JapaneseTokenizer,
};
