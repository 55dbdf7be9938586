use std::path::PathBuf;

use super::{
    markdown::strip_markdown,
    CloudError,
    Language,
    NormalizeConfig,
    SourceFile,
    StopwordSet,
};
use crate::{
    dictionary::DictType,
    parser,
    segmentation::{
        contains_japanese,
        EnglishTokenizer,
        JapaneseTokenizer,
        TokenExtractor,
    },
};

/// Where the Japanese analyzer comes from when it is first needed.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerSource {
    pub dict_type: DictType,
    pub dict_path: Option<PathBuf>,
}

/// Everything the per-file pipeline needs, built once per run.
pub struct LanguageTools {
    pub stopwords_en: StopwordSet,
    pub stopwords_ja: StopwordSet,
    pub normalize: NormalizeConfig,
    english: EnglishTokenizer,
    japanese: Option<JapaneseTokenizer>,
    analyzer_source: AnalyzerSource,
}

impl LanguageTools {
    pub fn new(
        stopwords_en: StopwordSet,
        stopwords_ja: StopwordSet,
        normalize: NormalizeConfig,
        analyzer_source: AnalyzerSource,
    ) -> Self {
        Self {
            stopwords_en,
            stopwords_ja,
            normalize,
            english: EnglishTokenizer,
            japanese: None,
            analyzer_source,
        }
    }

    pub fn stopwords(&self, language: Language) -> &StopwordSet {
        match language {
            Language::English => &self.stopwords_en,
            Language::Japanese => &self.stopwords_ja,
        }
    }

    /// Loads (and possibly downloads) the Japanese analyzer on first use.
    fn ensure_japanese(&mut self) -> Result<(), CloudError> {
        if self.japanese.is_none() {
            tracing::info!("Japanese text found, loading morphological analyzer...");
            self.japanese = Some(JapaneseTokenizer::load(
                self.analyzer_source.dict_type,
                self.analyzer_source.dict_path.as_deref(),
            )?);
        }
        Ok(())
    }

    fn run(&self, extractor: &dyn TokenExtractor, text: &str) -> Vec<String> {
        extractor.extract(text, self.stopwords(extractor.language()), &self.normalize)
    }

    /// Japanese tokens first, then English ones. Text without Japanese never touches the analyzer.
    pub fn tokenize(&mut self, text: &str) -> Result<Vec<String>, CloudError> {
        let mut tokens = Vec::new();

        if contains_japanese(text) {
            self.ensure_japanese()?;
            if let Some(japanese) = &self.japanese {
                tokens.extend(self.run(japanese, text));
            }
        }

        tokens.extend(self.run(&self.english, text));
        Ok(tokens)
    }
}

/// Reads, strips and tokenizes one markdown file.
pub fn process_source_file(
    source_file: &SourceFile,
    language_tools: &mut LanguageTools,
) -> Result<Vec<String>, CloudError> {
    let document = parser::read_markdown(source_file)?;
    let text = strip_markdown(&document.text());
    language_tools.tokenize(&text)
}
