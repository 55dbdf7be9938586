use std::{
    collections::HashMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use super::TermEntry;
use crate::core::{
    pipeline::{
        process_source_file,
        LanguageTools,
    },
    CloudError,
    SourceFile,
};

/// Token occurrence counts. Counts only ever grow; merging is commutative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: FrequencyTable) {
        for (token, count) in other.counts {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    pub fn get(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// The `n` most frequent tokens, highest count first. Equal counts sort by token so the
    /// selection does not depend on hash order.
    pub fn top_n(&self, n: usize) -> Vec<TermEntry> {
        let mut entries: Vec<(&String, &u32)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        entries.into_iter().take(n).map(|(term, &frequency)| TermEntry::new(term.clone(), frequency)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for token in iter {
            table.add(token);
        }
        table
    }
}

#[derive(Debug, Clone)]
pub struct FrequencyAnalysisResult {
    pub frequencies: FrequencyTable,
    pub total_terms: u64,
    pub unique_terms: usize,
    pub files_processed: usize,
}

/// Counts tokens across `file_paths`. Each file gets its own table, merged into the run total.
/// Any unreadable file aborts the run.
pub fn analyze_files(
    file_paths: &[PathBuf],
    language_tools: &mut LanguageTools,
) -> Result<FrequencyAnalysisResult, CloudError> {
    let mut frequencies = FrequencyTable::new();

    for (idx, file_path) in file_paths.iter().enumerate() {
        let source_file = SourceFile::new(file_path);
        let file_table: FrequencyTable =
            process_source_file(&source_file, language_tools)?.into_iter().collect();

        tracing::debug!(
            "[{}/{}] {}: {} tokens, {} unique",
            idx + 1,
            file_paths.len(),
            source_file.title,
            file_table.total(),
            file_table.len()
        );

        frequencies.merge(file_table);
    }

    if frequencies.is_empty() {
        return Err(CloudError::NoTokens);
    }

    Ok(FrequencyAnalysisResult {
        total_terms: frequencies.total(),
        unique_terms: frequencies.len(),
        files_processed: file_paths.len(),
        frequencies,
    })
}

/// Writes `token\tcount` lines, one per entry, without a trailing newline.
pub fn export_log(entries: &[TermEntry], path: &Path) -> Result<(), CloudError> {
    let lines: Vec<String> =
        entries.iter().map(|entry| format!("{}\t{}", entry.term, entry.frequency)).collect();

    fs::write(path, lines.join("\n"))
        .map_err(|e| CloudError::Custom(format!("Failed to write log {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        pipeline::AnalyzerSource,
        NormalizeConfig,
        StopwordSet,
    };

    fn tools(stopwords: &[&str], normalize: &str) -> LanguageTools {
        LanguageTools::new(
            StopwordSet::from_list(stopwords),
            StopwordSet::default(),
            serde_json::from_str::<NormalizeConfig>(normalize).unwrap(),
            AnalyzerSource::default(),
        )
    }

    fn write_posts(dir: &Path, posts: &[(&str, &str)]) -> Vec<PathBuf> {
        posts
            .iter()
            .map(|(name, content)| {
                let path = dir.join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_top_n_orders_by_count_then_token() {
        let table: FrequencyTable =
            ["rust", "cloud", "rust", "word", "cloud", "rust", "alpha"].into_iter().collect();

        assert_eq!(
            table.top_n(3),
            vec![TermEntry::new("rust", 3), TermEntry::new("cloud", 2), TermEntry::new("alpha", 1)]
        );
        assert_eq!(table.top_n(10).len(), 4);
        assert!(table.top_n(0).is_empty());
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a: FrequencyTable = ["x", "y"].into_iter().collect();
        let b: FrequencyTable = ["y", "z", "z"].into_iter().collect();
        a.merge(b);
        assert_eq!(a.get("x"), 1);
        assert_eq!(a.get("y"), 2);
        assert_eq!(a.get("z"), 2);
        assert_eq!(a.get("missing"), 0);
        assert_eq!(a.total(), 5);
    }

    #[test]
    fn test_cat_example_counts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_posts(dir.path(), &[("cat.md", "The cat sat on a mat.")]);

        let result = analyze_files(&paths, &mut tools(&["the", "a"], "{}")).unwrap();
        let expected: FrequencyTable = ["cat", "sat", "mat"].into_iter().collect();
        assert_eq!(result.frequencies, expected);
        assert_eq!(result.unique_terms, 3);
        assert_eq!(result.files_processed, 1);
    }

    #[test]
    fn test_file_order_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = write_posts(
            dir.path(),
            &[
                ("a.md", "Rust makes systems programming pleasant"),
                ("b.md", "---\ntitle: Rust weekly\n---\nPleasant weekly notes about Rust"),
                ("c.md", "Programming notes, programming fun"),
            ],
        );

        let forward = analyze_files(&paths, &mut tools(&[], "{}")).unwrap();
        paths.reverse();
        let backward = analyze_files(&paths, &mut tools(&[], "{}")).unwrap();

        assert_eq!(forward.frequencies, backward.frequencies);
        assert_eq!(forward.frequencies.get("rust"), 3);
        assert_eq!(forward.frequencies.get("programming"), 3);
    }

    #[test]
    fn test_output_respects_stopwords_and_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_posts(
            dir.path(),
            &[("a.md", "The Javascript and JS and javascript guide for the TypeScript crowd")],
        );
        let stopwords = ["the", "and", "for", "guide"];
        let normalize = r#"{ "en": { "javascript": "JavaScript", "js": "JavaScript", "typescript": "TypeScript" } }"#;
        let config: NormalizeConfig = serde_json::from_str(normalize).unwrap();

        let result = analyze_files(&paths, &mut tools(&stopwords, normalize)).unwrap();

        for (token, _) in result.frequencies.iter() {
            assert!(!stopwords.contains(&token), "stopword {token} counted");
            let is_value = config.en.values().any(|v| v == token);
            assert!(is_value || !config.en.contains_key(token), "unnormalized {token}");
        }
        assert_eq!(result.frequencies.get("JavaScript"), 3);
        assert_eq!(result.frequencies.get("TypeScript"), 1);
    }

    #[test]
    fn test_no_tokens_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_posts(dir.path(), &[("empty.md", "```\ncode only\n```\n2025")]);
        let err = analyze_files(&paths, &mut tools(&[], "{}")).unwrap_err();
        assert!(matches!(err, CloudError::NoTokens));
    }

    #[test]
    fn test_export_log_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word_cloud.log");
        export_log(&[TermEntry::new("rust", 3), TermEntry::new("日本語", 2)], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "rust\t3\n日本語\t2");
    }
}
