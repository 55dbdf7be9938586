use std::{
    collections::HashSet,
    fs,
    path::Path,
};

use super::CloudError;

/// Words excluded from counting for one language. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_list(words: &[&str]) -> Self {
        Self { words: words.iter().map(|w| w.to_string()).collect() }
    }

    /// Loads one stopword per line, ignoring blank lines and surrounding whitespace.
    ///
    /// A missing file is an error when `required` is set (the path was given explicitly);
    /// otherwise it yields an empty set.
    pub fn load(path: &Path, required: bool) -> Result<Self, CloudError> {
        if !path.exists() {
            if required {
                return Err(CloudError::ConfigNotFound(path.to_path_buf()));
            }
            tracing::warn!("Stopword file {} not found, using an empty list", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CloudError::Custom(format!("Failed to read stopwords {}: {}", path.display(), e))
        })?;

        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let words = content
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Exact match, or match on the lowercased word.
    pub fn contains_ignore_case(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
