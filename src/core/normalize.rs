use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    CloudError,
    Language,
};

/// Per-language `raw -> canonical` replacements read from `normalize.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub en: HashMap<String, String>,
    #[serde(default)]
    pub ja: HashMap<String, String>,
}

impl NormalizeConfig {
    pub fn load(path: &Path, required: bool) -> Result<Self, CloudError> {
        if !path.exists() {
            if required {
                return Err(CloudError::ConfigNotFound(path.to_path_buf()));
            }
            tracing::warn!("Normalization file {} not found, no rules applied", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CloudError::Custom(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    pub fn rules(&self, language: Language) -> &HashMap<String, String> {
        match language {
            Language::English => &self.en,
            Language::Japanese => &self.ja,
        }
    }

    /// Direct lookup; a miss returns the token unchanged.
    pub fn apply<'a>(&'a self, language: Language, token: &'a str) -> &'a str {
        self.rules(language).get(token).map(String::as_str).unwrap_or(token)
    }

    /// English case folding. An exact rule wins, then a rule for the lowercased word.
    /// Without a rule, all-caps words (acronyms) are kept and everything else is lowercased.
    pub fn normalize_en_case(&self, token: &str) -> String {
        if let Some(mapped) = self.en.get(token) {
            return mapped.clone();
        }

        let lowered = token.to_lowercase();
        if let Some(mapped) = self.en.get(&lowered) {
            return mapped.clone();
        }

        if is_upper(token) {
            return token.to_string();
        }

        lowered
    }
}

/// True when the word has at least one cased letter and none of them are lowercase.
fn is_upper(token: &str) -> bool {
    let mut has_cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
