use super::pos_tags::PosTag;
use crate::dictionary::DictType;

/// Owned copy of one analyzer token: the surface text and its comma-separated feature row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibratoToken {
    pub surface: String,
    pub features: String,
}

impl From<vibrato::token::Token<'_, '_>> for VibratoToken {
    fn from(value: vibrato::token::Token) -> Self {
        Self {
            surface: value.surface().into(),
            features: value.feature().into(),
        }
    }
}

impl VibratoToken {
    pub fn new(surface: &str, features: &str) -> Self {
        Self { surface: surface.to_string(), features: features.to_string() }
    }

    /// Feature column `idx`, or `*` when the row is shorter.
    pub fn feature(&self, idx: usize) -> &str {
        self.features.split(',').nth(idx).unwrap_or("*")
    }

    pub fn pos(&self) -> PosTag {
        self.feature(0).into()
    }

    /// Dictionary form, falling back to the surface for unknown words (`*` or empty lemma).
    pub fn base_form(&self, dict_type: &DictType) -> &str {
        match self.feature(dict_type.lemma_index()) {
            "" | "*" => &self.surface,
            lemma => lemma,
        }
    }
}
