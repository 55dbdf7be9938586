/// Top-level part of speech (feature column 0). IPADIC and UniDic share these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Meishi,       // Noun (名詞)
    Doushi,       // Verb (動詞)
    Keiyoushi,    // Adjective (形容詞)
    Keijoushi,    // Adjectival noun (形状詞), UniDic only
    Fukushi,      // Adverb (副詞)
    Joshi,        // Particle (助詞)
    Jodoushi,     // Auxiliary verb (助動詞)
    Rentaishi,    // Adnominal (連体詞)
    Setsuzokushi, // Conjunction (接続詞)
    Kandoushi,    // Interjection (感動詞)
    Settouji,     // Prefix (接頭詞 in IPADIC, 接頭辞 in UniDic)
    Setsubiji,    // Suffix (接尾辞), UniDic only
    Daimeishi,    // Pronoun (代名詞), UniDic only
    Kigou,        // Symbol (記号 / 補助記号)
    Firaa,        // Filler (フィラー)
    Kuuhaku,      // Whitespace (空白)
    Unknown,
}

impl PosTag {
    /// Nouns, adjectives and verbs carry content; everything else is dropped before counting.
    pub fn is_content_word(&self) -> bool {
        matches!(self, PosTag::Meishi | PosTag::Keiyoushi | PosTag::Doushi)
    }
}

impl From<&str> for PosTag {
    fn from(value: &str) -> Self {
        match value {
            "名詞" => Self::Meishi,
            "動詞" => Self::Doushi,
            "形容詞" => Self::Keiyoushi,
            "形状詞" => Self::Keijoushi,
            "副詞" => Self::Fukushi,
            "助詞" => Self::Joshi,
            "助動詞" => Self::Jodoushi,
            "連体詞" => Self::Rentaishi,
            "接続詞" => Self::Setsuzokushi,
            "感動詞" => Self::Kandoushi,
            "接頭詞" | "接頭辞" => Self::Settouji,
            "接尾辞" => Self::Setsubiji,
            "代名詞" => Self::Daimeishi,
            "記号" | "補助記号" => Self::Kigou,
            "フィラー" => Self::Firaa,
            "空白" => Self::Kuuhaku,
            _ => Self::Unknown,
        }
    }
}
