use isolang::Language as IsoLanguage;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language utilities for exam documents
///
/// Documents are written in one of three scripts. Tags arrive from the
/// application (`EN`, `UR`, `AR`), from ISO 639-1/639-3 codes, or as English
/// names, and all of them resolve to the same small set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Latin script, left-to-right
    #[default]
    English,
    /// Nastaliq script, right-to-left
    Urdu,
    /// Naskh script, right-to-left
    Arabic,
}

impl Language {
    /// Application tag used in serialized documents
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Urdu => "UR",
            Language::Arabic => "AR",
        }
    }

    /// ISO 639-3 code
    pub fn iso_code(self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Urdu => "urd",
            Language::Arabic => "ara",
        }
    }

    /// English name from the ISO tables
    pub fn name(self) -> &'static str {
        IsoLanguage::from_639_3(self.iso_code())
            .map(|lang| lang.to_name())
            .unwrap_or("English")
    }

    /// Resolve a tag, falling back to English for anything unrecognized
    pub fn from_tag_or_default(tag: &str) -> Self {
        resolve_language(tag).unwrap_or_else(|| {
            if !tag.trim().is_empty() {
                warn!("Unknown language tag '{}', falling back to English", tag);
            }
            Language::default()
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        resolve_language(s).ok_or_else(|| anyhow::anyhow!("Unsupported language: {}", s))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(Language::from_tag_or_default).unwrap_or_default())
    }
}

/// Resolve an application tag, ISO 639-1/639-3 code or English name to a
/// supported language
pub fn resolve_language(tag: &str) -> Option<Language> {
    let normalized = tag.trim().to_lowercase();

    // Two- and three-letter codes go through the ISO tables
    let iso = match normalized.len() {
        2 => IsoLanguage::from_639_1(&normalized),
        3 => IsoLanguage::from_639_3(&normalized),
        _ => None,
    };

    let code = match iso {
        Some(lang) => lang.to_639_3(),
        None => match normalized.as_str() {
            "english" => "eng",
            "urdu" => "urd",
            "arabic" => "ara",
            _ => return None,
        },
    };

    match code {
        "eng" => Some(Language::English),
        "urd" => Some(Language::Urdu),
        // Standard Arabic resolves to its macrolanguage
        "ara" | "arb" => Some(Language::Arabic),
        _ => None,
    }
}

/// Check if two tags name the same supported language
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    match (resolve_language(tag1), resolve_language(tag2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
