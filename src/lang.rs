//! Language registry — the fixed lookup table behind both selection lists.
//!
//! Each [`LanguageEntry`] carries two locale codes because the speech engines
//! and the translation endpoint do not always agree on how to name a
//! language.  Cantonese is the canonical example: speech recognition and
//! synthesis want `zh-HK`, while the translation endpoint wants `yue`.
//!
//! The registry is built once at startup and never mutated.  Iteration order
//! is registration order so the frontend can populate its selection lists
//! deterministically.

use thiserror::Error;

// ---------------------------------------------------------------------------
// LangError
// ---------------------------------------------------------------------------

/// Errors from registry lookups.
#[derive(Debug, Clone, Error)]
pub enum LangError {
    /// The given key is not present in the registry.  The frontend only
    /// offers registry-backed keys, so hitting this indicates a programming
    /// error rather than bad user input.
    #[error("Unknown language key: {0:?}")]
    UnknownLanguage(String),
}

// ---------------------------------------------------------------------------
// LanguageEntry
// ---------------------------------------------------------------------------

/// One supported language.  Immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Short unique code used as the mapping identifier (e.g. `"yue"`, `"en"`).
    pub key: String,
    /// Human-readable label for selection lists.
    pub display_name: String,
    /// BCP-47 tag for the speech-to-text / text-to-speech engines
    /// (e.g. `"zh-HK"`).
    pub speech_locale: String,
    /// Code for the translation endpoint.  May legitimately differ from
    /// `speech_locale`.
    pub translate_code: String,
}

impl LanguageEntry {
    /// Convenience constructor used by the builtin table and tests.
    pub fn new(key: &str, display_name: &str, speech_locale: &str, translate_code: &str) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            speech_locale: speech_locale.into(),
            translate_code: translate_code.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageRegistry
// ---------------------------------------------------------------------------

/// Ordered, immutable set of supported languages.
///
/// Seven entries in the builtin table; a linear scan beats a map here and
/// keeps registration order for free.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    entries: Vec<LanguageEntry>,
}

impl LanguageRegistry {
    /// The builtin table shipped with the application.
    ///
    /// Note the split codes: Cantonese speech is `zh-HK` but the translation
    /// endpoint takes `yue`; Mandarin uses `zh-CN` for both.
    pub fn builtin() -> Self {
        Self::from_entries(vec![
            LanguageEntry::new("yue", "Cantonese (廣東話)", "zh-HK", "yue"),
            LanguageEntry::new("zh", "Mandarin (國語)", "zh-CN", "zh-CN"),
            LanguageEntry::new("en", "English", "en-US", "en"),
            LanguageEntry::new("ja", "Japanese (日本語)", "ja-JP", "ja"),
            LanguageEntry::new("ko", "Korean (한국어)", "ko-KR", "ko"),
            LanguageEntry::new("fr", "French (Français)", "fr-FR", "fr"),
            LanguageEntry::new("de", "German (Deutsch)", "de-DE", "de"),
        ])
    }

    /// Build a registry from an explicit entry list (useful for tests).
    pub fn from_entries(entries: Vec<LanguageEntry>) -> Self {
        Self { entries }
    }

    /// Look up a language by key.
    ///
    /// # Errors
    ///
    /// [`LangError::UnknownLanguage`] when `key` is absent.
    pub fn lookup(&self, key: &str) -> Result<&LanguageEntry, LangError> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| LangError::UnknownLanguage(key.to_string()))
    }

    /// `true` when `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    /// All entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.entries.iter()
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no languages are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
