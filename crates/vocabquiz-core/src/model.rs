//! Core data model types for vocabquiz.
//!
//! A [`VocabularyItem`] is one word pair the user is studying. Its
//! [`IdentityKey`] recognizes "the same" item across collections, and its
//! mastery level is a bounded score in `0..=MAX_LEVEL`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest mastery level an item can reach.
pub const MAX_LEVEL: u8 = 5;

/// Optional restriction of quiz questions to a single mastery level.
///
/// `None` means every item is eligible.
pub type LevelFilter = Option<u8>;

/// The natural key of a vocabulary item.
///
/// Two items with equal keys are the same item, whatever their levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityKey {
    /// Language of the text being studied (e.g. "english").
    pub source_language: String,
    /// Language of the translation (e.g. "spanish").
    pub target_language: String,
    /// The word or phrase to translate.
    pub source_text: String,
    /// Its translation.
    pub target_text: String,
}

impl IdentityKey {
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }

    /// Copy with surrounding whitespace removed. Case is kept.
    pub fn trimmed(&self) -> Self {
        let trim = |s: &str| s.trim().to_string();
        Self {
            source_language: trim(&self.source_language),
            target_language: trim(&self.target_language),
            source_text: trim(&self.source_text),
            target_text: trim(&self.target_text),
        }
    }
}

/// Keys print as `source_language|target_language|source_text|target_text`.
impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.source_language, self.target_language, self.source_text, self.target_text
        )
    }
}

impl FromStr for IdentityKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, '|').map(str::trim).collect();
        match parts.as_slice() {
            [from, to, input, output] if parts.iter().all(|p| !p.is_empty()) => {
                Ok(IdentityKey::new(*from, *to, *input, *output))
            }
            _ => Err(format!(
                "invalid item key '{s}': expected source_language|target_language|source_text|target_text"
            )),
        }
    }
}

/// One word or phrase pair with its mastery level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyItem {
    #[serde(flatten)]
    key: IdentityKey,
    level: u8,
}

impl VocabularyItem {
    /// A new item at level 0.
    pub fn new(key: IdentityKey) -> Self {
        Self { key, level: 0 }
    }

    /// Shorthand for building an item from its four key fields.
    pub fn pair(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
    ) -> Self {
        Self::new(IdentityKey::new(
            source_language,
            target_language,
            source_text,
            target_text,
        ))
    }

    /// Set the starting level. Values above [`MAX_LEVEL`] are clamped.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.min(MAX_LEVEL);
        self
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn source_language(&self) -> &str {
        &self.key.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.key.target_language
    }

    pub fn source_text(&self) -> &str {
        &self.key.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.key.target_text
    }

    /// Current mastery level, always in `0..=MAX_LEVEL`.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether both items share an identity key, ignoring levels.
    pub fn is_same_item(&self, other: &VocabularyItem) -> bool {
        self.key == other.key
    }

    pub(crate) fn increase_level(&mut self) {
        self.level = (self.level + 1).min(MAX_LEVEL);
    }

    pub(crate) fn decrease_level(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub(crate) fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }
}
