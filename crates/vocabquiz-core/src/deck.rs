//! TOML deck files.
//!
//! A deck is a named collection of vocabulary items stored as TOML. Decks are
//! the item pool the CLI quizzes on, and [`DeckStore`] writes level changes
//! back to the file after every answer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::NUM_ANSWERS;
use crate::error::StoreError;
use crate::model::{IdentityKey, VocabularyItem, MAX_LEVEL};
use crate::traits::ItemStore;

/// On-disk shape of a deck file.
#[derive(Debug, Serialize, Deserialize)]
struct TomlDeckFile {
    deck: TomlDeckHeader,
    #[serde(default)]
    items: Vec<TomlDeckItem>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlDeckHeader {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlDeckItem {
    source_text: String,
    target_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<String>,
    #[serde(default)]
    level: i64,
}

/// A named collection of vocabulary items.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Unique identifier for this deck.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What this deck covers.
    pub description: String,
    /// Source language for items that don't name one.
    pub source_language: Option<String>,
    /// Target language for items that don't name one.
    pub target_language: Option<String>,
    /// Last time the deck was written.
    pub updated_at: Option<DateTime<Utc>>,
    /// The items, in file order.
    pub items: Vec<VocabularyItem>,
}

impl Deck {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            source_language: None,
            target_language: None,
            updated_at: None,
            items: Vec::new(),
        }
    }

    /// Add items not already in the deck.
    ///
    /// Keys are trimmed and otherwise kept as given. Keys already present (or
    /// repeated within `keys`) are skipped, and new items start at level 0.
    /// Returns how many items were added.
    pub fn merge(&mut self, keys: impl IntoIterator<Item = IdentityKey>) -> usize {
        let mut known: HashSet<IdentityKey> =
            self.items.iter().map(|item| item.key().clone()).collect();
        let before = self.items.len();

        for key in keys {
            let key = key.trimmed();
            if known.insert(key.clone()) {
                self.items.push(VocabularyItem::new(key));
            }
        }

        let added = self.items.len() - before;
        tracing::debug!(deck = %self.id, added, "merged items");
        added
    }

    /// Drop items whose identity key already appeared earlier in the deck.
    /// Returns how many were removed.
    pub fn dedup(&mut self) -> usize {
        let mut seen = HashSet::new();
        let before = self.items.len();
        self.items.retain(|item| seen.insert(item.key().clone()));
        before - self.items.len()
    }

    /// Mark the deck as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Render the deck as TOML. Item languages equal to the deck defaults are
    /// left out.
    pub fn to_toml_string(&self) -> std::result::Result<String, StoreError> {
        let items = self
            .items
            .iter()
            .map(|item| TomlDeckItem {
                source_text: item.source_text().to_string(),
                target_text: item.target_text().to_string(),
                source_language: language_override(
                    item.source_language(),
                    self.source_language.as_deref(),
                ),
                target_language: language_override(
                    item.target_language(),
                    self.target_language.as_deref(),
                ),
                level: i64::from(item.level()),
            })
            .collect();

        let file = TomlDeckFile {
            deck: TomlDeckHeader {
                id: self.id.clone(),
                name: self.name.clone(),
                description: self.description.clone(),
                source_language: self.source_language.clone(),
                target_language: self.target_language.clone(),
                updated_at: self.updated_at,
            },
            items,
        };

        Ok(toml::to_string_pretty(&file)?)
    }

    /// Write the deck to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> std::result::Result<(), StoreError> {
        let content = self.to_toml_string()?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, content).map_err(io_err)?;
        Ok(())
    }
}

fn language_override(language: &str, default: Option<&str>) -> Option<String> {
    match default {
        Some(d) if d == language => None,
        _ => Some(language.to_string()),
    }
}

/// Parse a single deck file.
pub fn parse_deck(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;

    parse_deck_str(&content, path)
}

/// Parse deck TOML from a string (useful for testing).
pub fn parse_deck_str(content: &str, source_path: &Path) -> Result<Deck> {
    let parsed: TomlDeckFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.deck;
    let items = parsed
        .items
        .into_iter()
        .map(|i| -> std::result::Result<VocabularyItem, StoreError> {
            let source_language = i
                .source_language
                .or_else(|| header.source_language.clone())
                .ok_or_else(|| StoreError::MissingLanguage {
                    item: i.source_text.clone(),
                    which: "source",
                })?;
            let target_language = i
                .target_language
                .or_else(|| header.target_language.clone())
                .ok_or_else(|| StoreError::MissingLanguage {
                    item: i.source_text.clone(),
                    which: "target",
                })?;
            let level = u8::try_from(i.level)
                .ok()
                .filter(|l| *l <= MAX_LEVEL)
                .ok_or_else(|| StoreError::LevelOutOfRange {
                    item: i.source_text.clone(),
                    level: i.level,
                })?;

            Ok(VocabularyItem::pair(
                source_language,
                target_language,
                i.source_text,
                i.target_text,
            )
            .with_level(level))
        })
        .collect::<std::result::Result<Vec<_>, StoreError>>()
        .with_context(|| format!("invalid deck: {}", source_path.display()))?;

    Ok(Deck {
        id: header.id,
        name: header.name,
        description: header.description,
        source_language: header.source_language,
        target_language: header.target_language,
        updated_at: header.updated_at,
        items,
    })
}

/// Recursively load all `.toml` deck files from a directory.
pub fn load_deck_directory(dir: &Path) -> Result<Vec<Deck>> {
    let mut decks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            decks.extend(load_deck_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_deck(&path) {
                Ok(deck) => decks.push(deck),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(decks)
}

/// Items whose source text contains `query`, ignoring case, ordered from the
/// highest mastery level down. An empty query matches every item.
pub fn search<'a>(items: &'a [VocabularyItem], query: &str) -> Vec<&'a VocabularyItem> {
    let query = query.to_lowercase();
    let mut found: Vec<&VocabularyItem> = items
        .iter()
        .filter(|item| item.source_text().to_lowercase().contains(&query))
        .collect();
    found.sort_by(|a, b| b.level().cmp(&a.level()));
    found
}

/// A warning from deck validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item's source text (if applicable).
    pub item: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a deck for common issues.
pub fn validate_deck(deck: &Deck) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate identity keys
    let mut seen = HashSet::new();
    for item in &deck.items {
        if !seen.insert(item.key()) {
            warnings.push(ValidationWarning {
                item: Some(item.source_text().to_string()),
                message: format!("duplicate item: {}", item.key()),
            });
        }
    }

    // Empty texts
    for item in &deck.items {
        if item.source_text().trim().is_empty() || item.target_text().trim().is_empty() {
            warnings.push(ValidationWarning {
                item: Some(item.source_text().to_string()),
                message: "item has an empty source or target text".into(),
            });
        }
    }

    if deck.items.len() < NUM_ANSWERS {
        warnings.push(ValidationWarning {
            item: None,
            message: format!(
                "deck has {} item(s); a quiz needs at least {NUM_ANSWERS}",
                deck.items.len()
            ),
        });
    }

    warnings
}

/// An [`ItemStore`] backed by a deck file.
#[derive(Debug)]
pub struct DeckStore {
    path: PathBuf,
    deck: Deck,
}

impl DeckStore {
    /// Load the deck at `path`.
    ///
    /// Repeated items are collapsed onto their first occurrence, so every
    /// pool index maps to exactly one stored item. The file is rewritten
    /// without the repeats on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut deck = parse_deck(&path)?;
        let removed = deck.dedup();
        if removed > 0 {
            tracing::warn!(
                deck = %deck.id,
                removed,
                "ignoring repeated items, keeping the first of each"
            );
        }
        tracing::info!(deck = %deck.id, items = deck.items.len(), "opened deck");
        Ok(Self { path, deck })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }
}

impl ItemStore for DeckStore {
    fn name(&self) -> &str {
        &self.deck.name
    }

    fn load_items(&self) -> Result<Vec<VocabularyItem>> {
        Ok(self.deck.items.clone())
    }

    fn save_level(&mut self, item: &VocabularyItem) -> Result<()> {
        let stored = self
            .deck
            .items
            .iter_mut()
            .find(|stored| stored.is_same_item(item))
            .ok_or_else(|| StoreError::ItemNotFound(item.key().clone()))?;
        stored.set_level(item.level());

        self.deck.touch();
        self.deck.save(&self.path)?;
        tracing::debug!(item = %item.key(), level = item.level(), "saved level");
        Ok(())
    }
}
