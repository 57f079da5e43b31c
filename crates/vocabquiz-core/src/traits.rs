//! Item-pool provider trait.
//!
//! The quiz never owns persistent data. An [`ItemStore`] supplies the pool
//! and persists the one item whose level changed after each answer.

use crate::error::StoreError;
use crate::model::VocabularyItem;

// ---------------------------------------------------------------------------
// ItemStore trait
// ---------------------------------------------------------------------------

/// Trait for backends that hold vocabulary items between sessions.
pub trait ItemStore {
    /// Human-readable store name (e.g. the deck name).
    fn name(&self) -> &str;

    /// Load every item, in a stable order.
    fn load_items(&self) -> anyhow::Result<Vec<VocabularyItem>>;

    /// Persist the level of `item`, matched by identity key.
    fn save_level(&mut self, item: &VocabularyItem) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A store kept entirely in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<VocabularyItem>,
    save_count: u32,
}

impl MemoryStore {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self {
            items,
            save_count: 0,
        }
    }

    /// Number of successful `save_level` calls.
    pub fn save_count(&self) -> u32 {
        self.save_count
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }
}

impl ItemStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_items(&self) -> anyhow::Result<Vec<VocabularyItem>> {
        Ok(self.items.clone())
    }

    fn save_level(&mut self, item: &VocabularyItem) -> anyhow::Result<()> {
        let stored = self
            .items
            .iter_mut()
            .find(|stored| stored.is_same_item(item))
            .ok_or_else(|| StoreError::ItemNotFound(item.key().clone()))?;
        stored.set_level(item.level());
        self.save_count += 1;
        Ok(())
    }
}
