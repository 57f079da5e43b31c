//! Storage error types.
//!
//! Failures when loading decks or persisting mastery levels. The quiz engine
//! itself never fails; these only come from the item-pool side.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{IdentityKey, MAX_LEVEL};

/// Errors raised by item stores and the deck parser.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The item to update is not in the store.
    #[error("item not found: {0}")]
    ItemNotFound(IdentityKey),

    /// A stored level is outside `0..=MAX_LEVEL`.
    #[error("level {level} out of range for '{item}' (max {})", MAX_LEVEL)]
    LevelOutOfRange { item: String, level: i64 },

    /// Neither the item nor its deck names a language.
    #[error("missing {which} language for '{item}'")]
    MissingLanguage { item: String, which: &'static str },

    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deck could not be written as TOML.
    #[error("failed to serialize deck: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl StoreError {
    /// Returns `true` if the error comes from bad deck content rather than
    /// the environment, so retrying cannot help.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            StoreError::LevelOutOfRange { .. } | StoreError::MissingLanguage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_item() {
        let err = StoreError::LevelOutOfRange {
            item: "hello".into(),
            level: 7,
        };
        assert_eq!(err.to_string(), "level 7 out of range for 'hello' (max 5)");
        assert!(err.is_content_error());

        let err = StoreError::ItemNotFound(IdentityKey::new("english", "spanish", "hi", "hola"));
        assert_eq!(err.to_string(), "item not found: english|spanish|hi|hola");
        assert!(!err.is_content_error());
    }
}
