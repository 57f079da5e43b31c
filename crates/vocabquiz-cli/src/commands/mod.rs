pub mod import;
pub mod init;
pub mod levels;
pub mod list;
pub mod quiz;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use vocabquiz_core::config::QuizConfig;

/// Deck given on the command line, else the one from the config.
pub(crate) fn resolve_deck(arg: Option<PathBuf>, config: &QuizConfig) -> Result<PathBuf> {
    arg.or_else(|| config.deck.clone()).ok_or_else(|| {
        anyhow::anyhow!("no deck given; pass --deck or set `deck` in vocabquiz.toml")
    })
}
