//! The `vocabquiz import` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use vocabquiz_core::deck::parse_deck;

pub fn execute(from: PathBuf, into: PathBuf) -> Result<()> {
    let source = parse_deck(&from)?;
    let mut target = parse_deck(&into)?;

    let added = target.merge(source.items.iter().map(|item| item.key().clone()));
    let skipped = source.items.len() - added;

    if added > 0 {
        target.touch();
        target
            .save(&into)
            .with_context(|| format!("failed to update deck: {}", into.display()))?;
    }

    println!(
        "Imported {added} new item(s) from '{}' into '{}' ({skipped} already present).",
        source.name, target.name
    );

    Ok(())
}
