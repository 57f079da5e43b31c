//! The `vocabquiz list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use vocabquiz_core::config::load_config_from;
use vocabquiz_core::deck::{parse_deck, search};
use vocabquiz_core::model::{VocabularyItem, MAX_LEVEL};

fn items_table(items: &[&VocabularyItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Source", "Target", "Languages", "Level"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.source_text()),
            Cell::new(item.target_text()),
            Cell::new(format!(
                "{} -> {}",
                item.source_language(),
                item.target_language()
            )),
            Cell::new(format!("{}/{MAX_LEVEL}", item.level())),
        ]);
    }
    table
}

pub fn execute(
    deck_path: Option<PathBuf>,
    query: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deck_path = super::resolve_deck(deck_path, &config)?;
    let deck = parse_deck(&deck_path)?;

    if deck.items.is_empty() {
        println!("Deck '{}' has no items.", deck.name);
        return Ok(());
    }

    let found = search(&deck.items, query.as_deref().unwrap_or_default());
    if found.is_empty() {
        println!(
            "No items in '{}' match '{}'.",
            deck.name,
            query.unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Deck: {} ({} of {} items)",
        deck.name,
        found.len(),
        deck.items.len()
    );
    println!("{}", items_table(&found));

    Ok(())
}
