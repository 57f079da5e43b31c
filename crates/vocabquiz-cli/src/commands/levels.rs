//! The `vocabquiz levels` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use vocabquiz_core::config::load_config_from;
use vocabquiz_core::deck::parse_deck;
use vocabquiz_core::model::{VocabularyItem, MAX_LEVEL};

#[derive(Debug, Serialize)]
struct LevelCount {
    level: u8,
    items: usize,
}

fn count_levels(items: &[VocabularyItem]) -> Vec<LevelCount> {
    (0..=MAX_LEVEL)
        .map(|level| LevelCount {
            level,
            items: items.iter().filter(|item| item.level() == level).count(),
        })
        .collect()
}

pub fn execute(
    deck_path: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deck_path = super::resolve_deck(deck_path, &config)?;
    let deck = parse_deck(&deck_path)?;
    let counts = count_levels(&deck.items);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        _ => {
            use comfy_table::{Cell, Table};

            let mut table = Table::new();
            table.set_header(vec!["Level", "Items"]);
            for count in &counts {
                table.add_row(vec![Cell::new(count.level), Cell::new(count.items)]);
            }

            println!("Deck: {} ({} items)", deck.name, deck.items.len());
            println!("{table}");
        }
    }

    Ok(())
}
