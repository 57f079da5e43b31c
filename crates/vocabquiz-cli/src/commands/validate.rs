//! The `vocabquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(deck_path: PathBuf) -> Result<()> {
    let decks = if deck_path.is_dir() {
        vocabquiz_core::deck::load_deck_directory(&deck_path)?
    } else {
        vec![vocabquiz_core::deck::parse_deck(&deck_path)?]
    };

    let mut total_warnings = 0;

    for deck in &decks {
        println!("Deck: {} ({} items)", deck.name, deck.items.len());

        let warnings = vocabquiz_core::deck::validate_deck(deck);
        for w in &warnings {
            let prefix = w
                .item
                .as_ref()
                .map(|item| format!("  [{item}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All decks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
