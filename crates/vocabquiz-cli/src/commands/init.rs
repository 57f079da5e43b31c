//! The `vocabquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create vocabquiz.toml
    if std::path::Path::new("vocabquiz.toml").exists() {
        println!("vocabquiz.toml already exists, skipping.");
    } else {
        std::fs::write("vocabquiz.toml", SAMPLE_CONFIG)?;
        println!("Created vocabquiz.toml");
    }

    // Create starter deck
    std::fs::create_dir_all("decks")?;
    let deck_path = std::path::Path::new("decks/starter.toml");
    if deck_path.exists() {
        println!("decks/starter.toml already exists, skipping.");
    } else {
        std::fs::write(deck_path, STARTER_DECK)?;
        println!("Created decks/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to decks/starter.toml");
    println!("  2. Run: vocabquiz validate --deck decks/starter.toml");
    println!("  3. Run: vocabquiz quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vocabquiz configuration

deck = "decks/starter.toml"

# Only ask items at this mastery level (0-5) when a quiz starts.
# default_level = 0

# Fixed seed for a reproducible question order.
# seed = 42

show_levels = true
"#;

const STARTER_DECK: &str = r#"[deck]
id = "starter"
name = "Starter Deck"
description = "A few everyday words to get started"
source_language = "english"
target_language = "spanish"

[[items]]
source_text = "hello"
target_text = "hola"

[[items]]
source_text = "goodbye"
target_text = "adiós"

[[items]]
source_text = "thank you"
target_text = "gracias"

[[items]]
source_text = "please"
target_text = "por favor"

[[items]]
source_text = "water"
target_text = "agua"

[[items]]
source_text = "house"
target_text = "casa"
"#;
