//! The `vocabquiz quiz` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use vocabquiz_core::config::load_config_from;
use vocabquiz_core::deck::DeckStore;
use vocabquiz_core::engine::{QuizState, NUM_ANSWERS};
use vocabquiz_core::launch::{LaunchAction, LaunchInbox, LaunchSource};
use vocabquiz_core::model::{IdentityKey, VocabularyItem, MAX_LEVEL};
use vocabquiz_core::session::QuizSession;
use vocabquiz_core::traits::ItemStore;

const HELP: &str = "Commands: 1-4 answer, n next, l <level> toggle level filter, m lowest level, c clear filter, q quit";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer(usize),
    Next,
    Level(u8),
    MinLevel,
    ClearLevel,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("q" | "quit"), None) => Input::Quit,
        (Some("n" | "next"), None) => Input::Next,
        (Some("m" | "min"), None) => Input::MinLevel,
        (Some("c" | "clear"), None) => Input::ClearLevel,
        (Some("l" | "level"), Some(level)) => match level.parse() {
            Ok(level) if level <= MAX_LEVEL => Input::Level(level),
            _ => Input::Unknown,
        },
        (Some(choice), None) => match choice.parse::<usize>() {
            Ok(n) if (1..=NUM_ANSWERS).contains(&n) => Input::Answer(n - 1),
            _ => Input::Unknown,
        },
        _ => Input::Unknown,
    }
}

pub fn execute(
    deck_path: Option<PathBuf>,
    level: Option<u8>,
    item: Option<String>,
    launch: Option<String>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deck_path = super::resolve_deck(deck_path, &config)?;

    let level = level.or(config.default_level);
    if let Some(level) = level {
        anyhow::ensure!(level <= MAX_LEVEL, "level must be between 0 and {MAX_LEVEL}");
    }

    let mut store = DeckStore::open(&deck_path)?;
    let mut pool = store.load_items()?;

    let rng = match seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = QuizSession::with_rng(rng).with_level_filter(level);

    let mut inbox = LaunchInbox::new();
    if item.is_some() || launch.is_some() {
        let source = launch
            .as_deref()
            .map(str::parse::<LaunchSource>)
            .transpose()
            .map_err(|e| anyhow::anyhow!("{}", e))?
            .unwrap_or(LaunchSource::QuickAction);
        let item = item
            .as_deref()
            .map(str::parse::<IdentityKey>)
            .transpose()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        inbox.deliver(LaunchAction::StartQuiz { source, item });
    }

    println!("Deck: {} ({} items)", store.name(), pool.len());
    println!("{HELP}");

    match inbox.take() {
        Some(action) => {
            let missing = match &action {
                LaunchAction::StartQuiz {
                    item: Some(key), ..
                } => !pool.iter().any(|item| item.key() == key),
                LaunchAction::StartQuiz { item: None, .. } => false,
            };
            session.handle_launch(action, &pool);
            if missing {
                println!("Requested item is not in this deck, asking a random one.");
                session.next_question(&pool);
            }
        }
        None => {
            session.next_question(&pool);
        }
    }
    print_question(&session, &pool, config.show_levels);

    let mut answered = 0u32;
    let mut correct = 0u32;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_input(&line) {
            Input::Quit => break,
            Input::Next => {
                session.next_question(&pool);
                print_question(&session, &pool, config.show_levels);
            }
            Input::Level(level) => {
                if session.is_level_available(level) {
                    session.change_level(level, &pool);
                    print_question(&session, &pool, config.show_levels);
                } else {
                    println!("No items at level {level}.");
                }
            }
            Input::MinLevel => {
                session.select_min_level(&pool);
                print_question(&session, &pool, config.show_levels);
            }
            Input::ClearLevel => {
                session.clear_level();
                println!("Level filter cleared.");
            }
            Input::Answer(position) => {
                let Some(&selected) = session.state().answer_indexes().get(position) else {
                    println!("No question to answer. Press n for a new one.");
                    continue;
                };
                match session.answer(selected, &mut pool) {
                    Some(changed) => {
                        store.save_level(&pool[changed])?;
                        answered += 1;
                        let item = &pool[changed];
                        if session.state().answered_correctly() == Some(true) {
                            correct += 1;
                            println!("Correct! (level {}/{MAX_LEVEL})", item.level());
                        } else {
                            println!(
                                "Wrong. {} = {} (level {}/{MAX_LEVEL})",
                                item.source_text(),
                                item.target_text(),
                                item.level()
                            );
                        }
                        println!("Press n for the next question.");
                    }
                    None => println!("Already answered. Press n for the next question."),
                }
            }
            Input::Unknown => println!("{HELP}"),
        }
    }

    session.finish();
    println!("Answered {answered}, correct {correct}.");
    Ok(())
}

fn print_question(session: &QuizSession<StdRng>, pool: &[VocabularyItem], show_levels: bool) {
    let QuizState::Active {
        question_index,
        answer_indexes,
        ..
    } = session.state()
    else {
        println!("Not enough items for a quiz (need at least {NUM_ANSWERS}).");
        return;
    };

    let question = &pool[*question_index];
    println!();
    if show_levels {
        println!(
            "Question: {} ({} -> {}) [level {}/{MAX_LEVEL}]",
            question.source_text(),
            question.source_language(),
            question.target_language(),
            question.level()
        );
        let levels: Vec<String> = session
            .available_levels()
            .iter()
            .map(|l| {
                if session.level_filter() == Some(*l) {
                    format!("[{l}]")
                } else {
                    l.to_string()
                }
            })
            .collect();
        println!("Levels: {}", levels.join(" "));
    } else {
        println!(
            "Question: {} ({} -> {})",
            question.source_text(),
            question.source_language(),
            question.target_language()
        );
    }
    for (n, &index) in answer_indexes.iter().enumerate() {
        println!("  {}) {}", n + 1, pool[index].target_text());
    }
}
