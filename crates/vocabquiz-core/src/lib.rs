//! vocabquiz-core: Quiz engine, session controller, and deck storage.
//!
//! This crate defines the vocabulary data model, the multiple-choice
//! selection engine with its mastery-level bookkeeping, and the deck files
//! that the rest of vocabquiz builds on.

pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod launch;
pub mod model;
pub mod session;
pub mod traits;
