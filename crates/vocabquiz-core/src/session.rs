//! Stateful quiz session.
//!
//! [`QuizSession`] keeps what a quiz screen needs between user actions: the
//! current [`QuizState`], the level filter, and the levels that can be
//! filtered on. The pool itself stays with the caller and is passed to every
//! call.

use std::collections::BTreeSet;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::engine::{self, QuizState};
use crate::launch::LaunchAction;
use crate::model::{IdentityKey, LevelFilter, VocabularyItem};

/// A running quiz over a caller-owned pool.
#[derive(Debug)]
pub struct QuizSession<R = ThreadRng> {
    state: QuizState,
    level_filter: LevelFilter,
    available_levels: BTreeSet<u8>,
    rng: R,
}

impl QuizSession<ThreadRng> {
    /// A session drawing from the thread-local RNG.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for QuizSession<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: QuizState::Idle,
            level_filter: None,
            available_levels: BTreeSet::new(),
            rng,
        }
    }

    /// Start with a level filter already set.
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.level_filter
    }

    /// Levels present in the pool as of the last draw or answer.
    pub fn available_levels(&self) -> &BTreeSet<u8> {
        &self.available_levels
    }

    /// Whether filtering on `level` would find any item.
    pub fn is_level_available(&self, level: u8) -> bool {
        self.available_levels.contains(&level)
    }

    /// Draw a new random question, honoring the level filter.
    pub fn next_question(&mut self, pool: &[VocabularyItem]) -> &QuizState {
        self.available_levels = engine::available_levels(pool);
        self.state = engine::select_question(pool, self.level_filter, &mut self.rng);
        &self.state
    }

    /// Ask about `item` specifically. Unknown items leave the session as is.
    pub fn request(&mut self, item: &VocabularyItem, pool: &[VocabularyItem]) -> &QuizState {
        self.available_levels = engine::available_levels(pool);
        self.state = engine::request_question(pool, item, &self.state, &mut self.rng);
        &self.state
    }

    /// Like [`request`](Self::request), looking the item up by key.
    pub fn request_key(&mut self, key: &IdentityKey, pool: &[VocabularyItem]) -> &QuizState {
        self.request(&VocabularyItem::new(key.clone()), pool)
    }

    /// Record the user's pick for the current question.
    ///
    /// Returns the pool index of the item whose level changed, which the
    /// caller should persist. Returns `None` when there was nothing to score.
    pub fn answer(&mut self, selected_index: usize, pool: &mut [VocabularyItem]) -> Option<usize> {
        let next = engine::record_answer(&self.state, selected_index, pool);
        if next == self.state {
            tracing::debug!(selected_index, "answer ignored");
            return None;
        }
        self.state = next;

        self.available_levels = engine::available_levels(pool);
        let filter = engine::clear_filter_if_exhausted(self.level_filter, pool);
        if filter != self.level_filter {
            tracing::info!(
                level = ?self.level_filter,
                "no items left at filtered level, showing all levels"
            );
            self.level_filter = filter;
        }

        self.state.question_index()
    }

    /// Filter questions to `level` and draw one.
    pub fn show_level(&mut self, level: u8, pool: &[VocabularyItem]) -> &QuizState {
        self.level_filter = Some(level);
        self.next_question(pool)
    }

    /// Toggle the filter: a new level selects it, the current level clears it.
    /// Draws a new question either way.
    pub fn change_level(&mut self, level: u8, pool: &[VocabularyItem]) -> &QuizState {
        if self.level_filter == Some(level) {
            tracing::info!(level, "level filter cleared");
            self.level_filter = None;
            self.next_question(pool)
        } else {
            tracing::info!(level, "level filter set");
            self.show_level(level, pool)
        }
    }

    /// Switch to the lowest level present in the pool and draw a question.
    pub fn select_min_level(&mut self, pool: &[VocabularyItem]) -> &QuizState {
        let min_level = engine::available_levels(pool)
            .first()
            .copied()
            .unwrap_or(0);
        if self.level_filter == Some(min_level) {
            self.next_question(pool)
        } else {
            self.change_level(min_level, pool)
        }
    }

    pub fn clear_level(&mut self) {
        self.level_filter = None;
    }

    /// End the quiz: drop the filter and go idle.
    pub fn finish(&mut self) {
        self.level_filter = None;
        self.state = QuizState::Idle;
    }

    /// React to an external launch. A launch naming an item asks about that
    /// item; any other launch draws a random question.
    pub fn handle_launch(&mut self, action: LaunchAction, pool: &[VocabularyItem]) -> &QuizState {
        let LaunchAction::StartQuiz { source, item } = action;
        tracing::info!(%source, has_item = item.is_some(), "handling launch action");
        match item {
            Some(key) => self.request_key(&key, pool),
            None => self.next_question(pool),
        }
    }
}
