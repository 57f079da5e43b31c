//! Quiz selection engine.
//!
//! Pure functions over a caller-owned item pool. Every random draw goes
//! through the injected RNG, so a seeded generator makes a run reproducible.
//! Degenerate inputs never fail: too small a pool yields [`QuizState::Idle`]
//! and misplaced calls are no-ops.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{LevelFilter, VocabularyItem};

/// Number of answer options shown per question, the correct one included.
pub const NUM_ANSWERS: usize = 4;

/// Where the quiz currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizState {
    /// No question on screen.
    #[default]
    Idle,
    /// A question is being asked.
    Active {
        /// Pool index of the item being asked.
        question_index: usize,
        /// [`NUM_ANSWERS`] distinct pool indexes in display order.
        answer_indexes: Vec<usize>,
        /// The user's pick, once made.
        selected_index: Option<usize>,
    },
}

impl QuizState {
    pub fn is_active(&self) -> bool {
        matches!(self, QuizState::Active { .. })
    }

    /// Pool index of the current question, if any.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            QuizState::Active { question_index, .. } => Some(*question_index),
            QuizState::Idle => None,
        }
    }

    /// Answer options in display order. Empty when idle.
    pub fn answer_indexes(&self) -> &[usize] {
        match self {
            QuizState::Active { answer_indexes, .. } => answer_indexes,
            QuizState::Idle => &[],
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            QuizState::Active { selected_index, .. } => *selected_index,
            QuizState::Idle => None,
        }
    }

    /// `Some(true)` once the question was answered correctly, `Some(false)`
    /// when answered wrong, `None` while unanswered or idle.
    pub fn answered_correctly(&self) -> Option<bool> {
        match self {
            QuizState::Active {
                question_index,
                selected_index: Some(selected),
                ..
            } => Some(selected == question_index),
            _ => None,
        }
    }
}

/// Draw a new question from `pool`.
///
/// With a level filter, the question comes from the items at that level; if
/// there are none, the filter is ignored for this draw.
pub fn select_question<R: Rng>(
    pool: &[VocabularyItem],
    filter: LevelFilter,
    rng: &mut R,
) -> QuizState {
    if pool.len() < NUM_ANSWERS {
        tracing::debug!(pool_size = pool.len(), "pool too small for a question");
        return QuizState::Idle;
    }

    let eligible: Vec<usize> = match filter {
        Some(level) => pool
            .iter()
            .enumerate()
            .filter(|(_, item)| item.level() == level)
            .map(|(i, _)| i)
            .collect(),
        None => Vec::new(),
    };

    let question_index = if eligible.is_empty() {
        if let Some(level) = filter {
            tracing::debug!(level, "no items at filtered level, drawing from full pool");
        }
        rng.random_range(0..pool.len())
    } else {
        let picked = &pool[eligible[rng.random_range(0..eligible.len())]];
        // Resolve to the first item sharing the picked item's key.
        pool.iter()
            .position(|item| item.is_same_item(picked))
            .unwrap_or(eligible[0])
    };

    tracing::debug!(question_index, ?filter, "selected question");
    active_with_answers(pool.len(), question_index, rng)
}

/// Ask about a specific item instead of a random one.
///
/// The item is looked up by identity key. When it is not in `pool`, `current`
/// is returned unchanged.
pub fn request_question<R: Rng>(
    pool: &[VocabularyItem],
    item: &VocabularyItem,
    current: &QuizState,
    rng: &mut R,
) -> QuizState {
    let Some(question_index) = pool.iter().position(|candidate| candidate.is_same_item(item))
    else {
        tracing::warn!(item = %item.key(), "requested item is not in the pool");
        return current.clone();
    };

    if pool.len() < NUM_ANSWERS {
        tracing::debug!(pool_size = pool.len(), "pool too small for a question");
        return QuizState::Idle;
    }

    tracing::debug!(question_index, "requested question");
    active_with_answers(pool.len(), question_index, rng)
}

/// Record the user's pick for the active question.
///
/// A correct pick raises the question item's level by one, a wrong pick
/// lowers it by one, both clamped to `0..=MAX_LEVEL`. Idle or already
/// answered states are returned unchanged and leave `pool` untouched.
pub fn record_answer(
    state: &QuizState,
    selected_index: usize,
    pool: &mut [VocabularyItem],
) -> QuizState {
    let QuizState::Active {
        question_index,
        answer_indexes,
        selected_index: None,
    } = state
    else {
        return state.clone();
    };

    let Some(item) = pool.get_mut(*question_index) else {
        tracing::warn!(
            question_index,
            pool_size = pool.len(),
            "question index is outside the pool, ignoring answer"
        );
        return state.clone();
    };

    let before = item.level();
    if selected_index == *question_index {
        item.increase_level();
    } else {
        item.decrease_level();
    }
    tracing::debug!(
        item = %item.key(),
        correct = selected_index == *question_index,
        from = before,
        to = item.level(),
        "recorded answer"
    );

    QuizState::Active {
        question_index: *question_index,
        answer_indexes: answer_indexes.clone(),
        selected_index: Some(selected_index),
    }
}

/// Distinct mastery levels present in `pool`.
pub fn available_levels(pool: &[VocabularyItem]) -> BTreeSet<u8> {
    pool.iter().map(VocabularyItem::level).collect()
}

/// Drop a level filter that no longer matches any item.
pub fn clear_filter_if_exhausted(filter: LevelFilter, pool: &[VocabularyItem]) -> LevelFilter {
    match filter {
        Some(level) if !pool.iter().any(|item| item.level() == level) => {
            tracing::debug!(level, "level filter exhausted, clearing");
            None
        }
        other => other,
    }
}

fn active_with_answers<R: Rng>(pool_len: usize, question_index: usize, rng: &mut R) -> QuizState {
    let mut answers = BTreeSet::from([question_index]);
    while answers.len() < NUM_ANSWERS {
        answers.insert(rng.random_range(0..pool_len));
    }

    let mut answer_indexes: Vec<usize> = answers.into_iter().collect();
    answer_indexes.shuffle(rng);

    QuizState::Active {
        question_index,
        answer_indexes,
        selected_index: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_LEVEL;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_with_levels(levels: &[u8]) -> Vec<VocabularyItem> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| {
                VocabularyItem::pair("english", "spanish", format!("word{i}"), format!("palabra{i}"))
                    .with_level(level)
            })
            .collect()
    }

    fn assert_valid_active(state: &QuizState, pool_len: usize) {
        let QuizState::Active {
            question_index,
            answer_indexes,
            selected_index,
        } = state
        else {
            panic!("expected an active state, got {state:?}");
        };
        assert!(*question_index < pool_len);
        assert_eq!(answer_indexes.len(), NUM_ANSWERS);
        assert_eq!(
            answer_indexes.iter().filter(|&&i| i == *question_index).count(),
            1
        );
        let distinct: BTreeSet<_> = answer_indexes.iter().collect();
        assert_eq!(distinct.len(), NUM_ANSWERS);
        assert!(answer_indexes.iter().all(|&i| i < pool_len));
        assert_eq!(*selected_index, None);
    }

    #[test]
    fn small_pool_is_idle_for_any_filter() {
        let mut rng = StdRng::seed_from_u64(1);
        for len in 0..NUM_ANSWERS {
            let pool = pool_with_levels(&vec![0; len]);
            for filter in [None, Some(0), Some(3), Some(MAX_LEVEL)] {
                assert_eq!(select_question(&pool, filter, &mut rng), QuizState::Idle);
            }
        }
    }

    #[test]
    fn large_pool_gives_valid_answers() {
        let pool = pool_with_levels(&[0, 1, 2, 3, 4, 5, 1, 1, 2, 0]);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for filter in [None, Some(0), Some(1), Some(5), Some(3)] {
                let state = select_question(&pool, filter, &mut rng);
                assert_valid_active(&state, pool.len());
            }
        }
    }

    #[test]
    fn four_items_give_permutation() {
        let pool = pool_with_levels(&[0, 0, 0, 0]);
        let mut rng = StdRng::seed_from_u64(7);
        let state = select_question(&pool, None, &mut rng);
        assert_valid_active(&state, 4);

        let mut sorted = state.answer_indexes().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn filter_restricts_question_level() {
        let pool = pool_with_levels(&[0, 0, 0, 3, 0, 0]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = select_question(&pool, Some(3), &mut rng);
            assert_eq!(state.question_index(), Some(3));
        }
    }

    #[test]
    fn empty_filter_falls_back_to_full_pool() {
        let pool = pool_with_levels(&[0, 1, 1, 0, 1]);
        let mut seen = BTreeSet::new();
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = select_question(&pool, Some(4), &mut rng);
            assert_valid_active(&state, pool.len());
            seen.insert(state.question_index().unwrap());
        }
        assert!(seen.len() > 1, "fallback should draw from the whole pool");
    }

    #[test]
    fn filtered_pick_resolves_to_first_matching_key() {
        let mut pool = pool_with_levels(&[0, 0, 0, 0]);
        // Same key as pool[1], but at a different level.
        pool.push(VocabularyItem::pair("english", "spanish", "word1", "palabra1").with_level(2));
        let mut rng = StdRng::seed_from_u64(3);
        let state = select_question(&pool, Some(2), &mut rng);
        assert_eq!(state.question_index(), Some(1));
    }

    #[test]
    fn answer_levels_clamp() {
        for level in 0..=MAX_LEVEL {
            let mut pool = pool_with_levels(&[level, 0, 0, 0]);
            let state = QuizState::Active {
                question_index: 0,
                answer_indexes: vec![2, 0, 3, 1],
                selected_index: None,
            };
            record_answer(&state, 0, &mut pool);
            assert_eq!(pool[0].level(), (level + 1).min(MAX_LEVEL));

            let mut pool = pool_with_levels(&[level, 0, 0, 0]);
            record_answer(&state, 2, &mut pool);
            assert_eq!(pool[0].level(), level.saturating_sub(1));
        }
    }

    #[test]
    fn correct_answer_at_max_stays_max() {
        let mut pool = pool_with_levels(&[MAX_LEVEL, MAX_LEVEL, MAX_LEVEL, MAX_LEVEL]);
        let mut rng = StdRng::seed_from_u64(11);
        let state = select_question(&pool, None, &mut rng);
        let question = state.question_index().unwrap();

        let answered = record_answer(&state, question, &mut pool);
        assert_eq!(pool[question].level(), MAX_LEVEL);
        assert_eq!(answered.answered_correctly(), Some(true));
    }

    #[test]
    fn second_answer_is_a_noop() {
        let mut pool = pool_with_levels(&[2, 2, 2, 2]);
        let state = QuizState::Active {
            question_index: 1,
            answer_indexes: vec![0, 1, 2, 3],
            selected_index: None,
        };

        let first = record_answer(&state, 1, &mut pool);
        assert_eq!(first.selected_index(), Some(1));
        assert_eq!(pool[1].level(), 3);

        let snapshot = pool.clone();
        let second = record_answer(&first, 0, &mut pool);
        assert_eq!(second, first);
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn answer_while_idle_is_a_noop() {
        let mut pool = pool_with_levels(&[1, 1, 1, 1]);
        let state = record_answer(&QuizState::Idle, 0, &mut pool);
        assert_eq!(state, QuizState::Idle);
        assert!(pool.iter().all(|item| item.level() == 1));
    }

    #[test]
    fn answer_against_shrunken_pool_is_a_noop() {
        let mut pool = pool_with_levels(&[1, 1]);
        let state = QuizState::Active {
            question_index: 3,
            answer_indexes: vec![0, 1, 2, 3],
            selected_index: None,
        };
        assert_eq!(record_answer(&state, 3, &mut pool), state);
    }

    #[test]
    fn request_pins_question_index() {
        let pool = pool_with_levels(&[0, 1, 2, 3, 4]);
        let wanted = VocabularyItem::pair("english", "spanish", "word2", "palabra2").with_level(5);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = request_question(&pool, &wanted, &QuizState::Idle, &mut rng);
            assert_valid_active(&state, pool.len());
            assert_eq!(state.question_index(), Some(2));
        }
    }

    #[test]
    fn request_missing_item_keeps_state() {
        let pool = pool_with_levels(&[0, 0, 0, 0]);
        let current = QuizState::Active {
            question_index: 0,
            answer_indexes: vec![3, 2, 1, 0],
            selected_index: Some(2),
        };
        let stranger = VocabularyItem::pair("german", "spanish", "hallo", "hola");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            request_question(&pool, &stranger, &current, &mut rng),
            current
        );
    }

    #[test]
    fn request_in_small_pool_is_idle() {
        let pool = pool_with_levels(&[0, 0]);
        let mut rng = StdRng::seed_from_u64(0);
        let state = request_question(&pool, &pool[1].clone(), &QuizState::Idle, &mut rng);
        assert_eq!(state, QuizState::Idle);
    }

    #[test]
    fn available_levels_are_distinct() {
        let pool = pool_with_levels(&[1, 2, 2, 3]);
        assert_eq!(available_levels(&pool), BTreeSet::from([1, 2, 3]));
        assert!(available_levels(&[]).is_empty());
    }

    #[test]
    fn exhausted_filter_clears() {
        let pool = pool_with_levels(&[1, 2, 2, 4]);
        assert_eq!(clear_filter_if_exhausted(Some(3), &pool), None);
        assert_eq!(clear_filter_if_exhausted(Some(2), &pool), Some(2));
        assert_eq!(clear_filter_if_exhausted(None, &pool), None);

        let pool = pool_with_levels(&[3]);
        assert_eq!(clear_filter_if_exhausted(Some(3), &pool), Some(3));
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let state = QuizState::Active {
            question_index: 1,
            answer_indexes: vec![1, 0, 2, 3],
            selected_index: None,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["question_index"], 1);

        let idle = serde_json::to_value(QuizState::Idle).unwrap();
        assert_eq!(idle["status"], "idle");
    }
}
