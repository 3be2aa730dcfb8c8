//! Session state entity
//!
//! Owns the word queue, attempt history and score for one exercise run.
//! Only the `ExerciseSession` service mutates this; everything here is a
//! guarded transition so the invariants cannot be bypassed.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::entities::{Attempt, Word};
use crate::errors::DomainError;
use crate::value_objects::{MatchKind, WordId};

/// Mutable state of one exercise session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    queue: VecDeque<Word>,
    current: Option<Word>,
    completed: HashSet<WordId>,
    history: Vec<Attempt>,
    score: u32,
    total_attempts: u32,
}

impl SessionState {
    /// Build session state from a caller-supplied, pre-filtered word list
    ///
    /// Minimum size and uniqueness are the content collaborator's job;
    /// only emptiness is rejected here.
    pub fn new(words: Vec<Word>) -> Result<Self, DomainError> {
        if words.is_empty() {
            return Err(DomainError::EmptyWordList);
        }
        Ok(Self {
            queue: words.into(),
            current: None,
            completed: HashSet::new(),
            history: Vec::new(),
            score: 0,
            total_attempts: 0,
        })
    }

    /// Pop the next word from the queue and make it current
    ///
    /// Returns `None` when the queue is exhausted; any previous current
    /// word must have been resolved before calling this.
    pub fn next_word(&mut self) -> Option<&Word> {
        self.current = self.queue.pop_front();
        self.current.as_ref()
    }

    /// The word currently being prompted or answered, if any
    #[must_use]
    pub const fn current_word(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    /// Record a correct answer for the current word
    ///
    /// Increments score and attempts, marks the word completed and clears
    /// the current slot.
    pub fn record_correct(
        &mut self,
        answer: impl Into<String>,
        kind: MatchKind,
    ) -> Result<(), DomainError> {
        let word = self.current.take().ok_or(DomainError::NoActiveWord)?;
        self.history.push(Attempt::correct(word.id(), answer, kind));
        self.completed.insert(word.id());
        self.score += 1;
        self.total_attempts += 1;
        Ok(())
    }

    /// Record an incorrect answer for the current word
    ///
    /// Increments attempts only and hands the missed word back so the
    /// caller can apply its retry policy (requeue or drop).
    pub fn record_incorrect(&mut self, answer: impl Into<String>) -> Result<Word, DomainError> {
        let word = self.current.take().ok_or(DomainError::NoActiveWord)?;
        self.history.push(Attempt::incorrect(word.id(), answer));
        self.total_attempts += 1;
        Ok(word)
    }

    /// Put a missed word back at the end of the queue for a later retry
    pub fn requeue(&mut self, word: Word) {
        self.queue.push_back(word);
    }

    /// Whether there is nothing left to prompt
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && self.current.is_none()
    }

    /// Number of words still waiting in the queue
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Correct answers so far
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Total answers submitted so far
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    /// Words answered correctly at least once
    #[must_use]
    pub const fn completed(&self) -> &HashSet<WordId> {
        &self.completed
    }

    /// Append-only attempt history
    #[must_use]
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// Final percentage: `round(score / total_attempts * 100)`
    ///
    /// Zero when nothing was attempted.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u32 {
        if self.total_attempts == 0 {
            return 0;
        }
        (f64::from(self.score) / f64::from(self.total_attempts) * 100.0).round() as u32
    }
}
