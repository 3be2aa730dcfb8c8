//! Exercise session service
//!
//! One pronunciation run: prompt each word aloud, capture or accept an
//! answer, verify it phonetically, score and advance. Pacing lives here
//! too: a short pause after a correct answer so the learner sees the
//! feedback, a longer one after a miss.
//!
//! At most one prompt/verify cycle runs at a time; the state mutex is
//! taken with `try_lock` and held across the feedback delay, so a
//! concurrent `advance()` or `submit_answer()` is rejected with
//! `CycleInFlight` instead of queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use domain::phonetics::{MatchTolerance, PhoneticMatcher};
use domain::{MatchKind, SessionState, VoiceProfile, Word};
use speech::{RecognitionAttempt, SpeechError, SpeechRecognizer, SpeechSynthesizer};

use crate::error::ApplicationError;

/// What happens to a missed word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// The word is gone after one miss
    DropOnMiss,
    /// The word returns at the back of the queue for another try
    #[default]
    RequeueOnMiss,
}

/// Session pacing and matching configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Policy applied to missed words
    #[serde(default)]
    pub retry_policy: RetryPolicy,
    /// Feedback pause after a correct answer
    #[serde(default = "default_correct_delay_ms")]
    pub correct_delay_ms: u64,
    /// Feedback pause after a miss, longer so the learner can re-read
    #[serde(default = "default_incorrect_delay_ms")]
    pub incorrect_delay_ms: u64,
    /// Matcher thresholds
    #[serde(default)]
    pub tolerance: MatchTolerance,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retry_policy: RetryPolicy::default(),
            correct_delay_ms: default_correct_delay_ms(),
            incorrect_delay_ms: default_incorrect_delay_ms(),
            tolerance: MatchTolerance::default(),
        }
    }
}

const fn default_correct_delay_ms() -> u64 {
    1_000
}

const fn default_incorrect_delay_ms() -> u64 {
    2_000
}

/// Result of one verified answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Accepted; the session has advanced to `next`
    Correct {
        /// How the answer matched
        kind: MatchKind,
        /// The next prompted word, `None` when the queue is exhausted
        next: Option<Word>,
    },
    /// Rejected; the retry policy was applied and the session advanced
    Incorrect {
        /// The next prompted word, `None` when the queue is exhausted
        next: Option<Word>,
    },
}

/// Result of one listening attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// A usable hypothesis; feed it to `submit_answer`
    Heard(RecognitionAttempt),
    /// Nothing usable was captured; prompt the learner to try again
    ///
    /// Never affects the score.
    TryAgain,
}

/// Final results of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Correct answers
    pub score: u32,
    /// Total answers submitted
    pub total_attempts: u32,
    /// `round(score / total_attempts * 100)`, zero without attempts
    pub percentage: u32,
    /// Correct answers matched exactly
    pub exact_matches: u32,
    /// Correct answers accepted through the homophone table
    pub phonetic_matches: u32,
    /// Correct answers accepted within the edit-distance bound
    pub edit_distance_matches: u32,
}

/// Orchestrates one exercise run over the speech pipeline
pub struct ExerciseSession {
    synthesizer: Arc<SpeechSynthesizer>,
    recognizer: Arc<SpeechRecognizer>,
    matcher: PhoneticMatcher,
    profile: VoiceProfile,
    config: SessionConfig,
    state: Mutex<SessionState>,
    finished: AtomicBool,
}

impl std::fmt::Debug for ExerciseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseSession")
            .field("profile", &self.profile.id)
            .field("config", &self.config)
            .field("finished", &self.finished.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ExerciseSession {
    /// Start a session over a caller-filtered word list
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::EmptyWordList` when there is nothing to
    /// practice.
    pub fn start(
        synthesizer: Arc<SpeechSynthesizer>,
        recognizer: Arc<SpeechRecognizer>,
        profile: VoiceProfile,
        config: SessionConfig,
        words: Vec<Word>,
    ) -> Result<Self, ApplicationError> {
        let state = SessionState::new(words).map_err(|e| match e {
            domain::DomainError::EmptyWordList => ApplicationError::EmptyWordList,
            other => ApplicationError::Domain(other),
        })?;

        info!(remaining = state.remaining(), voice = %profile.id, "exercise session started");
        Ok(Self {
            synthesizer,
            recognizer,
            matcher: PhoneticMatcher::with_tolerance(config.tolerance),
            profile,
            config,
            state: Mutex::new(state),
            finished: AtomicBool::new(false),
        })
    }

    /// Prompt the next word aloud and make it current
    ///
    /// Returns `None` when the queue is exhausted. Synthesis failures are
    /// logged and swallowed; the word is still presented.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::CycleInFlight` when a cycle is pending
    /// - `ApplicationError::SessionFinished` after `finish()`
    #[instrument(skip(self))]
    pub async fn advance(&self) -> Result<Option<Word>, ApplicationError> {
        self.ensure_active()?;
        let mut state = self.try_cycle()?;
        Ok(self.advance_locked(&mut state).await)
    }

    /// Capture one spoken answer
    ///
    /// Recognition failures never penalize the learner: every error except
    /// a concurrent-capture rejection becomes `ListenOutcome::TryAgain`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::CycleInFlight` when a capture is pending
    /// - `ApplicationError::SessionFinished` after `finish()`
    #[instrument(skip(self))]
    pub async fn listen_for_answer(&self) -> Result<ListenOutcome, ApplicationError> {
        self.ensure_active()?;

        match self.recognizer.listen().await {
            Ok(attempt) if attempt.is_empty() => {
                debug!("empty hypothesis, asking the learner to try again");
                Ok(ListenOutcome::TryAgain)
            },
            Ok(attempt) => Ok(ListenOutcome::Heard(attempt)),
            Err(SpeechError::AlreadyCapturing) => Err(ApplicationError::CycleInFlight),
            Err(e) => {
                warn!(error = %e, "recognition failed, asking the learner to try again");
                Ok(ListenOutcome::TryAgain)
            },
        }
    }

    /// Verify one answer against the current word
    ///
    /// Spoken hypotheses and typed input come through the same path. On a
    /// match the word is completed; on a miss the retry policy is applied.
    /// Either way the session pauses for the feedback delay and then
    /// prompts the next word.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::CycleInFlight` when a cycle is pending
    /// - `ApplicationError::SessionFinished` after `finish()`
    /// - `ApplicationError::Domain` when no word is active
    #[instrument(skip(self, answer))]
    pub async fn submit_answer(&self, answer: &str) -> Result<AnswerOutcome, ApplicationError> {
        self.ensure_active()?;
        let mut state = self.try_cycle()?;

        let target = state
            .current_word()
            .ok_or(ApplicationError::Domain(domain::DomainError::NoActiveWord))?
            .text()
            .to_string();
        let outcome = self.matcher.is_match(answer, &target);

        match outcome.kind {
            Some(kind) if outcome.matched => {
                state.record_correct(answer, kind)?;
                info!(%target, ?kind, score = state.score(), "answer accepted");

                tokio::time::sleep(Duration::from_millis(self.config.correct_delay_ms)).await;
                let next = self.advance_locked(&mut state).await;
                Ok(AnswerOutcome::Correct { kind, next })
            },
            _ => {
                let missed = state.record_incorrect(answer)?;
                match self.config.retry_policy {
                    RetryPolicy::RequeueOnMiss => {
                        debug!(%target, "answer rejected, word requeued");
                        state.requeue(missed);
                    },
                    RetryPolicy::DropOnMiss => {
                        debug!(%target, "answer rejected, word dropped");
                    },
                }
                info!(%target, attempts = state.total_attempts(), "answer rejected");

                tokio::time::sleep(Duration::from_millis(self.config.incorrect_delay_ms)).await;
                let next = self.advance_locked(&mut state).await;
                Ok(AnswerOutcome::Incorrect { next })
            },
        }
    }

    /// Close the session and return the final results
    ///
    /// Idempotent; afterwards every mutating operation is rejected with
    /// `SessionFinished`.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::CycleInFlight` when a cycle is pending.
    #[instrument(skip(self))]
    pub fn finish(&self) -> Result<SessionSummary, ApplicationError> {
        let state = self.state.try_lock().map_err(|_| ApplicationError::CycleInFlight)?;
        self.finished.store(true, Ordering::SeqCst);

        let mut summary = SessionSummary {
            score: state.score(),
            total_attempts: state.total_attempts(),
            percentage: state.percentage(),
            exact_matches: 0,
            phonetic_matches: 0,
            edit_distance_matches: 0,
        };
        for attempt in state.history() {
            match attempt.match_kind() {
                Some(MatchKind::Exact) => summary.exact_matches += 1,
                Some(MatchKind::PhoneticMapping) => summary.phonetic_matches += 1,
                Some(MatchKind::EditDistance) => summary.edit_distance_matches += 1,
                None => {},
            }
        }

        info!(
            score = summary.score,
            attempts = summary.total_attempts,
            percentage = summary.percentage,
            "exercise session finished"
        );
        Ok(summary)
    }

    /// Cancel any capture in flight and stop any playing audio
    ///
    /// Called when the learner leaves or restarts the exercise; without it
    /// a stale hypothesis could resolve into a future round or the
    /// microphone stay locked.
    pub fn reset(&self) {
        debug!("session reset, cancelling capture and playback");
        self.recognizer.cancel();
        self.synthesizer.stop();
    }

    /// Whether every word has been resolved
    pub async fn is_exhausted(&self) -> bool {
        self.state.lock().await.is_exhausted()
    }

    /// Whether `finish()` was called
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<(), ApplicationError> {
        if self.is_finished() {
            return Err(ApplicationError::SessionFinished);
        }
        Ok(())
    }

    fn try_cycle(&self) -> Result<MutexGuard<'_, SessionState>, ApplicationError> {
        self.state
            .try_lock()
            .map_err(|_| ApplicationError::CycleInFlight)
    }

    async fn advance_locked(&self, state: &mut SessionState) -> Option<Word> {
        let word = state.next_word()?.clone();
        debug!(word = %word.text(), remaining = state.remaining(), "prompting next word");
        self.prompt(&word).await;
        Some(word)
    }

    /// Speak the prompt; failures are non-fatal by contract
    async fn prompt(&self, word: &Word) {
        match self.synthesizer.synthesize(word.text(), &self.profile).await {
            Ok(handle) => {
                if let Err(e) = handle.play().await {
                    warn!(error = %e, "prompt playback failed, continuing silently");
                }
            },
            Err(e) => {
                warn!(error = %e, "prompt synthesis failed, continuing silently");
            },
        }
    }
}
