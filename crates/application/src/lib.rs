//! Application layer for Parlons
//!
//! Orchestrates one pronunciation exercise: prompt a word aloud, capture
//! the learner's answer, verify it phonetically, score and advance. The
//! speech crate does the I/O, the domain crate does the state and
//! matching; this layer owns the session lifecycle and its pacing.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::ContentPort;
pub use services::exercise_session::{
    AnswerOutcome, ExerciseSession, ListenOutcome, RetryPolicy, SessionConfig, SessionSummary,
};
