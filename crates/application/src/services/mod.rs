//! Application services

pub mod exercise_session;

pub use exercise_session::ExerciseSession;
