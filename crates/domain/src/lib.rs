//! Domain layer for Parlons
//!
//! Contains the core vocabulary of the exercise platform: words, voice
//! profiles, attempts, session state, and the pure phonetic matcher.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod phonetics;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use phonetics::{MatchOutcome, MatchTolerance, PhoneticMatcher};
pub use value_objects::*;
